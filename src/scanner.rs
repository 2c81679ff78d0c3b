//! Placeholder scanner - single left-to-right pass over the template
//!
//! Syntax:
//! - `$12`   positional (maximal digit run, so index 12 not `$1` + `2`)
//! - `$name` named (`[A-Za-z_][A-Za-z0-9_]*`, case-sensitive)
//! - any other `$` is literal text
//!
//! Tokens borrow from the template; literals are byte ranges into it.

use std::fmt;
use std::ops::Range;

/// Which address space a placeholder resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Positional,
    Named,
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderKind::Positional => write!(f, "positional"),
            PlaceholderKind::Named => write!(f, "named"),
        }
    }
}

/// A `$`-introduced reference found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub kind: PlaceholderKind,
    /// Digits or identifier, without the `$`
    pub identifier: &'a str,
    /// Char index of the introducing `$`
    pub offset: usize,
    /// Byte range of `$identifier` in the template
    pub span: Range<usize>,
}

impl Placeholder<'_> {
    /// Source text exactly as written, `$` included
    pub fn text(&self) -> String {
        format!("${}", self.identifier)
    }

    /// Positional index, `None` for named placeholders or digit runs overflowing `usize`
    pub fn index(&self) -> Option<usize> {
        match self.kind {
            PlaceholderKind::Positional => self.identifier.parse().ok(),
            PlaceholderKind::Named => None,
        }
    }
}

/// Token representing a scanned template fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text (stores range in original string)
    Literal(Range<usize>),
    Placeholder(Placeholder<'a>),
}

/// Split a template into literal runs and placeholders
pub fn scan(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    // char offset of byte position `pos`, tracked incrementally
    let mut chars_before = 0;
    let mut counted_to = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'$' {
            pos += 1;
            continue;
        }

        let ident_start = pos + 1;
        let (kind, ident_end) = match bytes.get(ident_start) {
            Some(b) if b.is_ascii_digit() => (
                PlaceholderKind::Positional,
                run_end(bytes, ident_start, |b| b.is_ascii_digit()),
            ),
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' => (
                PlaceholderKind::Named,
                run_end(bytes, ident_start, |b| b.is_ascii_alphanumeric() || b == b'_'),
            ),
            // Bare `$`: stays in the current literal
            _ => {
                pos += 1;
                continue;
            }
        };

        if pos > literal_start {
            tokens.push(Token::Literal(literal_start..pos));
        }

        chars_before += template[counted_to..pos].chars().count();
        counted_to = pos;

        tokens.push(Token::Placeholder(Placeholder {
            kind,
            identifier: &template[ident_start..ident_end],
            offset: chars_before,
            span: pos..ident_end,
        }));

        pos = ident_end;
        literal_start = ident_end;
    }

    if literal_start < template.len() {
        tokens.push(Token::Literal(literal_start..template.len()));
    }

    tokens
}

/// Byte index where a run of matching ASCII bytes ends
fn run_end(bytes: &[u8], start: usize, accept: impl Fn(u8) -> bool) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !accept(*b))
        .map_or(bytes.len(), |n| start + n)
}

/// Extract all placeholders from a template in scan order (for static validation)
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    scan(template)
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(p) => Some(p),
            Token::Literal(_) => None,
        })
        .collect()
}
