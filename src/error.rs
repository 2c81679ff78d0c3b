// The #[error] attribute from thiserror uses struct fields via string interpolation,
// but Rust's unused_assignments lint doesn't recognize this.
#![allow(unused_assignments)]

//! Sigil error types
//!
//! One engine-defined failure per address space (named, positional), a
//! transparent pass-through for caller formatter failures, and a config
//! error for option files. Every variant carries a fix suggestion.

use miette::Diagnostic;
use thiserror::Error;

use crate::formatter::FormatError;

pub type Result<T> = std::result::Result<T, SigilError>;

/// Format an argument index that may have overflowed `usize`
fn format_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => i.to_string(),
        None => "(too large)".to_string(),
    }
}

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
pub enum SigilError {
    /// A `$name` placeholder whose name is not a key of the context.
    #[error(
        "Missing parameter for placeholder at position {offset}: \"{placeholder}\". Parameter not found in context."
    )]
    #[diagnostic(code(sigil::missing_parameter))]
    MissingParameter { offset: usize, placeholder: String },

    /// A `$N` placeholder whose index is past the end of the argument list.
    #[error(
        "Missing argument for placeholder at position {offset}: \"{placeholder}\". Index {} is out of range ({available} argument(s) supplied).",
        format_index(.index)
    )]
    #[diagnostic(code(sigil::missing_argument))]
    MissingArgument {
        offset: usize,
        placeholder: String,
        /// `None` when the digit run does not fit in `usize`
        index: Option<usize>,
        available: usize,
    },

    /// Raised by a caller-supplied formatter, surfaced unchanged.
    #[error(transparent)]
    Formatter(FormatError),

    #[error("Invalid configuration: {reason}")]
    #[diagnostic(code(sigil::config))]
    Config { reason: String },
}

impl SigilError {
    /// Source offset (in chars) of the placeholder that failed to resolve
    pub fn offset(&self) -> Option<usize> {
        match self {
            SigilError::MissingParameter { offset, .. }
            | SigilError::MissingArgument { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Placeholder text exactly as written in the template (`$name`, `$3`)
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            SigilError::MissingParameter { placeholder, .. }
            | SigilError::MissingArgument { placeholder, .. } => Some(placeholder),
            _ => None,
        }
    }

    /// Recover the error a formatter returned, for downcasting to the caller's type.
    pub fn into_formatter_error(self) -> std::result::Result<FormatError, Self> {
        match self {
            SigilError::Formatter(err) => Ok(err),
            other => Err(other),
        }
    }
}

impl FixSuggestion for SigilError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SigilError::MissingParameter { .. } => {
                Some("Add the name to the context, or escape the '$' if it is literal text")
            }
            SigilError::MissingArgument { .. } => {
                Some("Pass one argument per positional placeholder; indices start at $0")
            }
            SigilError::Formatter(_) => None,
            SigilError::Config { .. } => {
                Some("Check the config file: missing_positional must be 'error' or 'undefined'")
            }
        }
    }
}
