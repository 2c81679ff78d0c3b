//! Default stringifier for values that have no formatter
//!
//! Top-level strings pass through unquoted. Everything else renders on one
//! line in the inspector style: `{ key: 'value' }`, `[ 1, 2, 3 ]`, with the
//! same rules applied at every nesting depth.

use serde_json::{Number, Value};

/// Text of an absent value (out-of-range index in `undefined` mode)
pub const UNDEFINED: &str = "undefined";

/// Render a value for substitution (strings unquoted)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect(other),
    }
}

/// Render a possibly-absent value; `None` is `undefined`
pub fn display_optional(value: Option<&Value>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), display_value)
}

/// Render a value the way it appears nested inside a structure (strings quoted)
pub fn inspect(value: &Value) -> String {
    let mut out = String::new();
    write_inspect(&mut out, value);
    out
}

fn write_inspect(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&number_text(n)),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inspect(out, item);
            }
            out.push_str(" ]");
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if is_plain_key(key) {
                    out.push_str(key);
                } else {
                    write_quoted(out, key);
                }
                out.push_str(": ");
                write_inspect(out, item);
            }
            out.push_str(" }");
        }
    }
}

/// Keys that can be printed bare: `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quote with `'`, falling back to `"` then `` ` `` when the text contains the quote
fn write_quoted(out: &mut String, s: &str) {
    let quote = if !s.contains('\'') {
        '\''
    } else if !s.contains('"') {
        '"'
    } else if !s.contains('`') {
        '`'
    } else {
        '\''
    };

    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Canonical decimal text: integral floats drop the fraction, extremes use exponents
pub fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };

    let abs = f.abs();
    if abs >= 1e21 || (abs != 0.0 && abs < 1e-6) {
        let text = format!("{:e}", f);
        // Rust prints `1e21`; the canonical form signs positive exponents
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}
