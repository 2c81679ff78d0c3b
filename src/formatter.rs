//! Formatters - caller-supplied value → text conversions
//!
//! A `Formatter` wraps any `Fn(&Value)` closure behind an `Arc` so the same
//! formatter can be bound to several indices or context entries cheaply.
//! Non-text return values are coerced through `Display`.
//!
//! Also hosts the built-in registry (`upper`, `lower`, `trim`, `json`,
//! `inspect`, `len`) used by config files and the CLI.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::value::{display_value, inspect};

/// Error raised by a formatter. Surfaced to the caller unchanged.
pub type FormatError = Box<dyn std::error::Error + Send + Sync>;

type FormatFn = dyn Fn(&Value) -> Result<String, FormatError> + Send + Sync;

/// Shared, cloneable formatter callback
#[derive(Clone)]
pub struct Formatter(Arc<FormatFn>);

impl Formatter {
    /// Infallible formatter; the return value is converted with `to_string()`
    ///
    /// Example: `Formatter::new(|v| v.as_f64().unwrap_or(0.0) * 2.0)` renders `4` for `2`
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn(&Value) -> T + Send + Sync + 'static,
        T: fmt::Display,
    {
        Self(Arc::new(move |value| Ok(f(value).to_string())))
    }

    /// Fallible formatter; the error is boxed and propagated as-is
    pub fn try_new<F, T, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<T, E> + Send + Sync + 'static,
        T: fmt::Display,
        E: Into<FormatError>,
    {
        Self(Arc::new(move |value| {
            f(value).map(|out| out.to_string()).map_err(Into::into)
        }))
    }

    /// Invoke the formatter on a value
    #[inline]
    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

fn length_of(value: &Value) -> Result<usize, FormatError> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        Value::Object(map) => Ok(map.len()),
        other => Err(format!("len: expected string, array or object, got {}", display_value(other)).into()),
    }
}

static BUILTINS: Lazy<FxHashMap<&'static str, Formatter>> = Lazy::new(|| {
    let mut map: FxHashMap<&'static str, Formatter> = FxHashMap::default();
    map.insert("upper", Formatter::new(|v| display_value(v).to_uppercase()));
    map.insert("lower", Formatter::new(|v| display_value(v).to_lowercase()));
    map.insert("trim", Formatter::new(|v| display_value(v).trim().to_string()));
    map.insert("json", Formatter::new(|v: &Value| v.to_string()));
    map.insert("inspect", Formatter::new(inspect));
    map.insert("len", Formatter::try_new(length_of));
    map
});

/// Look up a built-in formatter by name
pub fn builtin(name: &str) -> Option<Formatter> {
    BUILTINS.get(name).cloned()
}

/// Names of all built-in formatters, sorted
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTINS.keys().copied().collect();
    names.sort_unstable();
    names
}
