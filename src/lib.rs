//! Sigil - `$`-placeholder substitution
//!
//! Templates mix positional (`$0`, `$1`, …) and named (`$identifier`)
//! placeholders. Positional ones read an argument list with optional
//! per-index formatters; named ones read a [`Context`] whose entries may
//! carry their own formatter. Values without a formatter go through the
//! default stringifier (`{ key: 'value' }`, `[ 1, 2, 3 ]`).
//!
//! ```
//! use serde_json::json;
//! use sigil::{substitute, Context, Formatter};
//!
//! let ctx = Context::new().with("name", "john");
//! let out = substitute("User $name logged in", &[], Some(&ctx), &[]).unwrap();
//! assert_eq!(out, "User john logged in");
//!
//! let upper = Formatter::new(|v| v.as_str().unwrap_or_default().to_uppercase());
//! let args = [json!("a"), json!("b")];
//! let out = substitute("$0/$1", &args, None, &[Some(upper)]).unwrap();
//! assert_eq!(out, "A/b");
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod resolver;
pub mod scanner;
pub mod value;

pub use config::{MissingPositional, SubstituteOptions};
pub use context::{Context, ContextEntry};
pub use engine::{substitute, substitute_with, validate_refs};
pub use error::{FixSuggestion, Result, SigilError};
pub use formatter::{FormatError, Formatter};
pub use scanner::{placeholders, scan, Placeholder, PlaceholderKind, Token};
pub use value::{display_value, inspect};
