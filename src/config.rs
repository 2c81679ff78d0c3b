//! Substitution options
//!
//! Defaults are strict. Options can be loaded from a YAML (or JSON) file:
//!
//! ```yaml
//! missing_positional: undefined   # or: error (default)
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigilError};

/// What to do with `$N` when fewer than `N + 1` arguments were supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPositional {
    /// Fail with `SigilError::MissingArgument`
    #[default]
    Error,
    /// Render `undefined`; the formatter at that index is skipped
    Undefined,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstituteOptions {
    pub missing_positional: MissingPositional,
}

impl SubstituteOptions {
    /// Lenient positional handling
    pub fn lenient() -> Self {
        Self {
            missing_positional: MissingPositional::Undefined,
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SigilError::Config {
            reason: format!("Failed to parse options: {}", e),
        })
    }

    /// Load options from a file
    ///
    /// Returns error if the file is missing or malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SigilError::Config {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }
}
