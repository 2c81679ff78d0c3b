//! Named context - name → (value, optional formatter)

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::formatter::Formatter;

/// One named parameter
#[derive(Debug, Clone)]
pub struct ContextEntry {
    pub value: Value,
    pub formatter: Option<Formatter>,
}

impl ContextEntry {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Name-keyed parameters for `$name` placeholders
///
/// Lookups are exact and case-sensitive. Entry order never affects output.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: FxHashMap<String, ContextEntry>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), ContextEntry::new(value));
    }

    /// Set a value rendered through `formatter`
    pub fn set_formatted(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        formatter: Formatter,
    ) {
        self.entries
            .insert(name.into(), ContextEntry::new(value).with_formatter(formatter));
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: ContextEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Builder-style `set`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContextEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ContextEntry> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a context of plain values from a JSON/YAML object
impl TryFrom<Value> for Context {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Context::new(), |ctx, (k, v)| ctx.with(k, v))
    }
}
