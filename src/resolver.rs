//! Value resolution - placeholder → (value, formatter)
//!
//! Positional and named spaces never mix: `$N` only sees `args` and
//! `formatters`, `$name` only sees the context.

use serde_json::Value;

use crate::config::{MissingPositional, SubstituteOptions};
use crate::context::Context;
use crate::error::{Result, SigilError};
use crate::formatter::Formatter;
use crate::scanner::{Placeholder, PlaceholderKind};
use crate::value::display_optional;

/// A looked-up placeholder, ready to render
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// `None` only for an out-of-range index in `undefined` mode
    pub value: Option<&'a Value>,
    pub formatter: Option<&'a Formatter>,
}

impl Resolved<'_> {
    /// Apply the formatter, or the default stringifier when there is none
    pub fn render(&self) -> Result<String> {
        match (self.value, self.formatter) {
            (Some(value), Some(formatter)) => formatter.format(value).map_err(SigilError::Formatter),
            (value, _) => Ok(display_optional(value)),
        }
    }
}

/// Borrowed view over one call's inputs
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    args: &'a [Value],
    context: Option<&'a Context>,
    formatters: &'a [Option<Formatter>],
    options: &'a SubstituteOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(
        args: &'a [Value],
        context: Option<&'a Context>,
        formatters: &'a [Option<Formatter>],
        options: &'a SubstituteOptions,
    ) -> Self {
        Self {
            args,
            context,
            formatters,
            options,
        }
    }

    pub fn resolve(&self, placeholder: &Placeholder<'_>) -> Result<Resolved<'a>> {
        match placeholder.kind {
            PlaceholderKind::Positional => self.resolve_positional(placeholder),
            PlaceholderKind::Named => self.resolve_named(placeholder),
        }
    }

    fn resolve_positional(&self, placeholder: &Placeholder<'_>) -> Result<Resolved<'a>> {
        let index = placeholder.index();
        match index.and_then(|i| self.args.get(i).map(|value| (i, value))) {
            Some((i, value)) => Ok(Resolved {
                value: Some(value),
                // Missing slot and out-of-range slot are the same: no formatter
                formatter: self.formatters.get(i).and_then(Option::as_ref),
            }),
            None => match self.options.missing_positional {
                MissingPositional::Undefined => Ok(Resolved {
                    value: None,
                    formatter: None,
                }),
                MissingPositional::Error => Err(SigilError::MissingArgument {
                    offset: placeholder.offset,
                    placeholder: placeholder.text(),
                    index,
                    available: self.args.len(),
                }),
            },
        }
    }

    fn resolve_named(&self, placeholder: &Placeholder<'_>) -> Result<Resolved<'a>> {
        let entry = self
            .context
            .and_then(|ctx| ctx.get(placeholder.identifier))
            .ok_or_else(|| SigilError::MissingParameter {
                offset: placeholder.offset,
                placeholder: placeholder.text(),
            })?;

        Ok(Resolved {
            value: Some(&entry.value),
            formatter: entry.formatter.as_ref(),
        })
    }
}
