//! Substitution engine - scan, resolve, render, assemble
//!
//! One linear pass in template order. The first failure aborts the call and
//! nothing partial is returned. Formatters run once per occurrence, in scan
//! order, with no caching between occurrences or calls.

use std::borrow::Cow;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::SubstituteOptions;
use crate::context::Context;
use crate::error::{Result, SigilError};
use crate::formatter::Formatter;
use crate::resolver::Resolver;
use crate::scanner::{placeholders, scan, PlaceholderKind, Token};

/// Substitute `$N` and `$name` placeholders with default options
///
/// Returns `Cow::Borrowed` when the template holds no placeholder.
///
/// Example: `substitute("User $name", &[], Some(&ctx), &[])` → `"User john"`
pub fn substitute<'t>(
    template: &'t str,
    args: &[Value],
    context: Option<&Context>,
    formatters: &[Option<Formatter>],
) -> Result<Cow<'t, str>> {
    substitute_with(template, args, context, formatters, &SubstituteOptions::default())
}

/// Substitute with explicit options
pub fn substitute_with<'t>(
    template: &'t str,
    args: &[Value],
    context: Option<&Context>,
    formatters: &[Option<Formatter>],
    options: &SubstituteOptions,
) -> Result<Cow<'t, str>> {
    let tokens = scan(template);

    debug!(
        template_len = template.len(),
        tokens = tokens.len(),
        args = args.len(),
        context = context.map_or(0, Context::len),
        "substituting template"
    );

    // Early return with borrowed string (zero alloc)
    if !tokens.iter().any(|t| matches!(t, Token::Placeholder(_))) {
        return Ok(Cow::Borrowed(template));
    }

    let resolver = Resolver::new(args, context, formatters, options);
    let mut result = String::with_capacity(template.len() + 64);

    for token in &tokens {
        match token {
            Token::Literal(range) => result.push_str(&template[range.clone()]),
            Token::Placeholder(placeholder) => {
                let resolved = resolver.resolve(placeholder).inspect_err(|e| {
                    debug!(offset = placeholder.offset, error = %e, "placeholder not resolved");
                })?;
                let text = resolved.render()?;
                trace!(
                    placeholder = placeholder.identifier,
                    offset = placeholder.offset,
                    formatted = resolved.formatter.is_some(),
                    "resolved placeholder"
                );
                result.push_str(&text);
            }
        }
    }

    Ok(Cow::Owned(result))
}

/// Check that every `$name` in the template exists in the context (static validation)
///
/// Reports the first missing name in scan order. Positional placeholders and
/// formatters are not looked at.
pub fn validate_refs(template: &str, context: Option<&Context>) -> Result<()> {
    for placeholder in placeholders(template) {
        if placeholder.kind != PlaceholderKind::Named {
            continue;
        }
        if !context.is_some_and(|ctx| ctx.contains(placeholder.identifier)) {
            return Err(SigilError::MissingParameter {
                offset: placeholder.offset,
                placeholder: placeholder.text(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextEntry;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn upper() -> Formatter {
        Formatter::new(|v| v.as_str().unwrap_or_default().to_uppercase())
    }

    fn lower() -> Formatter {
        Formatter::new(|v| v.as_str().unwrap_or_default().to_lowercase())
    }

    #[test]
    fn named_simple() {
        let ctx = Context::new().with("name", "john");
        let result = substitute("User $name logged in", &[], Some(&ctx), &[]).unwrap();
        assert_eq!(result, "User john logged in");
    }

    #[test]
    fn named_missing_reports_offset() {
        let err = substitute("User $name logged in", &[], Some(&Context::new()), &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing parameter for placeholder at position 5: \"$name\". Parameter not found in context."
        );
    }

    #[test]
    fn absent_and_empty_context_agree() {
        let a = substitute("$x", &[], None, &[]).unwrap_err();
        let b = substitute("$x", &[], Some(&Context::new()), &[]).unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn positional_sparse_formatters() {
        let args = vec![json!("a"), json!("b"), json!("c")];
        let formatters = vec![Some(upper()), None, Some(lower())];
        let result = substitute("Values: $0, $1, $2", &args, None, &formatters).unwrap();
        assert_eq!(result, "Values: A, b, c");
    }

    #[test]
    fn object_and_array_defaults() {
        let ctx = Context::new()
            .with("obj", json!({"key": "value"}))
            .with("arr", json!([1, 2, 3]));
        assert_eq!(substitute("Data: $obj", &[], Some(&ctx), &[]).unwrap(), "Data: { key: 'value' }");
        assert_eq!(substitute("Items: $arr", &[], Some(&ctx), &[]).unwrap(), "Items: [ 1, 2, 3 ]");
    }

    #[test]
    fn adjacent_named() {
        let ctx = Context::new().with("first", "John").with("last", "Doe");
        assert_eq!(substitute("$first$last", &[], Some(&ctx), &[]).unwrap(), "JohnDoe");
    }

    #[test]
    fn no_placeholders_is_borrowed() {
        let result = substitute("No templates here $ at all", &[json!(1)], None, &[]).unwrap();
        assert!(matches!(result, Cow::Borrowed("No templates here $ at all")));
    }

    #[test]
    fn with_placeholders_is_owned() {
        let result = substitute("$0", &[json!(1)], None, &[]).unwrap();
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn mixed_spaces() {
        let ctx = Context::new().with("who", "Ann");
        let result = substitute("$who has $0 items", &[json!(3)], Some(&ctx), &[]).unwrap();
        assert_eq!(result, "Ann has 3 items");
    }

    #[test]
    fn formatter_runs_once_per_occurrence() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut ctx = Context::new();
        ctx.insert(
            "n",
            ContextEntry::new(1).with_formatter(Formatter::new(move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                v.to_string()
            })),
        );

        let result = substitute("$n-$n-$n", &[], Some(&ctx), &[]).unwrap();
        assert_eq!(result, "1-1-1");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn formatter_error_passes_through() {
        #[derive(Debug, thiserror::Error)]
        #[error("bad value")]
        struct BadValue;

        let mut ctx = Context::new();
        ctx.set_formatted("x", 1, Formatter::try_new(|_| Err::<String, _>(BadValue)));

        let err = substitute("$x", &[], Some(&ctx), &[]).unwrap_err();
        assert_eq!(err.to_string(), "bad value");
        let inner = err.into_formatter_error().unwrap();
        assert!(inner.downcast_ref::<BadValue>().is_some());
    }

    #[test]
    fn first_missing_wins() {
        let ctx = Context::new().with("a", 1);
        let err = substitute("$a $b $c", &[], Some(&ctx), &[]).unwrap_err();
        assert_eq!(err.offset(), Some(3));
        assert_eq!(err.placeholder(), Some("$b"));
    }

    #[test]
    fn failure_stops_before_later_formatters() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut ctx = Context::new();
        ctx.set_formatted(
            "late",
            1,
            Formatter::new(move |_| counter.fetch_add(1, Ordering::SeqCst)),
        );

        assert!(substitute("$missing $late", &[], Some(&ctx), &[]).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn out_of_range_positional() {
        let err = substitute("$0 $1", &[json!("a")], None, &[]).unwrap_err();
        assert!(matches!(err, SigilError::MissingArgument { offset: 3, .. }));

        let lenient = SubstituteOptions::lenient();
        let ok = substitute_with("$0 $1", &[json!("a")], None, &[], &lenient).unwrap();
        assert_eq!(ok, "a undefined");
    }

    #[test]
    fn null_value_renders_null() {
        let ctx = Context::new().with("v", Value::Null);
        assert_eq!(substitute("[$v]", &[], Some(&ctx), &[]).unwrap(), "[null]");
    }

    #[test]
    fn validate_refs_ok_and_missing() {
        let ctx = Context::new().with("a", 1);
        assert!(validate_refs("$a and $0", Some(&ctx)).is_ok());

        let err = validate_refs("$a then $zz", Some(&ctx)).unwrap_err();
        assert_eq!(err.offset(), Some(8));
        assert!(validate_refs("$a", None).is_err());
    }
}
