//! Sigil CLI - render, scan and check `$`-placeholder templates

use std::fs;

use anyhow::{anyhow, bail, Context as _};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use sigil::formatter::{builtin, builtin_names};
use sigil::{
    placeholders, substitute_with, validate_refs, Context, FixSuggestion, Formatter, PlaceholderKind,
    SigilError, SubstituteOptions,
};

#[derive(Parser)]
#[command(name = "sigil")]
#[command(about = "Sigil - substitute $0 / $name placeholders in templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template
    Render {
        /// Template text
        template: String,

        /// Positional arguments ($0, $1, ...); JSON when valid, else plain text
        args: Vec<String>,

        /// YAML/JSON file mapping names to values
        #[arg(short, long)]
        context: Option<String>,

        /// Named value, NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Bind a built-in formatter, INDEX=NAME or PARAM=NAME (repeatable)
        #[arg(short, long = "format", value_name = "TARGET=FORMATTER")]
        format: Vec<String>,

        /// Options file (missing_positional: error | undefined)
        #[arg(long)]
        config: Option<String>,
    },

    /// List the placeholders of a template
    Scan {
        /// Template text
        template: String,
    },

    /// Check that every named placeholder has a value
    Check {
        /// Template text
        template: String,

        /// YAML/JSON file mapping names to values
        #[arg(short, long)]
        context: Option<String>,

        /// Named value, NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// List built-in formatters
    Formatters,
}

fn main() {
    // Initialize tracing (stderr, so rendered output stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            template,
            args,
            context,
            set,
            format,
            config,
        } => render(&template, &args, context.as_deref(), &set, &format, config.as_deref()),
        Commands::Scan { template } => {
            scan_template(&template);
            Ok(())
        }
        Commands::Check {
            template,
            context,
            set,
        } => check(&template, context.as_deref(), &set),
        Commands::Formatters => {
            for name in builtin_names() {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<SigilError>().and_then(|e| e.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn render(
    template: &str,
    raw_args: &[String],
    context_file: Option<&str>,
    sets: &[String],
    formats: &[String],
    config_file: Option<&str>,
) -> anyhow::Result<()> {
    let options = match config_file {
        Some(path) => SubstituteOptions::from_file(path)?,
        None => SubstituteOptions::default(),
    };

    let args: Vec<Value> = raw_args.iter().map(|a| parse_value(a)).collect();
    let mut context = load_context(context_file, sets)?;
    let formatters = bind_formatters(formats, args.len(), &mut context)?;

    let output = substitute_with(template, &args, Some(&context), &formatters, &options)?;
    println!("{}", output);
    Ok(())
}

fn scan_template(template: &str) {
    for placeholder in placeholders(template) {
        println!(
            "{}\t{}\t{}",
            placeholder.offset,
            placeholder.kind,
            placeholder.text()
        );
    }
}

fn check(template: &str, context_file: Option<&str>, sets: &[String]) -> anyhow::Result<()> {
    let context = load_context(context_file, sets)?;
    validate_refs(template, Some(&context))?;

    let named = placeholders(template)
        .iter()
        .filter(|p| p.kind == PlaceholderKind::Named)
        .count();
    println!("{} All {} named placeholder(s) resolved", "✓".green(), named);
    Ok(())
}

/// JSON when the text parses as JSON, plain string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn split_pair<'a>(raw: &'a str, what: &str) -> anyhow::Result<(&'a str, &'a str)> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| anyhow!("Invalid {} '{}': expected KEY=VALUE", what, raw))
}

fn load_context(file: Option<&str>, sets: &[String]) -> anyhow::Result<Context> {
    let mut context = match file {
        Some(path) => {
            let content =
                fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
            let value: Value = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse context file {}", path))?;
            Context::try_from(value)
                .map_err(|_| anyhow!("Context file {} must be a mapping of name to value", path))?
        }
        None => Context::new(),
    };

    for raw in sets {
        let (name, value) = split_pair(raw, "--set")?;
        context.set(name, parse_value(value));
    }

    Ok(context)
}

/// Bind `--format` entries: digits target a positional index, names a context entry
fn bind_formatters(
    formats: &[String],
    arg_count: usize,
    context: &mut Context,
) -> anyhow::Result<Vec<Option<Formatter>>> {
    let mut positional: Vec<Option<Formatter>> = Vec::new();

    for raw in formats {
        let (target, name) = split_pair(raw, "--format")?;
        let Some(formatter) = builtin(name) else {
            bail!(
                "Unknown formatter '{}' (available: {})",
                name,
                builtin_names().join(", ")
            );
        };

        if target.bytes().all(|b| b.is_ascii_digit()) {
            let index: usize = target
                .parse()
                .with_context(|| format!("Invalid index '{}'", target))?;
            if index >= arg_count {
                bail!(
                    "--format index {} is out of range ({} argument(s) supplied)",
                    index,
                    arg_count
                );
            }
            if positional.len() <= index {
                positional.resize(index + 1, None);
            }
            positional[index] = Some(formatter);
        } else {
            let entry = context
                .get_mut(target)
                .ok_or_else(|| anyhow!("--format target '{}' has no value; add --set {}=...", target, target))?;
            entry.formatter = Some(formatter);
        }
    }

    Ok(positional)
}
