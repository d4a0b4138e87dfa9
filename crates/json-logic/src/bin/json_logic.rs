//! `json-logic`: evaluate a JSON Logic rule.
//!
//! Usage:
//!   json-logic '<rule>' [--data '<json>'] [--context '<json>'] [--pretty]
//!
//! When `--data` is omitted the data document is read from stdin.

use anyhow::{Context, Result};
use clap::Parser;
use json_logic::{registry, LogicConfig};
use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "json-logic")]
#[command(version)]
#[command(about = "Evaluate a JSON Logic rule against JSON data")]
struct Cli {
    /// The rule, as JSON text.
    rule: String,

    /// Input data as JSON text. Read from stdin when absent.
    #[arg(short, long)]
    data: Option<String>,

    /// Secondary context data as JSON text.
    #[arg(short, long)]
    context: Option<String>,

    /// Deepest rule nesting accepted.
    #[arg(long, default_value_t = json_logic::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Pretty-print the result.
    #[arg(short, long)]
    pretty: bool,
}

fn parse_json(text: &str, what: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("{what} is not valid JSON"))
}

fn run(cli: Cli) -> Result<String> {
    let rule = parse_json(&cli.rule, "rule")?;
    let data = match cli.data {
        Some(text) => parse_json(&text, "data")?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read data from stdin")?;
            if buf.trim().is_empty() {
                Value::Null
            } else {
                parse_json(&buf, "data")?
            }
        }
    };
    let context = cli
        .context
        .as_deref()
        .map(|text| parse_json(text, "context"))
        .transpose()?;

    let config = LogicConfig::default().with_max_depth(cli.max_depth);
    let rule = registry()?
        .parse_with(&rule, &config)
        .context("failed to parse rule")?;
    debug!(tag = rule.tag().unwrap_or("literal"), "evaluating rule");
    let result = rule
        .apply(&data, context.as_ref())
        .context("failed to evaluate rule")?;

    let out = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(out)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}
