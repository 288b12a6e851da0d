//! Meta command
//!
//! Read comment meta through the adapter, with its default coalescing.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::path::Path;

use super::{load_config, open_query, SourceArgs};

/// Arguments for the meta command
#[derive(Debug, Args)]
pub struct MetaArgs {
    /// Comment ID
    pub id: u64,

    /// Meta key
    pub key: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Return every value instead of the first one
    #[arg(long)]
    pub multi: bool,

    /// Value printed when the meta is missing or empty (read as JSON when possible)
    #[arg(long, default_value = "null")]
    pub default: String,
}

/// Execute the meta command
pub fn execute(args: MetaArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let (query, store) = open_query(&args.source, &config)?;

    let comment = query
        .create_from_id(args.id)?
        .with_context(|| format!("Comment {} not found as {}", args.id, query.kind()))?;

    let default = serde_json::from_str(&args.default)
        .unwrap_or_else(|_| Value::String(args.default.clone()));
    let value = if args.multi {
        comment.meta_multi(&*store, &args.key, default)?
    } else {
        comment.meta_single(&*store, &args.key, default)?
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
