//! Args command
//!
//! Print the arguments a comment query would be sent with.

use anyhow::Result;
use clap::Args;
use cq_core::comment::TypeRegistry;
use cq_core::types::QueryArgs;
use serde_json::Value;
use std::path::Path;

use super::{load_config, parse_key_value};

/// Arguments for the args command
#[derive(Debug, Args)]
pub struct ArgsArgs {
    /// Query argument as key=value (repeatable)
    #[arg(long = "arg", value_parser = parse_key_value)]
    pub args: Vec<(String, Value)>,
}

/// Execute the args command
pub fn execute(args: ArgsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = TypeRegistry::from_config(&config.registry);

    let query_args: QueryArgs = args.args.into_iter().collect();
    let parsed = registry.parse_query_args(query_args);

    println!("{}", serde_json::to_string_pretty(&Value::Object(parsed))?);
    Ok(())
}
