//! Config command
//!
//! Inspect the effective comment-query configuration.

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use super::{config_candidates, load_config};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the files searched for configuration
    Path,

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(json, config_path),
        ConfigCommand::Path => show_paths(config_path),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(as_json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml_string()?);
    }

    Ok(())
}

fn show_paths(config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    for path in config_candidates(config_path) {
        let marker = if path.exists() {
            "✓".green()
        } else {
            "✗".dimmed()
        };
        println!("{} {}", marker, path.display());
    }

    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = load_config(config_path)?;
    config.validate()?;

    println!("{} Configuration is valid", "✓".green());
    println!(
        "  {} recognized types, {} class mappings, fallback: {}",
        config.registry.types.len(),
        config.registry.classes.len(),
        config.registry.fallback_class.as_deref().unwrap_or("none")
    );

    Ok(())
}
