//! List command
//!
//! Fetch comments by ID or by query arguments.

use anyhow::Result;
use clap::Args;
use cq_core::types::QueryArgs;
use serde_json::Value;
use std::path::Path;

use super::{load_config, open_query, parse_key_value, print_comment, SourceArgs};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Comment IDs to fetch (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "args")]
    pub ids: Vec<u64>,

    /// Extra query argument as key=value (repeatable)
    #[arg(long = "arg", value_parser = parse_key_value)]
    pub args: Vec<(String, Value)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = load_config(config_path)?;
    let (query, _store) = open_query(&args.source, &config)?;

    let comments = if args.ids.is_empty() {
        let query_args: QueryArgs = args.args.into_iter().collect();
        query.fetch_from_args(query_args)?
    } else {
        query.fetch_from_ids(&args.ids)?
    };

    if args.json {
        let json = comments
            .iter()
            .map(|c| c.to_json())
            .collect::<cq_core::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if comments.is_empty() {
        eprintln!("{}", "No comments found".yellow());
        return Ok(());
    }

    for comment in &comments {
        print_comment(comment);
    }
    eprintln!(
        "{} {} comments as {}",
        "✓".green(),
        comments.len().to_string().yellow(),
        query.kind().to_string().cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Cli;
    use clap::Parser;

    #[test]
    fn test_ids_conflict_with_query_args() {
        let result = Cli::try_parse_from([
            "comment-query", "list", "--snapshot", "export.json", "--ids", "1,2", "--arg", "status=approve",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["comment-query", "list", "--snapshot", "export.json", "--ids", "1,2"]).is_ok());
        assert!(Cli::try_parse_from([
            "comment-query", "list", "--snapshot", "export.json", "--arg", "status=approve",
        ])
        .is_ok());
    }
}
