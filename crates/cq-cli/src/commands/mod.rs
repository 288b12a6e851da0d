//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod args;
pub mod config;
pub mod list;
pub mod meta;
pub mod show;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cq_core::comment::{CommentKind, CommentQuery, QueriedComment, TypeRegistry};
use cq_core::config::Config;
use cq_core::host::{AdminLinkBuilder, Collaborators};
use cq_storage::SnapshotStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// comment-query - typed access to host comments
#[derive(Debug, Parser)]
#[command(name = "comment-query")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a single comment by ID
    Show(show::ShowArgs),

    /// List comments from a query
    List(list::ListArgs),

    /// Print normalized query arguments
    Args(args::ArgsArgs),

    /// Read comment meta
    Meta(meta::MetaArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Snapshot and calling kind shared by commands that read comments
#[derive(Debug, clap::Args)]
pub struct SourceArgs {
    /// Exported snapshot file
    #[arg(long, short, env = "COMMENT_QUERY_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Comment kind the query runs as
    #[arg(long, short, default_value = "comment", value_parser = parse_kind)]
    pub kind: CommentKind,
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();

    // Dispatch to command handler
    match cli.command {
        Commands::Show(args) => show::execute(args, config_path),
        Commands::List(args) => list::execute(args, config_path),
        Commands::Args(args) => args::execute(args, config_path),
        Commands::Meta(args) => meta::execute(args, config_path),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a comment kind from its class name, case-insensitively
pub fn parse_kind(s: &str) -> std::result::Result<CommentKind, String> {
    CommentKind::from_class_name(s).ok_or_else(|| {
        let known: Vec<&str> = CommentKind::ALL.iter().map(|k| k.class_name()).collect();
        format!("unknown comment kind '{}' (expected one of {})", s, known.join(", "))
    })
}

/// Parse `key=value`; the value is read as JSON when possible, text otherwise
pub fn parse_key_value(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Candidate configuration files, most specific first
pub fn config_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut candidates = vec![PathBuf::from(".comment-query/config.toml")];
    match directories::ProjectDirs::from("com", "comment-query", "comment-query") {
        Some(dirs) => candidates.push(dirs.config_dir().join("config.toml")),
        None => {
            if let Some(home) = dirs::home_dir() {
                candidates.push(home.join(".comment-query").join("config.toml"));
            }
        }
    }
    candidates
}

/// Load the configuration, falling back to defaults when no file exists
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    for path in config_candidates(None) {
        if path.exists() {
            debug!("Using config {:?}", path);
            return Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }
    }

    debug!("No config file found, using defaults");
    Ok(Config::default())
}

/// Build a query context over a snapshot
pub fn open_query(source: &SourceArgs, config: &Config) -> Result<(CommentQuery, Arc<SnapshotStore>)> {
    let store = Arc::new(
        SnapshotStore::open(&source.snapshot)
            .with_context(|| format!("Failed to open snapshot {}", source.snapshot.display()))?,
    );
    let host = Collaborators::from_host(
        store.clone(),
        Arc::new(AdminLinkBuilder::new(config.links.admin_url.clone())),
    );
    let registry = TypeRegistry::from_config(&config.registry);
    let query = CommentQuery::new(source.kind, Arc::new(registry), Arc::new(host));
    Ok((query, store))
}

/// Print one comment in the human-readable layout
pub fn print_comment(comment: &QueriedComment) {
    use colored::Colorize;

    let status = comment.status();
    let status_label = match status.as_str() {
        "approved" => status.to_string().green(),
        "spam" | "trash" => status.to_string().red(),
        _ => status.to_string().yellow(),
    };

    println!(
        "{} {} {} {}",
        format!("#{}", comment.id()).bold(),
        comment.kind().to_string().cyan(),
        format!("[{}]", comment.comment_type()).dimmed(),
        status_label
    );

    let email = comment.author_email();
    if email.is_empty() {
        println!("  author:  {}", comment.author());
    } else {
        println!("  author:  {} <{}>", comment.author(), email);
    }
    println!("  date:    {}", comment.date(false));
    println!(
        "  post: {}  parent: {}  user: {}",
        comment.post_id(),
        comment.parent_id(),
        comment.user_id()
    );
    let content = comment.content();
    if !content.is_empty() {
        println!("  {}", content);
    }
}
