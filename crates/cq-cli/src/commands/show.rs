//! Show command
//!
//! Resolve a single comment by ID through the type registry.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::{load_config, open_query, print_comment, SourceArgs};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Comment ID
    pub id: u64,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Also resolve the parent comment, post and user
    #[arg(long)]
    pub related: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the show command
pub fn execute(args: ShowArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = load_config(config_path)?;
    let (query, store) = open_query(&args.source, &config)?;

    let comment = query
        .create_from_id(args.id)?
        .with_context(|| format!("Comment {} not found as {}", args.id, query.kind()))?;

    if args.json {
        let mut json = comment.to_json()?;
        if args.related {
            let parent = comment.queried_parent(&query)?.map(|p| p.id());
            let post = comment.queried_post(&*store)?.map(|p| p.id());
            let user = comment.queried_user(&*store)?.map(|u| u.id());
            json["related"] = serde_json::json!({
                "parent": parent,
                "post": post,
                "user": user,
                "edit_url": comment.edit_url(&*query.host().links),
            });
        }
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_comment(&comment);

    if args.related {
        println!();
        match comment.queried_parent(&query)? {
            Some(parent) => println!("  parent:  #{} by {}", parent.id(), parent.author()),
            None => println!("  parent:  {}", "none".dimmed()),
        }
        match comment.queried_post(&*store)? {
            Some(post) => println!("  on post: #{} {}", post.id(), post.title()),
            None => println!("  on post: {}", "unknown".dimmed()),
        }
        match comment.queried_user(&*store)? {
            Some(user) => println!("  user:    #{} {}", user.id(), user.login()),
            None => println!("  user:    {}", "guest".dimmed()),
        }
        println!("  edit:    {}", comment.edit_url(&*query.host().links));
    }

    Ok(())
}
