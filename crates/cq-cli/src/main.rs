//! comment-query - inspect host comments from the command line
//!
//! Resolves comments from an exported snapshot through the configured type
//! registry, the same way the library does inside a host.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show one comment
//! comment-query show 42 --snapshot export.json
//!
//! # List comments by ID as a given kind
//! comment-query list --snapshot export.json --ids 1,2,3 --kind review
//!
//! # Print the arguments a query would be sent with
//! comment-query args --arg status=approve
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
