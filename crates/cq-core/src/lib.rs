//! cq-core - Core library for comment-query
//!
//! This crate wraps host comment records in typed accessor objects, resolves
//! which comment kind represents a record, and shapes the query arguments sent
//! to the host's comment query engine.

pub mod error;
pub mod types;
pub mod config;
pub mod host;
pub mod comment;

pub use error::{CommentQueryError, Result};
pub use types::*;
