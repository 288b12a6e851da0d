//! cq-storage - Storage library for comment-query
//!
//! This crate provides a host implementation backed by an exported JSON
//! snapshot, so comments can be inspected outside a live CMS.

mod snapshot_store;

pub use snapshot_store::{Snapshot, SnapshotStore};
