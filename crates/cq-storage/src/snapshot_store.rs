//! Snapshot-backed host for comments, meta, posts and users

use cq_core::comment::{fields, RawComment};
use cq_core::error::{CommentQueryError, Result};
use cq_core::host::{
    CommentQueryResult, CommentSource, MetaStore, PostLookup, QueriedPost, QueriedUser,
    UserLookup,
};
use cq_core::types::{value_to_id, value_to_text, ParamsBag, QueryArgs};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Exported host data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Raw comment records
    pub comments: Vec<RawComment>,
    /// Meta values by comment ID, then key
    pub comment_meta: BTreeMap<String, BTreeMap<String, Vec<Value>>>,
    /// Post records
    pub posts: Vec<ParamsBag>,
    /// User records
    pub users: Vec<ParamsBag>,
}

/// Host implementation over a [`Snapshot`]
///
/// Queries honour only exact-match arguments (`comment__in`, `type`,
/// `post_id`, `parent`, `user_id`) plus `number`/`offset`. Everything else is
/// accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    /// File the snapshot was read from
    path: Option<PathBuf>,
    snapshot: Snapshot,
}

impl SnapshotStore {
    /// Read a snapshot file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CommentQueryError::FileNotFound(path.clone())
            } else {
                CommentQueryError::Io(e)
            }
        })?;

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CommentQueryError::from(e).with_context(format!("Failed to parse {}", path.display())))?;

        info!(
            "Loaded snapshot {:?}: {} comments, {} posts, {} users",
            path,
            snapshot.comments.len(),
            snapshot.posts.len(),
            snapshot.users.len()
        );

        Ok(Self {
            path: Some(path),
            snapshot,
        })
    }

    /// Wrap an in-memory snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            path: None,
            snapshot,
        }
    }

    /// Get the snapshot file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the loaded snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn find_by_id<'a>(records: &'a [ParamsBag], id: u64) -> Option<&'a ParamsBag> {
        if id == 0 {
            return None;
        }
        records.iter().find(|r| r.get_id("ID") == id)
    }
}

fn comment_id(raw: &RawComment) -> u64 {
    raw.field(fields::ID).map(value_to_id).unwrap_or(0)
}

fn field_id(raw: &RawComment, name: &str) -> u64 {
    raw.field(name).map(value_to_id).unwrap_or(0)
}

/// Whether `raw` satisfies the exact-match arguments in `args`
fn matches_args(raw: &RawComment, args: &QueryArgs) -> bool {
    if let Some(ids) = args.get("comment__in") {
        let ids: Vec<u64> = match ids {
            Value::Array(items) => items.iter().map(value_to_id).collect(),
            single => vec![value_to_id(single)],
        };
        if !ids.is_empty() && !ids.contains(&comment_id(raw)) {
            return false;
        }
    }

    if let Some(types) = args.get("type") {
        let types: Vec<String> = match types {
            Value::Array(items) => items.iter().map(value_to_text).collect(),
            single => vec![value_to_text(single)],
        };
        let accepts_all = types.is_empty() || types.iter().any(|t| t.is_empty() || t == "all");
        if !accepts_all && !types.contains(&raw.comment_type()) {
            return false;
        }
    }

    for (arg, field) in [
        ("post_id", fields::POST_ID),
        ("user_id", fields::USER_ID),
    ] {
        if let Some(expected) = args.get(arg).map(value_to_id).filter(|id| *id != 0) {
            if field_id(raw, field) != expected {
                return false;
            }
        }
    }

    // Parent 0 is meaningful: top-level comments only
    if let Some(parent) = args.get("parent").filter(|v| !v.is_null() && v.as_str() != Some("")) {
        if field_id(raw, fields::PARENT) != value_to_id(parent) {
            return false;
        }
    }

    true
}

impl CommentSource for SnapshotStore {
    fn get_comment(&self, id: u64) -> Result<Option<RawComment>> {
        if id == 0 {
            return Ok(None);
        }
        Ok(self
            .snapshot
            .comments
            .iter()
            .find(|raw| comment_id(raw) == id)
            .cloned())
    }

    fn query(&self, args: &QueryArgs) -> Result<CommentQueryResult> {
        let offset = args.get("offset").map(value_to_id).unwrap_or(0) as usize;
        let number = args.get("number").map(value_to_id).unwrap_or(0) as usize;

        let matching = self
            .snapshot
            .comments
            .iter()
            .filter(|raw| matches_args(raw, args))
            .skip(offset);
        let comments: Vec<RawComment> = if number == 0 {
            matching.cloned().collect()
        } else {
            matching.take(number).cloned().collect()
        };

        debug!("Snapshot query matched {} comments", comments.len());
        Ok(CommentQueryResult::new(args.clone(), comments))
    }
}

impl MetaStore for SnapshotStore {
    fn comment_meta(&self, comment_id: u64, key: &str, single: bool) -> Result<Value> {
        let values = self
            .snapshot
            .comment_meta
            .get(&comment_id.to_string())
            .and_then(|meta| meta.get(key));

        Ok(match (values, single) {
            (Some(values), true) => values.first().cloned().unwrap_or_else(|| json!("")),
            (Some(values), false) => Value::Array(values.clone()),
            (None, true) => json!(""),
            (None, false) => json!([]),
        })
    }
}

impl PostLookup for SnapshotStore {
    fn create_from_id(&self, post_id: u64) -> Result<Option<QueriedPost>> {
        Ok(Self::find_by_id(&self.snapshot.posts, post_id)
            .cloned()
            .map(QueriedPost::new))
    }
}

impl UserLookup for SnapshotStore {
    fn create_from_id(&self, user_id: u64) -> Result<Option<QueriedUser>> {
        Ok(Self::find_by_id(&self.snapshot.users, user_id)
            .cloned()
            .map(QueriedUser::new))
    }
}
