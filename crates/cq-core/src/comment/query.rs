//! Comment query facade
//!
//! [`CommentQuery`] is the calling-kind context: it resolves raw records into
//! adapters, normalizes outgoing query arguments, and runs queries against
//! the host's [`CommentSource`](crate::host::CommentSource).

use super::model::{CommentKind, RawComment};
use super::queried::QueriedComment;
use super::registry::TypeRegistry;
use crate::error::Result;
use crate::host::{CommentQueryResult, Collaborators};
use crate::types::QueryArgs;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Query helpers bound to one calling kind
#[derive(Debug, Clone)]
pub struct CommentQuery {
    kind: CommentKind,
    registry: Arc<TypeRegistry>,
    host: Arc<Collaborators>,
}

impl CommentQuery {
    /// Create a query context for `kind`
    pub fn new(kind: CommentKind, registry: Arc<TypeRegistry>, host: Arc<Collaborators>) -> Self {
        Self {
            kind,
            registry,
            host,
        }
    }

    /// Same registry and collaborators, different calling kind
    pub fn for_kind(&self, kind: CommentKind) -> Self {
        Self {
            kind,
            registry: Arc::clone(&self.registry),
            host: Arc::clone(&self.host),
        }
    }

    /// Calling kind
    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn host(&self) -> &Collaborators {
        &self.host
    }

    /// Wrap a raw record in the class registered for its type.
    ///
    /// Unregistered types use the fallback class, or the calling kind when no
    /// fallback is set. A class name missing from the class table also ends
    /// up as the calling kind.
    pub fn build(&self, raw: Arc<RawComment>) -> QueriedComment {
        let comment_type = raw.comment_type();
        let class_name = self
            .registry
            .class_for_type(&comment_type)
            .or_else(|| self.registry.fallback_class())
            .unwrap_or_else(|| self.kind.class_name());

        match self.registry.resolve_class(class_name) {
            Some(constructor) => constructor(raw),
            None => {
                debug!(
                    "Class {} for comment type '{}' is not registered, using {}",
                    class_name, comment_type, self.kind
                );
                QueriedComment::new(self.kind, Some(raw))
            }
        }
    }

    /// Build from an arbitrary value; anything but a record object yields `None`
    pub fn build_value(&self, value: Value) -> Option<QueriedComment> {
        match RawComment::from_value(value) {
            Some(raw) => Some(self.build(Arc::new(raw))),
            None => {
                debug!("Ignoring value that is not a comment record");
                None
            }
        }
    }

    /// Fetch and build a comment by ID.
    ///
    /// Returns `None` when the host has no such comment or when the built
    /// instance fails [`Self::is`] for its own kind. The resolved kind always
    /// passes the hierarchy check, so only the recognized types can reject a
    /// record; a caller may get back an unrelated kind.
    pub fn create_from_id(&self, id: u64) -> Result<Option<QueriedComment>> {
        if id == 0 {
            return Ok(None);
        }

        let Some(raw) = self.host.comments.get_comment(id)? else {
            debug!("Comment {} not found", id);
            return Ok(None);
        };

        let instance = self.build(Arc::new(raw));
        if self.for_kind(instance.kind()).is(&instance) {
            Ok(Some(instance))
        } else {
            debug!(
                "Comment {} ({}, type '{}') rejected for {}",
                id,
                instance.kind(),
                instance.comment_type(),
                self.kind
            );
            Ok(None)
        }
    }

    /// Run a query with normalized `args`; every record becomes the calling kind
    pub fn fetch_from_args(&self, args: QueryArgs) -> Result<Vec<QueriedComment>> {
        let args = self.parse_query_args(args);
        let result = self.host.comments.query(&args)?;
        Ok(self.fetch_from_comment_query(&result))
    }

    /// Fetch the comments whose IDs are in `ids`
    pub fn fetch_from_ids(&self, ids: &[u64]) -> Result<Vec<QueriedComment>> {
        let mut args = QueryArgs::new();
        args.insert("comment__in".to_string(), json!(ids));
        self.fetch_from_args(args)
    }

    /// Wrap every record of an already executed query as the calling kind
    pub fn fetch_from_comment_query(&self, result: &CommentQueryResult) -> Vec<QueriedComment> {
        debug!("Wrapping {} comments as {}", result.comments.len(), self.kind);
        result
            .comments
            .iter()
            .map(|raw| QueriedComment::new(self.kind, Some(Arc::new(raw.clone()))))
            .collect()
    }

    /// Whether `instance` is the calling kind (or a subtype) and, when the
    /// registry recognizes specific types, has one of them
    pub fn is(&self, instance: &QueriedComment) -> bool {
        let types = self.registry.types();
        instance.kind().is_a(self.kind) && (types.is_empty() || instance.type_in(types))
    }

    /// Force the recognized types into `args`, then layer `args` over the
    /// registry defaults. A caller-supplied `type` is discarded.
    pub fn parse_query_args(&self, args: QueryArgs) -> QueryArgs {
        self.registry.parse_query_args(args)
    }

    /// Parent comment of `comment`, checked against the calling kind
    pub fn parent_of(&self, comment: &QueriedComment) -> Result<Option<QueriedComment>> {
        comment.queried_parent(self)
    }
}
