//! Comment type registry
//!
//! Decides which [`CommentKind`] wraps a raw record and holds the defaults
//! that get merged into every outgoing comment query. A registry is built and
//! configured once at startup, then shared read-only (usually behind an
//! `Arc`) by every [`super::CommentQuery`].

use super::model::{CommentKind, RawComment};
use super::queried::QueriedComment;
use crate::config::RegistryConfig;
use crate::types::{is_empty_str, QueryArgs};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Type tag that stands for "every type"
pub const ANY_TYPE: &str = "any";

/// Function that wraps a raw record in a concrete adapter variant
pub type Constructor = fn(Arc<RawComment>) -> QueriedComment;

/// Registration table mapping class names to constructors
#[derive(Debug, Clone)]
pub struct ClassTable {
    constructors: HashMap<String, Constructor>,
}

impl ClassTable {
    /// Create a table holding every built-in variant under its class name
    pub fn new() -> Self {
        let mut table = Self::empty();
        for kind in CommentKind::ALL {
            table.register(kind.class_name(), constructor_for(kind));
        }
        table
    }

    /// Create a table with no classes at all
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor under a class name, replacing any previous one
    pub fn register(&mut self, class_name: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(class_name.into(), constructor);
    }

    /// Look up a constructor by exact class name
    pub fn resolve(&self, class_name: &str) -> Option<Constructor> {
        self.constructors.get(class_name).copied()
    }

    /// Check whether a class name is known
    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Constructor of a built-in variant
pub fn constructor_for(kind: CommentKind) -> Constructor {
    match kind {
        CommentKind::Comment => |raw: Arc<RawComment>| QueriedComment::new(CommentKind::Comment, Some(raw)),
        CommentKind::Pingback => |raw: Arc<RawComment>| QueriedComment::new(CommentKind::Pingback, Some(raw)),
        CommentKind::Trackback => |raw: Arc<RawComment>| QueriedComment::new(CommentKind::Trackback, Some(raw)),
        CommentKind::Review => |raw: Arc<RawComment>| QueriedComment::new(CommentKind::Review, Some(raw)),
        CommentKind::Note => |raw: Arc<RawComment>| QueriedComment::new(CommentKind::Note, Some(raw)),
    }
}

/// Registry of comment classes, recognized types and default query arguments
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Class name by type tag
    classes: HashMap<String, String>,
    /// Class used when a type has no registered class
    fallback_class: Option<String>,
    /// Type tags the calling kind accepts; empty accepts all
    types: Vec<String>,
    /// Base layer of every outgoing query
    default_args: QueryArgs,
    /// Known classes
    class_table: ClassTable,
}

impl TypeRegistry {
    /// Create an empty registry knowing every built-in class
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut registry = Self::new();
        for (comment_type, class_name) in &config.classes {
            registry.set_built_in_class(comment_type, class_name);
        }
        if let Some(fallback) = &config.fallback_class {
            registry.set_fallback_class(fallback);
        }
        registry.set_types(config.types.clone());
        registry.set_default_args(config.default_args.clone());
        registry
    }

    /// Register the class for a type tag. An empty or `"any"` type sets the
    /// fallback class instead. The class name is checked only when a record
    /// is built.
    pub fn set_built_in_class(&mut self, comment_type: &str, class_name: &str) {
        if comment_type == ANY_TYPE || is_empty_str(comment_type) {
            self.set_fallback_class(class_name);
        } else {
            debug!("Registered class {} for comment type '{}'", class_name, comment_type);
            self.classes
                .insert(comment_type.to_string(), class_name.to_string());
        }
    }

    /// Replace the default query arguments
    pub fn set_default_args(&mut self, args: QueryArgs) {
        self.default_args = args;
    }

    /// Set the class used for unregistered types
    pub fn set_fallback_class(&mut self, class_name: &str) {
        debug!("Fallback comment class set to {}", class_name);
        self.fallback_class = Some(class_name.to_string());
    }

    /// Replace the recognized type tags
    pub fn set_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
    }

    /// Add a constructor to the class table
    pub fn register_class(&mut self, class_name: impl Into<String>, constructor: Constructor) {
        self.class_table.register(class_name, constructor);
    }

    /// Class registered for a type tag
    pub fn class_for_type(&self, comment_type: &str) -> Option<&str> {
        self.classes.get(comment_type).map(String::as_str)
    }

    /// Fallback class, if one is set to a non-empty name
    pub fn fallback_class(&self) -> Option<&str> {
        self.fallback_class
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// Recognized type tags
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Default query arguments
    pub fn default_args(&self) -> &QueryArgs {
        &self.default_args
    }

    /// Force the recognized types into `args`, then layer `args` over the
    /// default arguments
    pub fn parse_query_args(&self, mut args: QueryArgs) -> QueryArgs {
        args.insert("type".to_string(), json!(self.types));

        let mut merged = self.default_args.clone();
        for (key, value) in args {
            merged.insert(key, value);
        }
        merged
    }

    /// Look up a constructor by class name
    pub fn resolve_class(&self, class_name: &str) -> Option<Constructor> {
        self.class_table.resolve(class_name)
    }
}
