//! Comment data models

use crate::types::{value_to_text, ParamsBag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Host field names of a comment record
pub mod fields {
    pub const ID: &str = "comment_ID";
    pub const POST_ID: &str = "comment_post_ID";
    pub const AUTHOR: &str = "comment_author";
    pub const AUTHOR_EMAIL: &str = "comment_author_email";
    pub const AUTHOR_URL: &str = "comment_author_url";
    pub const AUTHOR_IP: &str = "comment_author_IP";
    pub const DATE: &str = "comment_date";
    pub const DATE_GMT: &str = "comment_date_gmt";
    pub const CONTENT: &str = "comment_content";
    pub const APPROVED: &str = "comment_approved";
    pub const AGENT: &str = "comment_agent";
    pub const TYPE: &str = "comment_type";
    pub const PARENT: &str = "comment_parent";
    pub const USER_ID: &str = "user_id";
}

/// A comment record exactly as the host hands it over
///
/// The layer never mutates a raw record; adapters copy its fields and keep a
/// shared reference to the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawComment {
    fields: Map<String, Value>,
}

impl RawComment {
    /// Create a raw record from its fields
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Accept an arbitrary value as a raw record; only objects qualify
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Borrow a single field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The record's type tag, `""` when absent
    pub fn comment_type(&self) -> String {
        self.fields.get(fields::TYPE).map(value_to_text).unwrap_or_default()
    }

    /// Copy all fields into a params bag
    pub fn to_params(&self) -> ParamsBag {
        ParamsBag::from_map(self.fields.clone())
    }

    /// Borrow all fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Concrete adapter variants, one per known comment subtype
///
/// `Comment` is the root; every other variant is a subtype of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    /// Generic comment, root of the hierarchy
    Comment,
    /// Pingback notification
    Pingback,
    /// Trackback notification
    Trackback,
    /// Product review
    Review,
    /// Internal note
    Note,
}

impl CommentKind {
    /// All variants, root first
    pub const ALL: [CommentKind; 5] = [
        CommentKind::Comment,
        CommentKind::Pingback,
        CommentKind::Trackback,
        CommentKind::Review,
        CommentKind::Note,
    ];

    /// Class name the registry uses to refer to this variant
    pub fn class_name(&self) -> &'static str {
        match self {
            CommentKind::Comment => "Comment",
            CommentKind::Pingback => "Pingback",
            CommentKind::Trackback => "Trackback",
            CommentKind::Review => "Review",
            CommentKind::Note => "Note",
        }
    }

    /// Parse a class name or its lowercase form
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name().eq_ignore_ascii_case(name))
    }

    /// Direct supertype, `None` for the root
    pub fn parent(&self) -> Option<CommentKind> {
        match self {
            CommentKind::Comment => None,
            _ => Some(CommentKind::Comment),
        }
    }

    /// Whether this variant is `other` or one of its subtypes
    pub fn is_a(&self, other: CommentKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

impl Default for CommentKind {
    fn default() -> Self {
        CommentKind::Comment
    }
}

/// Moderation state read from `comment_approved`, for display only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStatus {
    /// Visible on the site
    Approved,
    /// Awaiting moderation
    Pending,
    /// Marked as spam
    Spam,
    /// Moved to trash
    Trash,
    /// Any other host status
    Other(String),
}

impl CommentStatus {
    /// Read the status loosely: both `1` and `"1"` mean approved here
    pub fn from_value(value: &Value) -> Self {
        match value_to_text(value).as_str() {
            "1" | "approve" | "approved" => CommentStatus::Approved,
            "" | "0" | "hold" => CommentStatus::Pending,
            "spam" => CommentStatus::Spam,
            "trash" | "post-trashed" => CommentStatus::Trash,
            other => CommentStatus::Other(other.to_string()),
        }
    }

    /// Short label
    pub fn as_str(&self) -> &str {
        match self {
            CommentStatus::Approved => "approved",
            CommentStatus::Pending => "pending",
            CommentStatus::Spam => "spam",
            CommentStatus::Trash => "trash",
            CommentStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_comment_from_value() {
        let raw = RawComment::from_value(json!({"comment_ID": "5", "comment_type": "pingback"}));
        let raw = raw.unwrap();
        assert_eq!(raw.comment_type(), "pingback");
        assert_eq!(raw.field(fields::ID), Some(&json!("5")));

        assert!(RawComment::from_value(json!("not a record")).is_none());
        assert!(RawComment::from_value(json!([1, 2])).is_none());
        assert!(RawComment::from_value(json!(null)).is_none());
    }

    #[test]
    fn test_raw_comment_type_defaults_to_empty() {
        let raw = RawComment::default();
        assert_eq!(raw.comment_type(), "");
        assert!(raw.to_params().is_empty());
    }

    #[test]
    fn test_kind_hierarchy() {
        assert!(CommentKind::Pingback.is_a(CommentKind::Comment));
        assert!(CommentKind::Comment.is_a(CommentKind::Comment));
        assert!(!CommentKind::Comment.is_a(CommentKind::Pingback));
        assert!(!CommentKind::Review.is_a(CommentKind::Note));
    }

    #[test]
    fn test_kind_class_names() {
        for kind in CommentKind::ALL {
            assert_eq!(CommentKind::from_class_name(kind.class_name()), Some(kind));
        }
        assert_eq!(CommentKind::from_class_name("review"), Some(CommentKind::Review));
        assert_eq!(CommentKind::from_class_name("Missing"), None);
    }

    #[test]
    fn test_status_is_loose() {
        assert_eq!(CommentStatus::from_value(&json!(1)), CommentStatus::Approved);
        assert_eq!(CommentStatus::from_value(&json!("1")), CommentStatus::Approved);
        assert_eq!(CommentStatus::from_value(&json!("0")), CommentStatus::Pending);
        assert_eq!(CommentStatus::from_value(&json!("spam")), CommentStatus::Spam);
        assert_eq!(CommentStatus::from_value(&json!("trash")), CommentStatus::Trash);
        assert_eq!(
            CommentStatus::from_value(&json!("custom")),
            CommentStatus::Other("custom".to_string())
        );
    }
}
