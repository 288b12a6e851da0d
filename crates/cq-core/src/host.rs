//! Host collaborator traits
//!
//! Everything this layer needs from the host CMS goes through these traits:
//! comment storage and querying, comment meta, related posts and users, and
//! admin link building.

use crate::comment::RawComment;
use crate::error::Result;
use crate::types::{ParamsBag, QueryArgs};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Records produced by one execution of the host comment query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentQueryResult {
    /// Arguments the query ran with
    pub args: QueryArgs,
    /// Matching raw records, in host order
    pub comments: Vec<RawComment>,
}

impl CommentQueryResult {
    /// Create a result from arguments and records
    pub fn new(args: QueryArgs, comments: Vec<RawComment>) -> Self {
        Self { args, comments }
    }

    /// Check if the query matched nothing
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Trait for the host's comment storage and query engine
pub trait CommentSource: Send + Sync {
    /// Fetch a single raw record
    fn get_comment(&self, id: u64) -> Result<Option<RawComment>>;

    /// Run a comment query
    fn query(&self, args: &QueryArgs) -> Result<CommentQueryResult>;
}

/// Trait for the host's per-comment metadata store
pub trait MetaStore: Send + Sync {
    /// Fetch meta for a comment. `single` asks for the first value instead
    /// of the list of all values. Missing meta is reported as an empty value.
    fn comment_meta(&self, comment_id: u64, key: &str, single: bool) -> Result<Value>;
}

/// Trait for resolving the post a comment belongs to
pub trait PostLookup: Send + Sync {
    fn create_from_id(&self, post_id: u64) -> Result<Option<QueriedPost>>;
}

/// Trait for resolving the user who wrote a comment
pub trait UserLookup: Send + Sync {
    fn create_from_id(&self, user_id: u64) -> Result<Option<QueriedUser>>;
}

/// Trait for building admin links
pub trait LinkBuilder: Send + Sync {
    /// Edit screen URL for a comment
    fn edit_comment_link(&self, comment_id: u64) -> String;
}

/// Link builder pointing at the host's admin comment screen
#[derive(Debug, Clone)]
pub struct AdminLinkBuilder {
    admin_url: String,
}

impl AdminLinkBuilder {
    /// Create a builder for the given admin base URL
    pub fn new(admin_url: impl Into<String>) -> Self {
        Self {
            admin_url: admin_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl LinkBuilder for AdminLinkBuilder {
    fn edit_comment_link(&self, comment_id: u64) -> String {
        if comment_id == 0 {
            return String::new();
        }
        format!(
            "{}/comment.php?action=editcomment&c={}",
            self.admin_url, comment_id
        )
    }
}

/// Handles on every host collaborator
#[derive(Clone)]
pub struct Collaborators {
    pub comments: Arc<dyn CommentSource>,
    pub meta: Arc<dyn MetaStore>,
    pub posts: Arc<dyn PostLookup>,
    pub users: Arc<dyn UserLookup>,
    pub links: Arc<dyn LinkBuilder>,
}

impl Collaborators {
    /// Use one host object for every collaborator role
    pub fn from_host<H>(host: Arc<H>, links: Arc<dyn LinkBuilder>) -> Self
    where
        H: CommentSource + MetaStore + PostLookup + UserLookup + 'static,
    {
        Self {
            comments: host.clone(),
            meta: host.clone(),
            posts: host.clone(),
            users: host,
            links,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Post a comment belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueriedPost {
    params: ParamsBag,
}

impl QueriedPost {
    pub fn new(params: ParamsBag) -> Self {
        Self { params }
    }

    pub fn id(&self) -> u64 {
        self.params.get_id("ID")
    }

    pub fn title(&self) -> String {
        self.params.get_text("post_title")
    }

    pub fn status(&self) -> String {
        self.params.get_text("post_status")
    }

    pub fn post_type(&self) -> String {
        self.params.get_text("post_type")
    }

    pub fn params(&self) -> &ParamsBag {
        &self.params
    }
}

/// User who wrote a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueriedUser {
    params: ParamsBag,
}

impl QueriedUser {
    pub fn new(params: ParamsBag) -> Self {
        Self { params }
    }

    pub fn id(&self) -> u64 {
        self.params.get_id("ID")
    }

    pub fn login(&self) -> String {
        self.params.get_text("user_login")
    }

    pub fn display_name(&self) -> String {
        self.params.get_text("display_name")
    }

    pub fn email(&self) -> String {
        self.params.get_text("user_email")
    }

    pub fn params(&self) -> &ParamsBag {
        &self.params
    }
}

/// In-memory host for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::comment::fields;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    /// In-memory host that records the arguments of every query it runs
    #[derive(Default)]
    pub struct MemoryHost {
        comments: RwLock<Vec<RawComment>>,
        meta: RwLock<HashMap<(u64, String), Vec<Value>>>,
        posts: RwLock<HashMap<u64, QueriedPost>>,
        users: RwLock<HashMap<u64, QueriedUser>>,
        queries: Mutex<Vec<QueryArgs>>,
    }

    impl MemoryHost {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a raw record given as a JSON object
        pub fn insert(&self, record: Value) {
            let raw = RawComment::from_value(record).expect("test records are objects");
            self.comments.write().unwrap().push(raw);
        }

        pub fn add_meta(&self, comment_id: u64, key: &str, value: Value) {
            self.meta
                .write()
                .unwrap()
                .entry((comment_id, key.to_string()))
                .or_default()
                .push(value);
        }

        pub fn add_post(&self, id: u64, title: &str) {
            let mut params = ParamsBag::new();
            params.set("ID", id);
            params.set("post_title", title);
            self.posts.write().unwrap().insert(id, QueriedPost::new(params));
        }

        pub fn add_user(&self, id: u64, login: &str) {
            let mut params = ParamsBag::new();
            params.set("ID", id);
            params.set("user_login", login);
            self.users.write().unwrap().insert(id, QueriedUser::new(params));
        }

        /// Arguments of every query executed so far
        pub fn queries(&self) -> Vec<QueryArgs> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl CommentSource for MemoryHost {
        fn get_comment(&self, id: u64) -> Result<Option<RawComment>> {
            let comments = self.comments.read().unwrap();
            Ok(comments
                .iter()
                .find(|c| c.field(fields::ID).map(crate::types::value_to_id) == Some(id))
                .cloned())
        }

        fn query(&self, args: &QueryArgs) -> Result<CommentQueryResult> {
            self.queries.lock().unwrap().push(args.clone());

            let ids: Option<Vec<u64>> = args
                .get("comment__in")
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            let comments = self
                .comments
                .read()
                .unwrap()
                .iter()
                .filter(|c| match &ids {
                    Some(ids) => ids.contains(&c.field(fields::ID).map(crate::types::value_to_id).unwrap_or(0)),
                    None => true,
                })
                .cloned()
                .collect();

            Ok(CommentQueryResult::new(args.clone(), comments))
        }
    }

    impl MetaStore for MemoryHost {
        fn comment_meta(&self, comment_id: u64, key: &str, single: bool) -> Result<Value> {
            let meta = self.meta.read().unwrap();
            let values = meta.get(&(comment_id, key.to_string()));
            Ok(match (values, single) {
                (Some(values), true) => values.first().cloned().unwrap_or(json!("")),
                (Some(values), false) => Value::Array(values.clone()),
                (None, true) => json!(""),
                (None, false) => json!([]),
            })
        }
    }

    impl PostLookup for MemoryHost {
        fn create_from_id(&self, post_id: u64) -> Result<Option<QueriedPost>> {
            Ok(self.posts.read().unwrap().get(&post_id).cloned())
        }
    }

    impl UserLookup for MemoryHost {
        fn create_from_id(&self, user_id: u64) -> Result<Option<QueriedUser>> {
            Ok(self.users.read().unwrap().get(&user_id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_link_builder() {
        let links = AdminLinkBuilder::new("https://example.org/wp-admin/");
        assert_eq!(
            links.edit_comment_link(12),
            "https://example.org/wp-admin/comment.php?action=editcomment&c=12"
        );
        assert_eq!(links.edit_comment_link(0), "");
    }

    #[test]
    fn test_queried_post_accessors() {
        let mut params = ParamsBag::new();
        params.set("ID", "8");
        params.set("post_title", "Hello world");
        params.set("post_status", "publish");
        let post = QueriedPost::new(params);

        assert_eq!(post.id(), 8);
        assert_eq!(post.title(), "Hello world");
        assert_eq!(post.status(), "publish");
        assert_eq!(post.post_type(), "");
    }

    #[test]
    fn test_queried_user_accessors() {
        let mut params = ParamsBag::new();
        params.set("ID", 3);
        params.set("user_login", "admin");
        params.set("display_name", "Site Admin");
        let user = QueriedUser::new(params);

        assert_eq!(user.id(), 3);
        assert_eq!(user.login(), "admin");
        assert_eq!(user.display_name(), "Site Admin");
        assert_eq!(user.email(), "");
    }

    #[test]
    fn test_query_result_is_empty() {
        assert!(CommentQueryResult::default().is_empty());
    }
}
