//! Typed accessors over a single comment record

use super::model::{fields, CommentKind, CommentStatus, RawComment};
use super::query::CommentQuery;
use crate::error::{CommentQueryError, Result};
use crate::host::{LinkBuilder, MetaStore, PostLookup, QueriedPost, QueriedUser, UserLookup};
use crate::types::{is_empty_value, ParamsBag};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Timestamp layout the host stores comment dates in
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One comment record wrapped in typed accessors
///
/// Every accessor is a pure read that falls back to an empty string, zero or
/// `false` when the field is missing.
#[derive(Debug, Clone, Serialize)]
pub struct QueriedComment {
    kind: CommentKind,
    #[serde(rename = "fields")]
    params: ParamsBag,
    #[serde(skip)]
    raw: Option<Arc<RawComment>>,
}

impl QueriedComment {
    /// Wrap a raw record, or nothing at all
    pub fn new(kind: CommentKind, raw: Option<Arc<RawComment>>) -> Self {
        let params = raw.as_deref().map(RawComment::to_params).unwrap_or_default();
        Self { kind, params, raw }
    }

    /// Adapter variant of this instance
    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    /// Underlying parameters
    pub fn params(&self) -> &ParamsBag {
        &self.params
    }

    /// The original record this instance was built from
    pub fn raw_comment(&self) -> Option<&Arc<RawComment>> {
        self.raw.as_ref()
    }

    pub fn agent(&self) -> String {
        self.params.get_text(fields::AGENT)
    }

    pub fn author(&self) -> String {
        self.params.get_text(fields::AUTHOR)
    }

    pub fn author_email(&self) -> String {
        self.params.get_text(fields::AUTHOR_EMAIL)
    }

    pub fn author_ip(&self) -> String {
        self.params.get_text(fields::AUTHOR_IP)
    }

    pub fn author_url(&self) -> String {
        self.params.get_text(fields::AUTHOR_URL)
    }

    pub fn content(&self) -> String {
        self.params.get_text(fields::CONTENT)
    }

    /// Type tag of the record
    pub fn comment_type(&self) -> String {
        self.params.get_text(fields::TYPE)
    }

    /// Creation date as stored, in site-local time or GMT
    pub fn date(&self, gmt: bool) -> String {
        if gmt {
            self.params.get_text(fields::DATE_GMT)
        } else {
            self.params.get_text(fields::DATE)
        }
    }

    /// Creation date in site-local time
    ///
    /// Reads the host layout first, then ISO 8601 / RFC 3339, minute
    /// precision and bare dates (midnight). Fails when the stored date is
    /// missing or matches none of them.
    pub fn date_time(&self) -> Result<NaiveDateTime> {
        parse_date(&self.date(false))
    }

    /// Creation date in UTC, read from the GMT field
    pub fn date_time_gmt(&self) -> Result<DateTime<Utc>> {
        parse_date_utc(&self.date(true))
    }

    /// Admin edit link for this comment
    pub fn edit_url(&self, links: &dyn LinkBuilder) -> String {
        links.edit_comment_link(self.id())
    }

    pub fn id(&self) -> u64 {
        self.params.get_id(fields::ID)
    }

    pub fn parent_id(&self) -> u64 {
        self.params.get_id(fields::PARENT)
    }

    pub fn post_id(&self) -> u64 {
        self.params.get_id(fields::POST_ID)
    }

    pub fn user_id(&self) -> u64 {
        self.params.get_id(fields::USER_ID)
    }

    /// Whether the approval field holds exactly the integer `1`.
    ///
    /// The comparison is strict: a stored string `"1"` is NOT approved. Hosts
    /// usually hand approval over as a string, so this is false for most
    /// records fetched from them. Kept as-is pending product review; use
    /// [`Self::status`] for a loose reading.
    pub fn is_approved(&self) -> bool {
        match self.params.get(fields::APPROVED) {
            Some(Value::Number(n)) => n.as_i64() == Some(1) && !n.is_f64(),
            _ => false,
        }
    }

    /// Whether the approval field holds exactly the string `"spam"`
    pub fn is_spam(&self) -> bool {
        matches!(self.params.get(fields::APPROVED), Some(Value::String(s)) if s == "spam")
    }

    /// Moderation state, read loosely
    pub fn status(&self) -> CommentStatus {
        CommentStatus::from_value(self.params.get(fields::APPROVED).unwrap_or(&Value::Null))
    }

    /// Whether the type tag is one of `types` (exact, case-sensitive)
    pub fn type_in<S: AsRef<str>>(&self, types: &[S]) -> bool {
        let comment_type = self.comment_type();
        types.iter().any(|t| t.as_ref() == comment_type)
    }

    /// Comment meta for `key`.
    ///
    /// An empty value from the store (null, `""`, `"0"`, 0, false, empty
    /// list) yields `default`, so a stored empty value reads as missing.
    pub fn meta(&self, store: &dyn MetaStore, key: &str, single: bool, default: Value) -> Result<Value> {
        let value = store.comment_meta(self.id(), key, single)?;
        if is_empty_value(&value) {
            Ok(default)
        } else {
            Ok(value)
        }
    }

    /// All meta values for `key`
    pub fn meta_multi(&self, store: &dyn MetaStore, key: &str, default: Value) -> Result<Value> {
        self.meta(store, key, false, default)
    }

    /// First meta value for `key`
    pub fn meta_single(&self, store: &dyn MetaStore, key: &str, default: Value) -> Result<Value> {
        self.meta(store, key, true, default)
    }

    /// Parent comment, resolved through `query` so it must have one of the
    /// query's recognized types
    pub fn queried_parent(&self, query: &CommentQuery) -> Result<Option<QueriedComment>> {
        query.create_from_id(self.parent_id())
    }

    /// Post this comment belongs to
    pub fn queried_post(&self, posts: &dyn PostLookup) -> Result<Option<QueriedPost>> {
        posts.create_from_id(self.post_id())
    }

    /// User who wrote this comment
    pub fn queried_user(&self, users: &dyn UserLookup) -> Result<Option<QueriedUser>> {
        users.create_from_id(self.user_id())
    }

    /// Serialize for display as `{"kind": .., "fields": {..}}`
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for QueriedComment {
    fn default() -> Self {
        Self::new(CommentKind::default(), None)
    }
}

/// Layouts tried after [`DATE_FORMAT`], most specific first
const FALLBACK_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a stored timestamp as wall-clock time.
///
/// RFC 3339 values keep their local time; use [`parse_date_utc`] when the
/// offset matters. The error reports the host layout failure.
fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    let source = match NaiveDateTime::parse_from_str(value, DATE_FORMAT) {
        Ok(parsed) => return Ok(parsed),
        Err(source) => source,
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }
    for format in FALLBACK_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }

    Err(CommentQueryError::DateTime {
        value: value.to_string(),
        source,
    })
}

/// Parse a stored GMT timestamp; an explicit RFC 3339 offset is honored
fn parse_date_utc(value: &str) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(_) => parse_date(value).map(|naive| naive.and_utc()),
    }
}
