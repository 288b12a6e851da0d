//! Error types for comment-query

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for comment-query
#[derive(Debug, Error)]
pub enum CommentQueryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Stored timestamp could not be parsed
    #[error("Invalid comment date '{value}': {source}")]
    DateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CommentQueryError>,
    },
}

impl CommentQueryError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CommentQueryError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for CommentQueryError {
    fn from(err: toml::de::Error) -> Self {
        CommentQueryError::Toml(err.to_string())
    }
}

/// Result type alias for comment-query
pub type Result<T> = std::result::Result<T, CommentQueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CommentQueryError::FileNotFound(PathBuf::from("export.json"));
        assert_eq!(err.to_string(), "File not found: export.json");
    }

    #[test]
    fn test_error_with_context() {
        let err = CommentQueryError::Config("missing admin_url".to_string());
        let err = err.with_context("Failed to load configuration");
        assert!(err.to_string().contains("Failed to load configuration"));
        assert!(err.to_string().contains("missing admin_url"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CommentQueryError = io_err.into();
        assert!(matches!(err, CommentQueryError::Io(_)));
    }

    #[test]
    fn test_date_time_error_display() {
        let source = chrono::NaiveDateTime::parse_from_str("garbage", "%Y-%m-%d %H:%M:%S")
            .unwrap_err();
        let err = CommentQueryError::DateTime {
            value: "garbage".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid comment date 'garbage'"));
    }
}
