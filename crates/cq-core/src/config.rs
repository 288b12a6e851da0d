//! Configuration management for comment-query

use crate::error::{CommentQueryError, Result};
use crate::types::QueryArgs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type registry settings
    pub registry: RegistryConfig,
    /// Admin link settings
    pub links: LinksConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CommentQueryError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CommentQueryError::Toml(e.to_string()))
    }

    /// Check the values a registry cannot recover from
    pub fn validate(&self) -> Result<()> {
        if self.registry.types.iter().any(|t| t.trim().is_empty()) {
            return Err(CommentQueryError::Config(
                "registry.types cannot contain empty type tags".to_string(),
            ));
        }
        if self.links.admin_url.trim().is_empty() {
            return Err(CommentQueryError::Config(
                "links.admin_url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Type registry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Recognized type tags (empty accepts every type)
    pub types: Vec<String>,
    /// Class used for types without a registered class
    pub fallback_class: Option<String>,
    /// Class name by type tag
    pub classes: BTreeMap<String, String>,
    /// Base layer of every outgoing query
    pub default_args: QueryArgs,
}

/// Admin link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Base URL of the host admin area
    pub admin_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            admin_url: "http://localhost/wp-admin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.registry.types.is_empty());
        assert!(config.registry.fallback_class.is_none());
        assert_eq!(config.links.admin_url, "http://localhost/wp-admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
[registry]
types = ["comment", "review"]
fallback_class = "Comment"

[registry.classes]
review = "Review"
pingback = "Pingback"

[registry.default_args]
status = "approve"
number = 20

[links]
admin_url = "https://example.org/wp-admin"
"#,
        )
        .unwrap();

        assert_eq!(config.registry.types, vec!["comment", "review"]);
        assert_eq!(config.registry.fallback_class.as_deref(), Some("Comment"));
        assert_eq!(config.registry.classes.get("review").map(String::as_str), Some("Review"));
        assert_eq!(config.registry.default_args.get("number"), Some(&json!(20)));
        assert_eq!(config.links.admin_url, "https://example.org/wp-admin");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::from_toml_str("[registry]\ntypes = [\"\"]\n").is_err());
        assert!(Config::from_toml_str("[links]\nadmin_url = \"\"\n").is_err());
        assert!(Config::from_toml_str("registry = 3").is_err());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.registry.types = vec!["comment".to_string()];
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[registry]"));
        assert!(toml.contains("[links]"));

        let config2 = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config.registry.types, config2.registry.types);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\ntypes = [\"note\"]").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.registry.types, vec!["note"]);

        let missing = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(missing, Err(CommentQueryError::FileNotFound(_))));
    }
}
