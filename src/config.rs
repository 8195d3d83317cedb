//! Configuration for icon rendering

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration options for rendering and caching
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum number of resolved icons kept in the cache
    pub cache_limit: usize,

    /// Emit a `<!-- Heroicon name: variant/name -->` comment before the tag
    pub comment: bool,

    /// Leading class on every icon; the per-icon class is `{base}-{variant}-{name}`
    pub base_class: String,

    /// Preload sizes below this are treated as unset
    pub preload_floor: i64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_limit: 500,
            comment: false,
            base_class: "heroicon".to_string(),
            preload_floor: 16,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_limit == 0 {
            return Err(ConfigError::Invalid(
                "cache_limit must be greater than 0".to_string(),
            ));
        }
        if self.base_class.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "base_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the cache size limit
    pub fn with_cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Set whether to emit the leading name comment
    pub fn with_comment(mut self, comment: bool) -> Self {
        self.comment = comment;
        self
    }

    /// Set the base CSS class
    pub fn with_base_class(mut self, class: impl Into<String>) -> Self {
        self.base_class = class.into();
        self
    }

    /// Set the minimum preload size
    pub fn with_preload_floor(mut self, floor: i64) -> Self {
        self.preload_floor = floor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.cache_limit, 500);
        assert!(!config.comment);
        assert_eq!(config.base_class, "heroicon");
        assert_eq!(config.preload_floor, 16);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RenderConfig::new()
            .with_cache_limit(3)
            .with_comment(true)
            .with_base_class("icon")
            .with_preload_floor(8);

        assert_eq!(config.cache_limit, 3);
        assert!(config.comment);
        assert_eq!(config.base_class, "icon");
        assert_eq!(config.preload_floor, 8);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml_str("comment = true\n").expect("Should parse");
        assert!(config.comment);
        assert_eq!(config.cache_limit, 500);
    }

    #[test]
    fn test_zero_cache_limit_rejected() {
        let result = RenderConfig::from_toml_str("cache_limit = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = RenderConfig::from_toml_str("colour = \"red\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
