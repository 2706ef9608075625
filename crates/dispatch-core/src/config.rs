//! Matcher configuration.

use crate::annotations::DEFAULT_ANNOTATION_PREFIX;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_ANNOTATION_PREFIX: &str = "DISPATCH_ANNOTATION_PREFIX";
pub const ENV_RESOLVER_URL: &str = "DISPATCH_RESOLVER_URL";
pub const ENV_RESOLVER_TOKEN: &str = "DISPATCH_RESOLVER_TOKEN";

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Prefix of the routing annotations.
    #[serde(default = "default_annotation_prefix")]
    pub annotation_prefix: String,
    /// Skip candidates that carry no annotations at all.
    #[serde(default)]
    pub require_annotations: bool,
    /// Timeout for a single Repository lookup, in seconds.
    #[serde(default = "default_resolver_timeout")]
    pub resolver_timeout_secs: u64,
    /// Base URL of the Repository API, when lookups go over HTTP.
    #[serde(default)]
    pub resolver_url: Option<String>,
    /// Bearer token for the Repository API.
    #[serde(default)]
    pub resolver_token: Option<String>,
}

fn default_annotation_prefix() -> String {
    DEFAULT_ANNOTATION_PREFIX.to_string()
}

fn default_resolver_timeout() -> u64 {
    10
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: default_annotation_prefix(),
            require_annotations: false,
            resolver_timeout_secs: default_resolver_timeout(),
            resolver_url: None,
            resolver_token: None,
        }
    }
}

impl MatcherConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `DISPATCH_*` environment variables.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(prefix) = lookup(ENV_ANNOTATION_PREFIX) {
            self.annotation_prefix = prefix;
        }
        if let Some(url) = lookup(ENV_RESOLVER_URL) {
            self.resolver_url = Some(url);
        }
        if let Some(token) = lookup(ENV_RESOLVER_TOKEN) {
            self.resolver_token = Some(token);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_annotation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.annotation_prefix = prefix.into();
        self
    }

    pub fn with_require_annotations(mut self, require: bool) -> Self {
        self.require_annotations = require;
        self
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        let prefix = self.annotation_prefix.trim();
        if prefix.is_empty() || prefix.ends_with('/') {
            return Err(Error::Config(format!(
                "invalid annotation prefix: {:?}",
                self.annotation_prefix
            )));
        }
        if self.resolver_timeout_secs == 0 {
            return Err(Error::Config("resolver timeout must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.annotation_prefix, "pipelinesascode.tekton.dev");
        assert!(!config.require_annotations);
        assert_eq!(config.resolver_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = MatcherConfig::from_yaml("require_annotations: true\n").expect("parse");
        assert!(config.require_annotations);
        assert_eq!(config.annotation_prefix, DEFAULT_ANNOTATION_PREFIX);
    }

    #[test]
    fn test_from_yaml_rejects_bad_prefix() {
        let err = MatcherConfig::from_yaml("annotation_prefix: \"ci.example.com/\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_apply_vars() {
        let vars: HashMap<&str, &str> = [
            (ENV_ANNOTATION_PREFIX, "ci.example.com"),
            (ENV_RESOLVER_URL, "http://controller:8080"),
        ]
        .into_iter()
        .collect();

        let config = MatcherConfig::default()
            .apply_vars(|name| vars.get(name).map(|v| v.to_string()))
            .expect("apply");

        assert_eq!(config.annotation_prefix, "ci.example.com");
        assert_eq!(config.resolver_url.as_deref(), Some("http://controller:8080"));
        assert!(config.resolver_token.is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("matcher.yaml");
        std::fs::write(&path, "resolver_timeout_secs: 3\n").expect("write");

        let config = MatcherConfig::from_file(&path).expect("load");
        assert_eq!(config.resolver_timeout(), Duration::from_secs(3));
    }
}
