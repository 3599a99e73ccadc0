//! Validator configuration

use serde::{Deserialize, Serialize};

/// How to treat label references when no catalog is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogPolicy {
    /// Every label type reference is unknown
    #[default]
    ReportUnknown,
    /// Label type and value references are not checked
    Skip,
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Behavior when the port context has no catalog
    pub catalog_policy: CatalogPolicy,
    /// Line prefixes (after leading whitespace) that mark comments
    pub comment_prefixes: Vec<String>,
}

impl ValidatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With catalog policy
    #[inline]
    #[must_use]
    pub fn with_catalog_policy(mut self, policy: CatalogPolicy) -> Self {
        self.catalog_policy = policy;
        self
    }

    /// With comment prefixes
    #[must_use]
    pub fn with_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            catalog_policy: CatalogPolicy::ReportUnknown,
            comment_prefixes: vec!["#".to_string(), "//".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::new();
        assert_eq!(config.catalog_policy, CatalogPolicy::ReportUnknown);
        assert_eq!(config.comment_prefixes, vec!["#", "//"]);
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"catalog_policy":"skip"}"#).unwrap();
        assert_eq!(config.catalog_policy, CatalogPolicy::Skip);
        assert_eq!(config.comment_prefixes.len(), 2);
    }

    #[test]
    fn builder() {
        let config = ValidatorConfig::new()
            .with_catalog_policy(CatalogPolicy::Skip)
            .with_comment_prefixes(["--"]);
        assert_eq!(config.comment_prefixes, vec!["--"]);
        assert_eq!(config.catalog_policy, CatalogPolicy::Skip);
    }
}
