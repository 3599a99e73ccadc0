//! Linter configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! fail_on_diagnostics = true
//!
//! [validator]
//! catalog_policy = "report-unknown"
//! comment_prefixes = ["#", "//"]
//! ```

use anyhow::{Context, Result};
use dfd_behavior::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Linter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Validator settings
    pub validator: ValidatorConfig,
    /// Exit with failure status when any diagnostic is reported
    pub fail_on_diagnostics: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig::default(),
            fail_on_diagnostics: true,
        }
    }
}

impl LintConfig {
    /// Parse TOML
    ///
    /// # Errors
    /// Malformed TOML or unknown values
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("invalid linter configuration")
    }

    /// Read configuration file
    ///
    /// # Errors
    /// I/O failure or invalid content
    pub fn load(path: &Path) -> Result<Self> {
        let toml = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&toml).with_context(|| format!("loading {}", path.display()))
    }

    /// With failure on diagnostics
    #[inline]
    #[must_use]
    pub fn with_fail_on_diagnostics(mut self, fail: bool) -> Self {
        self.fail_on_diagnostics = fail;
        self
    }
}
