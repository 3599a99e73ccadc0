//! Project files

use anyhow::{Context, Result};
use dfd_model::{AvailableInputs, LabelTypeCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One output port and its symbol table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Display name, used in reports
    pub name: String,
    /// Labels of the edges entering the port's node; `null` for unlabeled edges
    #[serde(default)]
    pub inputs: AvailableInputs,
    /// Behavior text
    #[serde(default)]
    pub behavior: String,
}

impl PortSpec {
    /// Create port
    #[must_use]
    pub fn new(name: impl Into<String>, inputs: AvailableInputs, behavior: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs,
            behavior: behavior.into(),
        }
    }
}

/// Catalog and ports of one diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Label types
    #[serde(default)]
    pub catalog: LabelTypeCatalog,
    /// Output ports
    #[serde(default)]
    pub ports: Vec<PortSpec>,
}

impl Project {
    /// Parse project JSON
    ///
    /// # Errors
    /// Malformed JSON or an inconsistent catalog
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid project file")
    }

    /// Read and parse a project file
    ///
    /// # Errors
    /// I/O failure or invalid content
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let project = Self::from_json(&json).with_context(|| format!("loading {}", path.display()))?;
        tracing::debug!(
            "Loaded {} with {} label types and {} ports",
            path.display(),
            project.catalog.len(),
            project.ports.len()
        );
        Ok(project)
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    /// Serialization failure
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing project")
    }
}

/// Read a catalog snapshot (a JSON array of label types)
///
/// # Errors
/// I/O failure, malformed JSON or an inconsistent catalog
pub fn load_catalog(path: &Path) -> Result<LabelTypeCatalog> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid catalog in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "catalog": [
            { "id": "t1", "name": "Sensitivity", "values": [{ "id": "v1", "text": "High" }] }
        ],
        "ports": [
            { "name": "process.out", "inputs": ["personal", null], "behavior": "forward personal" }
        ]
    }"#;

    #[test]
    fn parses_project() {
        let project = Project::from_json(PROJECT).unwrap();
        assert_eq!(project.catalog.len(), 1);
        assert_eq!(project.ports.len(), 1);
        let port = &project.ports[0];
        assert_eq!(port.inputs.entries(), &[Some("personal".to_string()), None]);
        assert_eq!(port.inputs.unnamed_count(), 1);
    }

    #[test]
    fn missing_sections_default() {
        let project = Project::from_json(r#"{ "ports": [{ "name": "p" }] }"#).unwrap();
        assert!(project.catalog.is_empty());
        assert!(project.ports[0].inputs.is_empty());
        assert_eq!(project.ports[0].behavior, "");
    }

    #[test]
    fn rejects_inconsistent_catalog() {
        let json = r#"{ "catalog": [
            { "id": "t1", "name": "A" },
            { "id": "t2", "name": "A" }
        ] }"#;
        assert!(Project::from_json(json).is_err());
    }

    #[test]
    fn json_round_trip() {
        let project = Project::from_json(PROJECT).unwrap();
        let again = Project::from_json(&project.to_json().unwrap()).unwrap();
        assert_eq!(again, project);
    }
}
