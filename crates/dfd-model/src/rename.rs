//! Rename descriptors and rename detection
//!
//! Renames are transient: they are computed by diffing two snapshots of the
//! catalog (or the text of one edge label before and after an edit) and are
//! consumed once by the behavior refactorer.

use crate::catalog::{LabelTypeCatalog, LabelTypeId};
use serde::{Deserialize, Serialize};

/// A label type changed its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelTypeRename {
    /// Id of the renamed type
    pub label_type_id: LabelTypeId,
    /// Name before the rename
    pub old_name: String,
    /// Name after the rename
    pub new_name: String,
}

impl LabelTypeRename {
    /// Create descriptor
    #[inline]
    #[must_use]
    pub fn new(label_type_id: LabelTypeId, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            label_type_id,
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }
}

/// A label value changed its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelValueRename {
    /// Id of the type owning the value
    pub label_type_id: LabelTypeId,
    /// Current name of the owning type
    pub label_type_name: String,
    /// Text before the rename
    pub old_text: String,
    /// Text after the rename
    pub new_text: String,
}

impl LabelValueRename {
    /// Create descriptor
    #[inline]
    #[must_use]
    pub fn new(
        label_type_id: LabelTypeId,
        label_type_name: impl Into<String>,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            label_type_id,
            label_type_name: label_type_name.into(),
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }
}

/// A named input changed its name (an edge label was edited)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRename {
    /// Input name before the edit
    pub old_name: String,
    /// Input name after the edit
    pub new_name: String,
}

impl InputRename {
    /// Create descriptor
    #[inline]
    #[must_use]
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// Derive a rename from an edge label before and after an edit
    ///
    /// Adding or clearing a label is not a rename: the input appears or
    /// disappears and behavior text referencing it becomes (in)valid instead.
    #[must_use]
    pub fn detect(before: Option<&str>, after: Option<&str>) -> Option<Self> {
        let before = before.map(str::trim).filter(|s| !s.is_empty())?;
        let after = after.map(str::trim).filter(|s| !s.is_empty())?;
        (before != after).then(|| Self::new(before, after))
    }
}

/// All label renames between two catalog snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRenames {
    /// Renamed types
    pub types: Vec<LabelTypeRename>,
    /// Renamed values
    pub values: Vec<LabelValueRename>,
}

impl LabelRenames {
    /// No renames
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was renamed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.values.is_empty()
    }

    /// Compare two catalog snapshots by id
    ///
    /// Types and values present in only one snapshot are additions or
    /// removals and produce no rename. Value renames carry the type name from
    /// `current`, so applying type renames before value renames is consistent.
    #[must_use]
    pub fn diff(previous: &LabelTypeCatalog, current: &LabelTypeCatalog) -> Self {
        let mut renames = Self::new();
        for old_type in previous.types() {
            let Some(new_type) = current.get(&old_type.id) else {
                continue;
            };
            if old_type.name != new_type.name {
                renames.types.push(LabelTypeRename::new(
                    old_type.id.clone(),
                    old_type.name.clone(),
                    new_type.name.clone(),
                ));
            }
            for old_value in &old_type.values {
                let Some(new_value) = new_type.value_by_id(&old_value.id) else {
                    continue;
                };
                if old_value.text != new_value.text {
                    renames.values.push(LabelValueRename::new(
                        old_type.id.clone(),
                        new_type.name.clone(),
                        old_value.text.clone(),
                        new_value.text.clone(),
                    ));
                }
            }
        }
        renames
    }
}
