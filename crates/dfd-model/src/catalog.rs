//! Label-type catalog
//!
//! A [`LabelTypeCatalog`] holds the user-defined classification axes
//! ([`LabelType`]) and their permitted values ([`LabelValue`]). Names and
//! value texts are identifiers (see [`crate::ident`]) and unique within their
//! scope, which lets behavior text reference them as plain `Type.value`
//! tokens.

use crate::ident::is_identifier;
use crate::rename::{LabelTypeRename, LabelValueRename};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a label type
///
/// Survives renames; snapshot diffing matches on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTypeId(String);

/// Stable identifier of a label value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelValueId(String);

impl LabelTypeId {
    /// Generate a fresh random id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl LabelValueId {
    /// Generate a fresh random id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for LabelValueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for LabelTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for LabelValueId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One permitted value of a label type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValue {
    /// Stable id
    pub id: LabelValueId,
    /// Display text, referenced from behavior text
    pub text: String,
}

impl LabelValue {
    /// Create value with a generated id
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(LabelValueId::generate(), text)
    }

    /// Create value with an explicit id
    #[inline]
    #[must_use]
    pub fn with_id(id: impl Into<LabelValueId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A classification axis and its values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelType {
    /// Stable id
    pub id: LabelTypeId,
    /// Type name, referenced from behavior text
    pub name: String,
    /// Permitted values, in display order
    #[serde(default)]
    pub values: Vec<LabelValue>,
}

impl LabelType {
    /// Create type with a generated id and no values
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(LabelTypeId::generate(), name)
    }

    /// Create type with an explicit id and no values
    #[inline]
    #[must_use]
    pub fn with_id(id: impl Into<LabelTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value (builder style)
    #[must_use]
    pub fn value(mut self, value: LabelValue) -> Self {
        self.values.push(value);
        self
    }

    /// Append a value with a generated id (builder style)
    #[must_use]
    pub fn with_value(self, text: impl Into<String>) -> Self {
        self.value(LabelValue::new(text))
    }

    /// Find value by its text
    #[must_use]
    pub fn value_by_text(&self, text: &str) -> Option<&LabelValue> {
        self.values.iter().find(|v| v.text == text)
    }

    /// Whether `text` names one of this type's values
    #[inline]
    #[must_use]
    pub fn has_value(&self, text: &str) -> bool {
        self.value_by_text(text).is_some()
    }

    /// Find value by id
    #[must_use]
    pub fn value_by_id(&self, id: &LabelValueId) -> Option<&LabelValue> {
        self.values.iter().find(|v| &v.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !is_identifier(&self.name) {
            return Err(CatalogError::InvalidName(self.name.clone()));
        }
        let mut texts = HashSet::new();
        let mut ids = HashSet::new();
        for value in &self.values {
            if !is_identifier(&value.text) {
                return Err(CatalogError::InvalidName(value.text.clone()));
            }
            if !texts.insert(value.text.as_str()) {
                return Err(CatalogError::DuplicateValueText {
                    label_type: self.name.clone(),
                    text: value.text.clone(),
                });
            }
            if !ids.insert(&value.id) {
                return Err(CatalogError::DuplicateId(value.id.to_string()));
            }
        }
        Ok(())
    }
}

/// Catalog of label types
///
/// Every mutation keeps names and value texts valid and unique. The same
/// checks run on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LabelType>", into = "Vec<LabelType>")]
pub struct LabelTypeCatalog {
    types: Vec<LabelType>,
}

impl LabelTypeCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build catalog from existing types
    ///
    /// # Errors
    /// Returns error if a name is not an identifier, or a name, value text or
    /// id is duplicated
    pub fn from_types(types: Vec<LabelType>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for ty in &types {
            ty.validate()?;
            if !names.insert(ty.name.as_str()) {
                return Err(CatalogError::DuplicateTypeName(ty.name.clone()));
            }
            if !ids.insert(&ty.id) {
                return Err(CatalogError::DuplicateId(ty.id.to_string()));
            }
        }
        Ok(Self { types })
    }

    /// All types in display order
    #[inline]
    #[must_use]
    pub fn types(&self) -> &[LabelType] {
        &self.types
    }

    /// Number of types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no types
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up type by id
    #[must_use]
    pub fn get(&self, id: &LabelTypeId) -> Option<&LabelType> {
        self.types.iter().find(|t| &t.id == id)
    }

    /// Look up type by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LabelType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Whether `type_name.value_text` refers to an existing value
    #[must_use]
    pub fn contains_value(&self, type_name: &str, value_text: &str) -> bool {
        self.find(type_name).is_some_and(|t| t.has_value(value_text))
    }

    /// Add a new type
    ///
    /// # Errors
    /// `InvalidName` or `DuplicateTypeName`
    pub fn add_type(&mut self, name: &str) -> Result<LabelTypeId, CatalogError> {
        self.check_type_name(name)?;
        let ty = LabelType::new(name);
        let id = ty.id.clone();
        self.types.push(ty);
        Ok(id)
    }

    /// Add a new value to an existing type
    ///
    /// # Errors
    /// `UnknownType`, `InvalidName` or `DuplicateValueText`
    pub fn add_value(&mut self, type_id: &LabelTypeId, text: &str) -> Result<LabelValueId, CatalogError> {
        let ty = self.type_mut(type_id)?;
        check_value_text(ty, text)?;
        let value = LabelValue::new(text);
        let id = value.id.clone();
        ty.values.push(value);
        Ok(id)
    }

    /// Rename a type
    ///
    /// Returns the rename that behavior text has to follow, or `None` when the
    /// name did not change.
    ///
    /// # Errors
    /// `UnknownType`, `InvalidName` or `DuplicateTypeName`
    pub fn rename_type(
        &mut self,
        type_id: &LabelTypeId,
        new_name: &str,
    ) -> Result<Option<LabelTypeRename>, CatalogError> {
        let old_name = self
            .get(type_id)
            .map(|t| t.name.clone())
            .ok_or_else(|| CatalogError::UnknownType(type_id.clone()))?;
        if old_name == new_name {
            return Ok(None);
        }
        self.check_type_name(new_name)?;
        self.type_mut(type_id)?.name = new_name.to_string();
        Ok(Some(LabelTypeRename::new(type_id.clone(), old_name, new_name)))
    }

    /// Rename a value of a type
    ///
    /// # Errors
    /// `UnknownType`, `UnknownValue`, `InvalidName` or `DuplicateValueText`
    pub fn rename_value(
        &mut self,
        type_id: &LabelTypeId,
        value_id: &LabelValueId,
        new_text: &str,
    ) -> Result<Option<LabelValueRename>, CatalogError> {
        let ty = self.type_mut(type_id)?;
        let old_text = ty
            .value_by_id(value_id)
            .map(|v| v.text.clone())
            .ok_or_else(|| CatalogError::UnknownValue {
                label_type: type_id.clone(),
                value: value_id.clone(),
            })?;
        if old_text == new_text {
            return Ok(None);
        }
        check_value_text(ty, new_text)?;
        let type_name = ty.name.clone();
        if let Some(value) = ty.values.iter_mut().find(|v| &v.id == value_id) {
            value.text = new_text.to_string();
        }
        Ok(Some(LabelValueRename::new(type_id.clone(), type_name, old_text, new_text)))
    }

    /// Remove a type with all its values
    ///
    /// # Errors
    /// `UnknownType`
    pub fn remove_type(&mut self, type_id: &LabelTypeId) -> Result<LabelType, CatalogError> {
        let index = self
            .types
            .iter()
            .position(|t| &t.id == type_id)
            .ok_or_else(|| CatalogError::UnknownType(type_id.clone()))?;
        Ok(self.types.remove(index))
    }

    /// Remove a single value
    ///
    /// # Errors
    /// `UnknownType` or `UnknownValue`
    pub fn remove_value(
        &mut self,
        type_id: &LabelTypeId,
        value_id: &LabelValueId,
    ) -> Result<LabelValue, CatalogError> {
        let ty = self.type_mut(type_id)?;
        let index = ty
            .values
            .iter()
            .position(|v| &v.id == value_id)
            .ok_or_else(|| CatalogError::UnknownValue {
                label_type: type_id.clone(),
                value: value_id.clone(),
            })?;
        Ok(ty.values.remove(index))
    }

    fn type_mut(&mut self, type_id: &LabelTypeId) -> Result<&mut LabelType, CatalogError> {
        self.types
            .iter_mut()
            .find(|t| &t.id == type_id)
            .ok_or_else(|| CatalogError::UnknownType(type_id.clone()))
    }

    fn check_type_name(&self, name: &str) -> Result<(), CatalogError> {
        if !is_identifier(name) {
            return Err(CatalogError::InvalidName(name.to_string()));
        }
        if self.find(name).is_some() {
            return Err(CatalogError::DuplicateTypeName(name.to_string()));
        }
        Ok(())
    }
}

fn check_value_text(ty: &LabelType, text: &str) -> Result<(), CatalogError> {
    if !is_identifier(text) {
        return Err(CatalogError::InvalidName(text.to_string()));
    }
    if ty.has_value(text) {
        return Err(CatalogError::DuplicateValueText {
            label_type: ty.name.clone(),
            text: text.to_string(),
        });
    }
    Ok(())
}

impl TryFrom<Vec<LabelType>> for LabelTypeCatalog {
    type Error = CatalogError;

    fn try_from(types: Vec<LabelType>) -> Result<Self, Self::Error> {
        Self::from_types(types)
    }
}

impl From<LabelTypeCatalog> for Vec<LabelType> {
    fn from(catalog: LabelTypeCatalog) -> Self {
        catalog.types
    }
}

/// Catalog mutation and loading errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Name or value text is empty or contains non-identifier characters
    #[error("invalid name '{0}': only ASCII letters, digits and '_' are allowed")]
    InvalidName(String),

    /// Two types share a name
    #[error("duplicate label type name: '{0}'")]
    DuplicateTypeName(String),

    /// Two values of one type share a text
    #[error("duplicate value '{text}' in label type '{label_type}'")]
    DuplicateValueText { label_type: String, text: String },

    /// Two entries share an id
    #[error("duplicate id: '{0}'")]
    DuplicateId(String),

    /// Type id not present
    #[error("unknown label type id: {0}")]
    UnknownType(LabelTypeId),

    /// Value id not present in the type
    #[error("unknown value id {value} in label type {label_type}")]
    UnknownValue {
        label_type: LabelTypeId,
        value: LabelValueId,
    },
}
