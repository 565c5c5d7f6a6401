//! Ownership lookups derived from an exported catalog.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_file, Result};
use crate::ids::{ItemId, UniqueEntryId};

/// An identifier in an exported catalog, written as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnedId {
    Number(u64),
    Text(String),
}

impl fmt::Display for OwnedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedId::Number(n) => write!(f, "{}", n),
            OwnedId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A variation row in an exported catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedVariation {
    pub unique_id: OwnedId,
}

/// One owned item in an exported catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedItem {
    /// Display label, matched against entry names.
    #[serde(default)]
    pub label: String,
    pub unique_id: OwnedId,
    #[serde(default)]
    pub variations: Vec<OwnedVariation>,
}

/// The exported ownership file: `{ "items": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedCatalog {
    #[serde(default)]
    pub items: Vec<OwnedItem>,
}

impl OwnedCatalog {
    /// Parse an exported catalog from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an exported catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::parse(&read_file(path)?)?;
        tracing::info!(path = %path.display(), items = catalog.items.len(), "loaded ownership catalog");
        Ok(catalog)
    }
}

/// Name and id lookup sets used to decide `owned` during normalization.
///
/// Ids are kept in their decimal/string form so numeric internal ids and
/// string unique entry ids can both be tested against the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedSet {
    names: HashSet<String>,
    ids: HashSet<String>,
}

impl OwnedSet {
    /// A set that owns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from explicit name and id collections.
    pub fn new<N, I>(names: N, ids: I) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Derive lookups from an exported catalog, including variation ids.
    pub fn from_catalog(catalog: &OwnedCatalog) -> Self {
        let mut set = Self::empty();
        for item in &catalog.items {
            if !item.label.is_empty() {
                set.names.insert(item.label.clone());
            }
            set.ids.insert(item.unique_id.to_string());
            for variation in &item.variations {
                set.ids.insert(variation.unique_id.to_string());
            }
        }
        set
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether a numeric internal id is owned. Missing ids never match.
    pub fn contains_item_id(&self, id: ItemId) -> bool {
        !id.is_missing() && self.ids.contains(&id.to_string())
    }

    pub fn contains_unique_id(&self, id: &UniqueEntryId) -> bool {
        self.ids.contains(id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty()
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn id_count(&self) -> usize {
        self.ids.len()
    }
}

impl From<&OwnedCatalog> for OwnedSet {
    fn from(catalog: &OwnedCatalog) -> Self {
        Self::from_catalog(catalog)
    }
}
