//! Newtype IDs for catalog identifiers.
//!
//! Items carry two kinds of identity: the numeric internal id used for
//! display and ordering, and the string unique entry id used by exported
//! ownership catalogs. Keeping them apart prevents matching one against
//! the other by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric internal item id.
///
/// Zero stands in for a missing id and sorts first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// The placeholder used when a record carries no id.
    pub const MISSING: ItemId = ItemId(0);

    /// Create an id from its numeric value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this id is the missing placeholder.
    pub const fn is_missing(self) -> bool {
        self.0 == 0
    }

    /// Return `self` unless it is missing, in which case return `fallback`.
    pub fn or(self, fallback: ItemId) -> ItemId {
        if self.is_missing() {
            fallback
        } else {
            self
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// String identifier assigned to each catalog entry by the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueEntryId(String);

impl UniqueEntryId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UniqueEntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UniqueEntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UniqueEntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_falls_back() {
        assert!(ItemId::default().is_missing());
        assert_eq!(ItemId::MISSING.or(ItemId::new(7)), ItemId::new(7));
        assert_eq!(ItemId::new(3).or(ItemId::new(7)), ItemId::new(3));
    }

    #[test]
    fn test_ids_deserialize_transparently() {
        let id: ItemId = serde_json::from_str("4021").unwrap();
        assert_eq!(id.get(), 4021);

        let unique: UniqueEntryId = serde_json::from_str("\"AbC123\"").unwrap();
        assert_eq!(unique.as_str(), "AbC123");
    }
}
