//! Sort keys and the stable sort engine.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::error::CatalogError;

/// User-selectable sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Name A-Z.
    #[serde(rename = "name-asc")]
    NameAsc,
    /// Name Z-A.
    #[serde(rename = "name-desc")]
    NameDesc,
    /// Displayed id, low to high.
    #[default]
    #[serde(rename = "id-asc")]
    IdAsc,
    /// Displayed id, high to low.
    #[serde(rename = "id-desc")]
    IdDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::IdAsc,
        SortKey::IdDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::IdAsc => "id-asc",
            SortKey::IdDesc => "id-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name: A-Z",
            SortKey::NameDesc => "Name: Z-A",
            SortKey::IdAsc => "ID: Low to High",
            SortKey::IdDesc => "ID: High to Low",
        }
    }

    fn is_descending(&self) -> bool {
        matches!(self, SortKey::NameDesc | SortKey::IdDesc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::unknown("sort key", s))
    }
}

/// Collation key for locale-aware name ordering.
///
/// Text is transliterated to Latin (CJK becomes pinyin-like syllables) and
/// lowercased, so mixed-script names interleave the way a reader expects.
pub fn collation_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Locale-aware string comparison. Equal collation keys fall back to the raw
/// strings so the ordering stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sort entries into a new vector. The input is left untouched and equal
/// keys keep their relative input order.
pub fn sort_entries<T>(entries: &[T], key: SortKey) -> Vec<T>
where
    T: Borrow<CatalogEntry> + Clone,
{
    let mut sorted: Vec<T> = entries.to_vec();

    match key {
        SortKey::NameAsc | SortKey::NameDesc => {
            let mut keyed: Vec<(String, T)> = sorted
                .into_iter()
                .map(|e| (collation_key(&e.borrow().name), e))
                .collect();
            keyed.sort_by(|(ka, a), (kb, b)| {
                let ord = ka.cmp(kb).then_with(|| a.borrow().name.cmp(&b.borrow().name));
                if key.is_descending() {
                    ord.reverse()
                } else {
                    ord
                }
            });
            sorted = keyed.into_iter().map(|(_, e)| e).collect();
        }
        SortKey::IdAsc => sorted.sort_by_key(|e| e.borrow().display_id),
        SortKey::IdDesc => sorted.sort_by(|a, b| b.borrow().display_id.cmp(&a.borrow().display_id)),
    }

    tracing::debug!(key = %key, entries = sorted.len(), "sorted entries");
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;

    fn entry(id: u32, name: &str) -> CatalogEntry {
        CatalogEntry::new(ItemId::new(id), name, "Other")
    }

    fn summary(entries: &[&CatalogEntry]) -> Vec<(u32, String)> {
        entries
            .iter()
            .map(|e| (e.display_id.get(), e.name.clone()))
            .collect()
    }

    #[test]
    fn test_sort_key_parse_and_display() {
        assert_eq!("name-desc".parse::<SortKey>().unwrap(), SortKey::NameDesc);
        assert_eq!("ID-ASC".parse::<SortKey>().unwrap(), SortKey::IdAsc);
        assert!("price".parse::<SortKey>().is_err());
        assert_eq!(SortKey::IdDesc.to_string(), "id-desc");
        assert_eq!(SortKey::default(), SortKey::IdAsc);
    }

    #[test]
    fn test_sort_key_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&SortKey::NameAsc).unwrap(), "\"name-asc\"");
        let key: SortKey = serde_json::from_str("\"id-desc\"").unwrap();
        assert_eq!(key, SortKey::IdDesc);
    }

    #[test]
    fn test_id_sort_is_stable() {
        let entries = [entry(5, "B"), entry(3, "A"), entry(5, "A")];
        let refs: Vec<&CatalogEntry> = entries.iter().collect();

        let sorted = sort_entries(&refs, SortKey::IdAsc);
        assert_eq!(
            summary(&sorted),
            vec![(3, "A".to_string()), (5, "B".to_string()), (5, "A".to_string())]
        );
    }

    #[test]
    fn test_id_desc_keeps_ties_in_input_order() {
        let entries = [entry(1, "x"), entry(5, "B"), entry(5, "A")];
        let sorted = sort_entries(&entries, SortKey::IdDesc);
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "x"]);
    }

    #[test]
    fn test_missing_id_sorts_first() {
        let entries = [entry(2, "b"), entry(0, "a")];
        let sorted = sort_entries(&entries, SortKey::IdAsc);
        assert_eq!(sorted[0].display_id, ItemId::MISSING);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let entries = [entry(1, "banana"), entry(2, "Apple"), entry(3, "cherry")];
        let sorted = sort_entries(&entries, SortKey::NameAsc);
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);

        let sorted = sort_entries(&entries, SortKey::NameDesc);
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_name_sort_transliterates_cjk() {
        // 苹果 (ping guo) sorts between "apple" and "zebra".
        let entries = [entry(1, "zebra"), entry(2, "苹果"), entry(3, "apple")];
        let sorted = sort_entries(&entries, SortKey::NameAsc);
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "苹果", "zebra"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let entries = vec![entry(2, "b"), entry(1, "a")];
        let before = entries.clone();
        let _ = sort_entries(&entries, SortKey::IdAsc);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_locale_cmp_is_total() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("Ab", "ac"), Ordering::Less);
    }
}
