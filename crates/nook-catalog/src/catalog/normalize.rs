//! Raw record normalization.

use std::collections::HashMap;

use crate::catalog::raw::first_non_empty;
use crate::catalog::{CatalogEntry, OwnedSet, Pattern, RawRecord, VariantGroup};
use crate::ids::ItemId;

/// Translation key used for localized names unless configured otherwise.
pub const DEFAULT_LOCALE: &str = "cNzh";

/// Category assigned to records without a source sheet.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Converts raw dataset records into [`CatalogEntry`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    locale: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl Normalizer {
    /// Create a normalizer reading localized names for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Normalize one record.
    ///
    /// Never fails: missing names and images become empty strings and
    /// missing ids become [`ItemId::MISSING`].
    pub fn normalize(&self, raw: &RawRecord, owned: &OwnedSet) -> CatalogEntry {
        let id = raw.internal_id.unwrap_or_default();
        let name = raw.display_name(&self.locale).to_string();
        if name.is_empty() {
            tracing::warn!(internal_id = %id, "record has no name");
        }

        let is_owned = owned.contains_name(&name)
            || owned.contains_item_id(id)
            || raw
                .unique_entry_id
                .as_ref()
                .is_some_and(|u| owned.contains_unique_id(u));

        let base_image_url = raw.primary_image().unwrap_or_default().to_string();
        let variant_groups = self.group_variations(raw, id, &base_image_url);
        let has_variations = variant_groups.iter().any(|g| !g.patterns.is_empty());

        let mut entry = CatalogEntry {
            id,
            unique_entry_id: raw.unique_entry_id.clone(),
            display_id: id,
            name,
            raw_name: raw.name.clone().unwrap_or_default(),
            category: raw
                .source_sheet
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image_url: base_image_url.clone(),
            colors: raw.colors.clone(),
            base_image_url,
            base_colors: raw.colors.clone(),
            owned: is_owned,
            variant_groups,
            has_variations,
            selected_variant_index: 0,
            selected_pattern_index: 0,
            version_added: raw.version_added.clone().unwrap_or_default(),
            source: raw.source.clone(),
            size: raw.size.clone().unwrap_or_default(),
            tag: raw.tag.clone().unwrap_or_default(),
            series: raw.series.clone().unwrap_or_default(),
            series_display_name: raw.series_display_name(&self.locale).to_string(),
            themes: raw.themes.clone(),
            styles: raw.styles.clone(),
            buy: raw.buy,
            sell: raw.sell,
        };

        // Variant-bearing items start out showing their first pattern.
        entry.refresh_display();
        entry
    }

    /// Normalize a whole dataset, ordered by `display_id` (stable).
    pub fn normalize_all(&self, records: &[RawRecord], owned: &OwnedSet) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = records
            .iter()
            .map(|raw| self.normalize(raw, owned))
            .collect();
        entries.sort_by_key(|entry| entry.display_id);

        tracing::debug!(
            entries = entries.len(),
            owned = entries.iter().filter(|e| e.owned).count(),
            "normalized dataset"
        );
        entries
    }

    /// Group variations by variant label, keeping first-seen group order.
    fn group_variations(&self, raw: &RawRecord, parent_id: ItemId, parent_image: &str) -> Vec<VariantGroup> {
        let mut groups: Vec<VariantGroup> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for variation in &raw.variations {
            let variant_name = variation.variant_label(&self.locale).to_string();
            let image_url = first_non_empty([
                variation.own_image(),
                raw.inventory_image.as_deref(),
                Some(parent_image),
            ])
            .unwrap_or_default()
            .to_string();

            let pattern = Pattern {
                pattern_name: variation.pattern_label(&self.locale).to_string(),
                image_url,
                id: variation.internal_id.unwrap_or_default().or(parent_id),
                unique_entry_id: variation.unique_entry_id.clone(),
                colors: if variation.colors.is_empty() {
                    raw.colors.clone()
                } else {
                    variation.colors.clone()
                },
            };

            let index = *positions.entry(variant_name.clone()).or_insert_with(|| {
                groups.push(VariantGroup {
                    variant_name,
                    patterns: Vec::new(),
                });
                groups.len() - 1
            });
            groups[index].patterns.push(pattern);
        }

        groups
    }
}

/// Normalize one record with the default locale.
pub fn normalize(raw: &RawRecord, owned: &OwnedSet) -> CatalogEntry {
    Normalizer::default().normalize(raw, owned)
}

/// Normalize a dataset with the default locale, ordered by `display_id`.
pub fn normalize_all(records: &[RawRecord], owned: &OwnedSet) -> Vec<CatalogEntry> {
    Normalizer::default().normalize_all(records, owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Selection;
    use crate::ids::UniqueEntryId;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn variation(variant: &str, pattern: &str, id: u32) -> serde_json::Value {
        json!({
            "variation": variant,
            "pattern": pattern,
            "internalId": id,
            "image": format!("{}.png", id),
            "colors": ["Red"]
        })
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let raw = record(json!({
            "name": "sofa",
            "internalId": 1,
            "variations": [
                variation("A", "p1", 11),
                variation("B", "p1", 12),
                variation("A", "p2", 13),
                variation("C", "p1", 14)
            ]
        }));
        let entry = normalize(&raw, &OwnedSet::empty());

        let names: Vec<&str> = entry.variant_groups.iter().map(|g| g.variant_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let a_ids: Vec<ItemId> = entry.variant_groups[0].patterns.iter().map(|p| p.id).collect();
        assert_eq!(a_ids, vec![ItemId::new(11), ItemId::new(13)]);
        assert!(entry.has_variations);
    }

    #[test]
    fn test_first_pattern_seeds_display() {
        let raw = record(json!({
            "name": "sofa",
            "internalId": 1,
            "image": "sofa.png",
            "colors": ["Beige"],
            "variations": [variation("A", "p1", 11), variation("B", "p1", 12)]
        }));
        let entry = normalize(&raw, &OwnedSet::empty());

        assert_eq!(entry.id, ItemId::new(1));
        assert_eq!(entry.display_id, ItemId::new(11));
        assert_eq!(entry.image_url, "11.png");
        assert_eq!(entry.colors, vec!["Red".to_string()]);
        assert_eq!(entry.base_colors, vec!["Beige".to_string()]);
        assert_eq!(entry.selection(), Selection::default());
    }

    #[test]
    fn test_variation_fallbacks_to_parent() {
        let raw = record(json!({
            "name": "rug",
            "internalId": 7,
            "image": "rug.png",
            "colors": ["Green"],
            "variations": [{ "variation": "Only" }]
        }));
        let entry = normalize(&raw, &OwnedSet::empty());
        let pattern = &entry.variant_groups[0].patterns[0];

        assert_eq!(pattern.id, ItemId::new(7));
        assert_eq!(pattern.image_url, "rug.png");
        assert_eq!(pattern.colors, vec!["Green".to_string()]);
        assert_eq!(entry.display_id, ItemId::new(7));
    }

    #[test]
    fn test_variation_image_prefers_inventory_over_parent() {
        let raw = record(json!({
            "name": "shirt",
            "closetImage": "closet.png",
            "inventoryImage": "inv.png",
            "variations": [{ "variation": "Blue" }]
        }));
        let entry = normalize(&raw, &OwnedSet::empty());
        assert_eq!(entry.base_image_url, "closet.png");
        assert_eq!(entry.variant_groups[0].patterns[0].image_url, "inv.png");
    }

    #[test]
    fn test_owned_by_any_signal() {
        let by_name = OwnedSet::new(["蓝色椅子"], Vec::<String>::new());
        let raw = record(json!({
            "name": "blue chair",
            "translations": { "cNzh": "蓝色椅子" },
            "internalId": 55
        }));
        assert!(normalize(&raw, &by_name).owned);

        let by_id = OwnedSet::new(Vec::<String>::new(), ["55"]);
        assert!(normalize(&raw, &by_id).owned);

        let by_unique = OwnedSet::new(Vec::<String>::new(), ["xyz"]);
        let mut unique = raw.clone();
        unique.unique_entry_id = Some(UniqueEntryId::new("xyz"));
        assert!(normalize(&unique, &by_unique).owned);

        let nothing = OwnedSet::new(["other"], ["56"]);
        assert!(!normalize(&unique, &nothing).owned);
        assert!(!normalize(&unique, &OwnedSet::empty()).owned);
    }

    #[test]
    fn test_degraded_record() {
        let entry = normalize(&RawRecord::default(), &OwnedSet::empty());
        assert_eq!(entry.name, "");
        assert_eq!(entry.image_url, "");
        assert_eq!(entry.display_id, ItemId::MISSING);
        assert_eq!(entry.category, DEFAULT_CATEGORY);
        assert!(!entry.has_variations);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = record(json!({
            "name": "sofa",
            "internalId": 1,
            "source": ["Crafting"],
            "variations": [variation("A", "p1", 11)]
        }));
        let owned = OwnedSet::new(["sofa"], ["1"]);
        assert_eq!(normalize(&raw, &owned), normalize(&raw, &owned));
    }

    #[test]
    fn test_normalize_all_orders_by_display_id() {
        let records = vec![
            record(json!({ "name": "c", "internalId": 30 })),
            record(json!({ "name": "a", "internalId": 10, "variations": [variation("A", "", 40)] })),
            record(json!({ "name": "b", "internalId": 20 })),
            record(json!({ "name": "d", "internalId": 20 })),
        ];
        let entries = normalize_all(&records, &OwnedSet::empty());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_locale_selects_translation() {
        let raw = record(json!({
            "name": "chair",
            "translations": { "cNzh": "椅子", "jPja": "いす" },
            "seriesTranslations": { "jPja": "ナチュラル" },
            "series": "natural"
        }));
        let entry = Normalizer::new("jPja").normalize(&raw, &OwnedSet::empty());
        assert_eq!(entry.name, "いす");
        assert_eq!(entry.raw_name, "chair");
        assert_eq!(entry.series_display_name, "ナチュラル");

        let fallback = normalize(&raw, &OwnedSet::empty());
        assert_eq!(fallback.series_display_name, "natural");
    }
}
