//! Raw item records as produced by the dataset generator.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{read_file, Result};
use crate::ids::{ItemId, UniqueEntryId};

/// Localized text keyed by locale code (e.g. `cNzh`, `eUen`).
pub type LocalizedText = HashMap<String, String>;

/// One item as it appears in the generated dataset.
///
/// Every field is optional; a record missing everything still normalizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    /// Raw (untranslated) item name.
    pub name: Option<String>,
    /// Localized names.
    pub translations: Option<LocalizedText>,
    /// Numeric internal id.
    #[serde(deserialize_with = "lenient_id")]
    pub internal_id: Option<ItemId>,
    /// Unique entry id for items without variations.
    #[serde(deserialize_with = "lenient_unique_id")]
    pub unique_entry_id: Option<UniqueEntryId>,
    /// Source spreadsheet, used as the item category.
    pub source_sheet: Option<String>,
    pub image: Option<String>,
    pub storage_image: Option<String>,
    pub closet_image: Option<String>,
    pub framed_image: Option<String>,
    pub inventory_image: Option<String>,
    /// Variant/pattern rows, in dataset order.
    #[serde(deserialize_with = "null_as_default")]
    pub variations: Vec<RawVariation>,
    pub version_added: Option<String>,
    /// Where the item can be obtained.
    #[serde(deserialize_with = "null_as_default")]
    pub source: Vec<String>,
    /// Footprint such as `"1x1"` or `"2x1.5"`.
    pub size: Option<String>,
    pub tag: Option<String>,
    /// HHA series key.
    pub series: Option<String>,
    /// Localized series names.
    pub series_translations: Option<LocalizedText>,
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub themes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub buy: Option<i64>,
    pub sell: Option<i64>,
}

impl RawRecord {
    /// Localized name for `locale`, if present and non-empty.
    pub fn localized_name(&self, locale: &str) -> Option<&str> {
        localized(self.translations.as_ref(), locale)
    }

    /// Display name: localized name, then raw name, then empty.
    pub fn display_name(&self, locale: &str) -> &str {
        self.localized_name(locale)
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or("")
    }

    /// The record's own image: first non-empty candidate.
    pub fn primary_image(&self) -> Option<&str> {
        first_non_empty([
            self.image.as_deref(),
            self.storage_image.as_deref(),
            self.closet_image.as_deref(),
            self.framed_image.as_deref(),
            self.inventory_image.as_deref(),
        ])
    }

    /// Localized series name, falling back to the raw series key.
    pub fn series_display_name(&self, locale: &str) -> &str {
        localized(self.series_translations.as_ref(), locale)
            .or_else(|| non_empty(self.series.as_deref()))
            .unwrap_or("")
    }
}

/// One variant/pattern row of a raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVariation {
    /// Style label; rows sharing it form one variant group.
    pub variation: Option<String>,
    pub variant_translations: Option<LocalizedText>,
    /// Pattern label within the style.
    pub pattern: Option<String>,
    pub pattern_translations: Option<LocalizedText>,
    pub image: Option<String>,
    pub storage_image: Option<String>,
    pub closet_image: Option<String>,
    pub framed_image: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub internal_id: Option<ItemId>,
    #[serde(deserialize_with = "lenient_unique_id")]
    pub unique_entry_id: Option<UniqueEntryId>,
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
}

impl RawVariation {
    /// Variant group label: localized, then raw, then empty.
    pub fn variant_label(&self, locale: &str) -> &str {
        localized(self.variant_translations.as_ref(), locale)
            .or_else(|| non_empty(self.variation.as_deref()))
            .unwrap_or("")
    }

    /// Pattern label: localized, then raw, then empty.
    pub fn pattern_label(&self, locale: &str) -> &str {
        localized(self.pattern_translations.as_ref(), locale)
            .or_else(|| non_empty(self.pattern.as_deref()))
            .unwrap_or("")
    }

    /// The variation's own image, without any parent fallback.
    pub fn own_image(&self) -> Option<&str> {
        first_non_empty([
            self.image.as_deref(),
            self.storage_image.as_deref(),
            self.closet_image.as_deref(),
            self.framed_image.as_deref(),
        ])
    }
}

/// Parse a dataset from JSON text (a top-level array of records).
pub fn parse_items(json: &str) -> Result<Vec<RawRecord>> {
    let records: Vec<RawRecord> = serde_json::from_str(json)?;
    tracing::debug!(records = records.len(), "parsed item dataset");
    Ok(records)
}

/// Load a dataset from a JSON file.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let records = parse_items(&read_file(path)?)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded item dataset");
    Ok(records)
}

/// First candidate that is present and non-empty.
pub(crate) fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn localized<'a>(text: Option<&'a LocalizedText>, locale: &str) -> Option<&'a str> {
    non_empty(text.and_then(|t| t.get(locale)).map(String::as_str))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Internal ids arrive as numbers or numeric strings. Anything else,
/// negative and fractional numbers included, reads as absent.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let id = match &value {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .and_then(|id| u32::try_from(id).ok());

    if id.is_none() {
        if let Some(value) = value.filter(|v| !v.is_null()) {
            tracing::warn!(%value, "ignoring unusable internal id");
        }
    }
    Ok(id.map(ItemId::new))
}

/// Unique entry ids are strings; bare numbers are kept as their decimal text.
fn lenient_unique_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<UniqueEntryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    Ok(id.map(UniqueEntryId::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_display_name_prefers_translation() {
        let raw = record(json!({
            "name": "blue chair",
            "translations": { "cNzh": "蓝色椅子", "eUen": "blue chair" }
        }));
        assert_eq!(raw.display_name("cNzh"), "蓝色椅子");
        assert_eq!(raw.display_name("jPja"), "blue chair");
    }

    #[test]
    fn test_display_name_missing_everything() {
        let raw = RawRecord::default();
        assert_eq!(raw.display_name("cNzh"), "");
    }

    #[test]
    fn test_empty_translation_falls_back() {
        let raw = record(json!({ "name": "lamp", "translations": { "cNzh": "" } }));
        assert_eq!(raw.display_name("cNzh"), "lamp");
    }

    #[test]
    fn test_primary_image_skips_empty_candidates() {
        let raw = record(json!({
            "image": "",
            "closetImage": "closet.png",
            "inventoryImage": "inv.png"
        }));
        assert_eq!(raw.primary_image(), Some("closet.png"));
    }

    #[test]
    fn test_null_lists_become_empty() {
        let raw = record(json!({ "name": "x", "source": null, "colors": null, "variations": null }));
        assert!(raw.source.is_empty());
        assert!(raw.colors.is_empty());
        assert!(raw.variations.is_empty());
    }

    #[test]
    fn test_variation_labels() {
        let v: RawVariation = serde_json::from_value(json!({
            "variation": "White",
            "variantTranslations": { "cNzh": "白色" },
            "pattern": "Stripes"
        }))
        .unwrap();
        assert_eq!(v.variant_label("cNzh"), "白色");
        assert_eq!(v.pattern_label("cNzh"), "Stripes");
        assert_eq!(v.own_image(), None);
    }

    #[test]
    fn test_parse_items_array() {
        let records = parse_items(r#"[{"name":"a","internalId":3},{"name":"b"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].internal_id, Some(ItemId::new(3)));
        assert_eq!(records[1].internal_id, None);
    }

    #[test]
    fn test_mistyped_ids_do_not_fail_the_dataset() {
        let records = parse_items(
            r#"[
                {"internalId": 1},
                {"internalId": "2"},
                {"internalId": -3},
                {"internalId": 4.5},
                {"internalId": "abc"},
                {"internalId": 4294967296},
                {"internalId": null, "uniqueEntryId": 77}
            ]"#,
        )
        .unwrap();

        let ids: Vec<Option<ItemId>> = records.iter().map(|r| r.internal_id).collect();
        assert_eq!(
            ids,
            vec![Some(ItemId::new(1)), Some(ItemId::new(2)), None, None, None, None, None]
        );
        assert_eq!(records[6].unique_entry_id, Some(UniqueEntryId::new("77")));
    }

    #[test]
    fn test_mistyped_variation_id_reads_as_missing() {
        let raw = record(json!({
            "name": "rug",
            "variations": [
                { "variation": "A", "internalId": "12" },
                { "variation": "B", "internalId": [12] }
            ]
        }));
        assert_eq!(raw.variations[0].internal_id, Some(ItemId::new(12)));
        assert_eq!(raw.variations[1].internal_id, None);
    }

    #[test]
    fn test_parse_items_rejects_garbage() {
        assert!(parse_items("{not json").is_err());
    }
}
