//! Translation tables and localized entry accessors.
//!
//! Tables are loaded once and passed explicitly to whatever needs a
//! localized label. A missing table or key falls back to the raw value.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::error::{read_file, Result};
use crate::search::Dimension;

/// Label shown for an empty single-valued field.
pub const EMPTY_LABEL: &str = "--";

/// Per-dimension label tables plus optional preferred value orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translations {
    pub categories: HashMap<String, String>,
    pub versions: HashMap<String, String>,
    pub sources: HashMap<String, String>,
    pub sizes: HashMap<String, String>,
    pub tags: HashMap<String, String>,
    pub colors: HashMap<String, String>,
    pub series: HashMap<String, String>,
    pub themes: HashMap<String, String>,
    pub styles: HashMap<String, String>,
    /// Preferred facet order per dimension, as raw values.
    pub order: HashMap<Dimension, Vec<String>>,
}

impl Translations {
    /// Parse translation tables from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load translation tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let translations = Self::parse(&read_file(path)?)?;
        tracing::info!(path = %path.display(), "loaded translation tables");
        Ok(translations)
    }

    /// The label table for a dimension.
    pub fn table(&self, dimension: Dimension) -> &HashMap<String, String> {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Version => &self.versions,
            Dimension::Source => &self.sources,
            Dimension::Size => &self.sizes,
            Dimension::Tag => &self.tags,
            Dimension::Color => &self.colors,
            Dimension::Series => &self.series,
            Dimension::Theme => &self.themes,
            Dimension::Style => &self.styles,
        }
    }

    /// Localized label, if the table has a non-empty one.
    pub fn lookup(&self, dimension: Dimension, value: &str) -> Option<&str> {
        self.table(dimension)
            .get(value)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Localized label, or the raw value.
    pub fn label<'a>(&'a self, dimension: Dimension, value: &'a str) -> &'a str {
        self.lookup(dimension, value).unwrap_or(value)
    }

    /// Preferred facet order for a dimension; empty when none is configured.
    pub fn preferred_order(&self, dimension: Dimension) -> &[String] {
        self.order
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Builder-style preferred order, mostly for tests and embedding.
    pub fn with_order<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order
            .insert(dimension, values.into_iter().map(Into::into).collect());
        self
    }
}

/// Read-only localized view over a [`CatalogEntry`].
#[derive(Debug, Clone, Copy)]
pub struct EntryLabels<'a> {
    entry: &'a CatalogEntry,
    translations: &'a Translations,
}

impl<'a> EntryLabels<'a> {
    pub fn new(entry: &'a CatalogEntry, translations: &'a Translations) -> Self {
        Self {
            entry,
            translations,
        }
    }

    fn single(&self, dimension: Dimension, value: &'a str) -> &'a str {
        if value.is_empty() {
            EMPTY_LABEL
        } else {
            self.translations.label(dimension, value)
        }
    }

    fn many(&self, dimension: Dimension, values: &'a [String]) -> Vec<&'a str> {
        values
            .iter()
            .map(|v| self.translations.label(dimension, v))
            .collect()
    }

    pub fn category_name(&self) -> &'a str {
        self.single(Dimension::Category, &self.entry.category)
    }

    pub fn version_name(&self) -> &'a str {
        self.single(Dimension::Version, &self.entry.version_added)
    }

    pub fn size_name(&self) -> &'a str {
        self.single(Dimension::Size, &self.entry.size)
    }

    pub fn tag_name(&self) -> &'a str {
        self.single(Dimension::Tag, &self.entry.tag)
    }

    /// Series label: table entry, then the dataset's localized series name.
    pub fn series_name(&self) -> &'a str {
        if self.entry.series.is_empty() {
            return EMPTY_LABEL;
        }
        self.translations
            .lookup(Dimension::Series, &self.entry.series)
            .or_else(|| Some(self.entry.series_display_name.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(&self.entry.series)
    }

    pub fn source_names(&self) -> Vec<&'a str> {
        self.many(Dimension::Source, &self.entry.source)
    }

    /// Labels for the currently displayed colors.
    pub fn color_names(&self) -> Vec<&'a str> {
        self.many(Dimension::Color, &self.entry.colors)
    }

    pub fn theme_names(&self) -> Vec<&'a str> {
        self.many(Dimension::Theme, &self.entry.themes)
    }

    pub fn style_names(&self) -> Vec<&'a str> {
        self.many(Dimension::Style, &self.entry.styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;

    fn translations() -> Translations {
        Translations::parse(
            r#"{
                "categories": { "Housewares": "家具" },
                "sources": { "Crafting": "DIY" },
                "colors": { "Red": "红色" },
                "series": { "cute": "可爱系列" },
                "order": { "color": ["Red", "Blue"] }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_label_falls_back_to_raw_value() {
        let t = translations();
        assert_eq!(t.label(Dimension::Category, "Housewares"), "家具");
        assert_eq!(t.label(Dimension::Category, "Rugs"), "Rugs");
        assert_eq!(t.label(Dimension::Tag, "Chair"), "Chair");
    }

    #[test]
    fn test_preferred_order() {
        let t = translations();
        assert_eq!(t.preferred_order(Dimension::Color), ["Red", "Blue"]);
        assert!(t.preferred_order(Dimension::Size).is_empty());

        let t = Translations::default().with_order(Dimension::Size, ["1x1"]);
        assert_eq!(t.preferred_order(Dimension::Size), ["1x1"]);
    }

    #[test]
    fn test_entry_labels() {
        let t = translations();
        let mut entry = CatalogEntry::new(ItemId::new(1), "chair", "Housewares");
        entry.source = vec!["Crafting".to_string(), "Shop".to_string()];
        entry.colors = vec!["Red".to_string()];
        entry.series = "cute".to_string();

        let labels = entry.labels(&t);
        assert_eq!(labels.category_name(), "家具");
        assert_eq!(labels.source_names(), vec!["DIY", "Shop"]);
        assert_eq!(labels.color_names(), vec!["红色"]);
        assert_eq!(labels.series_name(), "可爱系列");
        assert_eq!(labels.tag_name(), EMPTY_LABEL);
        assert_eq!(labels.size_name(), EMPTY_LABEL);
        assert!(labels.theme_names().is_empty());
    }

    #[test]
    fn test_series_name_uses_entry_display_name() {
        let t = Translations::default();
        let mut entry = CatalogEntry::new(ItemId::new(1), "chair", "Housewares");
        entry.series = "elegant".to_string();
        entry.series_display_name = "优雅系列".to_string();
        assert_eq!(entry.labels(&t).series_name(), "优雅系列");
    }

    #[test]
    fn test_empty_tables_parse() {
        let t = Translations::parse("{}").unwrap();
        assert_eq!(t, Translations::default());
    }
}
