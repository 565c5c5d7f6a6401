//! Canonical catalog entries and their variant tree.

use serde::{Deserialize, Serialize};

use crate::catalog::Selection;
use crate::i18n::{EntryLabels, Translations};
use crate::ids::{ItemId, UniqueEntryId};

/// The finest selectable unit of an item: one pattern of one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub pattern_name: String,
    pub image_url: String,
    /// Variation id, or the parent item's id when the variation has none.
    pub id: ItemId,
    pub unique_entry_id: Option<UniqueEntryId>,
    /// Pattern colors, or the parent item's colors when the variation has none.
    pub colors: Vec<String>,
}

/// A named style of an item. Never empty: groups only exist for patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    pub variant_name: String,
    pub patterns: Vec<Pattern>,
}

/// One normalized catalog item.
///
/// `display_id`, `image_url` and `colors` follow the selected variant and
/// pattern; the record's own values are kept in `id`, `base_image_url` and
/// `base_colors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The record's own internal id.
    pub id: ItemId,
    /// The record's own unique entry id.
    pub unique_entry_id: Option<UniqueEntryId>,
    /// Id of whatever is currently displayed.
    pub display_id: ItemId,
    /// Localized display name.
    pub name: String,
    /// Untranslated name from the dataset.
    pub raw_name: String,
    pub category: String,
    /// Image of whatever is currently displayed.
    pub image_url: String,
    /// Colors of whatever is currently displayed.
    pub colors: Vec<String>,
    pub base_image_url: String,
    pub base_colors: Vec<String>,
    pub owned: bool,
    pub variant_groups: Vec<VariantGroup>,
    pub has_variations: bool,
    pub selected_variant_index: usize,
    pub selected_pattern_index: usize,
    /// Version string such as `"1.4.0"`; empty when unknown.
    pub version_added: String,
    pub source: Vec<String>,
    /// Footprint such as `"2x1"`; empty when unknown.
    pub size: String,
    pub tag: String,
    pub series: String,
    pub series_display_name: String,
    pub themes: Vec<String>,
    pub styles: Vec<String>,
    pub buy: Option<i64>,
    pub sell: Option<i64>,
}

impl CatalogEntry {
    /// Create an entry with no variants, displaying its own id and image.
    pub fn new(id: ItemId, name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            unique_entry_id: None,
            display_id: id,
            raw_name: name.clone(),
            name,
            category: category.into(),
            image_url: String::new(),
            colors: Vec::new(),
            base_image_url: String::new(),
            base_colors: Vec::new(),
            owned: false,
            variant_groups: Vec::new(),
            has_variations: false,
            selected_variant_index: 0,
            selected_pattern_index: 0,
            version_added: String::new(),
            source: Vec::new(),
            size: String::new(),
            tag: String::new(),
            series: String::new(),
            series_display_name: String::new(),
            themes: Vec::new(),
            styles: Vec::new(),
            buy: None,
            sell: None,
        }
    }

    /// The current selection as a pair of indices.
    pub fn selection(&self) -> Selection {
        Selection::new(self.selected_variant_index, self.selected_pattern_index)
    }

    /// The selected variant group, if the entry has any.
    pub fn current_variant(&self) -> Option<&VariantGroup> {
        let last = self.variant_groups.len().checked_sub(1)?;
        self.variant_groups.get(self.selected_variant_index.min(last))
    }

    /// The selected pattern within the selected group.
    pub fn current_pattern(&self) -> Option<&Pattern> {
        let variant = self.current_variant()?;
        let last = variant.patterns.len().checked_sub(1)?;
        variant.patterns.get(self.selected_pattern_index.min(last))
    }

    pub fn variant_count(&self) -> usize {
        self.variant_groups.len()
    }

    /// Number of patterns in the selected group.
    pub fn pattern_count(&self) -> usize {
        self.current_variant().map_or(0, |v| v.patterns.len())
    }

    pub fn has_multiple_variants(&self) -> bool {
        self.variant_groups.len() > 1
    }

    /// Whether the selected group offers more than one pattern.
    pub fn has_patterns(&self) -> bool {
        self.pattern_count() > 1
    }

    /// Every id this entry answers to: its own id, then each pattern id.
    /// Missing ids and duplicates are skipped.
    pub fn all_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::new();
        let candidates = std::iter::once(self.id).chain(
            self.variant_groups
                .iter()
                .flat_map(|g| g.patterns.iter().map(|p| p.id)),
        );
        for id in candidates {
            if !id.is_missing() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Read-only localized view over this entry.
    pub fn labels<'a>(&'a self, translations: &'a Translations) -> EntryLabels<'a> {
        EntryLabels::new(self, translations)
    }

    /// Recompute the displayed id, image and colors from the selection.
    pub(crate) fn refresh_display(&mut self) {
        let (id, image, colors) = match self.current_pattern() {
            Some(pattern) => (
                pattern.id.or(self.id),
                if pattern.image_url.is_empty() {
                    self.base_image_url.clone()
                } else {
                    pattern.image_url.clone()
                },
                pattern.colors.clone(),
            ),
            None => (self.id, self.base_image_url.clone(), self.base_colors.clone()),
        };
        self.display_id = id;
        self.image_url = image;
        self.colors = colors;
    }
}
