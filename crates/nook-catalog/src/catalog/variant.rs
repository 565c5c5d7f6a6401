//! Variant and pattern resolution.
//!
//! Finders are pure reads that return a [`Selection`]; applying a selection
//! is a separate, explicit mutation of the entry.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::ids::ItemId;

/// Separator placed between item, variant and pattern names.
pub const DEFAULT_NAME_SEPARATOR: &str = " - ";

/// A (variant group, pattern) index pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub variant_index: usize,
    pub pattern_index: usize,
}

impl Selection {
    pub const fn new(variant_index: usize, pattern_index: usize) -> Self {
        Self {
            variant_index,
            pattern_index,
        }
    }
}

/// What an entry currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub id: ItemId,
    pub image_url: String,
    pub colors: Vec<String>,
    /// Item name joined with the selected variant and pattern names.
    pub name: String,
}

impl CatalogEntry {
    /// First (group, pattern) in declaration order whose colors contain `color`.
    ///
    /// Entries without variants match on their own colors and report `(0, 0)`.
    pub fn find_variant_by_color(&self, color: &str) -> Option<Selection> {
        if self.variant_groups.is_empty() {
            return self
                .base_colors
                .iter()
                .any(|c| c == color)
                .then(Selection::default);
        }

        self.find_pattern(|pattern| pattern.colors.iter().any(|c| c == color))
    }

    /// Locate the pattern carrying `id` exactly.
    ///
    /// Entries without variants match their own id.
    pub fn find_pattern_by_id(&self, id: ItemId) -> Option<Selection> {
        if self.variant_groups.is_empty() {
            return (self.id == id).then(Selection::default);
        }

        self.find_pattern(|pattern| pattern.id == id)
    }

    fn find_pattern(&self, mut pred: impl FnMut(&crate::catalog::Pattern) -> bool) -> Option<Selection> {
        self.variant_groups
            .iter()
            .enumerate()
            .find_map(|(variant_index, group)| {
                group
                    .patterns
                    .iter()
                    .position(&mut pred)
                    .map(|pattern_index| Selection::new(variant_index, pattern_index))
            })
    }

    /// Select a (group, pattern) pair and refresh the displayed fields.
    ///
    /// Out-of-range indices fall back to 0, so the stored indices always
    /// point inside the variant tree.
    pub fn apply_selection(&mut self, selection: Selection) {
        self.selected_variant_index = if selection.variant_index < self.variant_groups.len() {
            selection.variant_index
        } else {
            0
        };
        self.selected_pattern_index = if selection.pattern_index < self.pattern_count() {
            selection.pattern_index
        } else {
            0
        };
        self.refresh_display();
    }

    /// Switch to the first variant carrying `color`.
    ///
    /// Returns false and leaves the entry untouched when nothing matches.
    pub fn switch_to_color(&mut self, color: &str) -> bool {
        match self.find_variant_by_color(color) {
            Some(selection) => {
                self.apply_selection(selection);
                true
            }
            None => false,
        }
    }

    /// Switch style. The pattern choice always resets to 0; an
    /// out-of-range index keeps the current style.
    pub fn switch_to_variant(&mut self, variant_index: usize) {
        if variant_index < self.variant_groups.len() {
            self.selected_variant_index = variant_index;
        }
        self.selected_pattern_index = 0;
        self.refresh_display();
    }

    /// Switch pattern within the current style; out of range clamps to 0.
    pub fn switch_to_pattern(&mut self, pattern_index: usize) {
        self.selected_pattern_index = if pattern_index < self.pattern_count() {
            pattern_index
        } else {
            0
        };
        self.refresh_display();
    }

    /// The displayed id, image, colors and full name, joined with
    /// [`DEFAULT_NAME_SEPARATOR`].
    pub fn current_projection(&self) -> Projection {
        self.current_projection_with(DEFAULT_NAME_SEPARATOR)
    }

    /// Like [`current_projection`](Self::current_projection) with a custom separator.
    pub fn current_projection_with(&self, separator: &str) -> Projection {
        let variant = self.current_variant();
        let pattern = self.current_pattern();

        let parts: Vec<&str> = [
            Some(self.name.as_str()),
            variant.map(|v| v.variant_name.as_str()),
            pattern.map(|p| p.pattern_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

        match pattern {
            Some(pattern) => Projection {
                id: pattern.id.or(self.id),
                image_url: if pattern.image_url.is_empty() {
                    self.base_image_url.clone()
                } else {
                    pattern.image_url.clone()
                },
                colors: pattern.colors.clone(),
                name: parts.join(separator),
            },
            None => Projection {
                id: self.id,
                image_url: self.base_image_url.clone(),
                colors: self.base_colors.clone(),
                name: parts.join(separator),
            },
        }
    }
}
