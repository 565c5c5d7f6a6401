//! Filter predicates and the filter engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::error::CatalogError;

/// Ownership filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OwnedState {
    /// Show everything.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Only owned entries.
    #[serde(rename = "owned")]
    Owned,
    /// Only entries not yet owned.
    #[serde(rename = "not-owned")]
    NotOwned,
}

impl OwnedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnedState::All => "all",
            OwnedState::Owned => "owned",
            OwnedState::NotOwned => "not-owned",
        }
    }

    pub fn matches(&self, owned: bool) -> bool {
        match self {
            OwnedState::All => true,
            OwnedState::Owned => owned,
            OwnedState::NotOwned => !owned,
        }
    }
}

impl fmt::Display for OwnedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnedState {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(OwnedState::All),
            "owned" => Ok(OwnedState::Owned),
            "not-owned" | "not_owned" | "notowned" => Ok(OwnedState::NotOwned),
            _ => Err(CatalogError::unknown("ownership state", s)),
        }
    }
}

/// A single active predicate over an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Case-insensitive substring of the entry name.
    Text(String),
    /// Exact category.
    Category(String),
    /// Ownership state.
    Owned(OwnedState),
    /// Exact version string.
    Version(String),
    /// Source list contains the value.
    Source(String),
    /// Exact size.
    Size(String),
    /// Exact tag.
    Tag(String),
    /// Exact series key.
    Series(String),
    /// Any variant/pattern (or the entry itself) carries the color.
    Color(String),
    /// Theme list contains the value.
    Theme(String),
    /// Style list contains the value.
    Style(String),
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Create a color filter.
    pub fn color(color: impl Into<String>) -> Self {
        Filter::Color(color.into())
    }

    /// Evaluate the predicate. Pure: color matching only reads the entry.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Filter::Text(query) => entry.name.to_lowercase().contains(&query.to_lowercase()),
            Filter::Category(category) => entry.category == *category,
            Filter::Owned(state) => state.matches(entry.owned),
            Filter::Version(version) => entry.version_added == *version,
            Filter::Source(source) => entry.source.iter().any(|s| s == source),
            Filter::Size(size) => entry.size == *size,
            Filter::Tag(tag) => entry.tag == *tag,
            Filter::Series(series) => entry.series == *series,
            Filter::Color(color) => entry.find_variant_by_color(color).is_some(),
            Filter::Theme(theme) => entry.themes.iter().any(|t| t == theme),
            Filter::Style(style) => entry.styles.iter().any(|s| s == style),
        }
    }
}

/// The full filter state. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: String,
    pub owned_state: OwnedState,
    pub version: String,
    pub source: String,
    pub size: String,
    pub tag: String,
    pub series: String,
    pub color: String,
    pub theme: String,
    pub style: String,
}

impl FilterCriteria {
    /// Criteria that match every entry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_owned_state(mut self, state: OwnedState) -> Self {
        self.owned_state = state;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = series.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// The active predicates; empty criteria contribute nothing.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        let text_filters: [(&String, fn(String) -> Filter); 10] = [
            (&self.search_text, Filter::Text),
            (&self.category, Filter::Category),
            (&self.version, Filter::Version),
            (&self.source, Filter::Source),
            (&self.size, Filter::Size),
            (&self.tag, Filter::Tag),
            (&self.series, Filter::Series),
            (&self.color, Filter::Color),
            (&self.theme, Filter::Theme),
            (&self.style, Filter::Style),
        ];
        for (value, make) in text_filters {
            if !value.is_empty() {
                filters.push(make(value.clone()));
            }
        }

        if self.owned_state != OwnedState::All {
            filters.push(Filter::Owned(self.owned_state));
        }

        filters
    }

    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }
}

/// Switch every entry carrying `color` to its first matching variant.
///
/// Entries already showing the matching variant, and entries without a
/// match, are left alone. Returns how many entries were switched.
pub fn resolve_color_matches(entries: &mut [CatalogEntry], color: &str) -> usize {
    if color.is_empty() {
        return 0;
    }

    let switched = entries
        .iter_mut()
        .map(|entry| switch_to_color_match(entry, color))
        .filter(|outcome| *outcome == Some(true))
        .count();

    tracing::debug!(color, switched, "resolved color matches");
    switched
}

/// Entries matching every active predicate, in input order. Pure.
pub fn matching_entries<'a>(
    entries: &'a [CatalogEntry],
    criteria: &FilterCriteria,
) -> Vec<&'a CatalogEntry> {
    let filters = criteria.filters();
    let matched: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| filters.iter().all(|f| f.matches(entry)))
        .collect();

    tracing::debug!(
        matched = matched.len(),
        total = entries.len(),
        active = filters.len(),
        "filtered entries"
    );
    matched
}

/// The default filter pipeline: entries matching every active predicate,
/// in input order, each switched to its first variant carrying the color.
///
/// Color is checked last, so entries excluded by another predicate keep
/// their displayed variant.
pub fn filter_entries<'a>(
    entries: &'a mut [CatalogEntry],
    criteria: &FilterCriteria,
) -> Vec<&'a CatalogEntry> {
    let filters: Vec<Filter> = criteria
        .filters()
        .into_iter()
        .filter(|f| !matches!(f, Filter::Color(_)))
        .collect();
    let color = criteria.color.as_str();
    let total = entries.len();

    let mut switched = 0;
    let mut matched = Vec::new();
    for entry in entries.iter_mut() {
        if !filters.iter().all(|f| f.matches(entry)) {
            continue;
        }
        if !color.is_empty() {
            match switch_to_color_match(entry, color) {
                Some(true) => switched += 1,
                Some(false) => {}
                None => continue,
            }
        }
        let entry: &'a CatalogEntry = entry;
        matched.push(entry);
    }

    tracing::debug!(
        matched = matched.len(),
        total,
        switched,
        "filtered entries"
    );
    matched
}

/// Apply the first selection carrying `color`. `None` when the entry has no
/// such variant, otherwise whether the selection changed.
fn switch_to_color_match(entry: &mut CatalogEntry, color: &str) -> Option<bool> {
    let selection = entry.find_variant_by_color(color)?;
    if selection == entry.selection() {
        return Some(false);
    }
    entry.apply_selection(selection);
    Some(true)
}
