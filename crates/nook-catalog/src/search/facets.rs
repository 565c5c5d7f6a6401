//! Facet builder: the selectable values of every filter dimension.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::error::CatalogError;
use crate::i18n::Translations;
use crate::search::sort::locale_cmp;

/// A filterable dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Version,
    Source,
    Size,
    Tag,
    Color,
    Series,
    Theme,
    Style,
}

impl Dimension {
    pub const ALL: [Dimension; 9] = [
        Dimension::Category,
        Dimension::Version,
        Dimension::Source,
        Dimension::Size,
        Dimension::Tag,
        Dimension::Color,
        Dimension::Series,
        Dimension::Theme,
        Dimension::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Version => "version",
            Dimension::Source => "source",
            Dimension::Size => "size",
            Dimension::Tag => "tag",
            Dimension::Color => "color",
            Dimension::Series => "series",
            Dimension::Theme => "theme",
            Dimension::Style => "style",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Category => "Category",
            Dimension::Version => "Version",
            Dimension::Source => "Source",
            Dimension::Size => "Size",
            Dimension::Tag => "Tag",
            Dimension::Color => "Color",
            Dimension::Series => "Series",
            Dimension::Theme => "Theme",
            Dimension::Style => "Style",
        }
    }

    /// The entry's raw values for this dimension. Single-valued fields yield
    /// nothing when empty.
    fn values<'e>(&self, entry: &'e CatalogEntry) -> Vec<&'e str> {
        let single = |s: &'e String| -> Vec<&'e str> {
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s.as_str()]
            }
        };
        let many = |v: &'e [String]| -> Vec<&'e str> {
            v.iter().map(String::as_str).filter(|s| !s.is_empty()).collect()
        };

        match self {
            Dimension::Category => single(&entry.category),
            Dimension::Version => single(&entry.version_added),
            Dimension::Source => many(entry.source.as_slice()),
            Dimension::Size => single(&entry.size),
            Dimension::Tag => single(&entry.tag),
            Dimension::Series => single(&entry.series),
            Dimension::Theme => many(entry.themes.as_slice()),
            Dimension::Style => many(entry.styles.as_slice()),
            // The colors the color filter matches on: the entry's own colors
            // without variants, otherwise every pattern's colors.
            Dimension::Color if entry.variant_groups.is_empty() => {
                many(entry.base_colors.as_slice())
            }
            Dimension::Color => entry
                .variant_groups
                .iter()
                .flat_map(|g| g.patterns.iter())
                .flat_map(|p| p.colors.iter())
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::unknown("dimension", s))
    }
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    /// Raw value, as used in filter criteria.
    pub value: String,
    /// Localized label.
    pub label: String,
    /// Number of entries holding the value.
    pub count: usize,
}

/// The ordered values of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub dimension: Dimension,
    pub name: String,
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Facets for every dimension, in [`Dimension::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub facets: Vec<Facet>,
}

impl Facets {
    pub fn get(&self, dimension: Dimension) -> Option<&Facet> {
        self.facets.iter().find(|f| f.dimension == dimension)
    }

    /// Raw values of a dimension, in facet order.
    pub fn values(&self, dimension: Dimension) -> Vec<&str> {
        self.get(dimension)
            .map(|f| f.values.iter().map(|v| v.value.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter()
    }
}

/// Build every facet from a collection.
///
/// Values listed in the dimension's preferred order come first, in that
/// order; the rest follow. Without a preferred order, sizes and versions use
/// numeric comparators, categories and colors keep first-seen order and the
/// remaining dimensions sort by localized label.
pub fn build_facets<T: Borrow<CatalogEntry>>(entries: &[T], translations: &Translations) -> Facets {
    let facets: Vec<Facet> = Dimension::ALL
        .into_iter()
        .map(|dimension| build_facet(dimension, entries, translations))
        .collect();

    tracing::debug!(
        entries = entries.len(),
        values = facets.iter().map(|f| f.values.len()).sum::<usize>(),
        "built facets"
    );
    Facets { facets }
}

fn build_facet<T: Borrow<CatalogEntry>>(
    dimension: Dimension,
    entries: &[T],
    translations: &Translations,
) -> Facet {
    let mut values: Vec<FacetValue> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let entry: &CatalogEntry = entry.borrow();
        let mut seen_here: Vec<&str> = Vec::new();
        for value in dimension.values(entry) {
            if seen_here.contains(&value) {
                continue;
            }
            seen_here.push(value);

            match positions.get(value) {
                Some(&index) => values[index].count += 1,
                None => {
                    positions.insert(value.to_string(), values.len());
                    values.push(FacetValue {
                        value: value.to_string(),
                        label: facet_label(dimension, value, entry, translations),
                        count: 1,
                    });
                }
            }
        }
    }

    let preferred = translations.preferred_order(dimension);
    if preferred.is_empty() {
        sort_without_preference(dimension, &mut values);
    } else {
        apply_preferred_order(preferred, &mut values);
    }

    Facet {
        dimension,
        name: dimension.display_name().to_string(),
        values,
    }
}

fn facet_label(dimension: Dimension, value: &str, entry: &CatalogEntry, translations: &Translations) -> String {
    if let Some(label) = translations.lookup(dimension, value) {
        return label.to_string();
    }
    if dimension == Dimension::Series && !entry.series_display_name.is_empty() {
        return entry.series_display_name.clone();
    }
    value.to_string()
}

/// Preferred values first in list order, then the rest in their current order.
fn apply_preferred_order(preferred: &[String], values: &mut [FacetValue]) {
    let rank = |v: &FacetValue| {
        preferred
            .iter()
            .position(|p| *p == v.value)
            .unwrap_or(preferred.len())
    };
    values.sort_by_key(rank);
}

fn sort_without_preference(dimension: Dimension, values: &mut [FacetValue]) {
    match dimension {
        Dimension::Size => values.sort_by(|a, b| compare_sizes(&a.value, &b.value)),
        Dimension::Version => values.sort_by(|a, b| compare_versions(&a.value, &b.value)),
        Dimension::Category | Dimension::Color => {}
        Dimension::Source | Dimension::Tag | Dimension::Series | Dimension::Theme | Dimension::Style => {
            values.sort_by(|a, b| locale_cmp(&a.label, &b.label))
        }
    }
}

fn parse_size(size: &str) -> Option<(f64, f64)> {
    let (w, h) = size.split_once(['x', 'X', '×'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Compare `"WxH"` sizes by width, then height. Unparsable sizes sort last,
/// among themselves by raw text.
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (parse_size(a), parse_size(b)) {
        (Some((wa, ha)), Some((wb, hb))) => wa
            .total_cmp(&wb)
            .then_with(|| ha.total_cmp(&hb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Compare dotted version strings component-wise as integers. Missing or
/// non-numeric components count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts = |s: &str| -> Vec<u64> { s.split('.').map(|p| p.trim().parse().unwrap_or(0)).collect() };
    let (pa, pb) = (parts(a), parts(b));
    let len = pa.len().max(pb.len());

    (0..len)
        .map(|i| {
            pa.get(i)
                .copied()
                .unwrap_or(0)
                .cmp(&pb.get(i).copied().unwrap_or(0))
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
