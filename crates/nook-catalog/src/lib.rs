//! Item catalog engine for Nook.
//!
//! This crate turns generated item datasets into a browsable catalog:
//!
//! - **Catalog**: raw records, normalization into [`CatalogEntry`] values
//!   with a variant/pattern tree, ownership lookups, the in-memory collection
//! - **Search**: filter predicates, stable sorting, facets, pagination
//! - **I18n**: translation tables and localized entry labels
//! - **Config**: locale, browse defaults and dataset locations
//!
//! # Example
//!
//! ```rust,ignore
//! use nook_catalog::prelude::*;
//!
//! let records = load_items("data/items.json")?;
//! let owned = OwnedSet::from_catalog(&OwnedCatalog::load("data/owned.json")?);
//! let mut catalog = Catalog::load(&records, &owned, &Normalizer::default());
//!
//! // Red items, name A-Z, first page; matching variants are switched in.
//! let query = BrowseQuery::new()
//!     .with_criteria(FilterCriteria::new().with_color("Red"))
//!     .with_sort(SortKey::NameAsc);
//! let results = catalog.browse(&query, &Translations::default());
//! for entry in &results.items {
//!     println!("{} #{}", entry.current_projection().name, entry.display_id);
//! }
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod config;
pub mod i18n;
pub mod search;

pub use catalog::{Catalog, CatalogEntry};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{BrowseConfig, CatalogConfig, DataConfig, DisplayConfig};
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        load_items, parse_items, Catalog, CatalogEntry, Normalizer, OwnedCatalog, OwnedSet,
        Pattern, Projection, RawRecord, RawVariation, Selection, VariantGroup,
    };

    // I18n
    pub use crate::i18n::{EntryLabels, Translations};

    // Search
    pub use crate::search::{
        build_facets, filter_entries, matching_entries, resolve_color_matches, sort_entries,
        BrowseQuery, BrowseResults, Dimension, Facet, FacetValue, Facets, Filter, FilterCriteria,
        OwnedState, Pagination, PerPage, SortKey,
    };
}
