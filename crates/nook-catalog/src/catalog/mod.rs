//! Catalog module.
//!
//! Raw dataset records, the normalized entry model with its variant tree,
//! ownership lookups and the in-memory collection.

mod entry;
mod normalize;
mod owned;
mod raw;
mod store;
mod variant;

pub use entry::{CatalogEntry, Pattern, VariantGroup};
pub use normalize::{normalize, normalize_all, Normalizer, DEFAULT_CATEGORY, DEFAULT_LOCALE};
pub use owned::{OwnedCatalog, OwnedId, OwnedItem, OwnedSet, OwnedVariation};
pub use raw::{load_items, parse_items, LocalizedText, RawRecord, RawVariation};
pub use store::Catalog;
pub use variant::{Projection, Selection, DEFAULT_NAME_SEPARATOR};
