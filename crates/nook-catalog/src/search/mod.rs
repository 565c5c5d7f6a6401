//! Search module.
//!
//! Filter predicates, stable sorting, facets and pagination over
//! normalized catalog entries.

mod facets;
mod filter;
mod query;
mod results;
mod sort;

pub use facets::{build_facets, compare_sizes, compare_versions, Dimension, Facet, FacetValue, Facets};
pub use filter::{filter_entries, matching_entries, resolve_color_matches, Filter, FilterCriteria, OwnedState};
pub use query::BrowseQuery;
pub use results::{BrowseResults, Pagination, PerPage, DEFAULT_PER_PAGE};
pub use sort::{collation_key, locale_cmp, sort_entries, SortKey};
