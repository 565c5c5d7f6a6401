//! Browse query builder.

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::search::{FilterCriteria, PerPage, SortKey};

/// Everything one browse pass needs: filters, order and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseQuery {
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    /// Current page (1-indexed).
    pub page: usize,
    pub per_page: PerPage,
    /// Whether to build facets over the whole collection.
    pub include_facets: bool,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            page: 1,
            per_page: PerPage::default(),
            include_facets: false,
        }
    }
}

impl BrowseQuery {
    /// Create a new query.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query using the configured default sort and page size.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            sort: config.browse.default_sort,
            per_page: config.browse.per_page,
            ..Self::default()
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_per_page(mut self, per_page: PerPage) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_facets(mut self) -> Self {
        self.include_facets = true;
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.criteria.is_empty()
    }
}
