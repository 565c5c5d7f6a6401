//! Browse results and pagination.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::error::CatalogError;
use crate::search::Facets;

/// Default number of entries per page.
pub const DEFAULT_PER_PAGE: usize = 100;

/// Page size: a fixed count or everything on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PerPageRepr", into = "PerPageRepr")]
pub enum PerPage {
    Count(usize),
    All,
}

impl Default for PerPage {
    fn default() -> Self {
        PerPage::Count(DEFAULT_PER_PAGE)
    }
}

impl fmt::Display for PerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerPage::Count(n) => write!(f, "{}", n),
            PerPage::All => f.write_str("all"),
        }
    }
}

impl FromStr for PerPage {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(PerPage::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(PerPage::Count(n)),
            _ => Err(CatalogError::unknown("page size", s)),
        }
    }
}

/// Wire form: a number or the string `"all"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PerPageRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<PerPageRepr> for PerPage {
    type Error = CatalogError;

    fn try_from(repr: PerPageRepr) -> Result<Self, Self::Error> {
        match repr {
            PerPageRepr::Count(n) => Ok(PerPage::Count(n)),
            PerPageRepr::Keyword(s) => s.parse(),
        }
    }
}

impl From<PerPage> for PerPageRepr {
    fn from(per_page: PerPage) -> Self {
        match per_page {
            PerPage::Count(n) => PerPageRepr::Count(n),
            PerPage::All => PerPageRepr::Keyword("all".to_string()),
        }
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed), clamped into range.
    pub page: usize,
    pub per_page: PerPage,
    /// Total number of matching entries.
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. Out-of-range pages clamp to the nearest page.
    pub fn new(page: usize, per_page: PerPage, total: usize) -> Self {
        let total_pages = match per_page {
            PerPage::Count(n) if n > 0 && total > 0 => total.div_ceil(n),
            _ => 1,
        };
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Entries on one page; `All` (or a zero count) spans everything.
    fn page_size(&self) -> usize {
        match self.per_page {
            PerPage::Count(n) if n > 0 => n,
            _ => self.total.max(1),
        }
    }

    /// Index of the first entry on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size()
    }

    /// Page numbers to show around the current page (e.g. `[3, 4, 5, 6, 7]`).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Start item number (1-indexed); 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// End item number (inclusive).
    pub fn end_item(&self) -> usize {
        (self.offset() + self.page_size()).min(self.total)
    }

    /// The part of `items` that falls on this page.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size()).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, PerPage::default(), 0)
    }
}

/// One page of browse output.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResults<'a> {
    pub items: Vec<&'a CatalogEntry>,
    pub pagination: Pagination,
    /// Facets over the whole collection, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
}

impl<'a> BrowseResults<'a> {
    pub fn new(items: Vec<&'a CatalogEntry>, pagination: Pagination) -> Self {
        Self {
            items,
            pagination,
            facets: None,
        }
    }

    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
