//! The in-memory entry collection.

use std::collections::HashMap;

use crate::catalog::{CatalogEntry, Normalizer, OwnedSet, RawRecord, Selection};
use crate::i18n::Translations;
use crate::ids::ItemId;
use crate::search::{
    build_facets, filter_entries, sort_entries, BrowseQuery, BrowseResults, Facets, Pagination,
};

/// Normalized entries plus an id index over every own and pattern id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    id_index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Wrap already-normalized entries, keeping their order.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let id_index = build_index(&entries);
        Self { entries, id_index }
    }

    /// Normalize a dataset into a catalog ordered by display id.
    pub fn load(records: &[RawRecord], owned: &OwnedSet, normalizer: &Normalizer) -> Self {
        let catalog = Self::new(normalizer.normalize_all(records, owned));
        tracing::info!(
            entries = catalog.len(),
            owned = catalog.owned_count(),
            locale = normalizer.locale(),
            "loaded catalog"
        );
        catalog
    }

    /// Replace the whole collection. The new entries and index are built
    /// before the old ones are dropped.
    pub fn reload(&mut self, records: &[RawRecord], owned: &OwnedSet, normalizer: &Normalizer) {
        let previous = self.len();
        let fresh = Self::load(records, owned, normalizer);
        *self = fresh;
        tracing::info!(previous, entries = self.len(), "reloaded catalog");
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Mutable access for variant switching. Ids never change through
    /// selection, so the index stays valid.
    pub fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a position.
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn owned_count(&self) -> usize {
        self.entries.iter().filter(|e| e.owned).count()
    }

    /// Locate the entry answering to `id` and the selection that shows it.
    pub fn find_by_id(&self, id: ItemId) -> Option<(usize, Selection)> {
        let index = *self.id_index.get(&id)?;
        let entry = self.entries.get(index)?;
        let selection = entry
            .find_pattern_by_id(id)
            .or_else(|| (entry.id == id).then(Selection::default))?;
        Some((index, selection))
    }

    /// Jump to the variant carrying `id` and return the updated entry.
    pub fn select_by_id(&mut self, id: ItemId) -> Option<&CatalogEntry> {
        let (index, selection) = self.find_by_id(id)?;
        let entry = self.entries.get_mut(index)?;
        entry.apply_selection(selection);
        tracing::debug!(id = %id, index, "selected entry by id");
        Some(entry)
    }

    /// Run the default browse pipeline: filter (switching matched entries to
    /// their color match), sort and cut the requested page.
    pub fn browse(&mut self, query: &BrowseQuery, translations: &Translations) -> BrowseResults<'_> {
        // Facets cover the whole collection and never depend on selections.
        let facets = query
            .include_facets
            .then(|| build_facets(&self.entries, translations));

        let matched = filter_entries(&mut self.entries, &query.criteria);
        let sorted = sort_entries(&matched, query.sort);
        let pagination = Pagination::new(query.page, query.per_page, sorted.len());
        let items = pagination.slice(&sorted).to_vec();

        tracing::debug!(
            matched = sorted.len(),
            page = pagination.page,
            total_pages = pagination.total_pages,
            "browsed catalog"
        );

        let results = BrowseResults::new(items, pagination);
        match facets {
            Some(facets) => results.with_facets(facets),
            None => results,
        }
    }

    /// Facets over the whole collection.
    pub fn facets(&self, translations: &Translations) -> Facets {
        build_facets(&self.entries, translations)
    }
}

fn build_index(entries: &[CatalogEntry]) -> HashMap<ItemId, usize> {
    let mut index = HashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        for id in entry.all_ids() {
            index.entry(id).or_insert(position);
        }
    }
    index
}
