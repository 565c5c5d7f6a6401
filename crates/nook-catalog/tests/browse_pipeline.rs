//! End-to-end browse tests: dataset files on disk through normalization,
//! filtering, sorting, pagination and facets.

use std::path::Path;

use nook_catalog::prelude::*;
use serde_json::json;

fn items() -> serde_json::Value {
    json!([
        {
            "name": "wooden chair",
            "translations": { "cNzh": "木椅" },
            "internalId": 410,
            "uniqueEntryId": "chair-uid",
            "sourceSheet": "Housewares",
            "image": "chair.png",
            "versionAdded": "1.0.0",
            "source": ["Crafting"],
            "size": "1x1",
            "tag": "Chair",
            "series": "wooden",
            "seriesTranslations": { "cNzh": "木质系列" },
            "colors": ["Brown"],
            "themes": ["living room"],
            "variations": [
                { "variation": "Natural", "pattern": "", "internalId": 411, "image": "chair-n.png", "colors": ["Brown"] },
                { "variation": "Dark", "pattern": "", "internalId": 412, "image": "chair-d.png", "colors": ["Black"] },
                { "variation": "Pink", "pattern": "", "internalId": 413, "colors": ["Pink", "White"] }
            ]
        },
        {
            "name": "iron table",
            "translations": { "cNzh": "铁桌" },
            "internalId": 205,
            "sourceSheet": "Housewares",
            "storageImage": "table.png",
            "versionAdded": "1.10.0",
            "source": ["Nook's Cranny", "Crafting"],
            "size": "2x1",
            "tag": "Table",
            "colors": ["Black", "Gray"]
        },
        {
            "name": "fishing rod",
            "translations": { "cNzh": "钓竿" },
            "internalId": 30,
            "sourceSheet": "Tools",
            "image": "rod.png",
            "versionAdded": "1.2.0",
            "source": ["Crafting"],
            "size": "1x1",
            "colors": ["Yellow"],
            "variations": null
        },
        {
            "translations": {},
            "sourceSheet": null
        }
    ])
}

fn owned() -> serde_json::Value {
    json!({
        "items": [
            { "label": "钓竿", "unique_id": 1, "variations": [] },
            { "label": "", "unique_id": "chair-uid", "variations": [{ "unique_id": 9 }] }
        ]
    })
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn load_catalog(dir: &Path) -> Catalog {
    let items_path = write_json(dir, "items.json", &items());
    let owned_path = write_json(dir, "owned.json", &owned());

    let records = load_items(&items_path).unwrap();
    let owned = OwnedSet::from_catalog(&OwnedCatalog::load(&owned_path).unwrap());
    Catalog::load(&records, &owned, &Normalizer::default())
}

#[test]
fn test_normalized_collection() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(dir.path());

    let ids: Vec<u32> = catalog.entries().iter().map(|e| e.display_id.get()).collect();
    assert_eq!(ids, vec![0, 30, 205, 411]);

    let degraded = &catalog.entries()[0];
    assert_eq!(degraded.name, "");
    assert_eq!(degraded.category, "Other");
    assert_eq!(degraded.image_url, "");

    let chair = &catalog.entries()[3];
    assert_eq!(chair.name, "木椅");
    assert_eq!(chair.variant_count(), 3);
    assert_eq!(chair.image_url, "chair-n.png");
    // Third variation has no image of its own and falls back to the parent.
    assert_eq!(chair.variant_groups[2].patterns[0].image_url, "chair.png");

    let owned: Vec<&str> = catalog
        .entries()
        .iter()
        .filter(|e| e.owned)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(owned, vec!["钓竿", "木椅"]);
}

#[test]
fn test_color_filter_shows_matching_variant() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = load_catalog(dir.path());

    let query = BrowseQuery::new().with_criteria(FilterCriteria::new().with_color("Black"));
    let results = catalog.browse(&query, &Translations::default());

    let shown: Vec<(u32, String)> = results
        .items
        .iter()
        .map(|e| (e.display_id.get(), e.current_projection().name))
        .collect();
    assert_eq!(
        shown,
        vec![(205, "铁桌".to_string()), (412, "木椅 - Dark".to_string())]
    );
}

#[test]
fn test_combined_filters_and_name_sort() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = load_catalog(dir.path());

    let query = BrowseQuery::new()
        .with_criteria(
            FilterCriteria::new()
                .with_source("Crafting")
                .with_owned_state(OwnedState::Owned),
        )
        .with_sort(SortKey::NameAsc);
    let results = catalog.browse(&query, &Translations::default());

    // Pinyin order: diao gan, mu yi.
    let names: Vec<&str> = results.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["钓竿", "木椅"]);
}

#[test]
fn test_paging_through_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = load_catalog(dir.path());

    let mut seen = Vec::new();
    for page in 1..=2 {
        let query = BrowseQuery::new()
            .with_sort(SortKey::IdDesc)
            .with_per_page(PerPage::Count(3))
            .with_page(page);
        let results = catalog.browse(&query, &Translations::default());
        assert_eq!(results.pagination.total_pages, 2);
        seen.extend(results.items.iter().map(|e| e.display_id.get()));
    }
    assert_eq!(seen, vec![411, 205, 30, 0]);
}

#[test]
fn test_facets_with_translations() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(dir.path());
    let translations = Translations::parse(
        &json!({
            "categories": { "Housewares": "家具", "Tools": "工具" },
            "sources": { "Crafting": "DIY" },
            "order": { "category": ["Tools", "Housewares"] }
        })
        .to_string(),
    )
    .unwrap();

    let facets = catalog.facets(&translations);

    let category = facets.get(Dimension::Category).unwrap();
    let labels: Vec<(&str, usize)> = category.values.iter().map(|v| (v.label.as_str(), v.count)).collect();
    assert_eq!(labels, vec![("工具", 1), ("家具", 2), ("Other", 1)]);

    assert_eq!(facets.values(Dimension::Size), vec!["1x1", "2x1"]);
    assert_eq!(facets.values(Dimension::Version), vec!["1.0.0", "1.2.0", "1.10.0"]);
    assert_eq!(
        facets.values(Dimension::Color),
        vec!["Yellow", "Black", "Gray", "Brown", "Pink", "White"]
    );

    let series = facets.get(Dimension::Series).unwrap();
    assert_eq!(series.values[0].label, "木质系列");
}

#[test]
fn test_jump_to_saved_variant_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = load_catalog(dir.path());
    let translations = Translations::parse(r#"{ "colors": { "Pink": "粉色" } }"#).unwrap();

    let entry = catalog.select_by_id(ItemId::new(413)).unwrap();
    assert_eq!(entry.selection(), Selection::new(2, 0));
    assert_eq!(entry.labels(&translations).color_names(), vec!["粉色", "White"]);
    assert_eq!(entry.labels(&translations).tag_name(), "Chair");
}

#[test]
fn test_reload_with_new_ownership() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = load_catalog(dir.path());
    let records = parse_items(&items().to_string()).unwrap();

    catalog.reload(&records, &OwnedSet::empty(), &Normalizer::default());
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.owned_count(), 0);
}

#[test]
fn test_config_drives_locale_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nook.toml");
    std::fs::write(
        &config_path,
        "[display]\nlocale = \"missing\"\n\n[browse]\ndefault_sort = \"name-desc\"\nper_page = 2\n",
    )
    .unwrap();
    let config = CatalogConfig::load(&config_path).unwrap();

    let records = parse_items(&items().to_string()).unwrap();
    let mut catalog = Catalog::load(&records, &OwnedSet::empty(), &config.normalizer());

    let results = catalog.browse(&BrowseQuery::from_config(&config), &Translations::default());
    let names: Vec<&str> = results.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["wooden chair", "iron table"]);
    assert_eq!(results.pagination.total_pages, 2);
}
