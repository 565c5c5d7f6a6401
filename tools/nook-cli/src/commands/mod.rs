//! CLI command implementations.

pub mod facets;
pub mod list;
pub mod show;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use nook_catalog::prelude::*;

use crate::context::Context;

/// Dataset locations; each falls back to the `[data]` config section.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Item dataset (JSON array of records).
    #[arg(short, long)]
    pub items: Option<PathBuf>,

    /// Exported ownership catalog.
    #[arg(short, long)]
    pub owned: Option<PathBuf>,

    /// Translation tables.
    #[arg(short, long)]
    pub translations: Option<PathBuf>,
}

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// all, owned or not-owned.
    #[arg(long, default_value = "all")]
    pub owned_state: OwnedState,

    /// Version the item was added in.
    #[arg(long)]
    pub version_added: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub tag: Option<String>,

    #[arg(long)]
    pub series: Option<String>,

    /// Show only items with a variant of this color, switched to that variant.
    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub theme: Option<String>,

    #[arg(long)]
    pub style: Option<String>,

    /// name-asc, name-desc, id-asc or id-desc (default from config).
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Page number (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Entries per page, or "all" (default from config).
    #[arg(long)]
    pub per_page: Option<PerPage>,

    /// Also print facets for the whole collection.
    #[arg(long)]
    pub facets: bool,
}

impl ListArgs {
    /// Filter criteria from the flags; absent flags match everything.
    pub fn criteria(&self) -> FilterCriteria {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        FilterCriteria {
            search_text: text(&self.search),
            category: text(&self.category),
            owned_state: self.owned_state,
            version: text(&self.version_added),
            source: text(&self.source),
            size: text(&self.size),
            tag: text(&self.tag),
            series: text(&self.series),
            color: text(&self.color),
            theme: text(&self.theme),
            style: text(&self.style),
        }
    }
}

/// Arguments for the facets command.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Only print this dimension.
    #[arg(short, long)]
    pub dimension: Option<Dimension>,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Item or variation id to jump to.
    pub id: u32,
}

/// A loaded catalog with its translation tables.
pub struct LoadedData {
    pub catalog: Catalog,
    pub translations: Translations,
}

/// Load every dataset named by the flags or the config.
pub fn load_data(args: &DataArgs, ctx: &Context) -> Result<LoadedData> {
    let data = &ctx.config.data;

    let items_path = args
        .items
        .as_ref()
        .or(data.items.as_ref())
        .map(|p| ctx.resolve_path(p))
        .context("No item dataset given; pass --items or set data.items in nook.toml")?;
    ctx.output.debug(&format!("Items: {}", items_path.display()));
    let records = load_items(&items_path)
        .with_context(|| format!("Failed to load items: {}", items_path.display()))?;

    let owned = match args.owned.as_ref().or(data.owned.as_ref()) {
        Some(path) => {
            let path = ctx.resolve_path(path);
            ctx.output.debug(&format!("Ownership: {}", path.display()));
            let exported = OwnedCatalog::load(&path)
                .with_context(|| format!("Failed to load ownership catalog: {}", path.display()))?;
            OwnedSet::from_catalog(&exported)
        }
        None => OwnedSet::empty(),
    };

    let translations = match args.translations.as_ref().or(data.translations.as_ref()) {
        Some(path) => {
            let path = ctx.resolve_path(path);
            ctx.output.debug(&format!("Translations: {}", path.display()));
            Translations::load(&path)
                .with_context(|| format!("Failed to load translations: {}", path.display()))?
        }
        None => Translations::default(),
    };

    let catalog = Catalog::load(&records, &owned, &ctx.config.normalizer());
    Ok(LoadedData {
        catalog,
        translations,
    })
}
