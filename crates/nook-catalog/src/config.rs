//! Catalog configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{Normalizer, DEFAULT_LOCALE, DEFAULT_NAME_SEPARATOR};
use crate::error::{read_file, CatalogError, Result};
use crate::search::{PerPage, SortKey};

/// Catalog configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How entries are named and labelled.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Browse defaults.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Dataset locations.
    #[serde(default)]
    pub data: DataConfig,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl CatalogConfig {
    /// Load config from a file; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;

        let config: CatalogConfig = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded catalog config");
        Ok(config)
    }

    /// Save config to a file, in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|e| CatalogError::io(path, e))
    }

    /// Reject settings no browse pass could honour.
    pub fn validate(&self) -> Result<()> {
        if self.display.locale.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("display.locale must not be empty".into()));
        }
        if self.browse.per_page == PerPage::Count(0) {
            return Err(CatalogError::InvalidConfig("browse.per_page must be at least 1".into()));
        }
        Ok(())
    }

    /// A normalizer reading names for the configured locale.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.display.locale.clone())
    }
}

/// Naming and labelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Translation key used for localized names.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Separator between item, variant and pattern names.
    #[serde(default = "default_separator")]
    pub name_separator: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_separator() -> String {
    DEFAULT_NAME_SEPARATOR.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            name_separator: default_separator(),
        }
    }
}

/// Browse defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default)]
    pub default_sort: SortKey,

    /// Entries per page, or `"all"`.
    #[serde(default)]
    pub per_page: PerPage,

    /// How many page numbers to show around the current page.
    #[serde(default = "default_page_window")]
    pub page_window: usize,
}

fn default_page_window() -> usize {
    5
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            per_page: PerPage::default(),
            page_window: default_page_window(),
        }
    }
}

/// Dataset locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<PathBuf>,

    /// Exported ownership catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<PathBuf>,
}
