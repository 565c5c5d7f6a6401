//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use nook_catalog::CatalogConfig;

use crate::output::Output;

/// Config file names searched from the working directory upward.
const CONFIG_NAMES: [&str; 3] = ["nook.toml", ".nook.toml", "nook.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Catalog configuration.
    pub config: CatalogConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CatalogConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => Self::find_config(&cwd, &output).unwrap_or_default(),
        };

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree. Unreadable candidates are
    /// reported and skipped.
    fn find_config(start: &Path, output: &Output) -> Option<CatalogConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if !config_path.exists() {
                    continue;
                }
                match CatalogConfig::load(&config_path) {
                    Ok(config) => {
                        output.debug(&format!("Using config {}", config_path.display()));
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config");
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
