//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::SessionId;
use storefront_observability::StructuredLogger;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, StorefrontConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(&config_path) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the catalog named in the config, or the bundled one.
    ///
    /// A relative catalog path is resolved against the config file's directory.
    /// Fails when the catalog is priced in a currency other than the
    /// configured pricing currency.
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = match &self.config.catalog.path {
            Some(path) => {
                let base = self
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(self.cwd.as_path());
                let path = resolve(base, path);
                self.output
                    .debug(&format!("Loading catalog: {}", path.display()));
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?
            }
            None => Catalog::builtin().context("Bundled catalog is invalid")?,
        };

        catalog
            .ensure_currency(self.config.pricing.currency)
            .context("pricing.currency does not match the catalog")?;
        Ok(catalog)
    }

    /// A session logger for shopper events, following the logging config.
    pub fn session_logger(&self, page: &str) -> StructuredLogger {
        StructuredLogger::new(SessionId::generate())
            .with_surface("cli")
            .with_page(page)
            .with_min_level(self.config.logging.level)
            .with_format(self.config.logging.format)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
