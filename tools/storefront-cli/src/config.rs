//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::PricingRules;
use storefront_commerce::viewer::ViewerConfig;
use storefront_observability::{LogFormat, LogLevel};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shipping and tax rules.
    #[serde(default)]
    pub pricing: PricingRules,

    /// AR viewer settings.
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Where products come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the bundled catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (`RUST_LOG` overrides it).
    #[serde(default)]
    pub level: LogLevel,

    /// `human` or `json`.
    #[serde(default)]
    pub format: LogFormat,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# AR storefront configuration

[pricing]
currency = "USD"
# Flat shipping fee in cents, charged when the cart is not empty
shipping_fee_cents = 1000
tax_rate_percent = 7.0

[viewer]
# Simulated AR loading delay
loading_delay_ms = 1500

[catalog]
# path = "catalog.json"

[logging]
level = "info"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::{TaxRate, DEFAULT_SHIPPING_FEE_CENTS};

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: StorefrontConfig = toml::from_str(
            r#"
[pricing]
tax_rate_percent = 8.5

[viewer]
loading_delay_ms = 200

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.pricing.tax_rate, TaxRate::from_basis_points(850));
        assert_eq!(config.pricing.shipping_fee_cents, DEFAULT_SHIPPING_FEE_CENTS);
        assert_eq!(config.viewer.loading_delay_ms, 200);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_tax() {
        let result: Result<StorefrontConfig, _> = toml::from_str("[pricing]\ntax_rate_percent = 140.0\n");
        assert!(result.is_err());
    }
}
