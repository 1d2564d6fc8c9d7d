//! The static catalog source.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{Category, CategoryInfo, Product, MAX_RATING};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// A read-only collection of products and category records.
///
/// Loaded once and validated; nothing in the crate mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<CategoryInfo>,
}

impl Catalog {
    /// Build a catalog from parts, validating every record.
    pub fn from_parts(
        products: Vec<Product>,
        categories: Vec<CategoryInfo>,
    ) -> Result<Self, CommerceError> {
        let catalog = Self {
            products,
            categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog bundled with the storefront.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        tracing::debug!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Read a JSON catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::InvalidCatalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), CommerceError> {
        let currency = self.currency();
        let mut seen = HashSet::new();
        for product in &self.products {
            let id = product.id.as_str();
            if Some(product.price.currency) != currency {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} is priced in {}, the catalog in {}",
                    id,
                    product.price.currency,
                    currency.unwrap_or_default()
                )));
            }
            if id.is_empty() {
                return Err(CommerceError::InvalidCatalog("product with empty id".into()));
            }
            if !seen.insert(id) {
                return Err(CommerceError::InvalidCatalog(format!("duplicate product id {}", id)));
            }
            if product.images.is_empty() {
                return Err(CommerceError::InvalidCatalog(format!("product {} has no images", id)));
            }
            if product.price.is_negative() {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} has a negative price",
                    id
                )));
            }
            if !(0.0..=MAX_RATING).contains(&product.rating) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} rating {} outside 0-5",
                    id, product.rating
                )));
            }
            if matches!(product.ar_model.as_deref(), Some("")) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} has an empty AR model reference",
                    id
                )));
            }
        }

        let mut seen_categories = HashSet::new();
        for info in &self.categories {
            if !seen_categories.insert(info.id) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate category record {}",
                    info.id
                )));
            }
        }

        Ok(())
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency every product is priced in; `None` for an empty catalog.
    pub fn currency(&self) -> Option<Currency> {
        self.products.first().map(|p| p.price.currency)
    }

    /// Check that orders and price filters in `currency` can apply to this
    /// catalog.
    pub fn ensure_currency(&self, currency: Currency) -> Result<(), CommerceError> {
        match self.currency() {
            Some(expected) if expected != currency => Err(CommerceError::CurrencyMismatch {
                expected: expected.code().to_string(),
                got: currency.code().to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// All category records.
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up the record for a category.
    pub fn category(&self, category: Category) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.id == category)
    }

    /// The first `n` products in catalog order.
    pub fn featured(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    /// Number of products in a category.
    pub fn product_count(&self, category: Category) -> usize {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .count()
    }

    /// Up to `n` other products from the same category.
    pub fn related(&self, product: &Product, n: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(n)
            .collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, category: Category) -> Product {
        Product::new(id, format!("Product {}", id), Money::new(1000, Currency::USD), category, "x.jpg", 5)
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.categories().len(), 6);

        let lamp = catalog.find(&ProductId::new("1")).unwrap();
        assert_eq!(lamp.name, "Minimalist Desk Lamp");
        assert_eq!(lamp.price.amount_cents, 12999);
        assert_eq!(lamp.ar_model.as_deref(), Some("/models/lamp.glb"));
    }

    #[test]
    fn test_builtin_categories_normalised() {
        let catalog = Catalog::builtin().unwrap();
        let clock = catalog.find(&ProductId::new("5")).unwrap();
        assert_eq!(clock.category, Category::HomeDecor);
        assert_eq!(catalog.product_count(Category::HomeDecor), 1);
        assert_eq!(catalog.category(Category::SmartHome).unwrap().name, "Smart Home");
    }

    #[test]
    fn test_featured_caps_at_len() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.featured(3).len(), 3);
        assert_eq!(catalog.featured(100).len(), 6);
        assert_eq!(catalog.featured(3)[0].id, ProductId::new("1"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_parts(
            vec![product("1", Category::Lighting), product("1", Category::Furniture)],
            vec![],
        );
        assert!(matches!(result, Err(CommerceError::InvalidCatalog(_))));
    }

    #[test]
    fn test_missing_images_rejected() {
        let mut p = product("1", Category::Lighting);
        p.images.clear();
        assert!(Catalog::from_parts(vec![p], vec![]).is_err());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut p = product("1", Category::Lighting);
        p.rating = 5.5;
        assert!(Catalog::from_parts(vec![p], vec![]).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = product("1", Category::Lighting);
        p.price = Money::new(-1, Currency::USD);
        assert!(Catalog::from_parts(vec![p], vec![]).is_err());
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = Catalog::from_parts(
            vec![
                product("1", Category::Lighting),
                product("2", Category::Lighting),
                product("3", Category::Furniture),
            ],
            vec![],
        )
        .unwrap();
        let first = catalog.find(&ProductId::new("1")).unwrap();
        let related = catalog.related(first, 4);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, ProductId::new("2"));
    }

    #[test]
    fn test_builtin_catalog_is_priced_in_usd() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.currency(), Some(Currency::USD));
        assert!(catalog.ensure_currency(Currency::USD).is_ok());

        let lamp = catalog.find(&ProductId::new("1")).unwrap();
        assert!(lamp.tags.iter().any(|t| t == "desk lamp"));
    }

    #[test]
    fn test_ensure_currency_rejects_other_currency() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.ensure_currency(Currency::EUR),
            Err(CommerceError::CurrencyMismatch {
                expected: "USD".to_string(),
                got: "EUR".to_string(),
            })
        );
        assert!(Catalog::default().ensure_currency(Currency::EUR).is_ok());
    }

    #[test]
    fn test_mixed_currency_catalog_rejected() {
        let mut euro = product("2", Category::Lighting);
        euro.price = Money::new(1000, Currency::EUR);
        let result = Catalog::from_parts(vec![product("1", Category::Lighting), euro], vec![]);
        assert!(matches!(result, Err(CommerceError::InvalidCatalog(_))));
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
