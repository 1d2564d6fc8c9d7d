//! Cart lines and the operations that replace them.
//!
//! Cart state is owned by the caller. Every operation here takes the current
//! lines by reference and returns a fresh `Vec`, leaving the input as it was.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A shopper's color/size choice for a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantSelection {
    /// Selected color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VariantSelection {
    /// No color or size chosen.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Whether neither color nor size is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none()
    }

    /// Check the choice against the options `product` declares.
    pub fn validate(&self, product: &Product) -> Result<(), CommerceError> {
        if let Some(color) = &self.color {
            if !product.has_color(color) {
                return Err(CommerceError::InvalidOption {
                    product_id: product.id.to_string(),
                    kind: "color",
                    value: color.clone(),
                });
            }
        }
        if let Some(size) = &self.size {
            if !product.has_size(size) {
                return Err(CommerceError::InvalidOption {
                    product_id: product.id.to_string(),
                    kind: "size",
                    value: size.clone(),
                });
            }
        }
        Ok(())
    }

    /// Human-readable label, e.g. "Silver / M".
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.color.as_deref(), self.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, at least 1 and at most the product's stock.
    pub quantity: u32,
    /// Color/size choice.
    #[serde(default)]
    pub selection: VariantSelection,
}

impl CartLine {
    /// Create a line with no variant selection.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            selection: VariantSelection::none(),
        }
    }

    /// Set the variant selection.
    pub fn with_selection(mut self, selection: VariantSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Clamp a requested quantity into `[1, stock]`.
///
/// The lower bound wins when the product has no stock left.
pub fn clamp_quantity(requested: i64, stock: u32) -> u32 {
    let upper = i64::from(stock.max(1));
    requested.clamp(1, upper) as u32
}

fn resolve<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Add `quantity` units of a product.
///
/// A product already in the cart has its quantity increased (capped at stock)
/// and its selection replaced when a new one is given.
pub fn add_line(
    lines: &[CartLine],
    products: &[Product],
    product_id: &ProductId,
    quantity: i64,
    selection: VariantSelection,
) -> Result<Vec<CartLine>, CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }

    let product = resolve(products, product_id)
        .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
    if !product.is_in_stock() {
        return Err(CommerceError::OutOfStock(product_id.to_string()));
    }
    selection.validate(product)?;

    let mut next = lines.to_vec();
    match next.iter_mut().find(|l| &l.product_id == product_id) {
        Some(existing) => {
            let merged = i64::from(existing.quantity).saturating_add(quantity);
            existing.quantity = clamp_quantity(merged, product.stock);
            if !selection.is_empty() {
                existing.selection = selection;
            }
        }
        None => next.push(CartLine {
            product_id: product_id.clone(),
            quantity: clamp_quantity(quantity, product.stock),
            selection,
        }),
    }

    tracing::debug!(product_id = %product_id, quantity, "line added");
    Ok(next)
}

/// Set the quantity of a product's line, clamped to `[1, stock]`.
///
/// Setting zero never removes the line; use [`remove_line`] for that. Lines
/// for products missing from the catalog are left as they are.
pub fn set_quantity(
    lines: &[CartLine],
    products: &[Product],
    product_id: &ProductId,
    requested: i64,
) -> Vec<CartLine> {
    let mut next = lines.to_vec();
    let Some(line) = next.iter_mut().find(|l| &l.product_id == product_id) else {
        return next;
    };

    match resolve(products, product_id) {
        Some(product) => {
            let quantity = clamp_quantity(requested, product.stock);
            if i64::from(quantity) != requested {
                tracing::warn!(
                    product_id = %product_id,
                    requested,
                    clamped = quantity,
                    stock = product.stock,
                    "quantity clamped"
                );
            }
            line.quantity = quantity;
        }
        None => {
            tracing::warn!(product_id = %product_id, "cannot set quantity for unresolved product");
        }
    }

    next
}

/// Remove a product's line. Unknown ids leave the lines unchanged.
pub fn remove_line(lines: &[CartLine], product_id: &ProductId) -> Vec<CartLine> {
    lines
        .iter()
        .filter(|l| &l.product_id != product_id)
        .cloned()
        .collect()
}

/// Drop lines whose product is not in the catalog.
pub fn prune_unresolved(lines: &[CartLine], products: &[Product]) -> Vec<CartLine> {
    lines
        .iter()
        .filter(|l| resolve(products, &l.product_id).is_some())
        .cloned()
        .collect()
}

/// Total units across all lines.
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|l| u64::from(l.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::{Currency, Money};

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Lamp", Money::new(1000, Currency::USD), Category::Lighting, "a.jpg", 5)
                .with_color("Silver", "#C0C0C0")
                .with_sizes(vec!["S".into(), "M".into()]),
            Product::new("2", "Chair", Money::new(5000, Currency::USD), Category::Furniture, "b.jpg", 0),
        ]
    }

    #[test]
    fn test_add_line() {
        let products = catalog();
        let lines = add_line(&[], &products, &ProductId::new("1"), 2, VariantSelection::none()).unwrap();
        assert_eq!(lines, vec![CartLine::new("1", 2)]);
        assert_eq!(item_count(&lines), 2);
    }

    #[test]
    fn test_add_same_product_merges_and_caps() {
        let products = catalog();
        let id = ProductId::new("1");
        let lines = add_line(&[], &products, &id, 3, VariantSelection::none()).unwrap();
        let lines = add_line(&lines, &products, &id, 4, VariantSelection::none().with_color("Silver")).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].selection.color.as_deref(), Some("Silver"));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let products = catalog();
        let none = VariantSelection::none;
        assert_eq!(
            add_line(&[], &products, &ProductId::new("9"), 1, none()),
            Err(CommerceError::ProductNotFound("9".into()))
        );
        assert_eq!(
            add_line(&[], &products, &ProductId::new("2"), 1, none()),
            Err(CommerceError::OutOfStock("2".into()))
        );
        assert_eq!(
            add_line(&[], &products, &ProductId::new("1"), 0, none()),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_add_rejects_undeclared_options() {
        let products = catalog();
        let id = ProductId::new("1");
        let err = add_line(&[], &products, &id, 1, VariantSelection::none().with_color("Gold")).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidOption { kind: "color", .. }));

        let err = add_line(&[], &products, &id, 1, VariantSelection::none().with_size("XL")).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidOption { kind: "size", .. }));

        assert!(add_line(&[], &products, &id, 1, VariantSelection::none().with_size("M")).is_ok());
    }

    #[test]
    fn test_set_quantity_clamps() {
        let products = catalog();
        let id = ProductId::new("1");
        let lines = vec![CartLine::new("1", 2)];

        assert_eq!(set_quantity(&lines, &products, &id, 0)[0].quantity, 1);
        assert_eq!(set_quantity(&lines, &products, &id, -4)[0].quantity, 1);
        assert_eq!(set_quantity(&lines, &products, &id, 99)[0].quantity, 5);
        assert_eq!(set_quantity(&lines, &products, &id, 3)[0].quantity, 3);
        // input untouched
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_does_not_remove() {
        let products = catalog();
        let lines = vec![CartLine::new("1", 2)];
        assert_eq!(set_quantity(&lines, &products, &ProductId::new("1"), 0).len(), 1);
    }

    #[test]
    fn test_set_quantity_unknown_line_or_product() {
        let products = catalog();
        let lines = vec![CartLine::new("1", 2), CartLine::new("ghost", 3)];
        assert_eq!(set_quantity(&lines, &products, &ProductId::new("7"), 4), lines);
        assert_eq!(set_quantity(&lines, &products, &ProductId::new("ghost"), 1), lines);
    }

    #[test]
    fn test_remove_line() {
        let lines = vec![CartLine::new("1", 2), CartLine::new("2", 1)];
        assert_eq!(remove_line(&lines, &ProductId::new("1")), vec![CartLine::new("2", 1)]);
        assert_eq!(remove_line(&lines, &ProductId::new("404")), lines);
    }

    #[test]
    fn test_prune_unresolved() {
        let products = catalog();
        let lines = vec![CartLine::new("1", 2), CartLine::new("ghost", 1)];
        assert_eq!(prune_unresolved(&lines, &products), vec![CartLine::new("1", 2)]);
    }

    #[test]
    fn test_clamp_quantity_with_no_stock() {
        assert_eq!(clamp_quantity(3, 0), 1);
        assert_eq!(clamp_quantity(i64::MAX, 7), 7);
    }

    #[test]
    fn test_selection_label() {
        assert_eq!(VariantSelection::none().label(), None);
        assert_eq!(
            VariantSelection::none().with_color("Silver").with_size("M").label().as_deref(),
            Some("Silver / M")
        );
    }
}
