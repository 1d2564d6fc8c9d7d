//! Product detail page selection state.
//!
//! Owned by the caller for as long as a product page is open.

use crate::cart::VariantSelection;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Choices made on a product page before adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailState {
    /// Product being viewed.
    pub product_id: ProductId,
    /// Index into the product's images.
    pub image_index: usize,
    /// Selected color, defaulting to the first declared one.
    pub color: Option<String>,
    /// Selected size, defaulting to the first declared one.
    pub size: Option<String>,
    /// Pending quantity, kept within `[1, stock]`.
    pub quantity: u32,
    /// Whether the AR viewer panel is shown in place of the gallery.
    pub show_viewer: bool,
}

impl DetailState {
    /// Fresh state for `product`.
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            image_index: 0,
            color: product.colors.first().map(|c| c.name.clone()),
            size: product
                .sizes
                .as_ref()
                .and_then(|sizes| sizes.first().cloned()),
            quantity: 1,
            show_viewer: false,
        }
    }

    /// Select an image. Returns false and keeps the current index when out of range.
    pub fn select_image(&mut self, product: &Product, index: usize) -> bool {
        if index >= product.images.len() {
            return false;
        }
        self.image_index = index;
        true
    }

    /// The image currently selected.
    pub fn current_image<'a>(&self, product: &'a Product) -> Option<&'a str> {
        product.images.get(self.image_index).map(String::as_str)
    }

    pub fn select_color(&mut self, product: &Product, color: &str) -> Result<(), CommerceError> {
        if !product.has_color(color) {
            return Err(CommerceError::InvalidOption {
                product_id: product.id.to_string(),
                kind: "color",
                value: color.to_string(),
            });
        }
        self.color = Some(color.to_string());
        Ok(())
    }

    pub fn select_size(&mut self, product: &Product, size: &str) -> Result<(), CommerceError> {
        if !product.has_size(size) {
            return Err(CommerceError::InvalidOption {
                product_id: product.id.to_string(),
                kind: "size",
                value: size.to_string(),
            });
        }
        self.size = Some(size.to_string());
        Ok(())
    }

    /// Step the pending quantity by `delta`.
    ///
    /// A step that would leave `[1, stock]` is ignored. Returns whether the
    /// quantity changed.
    pub fn step_quantity(&mut self, product: &Product, delta: i64) -> bool {
        let next = i64::from(self.quantity) + delta;
        if next < 1 || next > i64::from(product.stock) {
            return false;
        }
        self.quantity = next as u32;
        true
    }

    /// Show or hide the AR viewer. Returns the new visibility.
    pub fn toggle_viewer(&mut self) -> bool {
        self.show_viewer = !self.show_viewer;
        self.show_viewer
    }

    /// The variant selection to pass to `add_line`.
    pub fn to_selection(&self) -> VariantSelection {
        VariantSelection {
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }
}
