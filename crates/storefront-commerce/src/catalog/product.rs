//! Product types.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// A product in the catalog.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Category this product belongs to.
    pub category: Category,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Descriptive tags shown on the product page.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Color options the shopper can pick from.
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    /// Size options, if the product comes in sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    /// URL of the 3D model used for the AR preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_model: Option<String>,
    /// Average rating, 0 to 5.
    pub rating: f32,
    /// Number of reviews.
    pub review_count: u32,
    /// Units in stock.
    pub stock: u32,
}

impl Product {
    /// Create a product with a single image and no options.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: Category,
        image: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category,
            images: vec![image.into()],
            tags: Vec::new(),
            features: Vec::new(),
            colors: Vec::new(),
            sizes: None,
            ar_model: None,
            rating: 0.0,
            review_count: 0,
            stock,
        }
    }

    /// Attach an AR model reference.
    pub fn with_ar_model(mut self, url: impl Into<String>) -> Self {
        self.ar_model = Some(url.into());
        self
    }

    /// Add a color option.
    pub fn with_color(mut self, name: impl Into<String>, hex: impl Into<String>) -> Self {
        self.colors.push(ColorOption::new(name, hex));
        self
    }

    /// Set the size options.
    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// The image shown on product cards.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether an AR preview can be offered.
    pub fn has_ar_model(&self) -> bool {
        self.ar_model.is_some()
    }

    /// Whether at least one unit can be bought.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether `name` is one of the declared colors.
    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c.name == name)
    }

    /// Whether `size` is one of the declared sizes.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes
            .as_ref()
            .map(|sizes| sizes.iter().any(|s| s == size))
            .unwrap_or(false)
    }

    /// Rating rounded to one decimal for display.
    pub fn rating_display(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

/// A color option (e.g., Matte Black #2A2A2A).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ColorOption {
    /// Color name shown to shoppers.
    pub name: String,
    /// Swatch color as a hex string.
    pub hex: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}
