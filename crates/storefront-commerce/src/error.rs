//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Catalog queries and order aggregation never return these; anomalies there
/// are handled by clamping or exclusion. The fallible edges are catalog
/// loading, adding to the cart, launching the AR viewer and the model library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not recognised.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Product cannot be added because it has no stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A color or size the product does not declare.
    #[error("Invalid {kind} for {product_id}: {value}")]
    InvalidOption {
        product_id: String,
        kind: &'static str,
        value: String,
    },

    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// The catalog failed validation.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The product has no AR model to preview.
    #[error("AR view is not available for {0}")]
    ArUnavailable(String),

    /// 3D model not found in the library.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Unsupported 3D model file.
    #[error("Unsupported model file: {0} (only GLB or GLTF files are supported)")]
    UnsupportedModelFormat(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
