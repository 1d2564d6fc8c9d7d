//! Storefront domain types and logic for the AR storefront.
//!
//! This crate provides the computations behind the storefront pages:
//!
//! - **Catalog**: Products, categories, the bundled static catalog
//! - **Search**: Category and price filters, stable sorting
//! - **Cart**: Cart lines, quantity clamping, order pricing
//! - **Detail**: Image, color, size and quantity selection on a product page
//! - **Viewer**: The simulated AR preview state machine
//! - **Admin**: 3D model library and AR coverage
//!
//! Every piece of state is owned by the caller. Operations take the current
//! state and return a new value.
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let lamps = query(
//!     catalog.products(),
//!     &FilterCriteria::new().with_sort(SortKey::PriceAsc),
//! );
//! assert!(!lamps.is_empty());
//!
//! let lines = add_line(&[], catalog.products(), &ProductId::new("1"), 3, VariantSelection::none()).unwrap();
//! let order = compute_order(&lines, catalog.products(), &PricingRules::default()).unwrap();
//! println!("Total: {}", order.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod detail;
pub mod search;
pub mod viewer;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, CategoryInfo, ColorOption, Product};

    // Search
    pub use crate::search::{
        query, CategoryFilter, FilterCriteria, ListingState, PriceRange, SearchResults, SortKey,
    };

    // Cart
    pub use crate::cart::{
        add_line, compute_order, item_count, prune_unresolved, remove_line, set_quantity,
        CartLine, LinePricing, OrderSummary, PricingRules, TaxRate, VariantSelection,
    };

    // Detail and viewer
    pub use crate::detail::DetailState;
    pub use crate::viewer::{ArViewer, Availability, ViewerConfig, ViewerPhase};

    // Admin
    pub use crate::admin::{ar_coverage, ArCoverage, ModelAsset, ModelFormat, ModelLibrary};
}
