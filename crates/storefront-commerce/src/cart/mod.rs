//! Shopping cart module.
//!
//! Contains cart lines, the operations on them, and order pricing.

mod cart;
mod pricing;

pub use cart::{
    add_line, clamp_quantity, item_count, prune_unresolved, remove_line, set_quantity, CartLine,
    VariantSelection,
};
pub use pricing::{
    compute_order, LinePricing, OrderSummary, PricingRules, TaxRate, DEFAULT_SHIPPING_FEE_CENTS,
    DEFAULT_TAX_RATE_BPS,
};
