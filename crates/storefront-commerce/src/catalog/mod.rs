//! Product catalog module.
//!
//! Contains the product and category records and the static catalog they
//! are loaded into.

mod category;
mod product;
mod store;

pub use category::{Category, CategoryInfo};
pub use product::{ColorOption, Product, MAX_RATING};
pub use store::Catalog;
