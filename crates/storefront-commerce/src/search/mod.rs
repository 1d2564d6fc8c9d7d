//! Search module.
//!
//! Filtering and sorting of the product listing.

mod filter;
mod query;
mod results;

pub use filter::{CategoryFilter, FilterCriteria, PriceRange, DEFAULT_MAX_PRICE_CENTS};
pub use query::{compare_names, query, SortKey};
pub use results::{ListingState, SearchResults};
