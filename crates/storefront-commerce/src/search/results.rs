//! Query results and listing state.

use crate::catalog::Product;
use crate::search::{query, FilterCriteria};
use serde::Serialize;

/// Search results container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<T> {
    /// The matched items, in display order.
    pub items: Vec<T>,
    /// The criteria that produced these items.
    pub criteria: FilterCriteria,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, criteria: FilterCriteria) -> Self {
        Self { items, criteria }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of matched items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Listing state owned by the caller.
///
/// Keeps "nothing matched" apart from "not queried yet".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingState<'a> {
    /// No query has run.
    #[default]
    NotQueried,
    /// A query ran; the results may be empty.
    Ready(SearchResults<&'a Product>),
}

impl<'a> ListingState<'a> {
    /// Run `criteria` over `products` and return the new state.
    pub fn run(products: &'a [Product], criteria: FilterCriteria) -> Self {
        ListingState::Ready(SearchResults::new(query(products, &criteria), criteria))
    }

    /// The results, if a query has run.
    pub fn results(&self) -> Option<&SearchResults<&'a Product>> {
        match self {
            ListingState::NotQueried => None,
            ListingState::Ready(results) => Some(results),
        }
    }

    /// Whether a query ran and matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.results().map(SearchResults::is_empty).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::{Currency, Money};

    #[test]
    fn test_not_queried_differs_from_empty() {
        let products = vec![Product::new(
            "1",
            "Lamp",
            Money::new(100, Currency::USD),
            Category::Lighting,
            "a.jpg",
            1,
        )];

        let initial = ListingState::default();
        assert!(initial.results().is_none());
        assert!(!initial.is_empty_result());

        let empty = ListingState::run(&products, FilterCriteria::new().with_category(Category::Furniture));
        assert!(empty.is_empty_result());
        assert_ne!(initial, empty);

        let full = ListingState::run(&products, FilterCriteria::new());
        assert_eq!(full.results().unwrap().len(), 1);
    }
}
