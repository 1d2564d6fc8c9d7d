//! Listing filter criteria.

use crate::catalog::{Category, Product};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::search::SortKey;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound of the default price range (the listing slider's maximum).
pub const DEFAULT_MAX_PRICE_CENTS: i64 = 100_000;

/// Category selector for the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every category ("All Products").
    #[default]
    All,
    /// A single category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// An inclusive price range.
///
/// Bounds are always non-negative and ordered: negative bounds are clamped to
/// zero and reversed bounds are swapped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPriceRange")]
pub struct PriceRange {
    low: Money,
    high: Money,
}

#[derive(Deserialize)]
struct RawPriceRange {
    low: Money,
    high: Money,
}

impl From<RawPriceRange> for PriceRange {
    fn from(raw: RawPriceRange) -> Self {
        PriceRange::new(raw.low, raw.high)
    }
}

impl PriceRange {
    /// Create a range, clamping and ordering the bounds.
    pub fn new(low: Money, high: Money) -> Self {
        let clamp = |m: Money| Money::new(m.amount_cents.max(0), m.currency);
        let (low, high) = (clamp(low), clamp(high));
        if low.amount_cents > high.amount_cents {
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    /// Create a range from cent amounts in one currency.
    pub fn from_cents(low: i64, high: i64, currency: Currency) -> Self {
        Self::new(Money::new(low, currency), Money::new(high, currency))
    }

    /// Lower bound (inclusive).
    pub fn low(&self) -> Money {
        self.low
    }

    /// Upper bound (inclusive).
    pub fn high(&self) -> Money {
        self.high
    }

    /// Whether `price` lies within the range.
    ///
    /// A price in a currency other than the bounds' never matches.
    pub fn contains(&self, price: &Money) -> bool {
        price.currency == self.low.currency
            && price.currency == self.high.currency
            && (self.low.amount_cents..=self.high.amount_cents).contains(&price.amount_cents)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::from_cents(0, DEFAULT_MAX_PRICE_CENTS, Currency::default())
    }
}

/// Filter and sort criteria for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    /// Category selector.
    #[serde(default)]
    pub category: CategoryFilter,
    /// Price bounds.
    #[serde(default)]
    pub price_range: PriceRange,
    /// Sort order applied after filtering.
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Criteria showing everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Restrict to a price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a product passes both the category and the price predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category) && self.price_range.contains(&product.price)
    }

    /// Whether no filter has been narrowed from the defaults.
    ///
    /// The sort key is not a filter and is ignored here.
    pub fn is_default(&self) -> bool {
        self.category == CategoryFilter::All && self.price_range == PriceRange::default()
    }

    /// Reset the category and price filters, keeping the sort key.
    pub fn cleared(self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_price_range_swaps_reversed_bounds() {
        let range = PriceRange::new(usd(5000), usd(1000));
        assert_eq!(range.low(), usd(1000));
        assert_eq!(range.high(), usd(5000));
    }

    #[test]
    fn test_price_range_clamps_negative_bounds() {
        let range = PriceRange::new(usd(-500), usd(-100));
        assert_eq!(range.low(), usd(0));
        assert_eq!(range.high(), usd(0));

        let range = PriceRange::new(usd(-500), usd(2000));
        assert_eq!(range.low(), usd(0));
        assert_eq!(range.high(), usd(2000));
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::from_cents(1000, 2000, Currency::USD);
        assert!(range.contains(&usd(1000)));
        assert!(range.contains(&usd(2000)));
        assert!(!range.contains(&usd(999)));
        assert!(!range.contains(&usd(2001)));
        assert!(!range.contains(&Money::new(1500, Currency::EUR)));
    }

    #[test]
    fn test_price_range_deserialize_normalises() {
        let json = r#"{"low":{"amount_cents":900,"currency":"USD"},"high":{"amount_cents":-5,"currency":"USD"}}"#;
        let range: PriceRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.low(), usd(0));
        assert_eq!(range.high(), usd(900));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "lighting".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Lighting)
        );
        assert!("nope".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_cleared_keeps_sort() {
        let criteria = FilterCriteria::new()
            .with_category(Category::Furniture)
            .with_price_range(PriceRange::from_cents(0, 10, Currency::USD))
            .with_sort(SortKey::PriceDesc);
        assert!(!criteria.is_default());

        let cleared = criteria.cleared();
        assert!(cleared.is_default());
        assert_eq!(cleared.sort, SortKey::PriceDesc);
    }
}
