//! Catalog query: filter, then stable sort.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::FilterCriteria;
use serde::{Deserialize, Serialize};

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    #[serde(alias = "name")]
    NameAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
    ];

    /// Short code used on the command line and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A to Z",
        }
    }

    /// Compare two products under this key.
    ///
    /// `Featured` treats every pair as equal so a stable sort keeps catalog order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Featured => Ordering::Equal,
            SortKey::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortKey::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortKey::NameAsc => compare_names(&a.name, &b.name),
        }
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .or(match s.as_str() {
                "name-asc" => Some(SortKey::NameAsc),
                "catalog" => Some(SortKey::Featured),
                _ => None,
            })
            .ok_or(CommerceError::UnknownSortKey(s))
    }
}

/// Collation used for display names: case-insensitive first, exact second.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter `products` by `criteria` and return them in sorted order.
///
/// The input slice is left untouched. Sorting is stable, so products with
/// equal keys keep their relative input order.
pub fn query<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| criteria.matches(p)).collect();

    if criteria.sort != SortKey::Featured {
        matched.sort_by(|a, b| criteria.sort.compare(a, b));
    }

    tracing::debug!(
        total = products.len(),
        matched = matched.len(),
        sort = criteria.sort.as_str(),
        "catalog query"
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::{Currency, Money};
    use crate::search::{CategoryFilter, PriceRange};

    fn product(id: &str, name: &str, cents: i64, category: Category) -> Product {
        Product::new(id, name, Money::new(cents, Currency::USD), category, "img.jpg", 10)
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", "lamp", 12999, Category::Lighting),
            product("2", "Chair", 54999, Category::Furniture),
            product("3", "Beanbag", 12999, Category::Furniture),
            product("4", "armchair", 8999, Category::Furniture),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_featured_keeps_catalog_order() {
        let products = sample();
        let result = query(&products, &FilterCriteria::new());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_price_asc_is_stable() {
        let products = sample();
        let result = query(&products, &FilterCriteria::new().with_sort(SortKey::PriceAsc));
        // 1 and 3 tie at 129.99 and keep input order
        assert_eq!(ids(&result), vec!["4", "1", "3", "2"]);
    }

    #[test]
    fn test_price_desc_is_stable() {
        let products = sample();
        let result = query(&products, &FilterCriteria::new().with_sort(SortKey::PriceDesc));
        assert_eq!(ids(&result), vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let products = sample();
        let result = query(&products, &FilterCriteria::new().with_sort(SortKey::NameAsc));
        assert_eq!(ids(&result), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn test_category_and_price_filters_combine() {
        let products = sample();
        let criteria = FilterCriteria::new()
            .with_category(Category::Furniture)
            .with_price_range(PriceRange::from_cents(10000, 60000, Currency::USD));
        let result = query(&products, &criteria);
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let products = sample();
        let criteria = FilterCriteria::new().with_category(CategoryFilter::Only(Category::SmartHome));
        assert!(query(&products, &criteria).is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let products = sample();
        let before = products.clone();
        let _ = query(&products, &FilterCriteria::new().with_sort(SortKey::PriceDesc));
        assert_eq!(products, before);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::NameAsc);
        assert_eq!("featured".parse::<SortKey>().unwrap(), SortKey::Featured);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_category() -> impl Strategy<Value = Category> {
            proptest::sample::select(Category::ALL.to_vec())
        }

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            proptest::collection::vec((0i64..2000, "[a-zA-Z]{1,8}", arb_category()), 0..30).prop_map(
                |rows| {
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, (cents, name, category))| {
                            product(&i.to_string(), &name, cents, category)
                        })
                        .collect()
                },
            )
        }

        fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
            (
                proptest::option::of(arb_category()),
                -100i64..2100,
                -100i64..2100,
                proptest::sample::select(SortKey::ALL.to_vec()),
            )
                .prop_map(|(category, low, high, sort)| FilterCriteria {
                    category: category.map(CategoryFilter::Only).unwrap_or_default(),
                    price_range: PriceRange::from_cents(low, high, Currency::USD),
                    sort,
                })
        }

        proptest! {
            /// Property: every result matches, and nothing matching is dropped.
            #[test]
            fn filter_is_sound_and_complete(products in arb_products(), criteria in arb_criteria()) {
                let result = query(&products, &criteria);
                for p in &result {
                    prop_assert!(criteria.matches(p));
                }
                let expected = products.iter().filter(|p| criteria.matches(p)).count();
                prop_assert_eq!(result.len(), expected);
            }

            /// Property: equal keys keep their input order.
            #[test]
            fn sort_is_stable(products in arb_products(), criteria in arb_criteria()) {
                let result = query(&products, &criteria);
                for pair in result.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert_ne!(criteria.sort.compare(a, b), Ordering::Greater);
                    if criteria.sort.compare(a, b) == Ordering::Equal {
                        let ia: usize = a.id.as_str().parse().unwrap();
                        let ib: usize = b.id.as_str().parse().unwrap();
                        prop_assert!(ia < ib);
                    }
                }
            }

            /// Property: the same inputs always give the same output.
            #[test]
            fn query_is_idempotent(products in arb_products(), criteria in arb_criteria()) {
                prop_assert_eq!(query(&products, &criteria), query(&products, &criteria));
            }
        }
    }
}
