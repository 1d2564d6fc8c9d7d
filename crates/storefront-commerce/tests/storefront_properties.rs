//! End-to-end checks against the bundled catalog.

use storefront_commerce::prelude::*;

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn test_builtin_catalog_listing() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.categories().len(), 6);

    let all = query(catalog.products(), &FilterCriteria::default());
    assert_eq!(ids(&all), ["1", "2", "3", "4", "5", "6"]);

    let by_price = query(catalog.products(), &FilterCriteria::new().with_sort(SortKey::PriceAsc));
    assert_eq!(ids(&by_price), ["5", "6", "3", "1", "4", "2"]);

    let by_name = query(catalog.products(), &FilterCriteria::new().with_sort(SortKey::NameAsc));
    assert_eq!(ids(&by_name), ["3", "1", "5", "2", "6", "4"]);
}

#[test]
fn test_space_spelled_categories_normalise() {
    let catalog = Catalog::builtin().unwrap();
    let decor = query(
        catalog.products(),
        &FilterCriteria::new().with_category(Category::HomeDecor),
    );
    assert_eq!(ids(&decor), ["5"]);
    assert_eq!(catalog.product_count(Category::SmartHome), 1);
}

#[test]
fn test_price_filter_with_reversed_bounds() {
    let catalog = Catalog::builtin().unwrap();
    let criteria = FilterCriteria::new()
        .with_price_range(PriceRange::from_cents(10_000, 5_000, Currency::USD))
        .with_sort(SortKey::PriceDesc);
    let result = query(catalog.products(), &criteria);
    assert_eq!(ids(&result), ["3", "6", "5"]);
}

#[test]
fn test_cart_session_end_to_end() {
    let catalog = Catalog::builtin().unwrap();
    let products = catalog.products();
    let lamp = catalog.find(&ProductId::new("1")).unwrap();

    let mut detail = DetailState::new(lamp);
    detail.select_color(lamp, "Silver").unwrap();
    detail.step_quantity(lamp, 1);

    let lines = add_line(&[], products, &lamp.id, i64::from(detail.quantity), detail.to_selection()).unwrap();
    let order = compute_order(&lines, products, &PricingRules::default()).unwrap();
    assert_eq!(order.subtotal.display(), "$259.98");
    assert_eq!(order.shipping.display(), "$10.00");
    assert_eq!(order.tax.display(), "$18.20");
    assert_eq!(order.total.display(), "$288.18");

    let lines = remove_line(&lines, &lamp.id);
    let order = compute_order(&lines, products, &PricingRules::default()).unwrap();
    assert!(order.total.is_zero());
}

#[test]
fn test_orphaned_line_is_reported_then_pruned() {
    let catalog = Catalog::builtin().unwrap();
    let products = catalog.products();
    let lines = vec![CartLine::new("1", 1), CartLine::new("retired", 2)];

    let order = compute_order(&lines, products, &PricingRules::default()).unwrap();
    assert_eq!(order.unresolved, vec![ProductId::new("retired")]);
    assert_eq!(order.item_count, 1);

    let pruned = prune_unresolved(&lines, products);
    assert_eq!(pruned, vec![CartLine::new("1", 1)]);
}

#[test]
fn test_viewer_for_catalog_product() {
    let catalog = Catalog::builtin().unwrap();
    let chair = catalog.find(&ProductId::new("2")).unwrap();
    let mut viewer = ArViewer::for_product(chair, ViewerConfig::default());
    assert_eq!(viewer.availability(), Availability::Available);
    assert_eq!(viewer.launch().unwrap().as_millis(), 1500);
    assert_eq!(viewer.timer_elapsed(), ViewerPhase::Active);
}

#[test]
fn test_builtin_coverage_and_library() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(ar_coverage(&catalog).percent(), 100);

    let library = ModelLibrary::seeded();
    for model in library.models() {
        let product = model.product_id.as_ref().unwrap();
        assert!(catalog.find(product).is_some());
    }
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: set_quantity always lands in [1, stock].
        #[test]
        fn set_quantity_stays_in_bounds(requested in any::<i64>(), index in 0usize..6) {
            let catalog = Catalog::builtin().unwrap();
            let product = &catalog.products()[index];
            let lines = vec![CartLine::new(product.id.clone(), 1)];

            let next = set_quantity(&lines, catalog.products(), &product.id, requested);
            prop_assert_eq!(next.len(), 1);
            prop_assert!(next[0].quantity >= 1);
            prop_assert!(next[0].quantity <= product.stock);
        }

        /// Property: removing an id not in the cart changes nothing.
        #[test]
        fn remove_unknown_is_noop(id in "[a-z]{3,10}", quantities in proptest::collection::vec(1u32..5, 0..6)) {
            let lines: Vec<CartLine> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| CartLine::new(format!("{}", i + 1), *q))
                .collect();
            prop_assert_eq!(remove_line(&lines, &ProductId::new(id)), lines);
        }

        /// Property: total is always subtotal + shipping + tax.
        #[test]
        fn total_is_sum_of_parts(quantities in proptest::collection::vec(1i64..60, 1..6)) {
            let catalog = Catalog::builtin().unwrap();
            let products = catalog.products();
            let mut lines = Vec::new();
            for (i, q) in quantities.iter().enumerate() {
                lines = add_line(&lines, products, &products[i].id, *q, VariantSelection::none()).unwrap();
            }

            let order = compute_order(&lines, products, &PricingRules::default()).unwrap();
            prop_assert_eq!(
                order.total.amount_cents,
                order.subtotal.amount_cents + order.shipping.amount_cents + order.tax.amount_cents
            );
            prop_assert_eq!(order.shipping.amount_cents, 1000);
        }

        /// Property: a priced line never exceeds its product's stock, and a
        /// product with no stock is never charged.
        #[test]
        fn priced_quantity_within_stock(stock in 0u32..5, quantity in 1u32..20) {
            let product = Product::new(
                "p",
                "Lamp",
                Money::new(1000, Currency::USD),
                Category::Lighting,
                "lamp.jpg",
                stock,
            );
            let lines = vec![CartLine::new("p", quantity)];

            let order = compute_order(&lines, &[product], &PricingRules::default()).unwrap();
            if stock == 0 {
                prop_assert!(order.lines.is_empty());
                prop_assert_eq!(order.sold_out, vec![ProductId::new("p")]);
                prop_assert!(order.total.is_zero());
            } else {
                prop_assert_eq!(order.lines.len(), 1);
                prop_assert!(order.lines[0].quantity >= 1);
                prop_assert!(order.lines[0].quantity <= stock);
            }
        }
    }
}
