//! Product listing command.

use anyhow::{Context as _, Result};
use storefront_commerce::money::{Currency, Money};
use storefront_commerce::search::{
    CategoryFilter, FilterCriteria, ListingState, PriceRange, SortKey, DEFAULT_MAX_PRICE_CENTS,
};

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = catalog.currency().unwrap_or(ctx.config.pricing.currency);
    let criteria = criteria_from_args(&args, currency)?;
    ctx.output.debug(&format!("Criteria: {:?}", criteria));

    let products = match args.featured {
        Some(n) => catalog.featured(n),
        None => catalog.products(),
    };
    let listing = ListingState::run(products, criteria);
    let Some(results) = listing.results() else {
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(results);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} ({} products)",
        heading(&criteria),
        results.len()
    ));

    if listing.is_empty_result() {
        ctx.output.info("No products found. Try adjusting your filters.");
        return Ok(());
    }

    ctx.output.product_table(&results.items);
    if !criteria.is_default() {
        ctx.output.info("");
        ctx.output.info("Run without filters to see every product.");
    }

    Ok(())
}

/// Build filter criteria from command-line flags.
fn criteria_from_args(args: &ProductsArgs, currency: Currency) -> Result<FilterCriteria> {
    let category: CategoryFilter = args
        .category
        .parse()
        .with_context(|| format!("Invalid --category '{}'", args.category))?;
    let sort: SortKey = args
        .sort
        .parse()
        .with_context(|| format!("Invalid --sort '{}'", args.sort))?;

    let low = args
        .min
        .map(|v| Money::from_decimal(v, currency))
        .unwrap_or_else(|| Money::zero(currency));
    let high = args
        .max
        .map(|v| Money::from_decimal(v, currency))
        .unwrap_or_else(|| Money::new(DEFAULT_MAX_PRICE_CENTS, currency));

    Ok(FilterCriteria {
        category,
        price_range: PriceRange::new(low, high),
        sort,
    })
}

fn heading(criteria: &FilterCriteria) -> String {
    let title = match criteria.category {
        CategoryFilter::All => "All Products",
        CategoryFilter::Only(category) => category.display_name(),
    };
    format!(
        "{}, {} to {}, {}",
        title,
        criteria.price_range.low().display(),
        criteria.price_range.high().display(),
        criteria.sort.display_name()
    )
}
