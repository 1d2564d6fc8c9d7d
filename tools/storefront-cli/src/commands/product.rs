//! Product detail command.

use anyhow::{anyhow, Result};
use serde::Serialize;
use storefront_commerce::catalog::{Catalog, Product};
use storefront_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{stars, stock_badge};

#[derive(Serialize)]
struct ProductView<'a> {
    product: &'a Product,
    related: Vec<&'a Product>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, &args.id)?;
    let related = catalog.related(product, args.related);

    if ctx.output.is_json() {
        ctx.output.json(&ProductView { product, related });
        return Ok(());
    }

    print_product(product, ctx);

    if !related.is_empty() {
        ctx.output.header("You May Also Like");
        ctx.output.product_table(&related);
    }

    Ok(())
}

/// Look a product up by id.
pub fn find_product<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Product> {
    catalog
        .find(&ProductId::new(id))
        .ok_or_else(|| anyhow!("Product not found: {}", id))
}

/// Print the detail page for a product.
pub fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Category", product.category.display_name());
    ctx.output.kv(
        "Rating",
        &format!("{} ({} reviews)", stars(product.rating), product.review_count),
    );
    ctx.output.kv("Stock", &stock_badge(product.stock));
    ctx.output.kv(
        "AR preview",
        if product.has_ar_model() {
            "available"
        } else {
            "not available"
        },
    );

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    if !product.colors.is_empty() {
        let colors: Vec<&str> = product.colors.iter().map(|c| c.name.as_str()).collect();
        ctx.output.kv("Colors", &colors.join(", "));
    }
    if let Some(sizes) = &product.sizes {
        ctx.output.kv("Sizes", &sizes.join(", "));
    }

    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }

    if !product.features.is_empty() {
        ctx.output.info("Features:");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }
}
