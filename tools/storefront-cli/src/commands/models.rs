//! 3D model management commands.
//!
//! Each invocation starts from the seeded model library; changes are shown
//! but not written anywhere.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::admin::{ar_coverage, products_without_models, ModelLibrary};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::{ModelId, ProductId};

use super::{ModelsArgs, ModelsCommand};
use crate::context::Context;

/// Run the models command.
pub async fn run(args: ModelsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let mut library = ModelLibrary::seeded();

    match args.command {
        Some(ModelsCommand::List) | None => list_models(&library, &catalog, ctx),
        Some(ModelsCommand::Add { name, url, size }) => {
            let url = url.unwrap_or_else(|| format!("/models/{}", name));
            let today = chrono::Local::now().date_naive();
            let id = library
                .register(&name, url, size, today)
                .context("Upload rejected")?;
            ctx.output.success(&format!("Registered {} as {}", name, id));
            list_models(&library, &catalog, ctx)
        }
        Some(ModelsCommand::Link { model, product }) => {
            let (model, product) = (ModelId::new(model), ProductId::new(product));
            library.link(&model, &product, &catalog)?;
            ctx.output
                .success(&format!("Linked {} to product {}", model, product));
            list_models(&library, &catalog, ctx)
        }
        Some(ModelsCommand::Unlink { model }) => {
            let model = ModelId::new(model);
            match library.unlink(&model)? {
                Some(product) => ctx
                    .output
                    .success(&format!("Unlinked {} from product {}", model, product)),
                None => ctx.output.info(&format!("{} was not linked", model)),
            }
            list_models(&library, &catalog, ctx)
        }
        Some(ModelsCommand::Delete { model, yes }) => {
            let model = ModelId::new(model);
            let name = library
                .get(&model)
                .map(|m| m.name.clone())
                .with_context(|| format!("Model not found: {}", model))?;

            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete model '{}'?", name))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }

            library.delete(&model)?;
            ctx.output.success(&format!("Deleted {}", name));
            list_models(&library, &catalog, ctx)
        }
        Some(ModelsCommand::Coverage) => show_coverage(&catalog, ctx),
    }
}

fn list_models(library: &ModelLibrary, catalog: &Catalog, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&library.models());
        return Ok(());
    }

    ctx.output.header("3D Models");
    if library.is_empty() {
        ctx.output.info("No models uploaded.");
        return Ok(());
    }

    let widths = [16, 14, 28, 8, 10];
    ctx.output
        .table_row(&["ID", "FILE", "PRODUCT", "SIZE", "ADDED"], &widths);
    for model in library.models() {
        let product = match &model.product_id {
            Some(id) => catalog
                .find(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("{} (missing)", id)),
            None => "Not linked".to_string(),
        };
        ctx.output.table_row(
            &[
                model.id.as_str(),
                &model.name,
                &product,
                &model.display_size(),
                &model.date_added.format("%Y-%m-%d").to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}

fn show_coverage(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let coverage = ar_coverage(catalog);
    let missing = products_without_models(catalog);

    if ctx.output.is_json() {
        let missing: Vec<&str> = missing.iter().map(|p| p.id.as_str()).collect();
        ctx.output.json(&serde_json::json!({
            "with_model": coverage.with_model,
            "total": coverage.total,
            "percent": coverage.percent(),
            "missing": missing,
        }));
        return Ok(());
    }

    ctx.output.header("AR Coverage");
    ctx.output.info(&coverage.to_string());
    for product in missing {
        ctx.output
            .list_item(&format!("{} ({}) has no 3D model", product.name, product.id));
    }
    Ok(())
}
