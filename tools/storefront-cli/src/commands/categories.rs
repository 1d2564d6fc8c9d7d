//! Category listing command.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::Category;

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryRow<'a> {
    id: &'static str,
    name: &'a str,
    description: &'a str,
    product_count: usize,
}

/// Run the categories command.
pub async fn run(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let rows: Vec<CategoryRow> = Category::ALL
        .iter()
        .map(|&category| {
            let info = catalog.category(category);
            CategoryRow {
                id: category.as_str(),
                name: info
                    .map(|i| i.name.as_str())
                    .unwrap_or(category.display_name()),
                description: info.map(|i| i.description.as_str()).unwrap_or(""),
                product_count: catalog.product_count(category),
            }
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Shop by Category");
    let widths = [12, 14, 9];
    ctx.output.table_row(&["ID", "NAME", "PRODUCTS"], &widths);
    for row in &rows {
        ctx.output
            .table_row(&[row.id, row.name, &row.product_count.to_string()], &widths);
    }

    Ok(())
}
