//! Order pricing command.

use anyhow::{bail, Context as _, Result};
use storefront_commerce::cart::{add_line, compute_order, prune_unresolved, CartLine, VariantSelection};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::ProductId;

use super::OrderArgs;
use crate::context::Context;

/// A cart line as written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub product_id: ProductId,
    pub quantity: i64,
    pub selection: VariantSelection,
}

impl LineSpec {
    /// Parse `ID[xQTY][:color=NAME][:size=SIZE]`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(':');
        let head = parts.next().unwrap_or_default().trim();

        let (id, quantity) = match head.rsplit_once('x') {
            Some((id, qty)) if !id.is_empty() && qty.parse::<i64>().is_ok() => {
                (id, qty.parse::<i64>()?)
            }
            _ => (head, 1),
        };
        if id.is_empty() {
            bail!("Missing product id in line '{}'", input);
        }

        let mut selection = VariantSelection::none();
        for option in parts {
            match option.split_once('=') {
                Some(("color", value)) => selection = selection.with_color(value.trim()),
                Some(("size", value)) => selection = selection.with_size(value.trim()),
                _ => bail!("Unknown line option '{}' (expected color=.. or size=..)", option),
            }
        }

        Ok(Self {
            product_id: ProductId::new(id),
            quantity,
            selection,
        })
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let logger = ctx.session_logger("cart");

    let specs = args
        .lines
        .iter()
        .map(|line| LineSpec::parse(line))
        .collect::<Result<Vec<_>>>()?;
    let mut lines = build_lines(&catalog, specs)?;

    if args.prune {
        let before = lines.len();
        lines = prune_unresolved(&lines, catalog.products());
        if before != lines.len() {
            ctx.output
                .info(&format!("Removed {} line(s) for unknown products", before - lines.len()));
        }
    }

    let summary = compute_order(&lines, catalog.products(), &ctx.config.pricing)
        .context("Failed to price order")?;
    logger
        .info_builder("Order priced")
        .field_u64("lines", lines.len() as u64)
        .field_u64("items", summary.item_count)
        .field("total", summary.total.display())
        .emit();

    ctx.output.header("Order Summary");
    ctx.output.order_summary(&summary);

    Ok(())
}

/// Turn parsed specs into cart lines.
///
/// Products in the catalog go through `add_line`; ids the catalog does not
/// know are kept as-is, as a stale cart would hold them.
pub fn build_lines(catalog: &Catalog, specs: Vec<LineSpec>) -> Result<Vec<CartLine>> {
    let mut lines: Vec<CartLine> = Vec::new();
    for spec in specs {
        if catalog.find(&spec.product_id).is_some() {
            lines = add_line(
                &lines,
                catalog.products(),
                &spec.product_id,
                spec.quantity,
                spec.selection,
            )
            .with_context(|| format!("Cannot add '{}'", spec.product_id))?;
        } else if spec.quantity > 0 {
            let quantity = u32::try_from(spec.quantity).unwrap_or(u32::MAX);
            lines.push(CartLine::new(spec.product_id, quantity).with_selection(spec.selection));
        } else {
            bail!("Invalid quantity {} for '{}'", spec.quantity, spec.product_id);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_id() {
        let spec = LineSpec::parse("4").unwrap();
        assert_eq!(spec.product_id, ProductId::new("4"));
        assert_eq!(spec.quantity, 1);
        assert!(spec.selection.is_empty());
    }

    #[test]
    fn test_parse_quantity_and_options() {
        let spec = LineSpec::parse("1x3:color=Silver:size=M").unwrap();
        assert_eq!(spec.product_id, ProductId::new("1"));
        assert_eq!(spec.quantity, 3);
        assert_eq!(spec.selection, VariantSelection::none().with_color("Silver").with_size("M"));
    }

    #[test]
    fn test_parse_id_containing_x() {
        let spec = LineSpec::parse("box").unwrap();
        assert_eq!(spec.product_id, ProductId::new("box"));
        assert_eq!(spec.quantity, 1);
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(LineSpec::parse("1:finish=matte").is_err());
        assert!(LineSpec::parse(":color=Red").is_err());
    }

    #[test]
    fn test_build_lines_keeps_unknown_ids() {
        let catalog = Catalog::builtin().unwrap();
        let specs = vec![
            LineSpec::parse("1x2").unwrap(),
            LineSpec::parse("retired").unwrap(),
            LineSpec::parse("1").unwrap(),
        ];
        let lines = build_lines(&catalog, specs).unwrap();
        assert_eq!(lines, vec![CartLine::new("1", 3), CartLine::new("retired", 1)]);
    }
}
