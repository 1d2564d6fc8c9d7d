//! Interactive shopping session.
//!
//! Holds the cart and listing filters in memory for the life of the session
//! and replaces them wholesale after every action.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use storefront_commerce::cart::{
    add_line, compute_order, item_count, prune_unresolved, remove_line, set_quantity, CartLine,
};
use storefront_commerce::catalog::{Catalog, Category, Product};
use storefront_commerce::detail::DetailState;
use storefront_commerce::search::{CategoryFilter, FilterCriteria, ListingState, PriceRange, SortKey};
use storefront_commerce::viewer::ArViewer;
use storefront_commerce::Money;
use storefront_observability::StructuredLogger;

use super::ar::drive_timer;
use super::product::{find_product, print_product};
use super::ShopArgs;
use crate::context::Context;

struct Session<'a> {
    ctx: &'a Context,
    catalog: &'a Catalog,
    logger: StructuredLogger,
    cart: Vec<CartLine>,
    criteria: FilterCriteria,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        anyhow::bail!("The shop session is interactive and has no JSON output");
    }

    let catalog = ctx.catalog()?;
    let mut session = Session {
        ctx,
        catalog: &catalog,
        logger: ctx.session_logger("home"),
        cart: Vec::new(),
        criteria: FilterCriteria::default(),
    };

    ctx.output.header("Welcome to the AR storefront");
    if let Some(id) = args.product {
        let product = find_product(&catalog, &id)?;
        session.product_page(product).await?;
    }

    loop {
        let cart_label = format!("Cart ({} items)", item_count(&session.cart));
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&["Browse products", "Filter and sort", cart_label.as_str(), "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => session.browse().await?,
            1 => session.edit_filters()?,
            2 => session.cart_page()?,
            _ => break,
        }
    }

    if !session.cart.is_empty() {
        session.ctx.output.info("Your cart was not saved.");
    }
    Ok(())
}

impl<'a> Session<'a> {
    async fn browse(&mut self) -> Result<()> {
        self.logger.set_page("products");
        let catalog = self.catalog;
        let listing = ListingState::run(catalog.products(), self.criteria);
        let Some(results) = listing.results() else {
            return Ok(());
        };

        if results.is_empty() {
            self.ctx
                .output
                .info("No products found. Try adjusting your filters.");
            if Confirm::new()
                .with_prompt("Clear all filters?")
                .default(true)
                .interact()?
            {
                self.criteria = self.criteria.cleared();
            }
            return Ok(());
        }

        let mut items: Vec<String> = results
            .items
            .iter()
            .map(|p| format!("{:32} {:>10}", p.name, p.price.display()))
            .collect();
        items.push("Back".to_string());

        let choice = Select::new()
            .with_prompt(format!("{} products", results.len()))
            .items(&items)
            .default(0)
            .interact()?;

        if let Some(product) = results.items.get(choice).copied() {
            self.product_page(product).await?;
        }
        Ok(())
    }

    fn edit_filters(&mut self) -> Result<()> {
        let mut categories = vec!["All Products".to_string()];
        categories.extend(
            Category::ALL
                .iter()
                .map(|c| c.display_name().to_string()),
        );
        let category = Select::new()
            .with_prompt("Category")
            .items(&categories)
            .default(0)
            .interact()?;
        let category = match category {
            0 => CategoryFilter::All,
            n => Category::ALL
                .get(n - 1)
                .copied()
                .map(CategoryFilter::Only)
                .unwrap_or_default(),
        };

        let currency = self
            .catalog
            .currency()
            .unwrap_or(self.ctx.config.pricing.currency);
        let range = self.criteria.price_range;
        let low: f64 = Input::new()
            .with_prompt("Minimum price")
            .default(range.low().to_decimal())
            .interact_text()?;
        let high: f64 = Input::new()
            .with_prompt("Maximum price")
            .default(range.high().to_decimal())
            .interact_text()?;

        let sort_names: Vec<&str> = SortKey::ALL.iter().map(|k| k.display_name()).collect();
        let sort = Select::new()
            .with_prompt("Sort by")
            .items(&sort_names)
            .default(0)
            .interact()?;

        self.criteria = FilterCriteria::new()
            .with_category(category)
            .with_price_range(PriceRange::new(
                Money::from_decimal(low, currency),
                Money::from_decimal(high, currency),
            ))
            .with_sort(SortKey::ALL.get(sort).copied().unwrap_or_default());
        Ok(())
    }

    async fn product_page(&mut self, product: &Product) -> Result<()> {
        self.logger.set_page("product");
        let mut detail = DetailState::new(product);
        print_product(product, self.ctx);

        loop {
            let summary = format!(
                "Add to cart ({} x{}{})",
                product.price.display(),
                detail.quantity,
                detail
                    .to_selection()
                    .label()
                    .map(|l| format!(", {}", l))
                    .unwrap_or_default()
            );
            let viewer_label = if detail.show_viewer {
                "Hide 3D view"
            } else {
                "View in AR"
            };
            let actions = [
                summary.as_str(),
                "More",
                "Fewer",
                "Choose color",
                "Choose size",
                "Next image",
                viewer_label,
                "Back",
            ];
            let choice = Select::new()
                .with_prompt(product.name.as_str())
                .items(&actions)
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    self.add_to_cart(product, &detail);
                    return Ok(());
                }
                1 | 2 => {
                    let delta = if choice == 1 { 1 } else { -1 };
                    if !detail.step_quantity(product, delta) {
                        self.ctx
                            .output
                            .warn(&format!("Quantity must stay between 1 and {}", product.stock));
                    }
                }
                3 => {
                    let colors: Vec<&str> = product.colors.iter().map(|c| c.name.as_str()).collect();
                    if colors.is_empty() {
                        self.ctx.output.info("This product comes in one color.");
                        continue;
                    }
                    let pick = Select::new().items(&colors).default(0).interact()?;
                    detail.select_color(product, colors[pick])?;
                }
                4 => {
                    let Some(sizes) = product.sizes.as_ref().filter(|s| !s.is_empty()) else {
                        self.ctx.output.info("This product comes in one size.");
                        continue;
                    };
                    let pick = Select::new().items(sizes).default(0).interact()?;
                    detail.select_size(product, &sizes[pick])?;
                }
                5 => {
                    let next = (detail.image_index + 1) % product.images.len().max(1);
                    detail.select_image(product, next);
                    if let Some(image) = detail.current_image(product) {
                        self.ctx.output.kv("Image", image);
                    }
                }
                6 => {
                    if detail.toggle_viewer() {
                        self.preview(product).await?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    async fn preview(&mut self, product: &Product) -> Result<()> {
        let mut viewer = ArViewer::for_product(product, self.ctx.config.viewer);
        let delay = match viewer.launch() {
            Ok(delay) => delay,
            Err(e) => {
                self.ctx.output.warn(&e.to_string());
                return Ok(());
            }
        };

        let spinner = self.ctx.output.spinner("Loading AR experience...");
        drive_timer(&mut viewer, delay).await;
        spinner.finish_and_clear();
        self.logger
            .info_builder("AR view launched")
            .field("product_id", product.id.as_str())
            .emit();
        self.ctx
            .output
            .success(&format!("Viewing {} in AR", product.name));

        loop {
            let rotation = if viewer.is_rotating() {
                "Pause rotation"
            } else {
                "Resume rotation"
            };
            let choice = Select::new()
                .items(&[rotation, "Exit AR"])
                .default(1)
                .interact()?;
            if choice == 0 {
                viewer.toggle_rotation();
            } else if viewer.exit() {
                return Ok(());
            }
        }
    }

    fn add_to_cart(&mut self, product: &Product, detail: &DetailState) {
        match add_line(
            &self.cart,
            self.catalog.products(),
            &product.id,
            i64::from(detail.quantity),
            detail.to_selection(),
        ) {
            Ok(cart) => {
                self.cart = cart;
                self.logger
                    .info_builder("Added to cart")
                    .field("product_id", product.id.as_str())
                    .field_u64("quantity", u64::from(detail.quantity))
                    .emit();
                self.ctx.output.success(&format!(
                    "{} x {} added to your cart",
                    detail.quantity, product.name
                ));
            }
            Err(e) => self.ctx.output.warn(&e.to_string()),
        }
    }

    fn cart_page(&mut self) -> Result<()> {
        self.logger.set_page("cart");
        loop {
            if self.cart.is_empty() {
                self.ctx.output.info("Your cart is empty.");
                return Ok(());
            }

            let summary = compute_order(
                &self.cart,
                self.catalog.products(),
                &self.ctx.config.pricing,
            )?;
            self.ctx.output.header("Your Cart");
            self.ctx.output.order_summary(&summary);

            let mut actions = vec!["Change quantity", "Remove item"];
            if summary.has_unpriced() {
                actions.push("Remove unavailable items");
            }
            actions.push("Back");

            let choice = Select::new()
                .with_prompt("Cart")
                .items(&actions)
                .default(actions.len() - 1)
                .interact()?;

            match actions[choice] {
                "Change quantity" => {
                    let Some(line) = self.pick_line()? else { continue };
                    let requested: i64 = Input::new()
                        .with_prompt("Quantity")
                        .default(i64::from(line.quantity))
                        .interact_text()?;
                    self.cart = set_quantity(
                        &self.cart,
                        self.catalog.products(),
                        &line.product_id,
                        requested,
                    );
                }
                "Remove item" => {
                    let Some(line) = self.pick_line()? else { continue };
                    self.cart = remove_line(&self.cart, &line.product_id);
                    self.logger
                        .info_builder("Removed from cart")
                        .field("product_id", line.product_id.as_str())
                        .emit();
                }
                "Remove unavailable items" => {
                    let mut cart = prune_unresolved(&self.cart, self.catalog.products());
                    for id in &summary.sold_out {
                        cart = remove_line(&cart, id);
                    }
                    self.cart = cart;
                }
                _ => return Ok(()),
            }
        }
    }

    fn pick_line(&self) -> Result<Option<CartLine>> {
        let items: Vec<String> = self
            .cart
            .iter()
            .map(|line| {
                let name = self
                    .catalog
                    .find(&line.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| line.product_id.to_string());
                format!("{} x{}", name, line.quantity)
            })
            .collect();
        let choice = Select::new()
            .with_prompt("Which item?")
            .items(&items)
            .default(0)
            .interact_opt()?;
        Ok(choice.and_then(|i| self.cart.get(i).cloned()))
    }
}
