//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::cart::OrderSummary;
use storefront_commerce::catalog::Product;
use storefront_commerce::viewer::ViewerPhase;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a product listing as a table.
    pub fn product_table(&self, products: &[&Product]) {
        let widths = [4, 32, 12, 10, 6, 8];
        self.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING", "STOCK"], &widths);
        for p in products {
            self.table_row(
                &[
                    p.id.as_str(),
                    &p.name,
                    p.category.as_str(),
                    &p.price.display(),
                    &p.rating_display(),
                    &stock_badge(p.stock),
                ],
                &widths,
            );
        }
    }

    /// Print an order summary.
    pub fn order_summary(&self, summary: &OrderSummary) {
        if self.json {
            self.json(summary);
            return;
        }

        let widths = [32, 10, 4, 10];
        for line in &summary.lines {
            self.table_row(
                &[
                    &line.name,
                    &line.unit_price.display(),
                    &format!("x{}", line.quantity),
                    &line.line_total.display(),
                ],
                &widths,
            );
        }
        println!();
        self.kv("Subtotal", &summary.subtotal.display());
        self.kv("Shipping", &summary.shipping.display());
        self.kv("Tax", &summary.tax.display());
        println!("  {}: {}", style("Total").bold(), style(summary.total.display()).bold());

        for id in &summary.unresolved {
            self.warn(&format!("Cart line for unknown product '{}' was left out", id));
        }
        for id in &summary.sold_out {
            self.warn(&format!("Product '{}' is sold out and was left out", id));
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Stock level badge.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("sold out").red().to_string(),
        1..=9 => style(format!("{} left", stock)).yellow().to_string(),
        _ => style(stock).green().to_string(),
    }
}

/// Badge for the AR viewer phase.
pub fn phase_badge(phase: ViewerPhase) -> String {
    match phase {
        ViewerPhase::Active => style(phase.as_str()).green().to_string(),
        ViewerPhase::Loading => style(phase.as_str()).yellow().to_string(),
        ViewerPhase::Inactive => style(phase.as_str()).dim().to_string(),
    }
}

/// Star rating, e.g. "★★★★☆ 4.8".
pub fn stars(rating: f32) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}
