//! CLI command implementations.

pub mod ar;
pub mod categories;
pub mod config;
pub mod models;
pub mod order;
pub mod product;
pub mod products;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category id, or "all".
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Minimum price (inclusive).
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum price (inclusive).
    #[arg(long)]
    pub max: Option<f64>,

    /// Sort order: featured, price-asc, price-desc or name.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Show only the first N products, as the home page does.
    #[arg(long)]
    pub featured: Option<usize>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Number of related products to show.
    #[arg(long, default_value = "4")]
    pub related: usize,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Cart line as ID[xQTY][:color=NAME][:size=SIZE]; repeatable.
    #[arg(short, long = "line", required = true)]
    pub lines: Vec<String>,

    /// Drop lines for unknown products instead of reporting them.
    #[arg(long)]
    pub prune: bool,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Open this product's page first.
    #[arg(long)]
    pub product: Option<String>,
}

/// Arguments for the ar command.
#[derive(Args)]
pub struct ArArgs {
    /// Product ID.
    pub id: String,

    /// Leave rotation off once the model is shown.
    #[arg(long)]
    pub no_rotate: bool,
}

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: Option<ModelsCommand>,
}

#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List model assets.
    List,
    /// Register a new model file.
    Add {
        /// File name (.glb or .gltf).
        name: String,
        /// URL the file is served from (default: /models/NAME).
        #[arg(long)]
        url: Option<String>,
        /// File size in bytes.
        #[arg(long, default_value = "0")]
        size: u64,
    },
    /// Link a model to a product.
    Link {
        /// Model ID.
        model: String,
        /// Product ID.
        product: String,
    },
    /// Remove a model's product link.
    Unlink {
        /// Model ID.
        model: String,
    },
    /// Delete a model.
    Delete {
        /// Model ID.
        model: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show how many products can be previewed in AR.
    Coverage,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
