//! Storefront CLI - Terminal front end for the AR storefront.
//!
//! Commands:
//! - `storefront products` - List products with filters and sorting
//! - `storefront product` - Show one product
//! - `storefront categories` - List categories with product counts
//! - `storefront order` - Price a set of cart lines
//! - `storefront shop` - Interactive shopping session
//! - `storefront ar` - Preview a product in AR
//! - `storefront models` - Manage 3D model assets
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    ArArgs, CategoriesArgs, ConfigArgs, ModelsArgs, OrderArgs, ProductArgs, ProductsArgs, ShopArgs,
};

/// Storefront CLI - Browse, price and preview products in AR
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, filtered and sorted
    Products(ProductsArgs),

    /// Show a product's details
    Product(ProductArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// Compute an order summary for cart lines
    Order(OrderArgs),

    /// Start an interactive shopping session
    Shop(ShopArgs),

    /// Preview a product in AR
    Ar(ArArgs),

    /// Manage 3D model assets
    Models(ModelsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        storefront_observability::LogLevel::Debug
    } else {
        ctx.config.logging.level
    };
    storefront_observability::init_tracing(level, ctx.config.logging.format)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Ar(args) => commands::ar::run(args, &ctx).await,
        Commands::Models(args) => commands::models::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
