//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv("shipping_fee", &pricing.shipping_fee().display());
    ctx.output.kv("tax_rate", &pricing.tax_rate.to_string());

    ctx.output.info("");
    ctx.output.info("[viewer]");
    ctx.output.kv(
        "loading_delay_ms",
        &ctx.config.viewer.loading_delay_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(bundled)"),
    );

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", ctx.config.logging.format.as_str());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    if ctx.config_path.is_none() {
        ctx.output
            .warn("No config file found; run `storefront config init` to create one");
    }
    let config = &ctx.config;

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config.pricing.shipping_fee_cents < 0 {
        errors.push("pricing.shipping_fee_cents must not be negative".to_string());
    }

    if config.pricing.tax_rate.basis_points() > 3000 {
        warnings.push(format!(
            "pricing.tax_rate_percent {} is unusually high",
            config.pricing.tax_rate.as_percent()
        ));
    }

    if config.viewer.loading_delay_ms > 10_000 {
        warnings.push(format!(
            "viewer.loading_delay_ms {} keeps shoppers waiting over 10s",
            config.viewer.loading_delay_ms
        ));
    }

    if let Err(e) = ctx.catalog() {
        errors.push(format!("catalog: {:#}", e));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
