//! AR preview command.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::viewer::{ArViewer, ViewerPhase};
use storefront_commerce::CommerceError;

use super::ArArgs;
use super::product::find_product;
use crate::context::Context;
use crate::output::phase_badge;

#[derive(Serialize)]
struct PreviewReport<'a> {
    product: &'a str,
    model: Option<&'a str>,
    phases: Vec<ViewerPhase>,
    loading_ms: u64,
    rotating: bool,
}

/// Run the ar command.
pub async fn run(args: ArArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, &args.id)?;
    let logger = ctx.session_logger("ar");

    let mut viewer = ArViewer::for_product(product, ctx.config.viewer);
    let mut phases = vec![viewer.phase()];

    let delay = match viewer.launch() {
        Ok(delay) => delay,
        Err(CommerceError::ArUnavailable(_)) => {
            ctx.output
                .warn(&format!("AR view is not available for {}", product.name));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    phases.push(viewer.phase());

    let spinner = ctx.output.spinner("Loading AR experience...");
    drive_timer(&mut viewer, delay).await;
    spinner.finish_and_clear();
    phases.push(viewer.phase());

    if args.no_rotate {
        viewer.toggle_rotation();
    }

    logger
        .info_builder("AR view launched")
        .field("product_id", product.id.as_str())
        .duration_ms("loading", delay)
        .field_bool("rotating", viewer.is_rotating())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&PreviewReport {
            product: &product.name,
            model: viewer.model_ref.as_deref(),
            phases,
            loading_ms: delay.as_millis() as u64,
            rotating: viewer.is_rotating(),
        });
        return Ok(());
    }

    ctx.output.success(&format!("Viewing {} in AR", product.name));
    ctx.output.kv("Viewer", &phase_badge(viewer.phase()));
    if let Some(model) = &viewer.model_ref {
        ctx.output.kv("Model", model);
    }
    ctx.output.kv(
        "Rotation",
        if viewer.is_rotating() { "on" } else { "off" },
    );
    ctx.output
        .info("Move your device to place the product in your space.");

    Ok(())
}

/// Wait out the loading delay, then fire the viewer's timer event.
pub async fn drive_timer(viewer: &mut ArViewer, delay: std::time::Duration) -> ViewerPhase {
    tokio::time::sleep(delay).await;
    viewer.timer_elapsed()
}
