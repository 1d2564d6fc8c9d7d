//! Simulated AR viewer state machine.
//!
//! The viewer moves Inactive -> Loading -> Active on a single timer event.
//! Rendering belongs to an opaque collaborator; this module only tracks
//! which phase the preview is in.

use std::time::Duration;

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Default simulated loading delay.
pub const DEFAULT_LOADING_DELAY_MS: u64 = 1500;

/// Viewer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// How long the viewer stays in Loading.
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,
}

fn default_loading_delay_ms() -> u64 {
    DEFAULT_LOADING_DELAY_MS
}

impl ViewerConfig {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
        }
    }
}

/// Phases of the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerPhase {
    /// Nothing shown; the launch prompt is visible.
    #[default]
    Inactive,
    /// Waiting for the loading timer.
    Loading,
    /// The model is on screen.
    Active,
}

impl ViewerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerPhase::Inactive => "inactive",
            ViewerPhase::Loading => "loading",
            ViewerPhase::Active => "active",
        }
    }
}

/// Whether a product can be previewed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

/// AR preview for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArViewer {
    /// Name shown over the viewer.
    pub product_name: String,
    /// Model URL handed to the renderer.
    pub model_ref: Option<String>,
    phase: ViewerPhase,
    rotating: bool,
    config: ViewerConfig,
}

impl ArViewer {
    /// A viewer with the default configuration.
    pub fn new(product_name: impl Into<String>, model_ref: Option<String>) -> Self {
        Self::with_config(product_name, model_ref, ViewerConfig::default())
    }

    pub fn with_config(
        product_name: impl Into<String>,
        model_ref: Option<String>,
        config: ViewerConfig,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            model_ref,
            phase: ViewerPhase::Inactive,
            rotating: true,
            config,
        }
    }

    /// A viewer for `product`'s AR model.
    pub fn for_product(product: &Product, config: ViewerConfig) -> Self {
        Self::with_config(product.name.clone(), product.ar_model.clone(), config)
    }

    pub fn availability(&self) -> Availability {
        match self.model_ref {
            Some(_) => Availability::Available,
            None => Availability::Unavailable,
        }
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Start loading.
    ///
    /// Returns the delay the caller should wait before calling
    /// [`ArViewer::timer_elapsed`]. Launching while Loading or Active changes
    /// nothing and returns a zero delay.
    pub fn launch(&mut self) -> Result<Duration, CommerceError> {
        if self.availability() == Availability::Unavailable {
            return Err(CommerceError::ArUnavailable(self.product_name.clone()));
        }
        match self.phase {
            ViewerPhase::Inactive => {
                self.phase = ViewerPhase::Loading;
                tracing::debug!(product = %self.product_name, "viewer loading");
                Ok(self.config.loading_delay())
            }
            ViewerPhase::Loading | ViewerPhase::Active => Ok(Duration::ZERO),
        }
    }

    /// The loading timer fired. Ignored outside Loading.
    pub fn timer_elapsed(&mut self) -> ViewerPhase {
        if self.phase == ViewerPhase::Loading {
            self.phase = ViewerPhase::Active;
            tracing::debug!(product = %self.product_name, "viewer active");
        }
        self.phase
    }

    /// Leave the preview. Only an Active viewer can exit; Loading runs to completion.
    pub fn exit(&mut self) -> bool {
        if self.phase != ViewerPhase::Active {
            return false;
        }
        self.phase = ViewerPhase::Inactive;
        true
    }

    /// Flip auto-rotation. Returns the new setting.
    pub fn toggle_rotation(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> ArViewer {
        ArViewer::new("Lamp", Some("/models/lamp.glb".into()))
    }

    #[test]
    fn test_full_cycle() {
        let mut v = viewer();
        assert_eq!(v.phase(), ViewerPhase::Inactive);
        assert_eq!(v.launch().unwrap(), Duration::from_millis(1500));
        assert_eq!(v.phase(), ViewerPhase::Loading);
        assert_eq!(v.timer_elapsed(), ViewerPhase::Active);
        assert!(v.exit());
        assert_eq!(v.phase(), ViewerPhase::Inactive);
    }

    #[test]
    fn test_no_cancel_while_loading() {
        let mut v = viewer();
        v.launch().unwrap();
        assert!(!v.exit());
        assert_eq!(v.phase(), ViewerPhase::Loading);
    }

    #[test]
    fn test_relaunch_and_stray_timer_are_ignored() {
        let mut v = viewer();
        assert_eq!(v.timer_elapsed(), ViewerPhase::Inactive);
        v.launch().unwrap();
        assert_eq!(v.launch().unwrap(), Duration::ZERO);
        v.timer_elapsed();
        assert_eq!(v.launch().unwrap(), Duration::ZERO);
        assert_eq!(v.phase(), ViewerPhase::Active);
    }

    #[test]
    fn test_unavailable_without_model() {
        let mut v = ArViewer::new("Mirror", None);
        assert_eq!(v.availability(), Availability::Unavailable);
        assert_eq!(v.launch(), Err(CommerceError::ArUnavailable("Mirror".into())));
        assert_eq!(v.phase(), ViewerPhase::Inactive);
    }

    #[test]
    fn test_rotation_defaults_on() {
        let mut v = viewer();
        assert!(v.is_rotating());
        assert!(!v.toggle_rotation());
        assert!(v.toggle_rotation());
    }

    #[test]
    fn test_configured_delay() {
        let config = ViewerConfig { loading_delay_ms: 10 };
        let mut v = ArViewer::with_config("Lamp", Some("lamp.glb".into()), config);
        assert_eq!(v.launch().unwrap(), Duration::from_millis(10));
    }
}
