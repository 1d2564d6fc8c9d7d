//! Observability for the AR storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Session-scoped structured logging of shopper events
//! - `init_tracing` - Installs the `tracing` subscriber the domain crate logs through

mod logging;
mod subscriber;

pub use logging::*;
pub use subscriber::*;

// Re-export SessionId from storefront-commerce for convenience
pub use storefront_commerce::SessionId;
