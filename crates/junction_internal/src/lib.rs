//! # Junction Internal Library
//!
//! Re-exports the core Junction crates for convenience.

/// Layer 1: routing-side contracts.
pub use junction_routing;

/// Layer 2: controller lifecycle engine.
pub use junction_controller;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use junction_controller::prelude::*;
    pub use junction_routing::prelude::*;
}
