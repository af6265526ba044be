//! A route-controller lifecycle engine for client-side routers.
//!

pub use junction_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use junction_internal::prelude::*;
}
