//! Routing-side contracts for Junction (Layer 1).
//!
//! `junction_routing` defines the vocabulary shared between a router and the
//! controllers it drives:
//!
//! - [`StageId`] / [`Stage`] - type-level identifiers for lifecycle stages
//! - [`Flow`] / [`LifecycleHook`] - hook callables and their control signals
//! - [`Options`] - the configuration bag carried by routers, routes and
//!   controllers, which may embed hook chains under lifecycle stages
//! - [`HookRegistry`] - the router-global hook registry
//! - [`Router`] / [`Route`] - the two collaborators a controller consumes
//!
//! # Example
//!
//! ```
//! use junction_routing::{Flow, Options, Router, Stage};
//!
//! struct OnRun;
//! impl Stage for OnRun {}
//!
//! let router = Router::new();
//! router.set_option("layout", "main");
//! router
//!     .hooks()
//!     .register_observer::<OnRun, _>("audit", |event| {
//!         tracing::debug!("running {} for {}", event.stage().type_name(), event.route());
//!     })
//!     .unwrap();
//!
//! let route = router.route("posts.show", "/posts/:id", Options::new());
//! assert_eq!(route.path(), "/posts/:id");
//! ```
//!
//! # Architecture
//!
//! This crate is Layer 1 of the Junction architecture:
//!
//! - **Layer 1** (`junction_routing`): routing contracts (this crate)
//! - **Layer 2** (`junction_controller`): the controller lifecycle engine,
//!   which collects hooks from routers, routes, extension layers and
//!   controller instances and executes them with pause/stop signaling

/// Hook callables, flow signals and stage events.
pub mod hook;

/// Configuration bags holding values and embedded hook chains.
pub mod options;

/// Router-global hook registry.
pub mod registry;

/// A single matched routing rule.
pub mod route;

/// The per-app routing configuration holder.
pub mod router;

/// Type-level lifecycle stage identifiers.
pub mod stage;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::hook::{Flow, IntoHookChain, LifecycleHook, StageEvent};
    pub use crate::options::Options;
    pub use crate::registry::{HookRegistrationError, HookRegistry};
    pub use crate::route::{Route, RouteId};
    pub use crate::router::Router;
    pub use crate::stage::{IntoStageIds, Stage, StageId};
}

pub use hook::{Flow, IntoHookChain, LifecycleHook, StageEvent};
pub use options::Options;
pub use registry::{HookRegistrationError, HookRegistry};
pub use route::{Route, RouteId};
pub use router::Router;
pub use stage::{IntoStageIds, Stage, StageId};
