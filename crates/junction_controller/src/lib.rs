//! Controller lifecycle engine for Junction (Layer 2).
//!
//! `junction_controller` provides the per-route-match object that a router
//! drives: it resolves configuration by cascading through scopes, collects
//! lifecycle hooks from every contributing source in a fixed order, and
//! executes them with pause/stop signaling.
//!
//! # Core Concepts
//!
//! - [`Controller`] - per-route-match lifecycle engine
//! - [`Blueprint`] / [`Layer`] - the controller extension chain, represented
//!   as an explicit ordered list of layer definitions
//! - [`StageOutcome`] - result of driving one or more hook chains
//! - [`PropertyScope`] - the scopes consulted during property resolution
//! - stage markers ([`stage`]): `OnRun`, `OnStop`, `Load`, `Unload`, ...
//!
//! # Example
//!
//! ```
//! use junction_controller::controller::Controller;
//! use junction_controller::stage::OnRun;
//! use junction_routing::{LifecycleHook, Options, Router};
//! use std::sync::Arc;
//!
//! let router = Arc::new(Router::new());
//! let route = router.route("posts.show", "/posts/:id", Options::new());
//!
//! let mut controller = Controller::new(Arc::clone(&router), route, Options::new());
//! controller.set_hook::<OnRun>(LifecycleHook::observer(|event| {
//!     tracing::info!("running {}", event.route());
//! }));
//!
//! let outcome = controller.run();
//! assert!(!outcome.is_interrupted());
//! assert!(controller.is_running());
//! ```
//!
//! # Architecture
//!
//! This crate is Layer 2 of the Junction architecture:
//!
//! - **Layer 1** (`junction_routing`): stage ids, hook contract, options,
//!   router and route
//! - **Layer 2** (`junction_controller`): the lifecycle engine (this crate)

/// The per-route-match controller and its stage runner.
pub mod controller;

/// Extension layers and blueprints for deriving controller types.
pub mod layer;

/// Cascading property resolution across configuration scopes.
pub mod resolver;

/// Canonical lifecycle stage marker types.
pub mod stage;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::controller::{Controller, ControllerError, StageOutcome};
    pub use crate::layer::{Blueprint, BoxedMethod, Layer};
    pub use crate::resolver::PropertyScope;
    pub use crate::stage::{
        Load, OnAfterAction, OnBeforeAction, OnRerun, OnRun, OnStop, Unload,
    };
}

pub use controller::{Controller, ControllerError, StageOutcome};
pub use layer::{Blueprint, BoxedMethod, Layer};
pub use resolver::PropertyScope;
