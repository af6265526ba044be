//! Canonical lifecycle stage markers.
//!
//! These marker types identify the points in a controller's life at which
//! hook chains run. Use them with
//! [`StageId::of::<T>()`](junction_routing::StageId::of) when a runtime
//! identifier is needed, or directly with the type-safe registration methods
//! (e.g. [`HookRegistry::register_observer`](junction_routing::HookRegistry::register_observer),
//! [`Options::add_hook`](junction_routing::Options::add_hook)).
//!
//! # Pure Markers
//!
//! Stage markers are pure marker types implementing the
//! [`Stage`](junction_routing::Stage) trait. Hook payloads are provided via
//! [`StageEvent`](junction_routing::StageEvent), which all hooks receive.

use junction_routing::Stage;

// ─────────────────────────────────────────────────────────────────────────────
// Run Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Marker type for hooks run when a controller first takes over a route.
///
/// The `OnRun` chain fires once per route match, before [`Load`]. A hook
/// pausing here defers the rest of the chain to the next matched route;
/// a hook stopping here puts the controller into its terminal state without
/// loading.
pub struct OnRun;
impl Stage for OnRun {}

/// Marker type for hooks run when the current controller is re-executed.
///
/// A rerun happens when the embedding application invalidates the current
/// match without navigating away (e.g. a data dependency changed). The
/// `OnRerun` chain fires instead of `OnRun`, followed by [`Load`].
pub struct OnRerun;
impl Stage for OnRerun {}

/// Marker type for hooks run immediately before a controller's action.
pub struct OnBeforeAction;
impl Stage for OnBeforeAction {}

/// Marker type for hooks run immediately after a controller's action.
pub struct OnAfterAction;
impl Stage for OnAfterAction {}

// ─────────────────────────────────────────────────────────────────────────────
// Stop Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Marker type for hooks run when a controller is stopped.
///
/// The `OnStop` chain fires at the start of
/// [`Controller::stop`](crate::controller::Controller::stop), before
/// [`Unload`] and before the run-status flags flip.
pub struct OnStop;
impl Stage for OnStop {}

// ─────────────────────────────────────────────────────────────────────────────
// Load Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Marker type for hooks run when a controller loads.
///
/// Fires after [`OnRun`] (or [`OnRerun`]) during
/// [`Controller::run`](crate::controller::Controller::run).
pub struct Load;
impl Stage for Load {}

/// Marker type for hooks run when a controller unloads.
///
/// Fires during [`Controller::stop`](crate::controller::Controller::stop),
/// after the [`OnStop`] chain.
pub struct Unload;
impl Stage for Unload {}
