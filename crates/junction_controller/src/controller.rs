//! The per-route-match controller and its stage runner.
//!
//! A [`Controller`] is created when a route matches and driven by the
//! embedding router: `run()` when the controller takes over, `stop()` when a
//! new match replaces it. Each lifecycle stage executes one flat hook chain
//! collected from every contributing source in a fixed precedence order
//! (see [`Controller::collect_hooks`]), honoring the [`Flow`] signal each
//! hook returns.
//!
//! # Execution model
//!
//! Single-threaded, synchronous and cooperative: hooks run inline on the
//! caller's thread, one at a time. Pause and stop are control-flow
//! short-circuits inspected after each hook, not scheduler yields — a signal
//! produced after a hook has returned has no effect on the chain.

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use serde_json::Value;
use thiserror::Error;

use junction_routing::{
    Flow, IntoHookChain, LifecycleHook, Options, Route, Router, Stage, StageEvent, StageId,
};

use crate::layer::Blueprint;
use crate::resolver::{self, PropertyScope};
use crate::stage::{Load, OnRerun, OnRun, OnStop, Unload};

// ─────────────────────────────────────────────────────────────────────────────
// StageOutcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of driving one or more hook chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Every hook in the chain ran and continued.
    Completed,
    /// A hook paused the chain; the controller's run status is unchanged and
    /// the embedding router may hand control to another matched route.
    Paused,
    /// A hook stopped the controller; it is now in its terminal state.
    Stopped,
}

impl StageOutcome {
    /// Returns `true` if the chain was paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, StageOutcome::Paused)
    }

    /// Returns `true` if the chain did not run to completion.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        !matches!(self, StageOutcome::Completed)
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutcome::Completed => write!(f, "completed"),
            StageOutcome::Paused => write!(f, "paused"),
            StageOutcome::Stopped => write!(f, "stopped"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControllerError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced by controller operations.
#[derive(Debug, Clone, Error)]
pub enum ControllerError {
    /// No layer of the controller's blueprint defines the requested method.
    #[error("no layer defines method '{name}'")]
    UnknownMethod {
        /// The method name that failed to resolve.
        name: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Per-route-match object orchestrating lifecycle hooks.
///
/// A controller references its [`Router`] and matched [`Route`] without
/// owning them, carries its own options bag and instance-level properties
/// and hooks, and tracks a tri-state run status: not-yet-started, running,
/// or stopped. Pausing is a transient signal and never touches the status
/// flags.
pub struct Controller {
    /// The router driving this controller. Read-only from here, except for
    /// its append-only hook registry.
    router: Arc<Router>,
    /// The matched route this controller was created for.
    route: Arc<Route>,
    /// The extension chain this controller was instantiated from.
    blueprint: Blueprint,
    /// Instance options, the second property-resolution scope.
    options: Options,
    /// Instance-level properties, the first property-resolution scope.
    properties: HashMap<String, Value>,
    /// Instance-level hooks, set after construction and collected last.
    hooks: HashMap<StageId, Vec<Arc<LifecycleHook>>>,
    /// `true` between `run()` and a stop transition.
    is_running: bool,
    /// `true` once the controller reaches its terminal state.
    is_stopped: bool,
}

impl Controller {
    /// Creates a controller of the base blueprint (no layers).
    #[must_use]
    pub fn new(router: Arc<Router>, route: Arc<Route>, options: Options) -> Self {
        Self::with_blueprint(Blueprint::new(), router, route, options)
    }

    /// Creates a controller from an extension chain.
    ///
    /// Used by [`Blueprint::instantiate`].
    #[must_use]
    pub fn with_blueprint(
        blueprint: Blueprint,
        router: Arc<Router>,
        route: Arc<Route>,
        options: Options,
    ) -> Self {
        Self {
            router,
            route,
            blueprint,
            options,
            properties: HashMap::new(),
            hooks: HashMap::new(),
            is_running: false,
            is_stopped: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the router driving this controller.
    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Returns the matched route.
    #[must_use]
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Returns the blueprint this controller was instantiated from.
    #[must_use]
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Returns the instance options bag.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the instance options bag for mutation.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Returns `true` while the controller is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Returns `true` once the controller has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.is_stopped
    }

    // ─────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────

    /// Sets an instance-level property, the highest-precedence scope.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns the instance-level property stored under `key`, if any.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Removes and returns the instance-level property under `key`.
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Resolves a property by cascading through configuration scopes.
    ///
    /// Checks, in order: instance properties, instance options, route
    /// options, router options. The first scope defining the key wins; later
    /// scopes are fallback only. Returns `None` when no scope defines the
    /// key. No side effects.
    #[must_use]
    pub fn lookup_property(&self, key: &str) -> Option<Value> {
        resolver::lookup(self, key).map(|(_, value)| value)
    }

    /// Like [`lookup_property`](Self::lookup_property), additionally naming
    /// the scope that supplied the value.
    #[must_use]
    pub fn lookup_property_scoped(&self, key: &str) -> Option<(PropertyScope, Value)> {
        resolver::lookup(self, key)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Hooks
    // ─────────────────────────────────────────────────────────────────────

    /// Sets the instance-level hook chain for stage `S`.
    ///
    /// Replaces any chain previously set on the instance for that stage,
    /// mirroring field assignment; chains contributed by other scopes are
    /// unaffected. Instance-level hooks run last, after every other source.
    pub fn set_hook<S: Stage>(&mut self, chain: impl IntoHookChain) {
        self.hooks.insert(StageId::of::<S>(), chain.into_chain());
    }

    /// Collects the full ordered hook chain for a stage.
    ///
    /// Concatenates, in this exact order:
    ///
    /// 1. router-level hooks from the registry, consulted fresh on every
    ///    call (never cached),
    /// 2. the route-options chain,
    /// 3. the controller-options chain,
    /// 4. each blueprint layer's own chain, ancestor to descendant,
    /// 5. the instance-level chain,
    /// 6. `extras`, appended last.
    ///
    /// Each contributed value was already flattened at insertion time, so the
    /// result is one flat chain; absent sources contribute nothing.
    #[must_use]
    pub fn collect_hooks(
        &self,
        stage: StageId,
        extras: &[Arc<LifecycleHook>],
    ) -> Vec<Arc<LifecycleHook>> {
        let mut chain = self.router.hooks_for(stage);
        chain.extend(self.route.hooks_for(stage));
        chain.extend(self.options.hooks_for(stage).iter().cloned());
        for layer in self.blueprint.layers() {
            chain.extend(layer.hooks_for(stage).iter().cloned());
        }
        if let Some(own) = self.hooks.get(&stage) {
            chain.extend(own.iter().cloned());
        }
        chain.extend(extras.iter().cloned());
        chain
    }

    // ─────────────────────────────────────────────────────────────────────
    // Execution
    // ─────────────────────────────────────────────────────────────────────

    /// Runs the hook chain for one stage, honoring pause/stop signals.
    ///
    /// Hooks execute strictly in collection order, synchronously, one at a
    /// time. The first hook returning [`Flow::Pause`] or [`Flow::Stop`]
    /// halts the remainder of the chain (including `extras`); `Stop`
    /// additionally transitions the controller to its stopped state. An
    /// empty chain completes trivially.
    pub fn run_stage(&mut self, stage: StageId, extras: &[Arc<LifecycleHook>]) -> StageOutcome {
        let chain = self.collect_hooks(stage, extras);
        let event = StageEvent::new(stage, self.route.name());
        tracing::trace!(
            stage = stage.type_name(),
            route = self.route.name(),
            hooks = chain.len(),
            "running stage chain"
        );

        for hook in &chain {
            match hook.invoke(&event) {
                Flow::Continue => {}
                Flow::Pause => {
                    tracing::debug!(
                        stage = stage.type_name(),
                        route = self.route.name(),
                        "stage chain paused"
                    );
                    return StageOutcome::Paused;
                }
                Flow::Stop => {
                    tracing::debug!(
                        stage = stage.type_name(),
                        route = self.route.name(),
                        "hook stopped controller"
                    );
                    self.is_running = false;
                    self.is_stopped = true;
                    return StageOutcome::Stopped;
                }
            }
        }
        StageOutcome::Completed
    }

    /// Runs a sequence of stages with interleaved callbacks.
    ///
    /// For each stage in order: run its chain; if it completed, invoke
    /// `between`. `between` therefore fires once per stage processed,
    /// including after the final stage, immediately before `done`. Callers
    /// relying on it as a pure separator must account for the trailing call.
    ///
    /// Execution halts early when any stage pauses or stops: no `between`
    /// fires for that stage, remaining stages are skipped and `done` never
    /// runs.
    pub fn run_stages(
        &mut self,
        stages: &[StageId],
        mut between: impl FnMut(),
        done: impl FnOnce(),
    ) -> StageOutcome {
        for stage in stages {
            let outcome = self.run_stage(*stage, &[]);
            if outcome.is_interrupted() {
                return outcome;
            }
            between();
        }
        done();
        StageOutcome::Completed
    }

    /// Marks the controller running and drives the run sequence
    /// ([`OnRun`], then [`Load`]).
    pub fn run(&mut self) -> StageOutcome {
        tracing::debug!(route = self.route.name(), "controller run");
        self.is_stopped = false;
        self.is_running = true;
        self.run_stages(
            &[StageId::of::<OnRun>(), StageId::of::<Load>()],
            || {},
            || {},
        )
    }

    /// Re-executes the current controller ([`OnRerun`], then [`Load`]).
    ///
    /// Used when the embedding application invalidates the current match
    /// without navigating away.
    pub fn rerun(&mut self) -> StageOutcome {
        tracing::debug!(route = self.route.name(), "controller rerun");
        self.is_running = true;
        self.run_stages(
            &[StageId::of::<OnRerun>(), StageId::of::<Load>()],
            || {},
            || {},
        )
    }

    /// Stops the controller: runs the [`OnStop`] chain, then the [`Unload`]
    /// chain, then flips the run-status flags.
    ///
    /// Idempotent — a second call observes the stopped state and returns
    /// without re-running either chain. A pause inside the `OnStop` chain
    /// halts that chain only; unload and the flag transition still happen.
    pub fn stop(&mut self) {
        if self.is_stopped {
            tracing::trace!(route = self.route.name(), "stop on stopped controller ignored");
            return;
        }
        tracing::debug!(route = self.route.name(), "controller stopping");

        self.run_stage(StageId::of::<OnStop>(), &[]);
        self.run_stage(StageId::of::<Unload>(), &[]);
        self.is_running = false;
        self.is_stopped = true;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Methods
    // ─────────────────────────────────────────────────────────────────────

    /// Dispatches a blueprint method by name.
    ///
    /// Resolution walks the extension chain most-derived-first, so an
    /// override in a derived layer wins over its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownMethod`] if no layer defines the
    /// method.
    pub fn invoke_method(&self, name: &str) -> Result<(), ControllerError> {
        let method = self
            .blueprint
            .method(name)
            .ok_or_else(|| ControllerError::UnknownMethod {
                name: name.to_string(),
            })?;
        method(self);
        Ok(())
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("route", &self.route.name())
            .field("layers", &self.blueprint.depth())
            .field("is_running", &self.is_running)
            .field("is_stopped", &self.is_stopped)
            .finish_non_exhaustive()
    }
}
