//! Router-global hook registry.
//!
//! The [`HookRegistry`] is the capability a router exposes for registering
//! lifecycle hooks that apply to every controller it drives. Hooks are
//! organized by stage and invoked in registration order, ahead of any hooks
//! contributed by routes, controller options, extension layers or controller
//! instances.
//!
//! # Example
//!
//! ```
//! use junction_routing::registry::HookRegistry;
//! use junction_routing::stage::Stage;
//!
//! struct OnRun;
//! impl Stage for OnRun {}
//! struct OnStop;
//! impl Stage for OnStop {}
//!
//! let registry = HookRegistry::new();
//!
//! // Single stage
//! registry
//!     .register_observer::<OnRun, _>("metrics", |event| {
//!         tracing::debug!(route = event.route(), "controller running");
//!     })
//!     .unwrap();
//!
//! // Multiple stages in one call
//! registry
//!     .register_observer::<(OnRun, OnStop), _>("audit", |event| {
//!         tracing::debug!("{event}");
//!     })
//!     .unwrap();
//! ```

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use thiserror::Error;

use crate::hook::{Flow, LifecycleHook, StageEvent};
use crate::stage::{IntoStageIds, StageId};

// ─────────────────────────────────────────────────────────────────────────────
// HookRegistrationError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during hook registration.
#[derive(Debug, Clone, Error)]
pub enum HookRegistrationError {
    /// A hook with this name already exists on the stage.
    #[error("hook '{name}' already registered for stage '{}'", stage.type_name())]
    DuplicateName {
        /// The stage where the duplicate was found.
        stage: StageId,
        /// The duplicate hook name.
        name: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// HookEntry
// ─────────────────────────────────────────────────────────────────────────────

/// Entry in the registry, containing metadata and the hook itself.
struct HookEntry {
    /// Human-readable name for debugging and logging.
    name: String,
    /// The hook function.
    hook: Arc<LifecycleHook>,
}

// ─────────────────────────────────────────────────────────────────────────────
// HookRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of router-level lifecycle hooks, organized by stage.
///
/// # Thread Safety
///
/// The registry uses interior mutability via [`RwLock`]: registration is
/// append-only and may interleave with reads from running controllers.
/// Controllers consult the registry fresh on every stage run — chains are
/// never cached across calls, so a hook registered between two runs is seen
/// by the second.
#[derive(Default)]
pub struct HookRegistry {
    /// Maps stage ID to a list of hook entries.
    hooks: RwLock<HashMap<StageId, Vec<HookEntry>>>,
}

impl HookRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a signal-returning hook for one or more stages.
    ///
    /// The hook participates in control flow by returning a [`Flow`] signal.
    /// When registered on multiple stages the entry name is suffixed with the
    /// stage's type name to keep names unique per stage.
    ///
    /// # Errors
    ///
    /// Returns [`HookRegistrationError::DuplicateName`] if a hook with the
    /// same name already exists on one of the stages.
    pub fn register<S, F>(
        &self,
        name: impl Into<String>,
        hook: F,
    ) -> Result<&Self, HookRegistrationError>
    where
        S: IntoStageIds,
        F: Fn(&StageEvent) -> Flow + Send + Sync + 'static,
    {
        self.register_shared::<S>(name, Arc::new(LifecycleHook::new(hook)))
    }

    /// Registers an observing hook for one or more stages.
    ///
    /// Observers react to events without influencing control flow; the
    /// `Continue` signal is implied. Use this for logging, metrics and
    /// other side-effect registrations.
    ///
    /// # Errors
    ///
    /// Returns [`HookRegistrationError::DuplicateName`] if a hook with the
    /// same name already exists on one of the stages.
    pub fn register_observer<S, F>(
        &self,
        name: impl Into<String>,
        hook: F,
    ) -> Result<&Self, HookRegistrationError>
    where
        S: IntoStageIds,
        F: Fn(&StageEvent) + Send + Sync + 'static,
    {
        self.register_shared::<S>(name, Arc::new(LifecycleHook::observer(hook)))
    }

    /// Registers an already-shared hook for one or more stages.
    fn register_shared<S: IntoStageIds>(
        &self,
        name: impl Into<String>,
        hook: Arc<LifecycleHook>,
    ) -> Result<&Self, HookRegistrationError> {
        let stages = S::stage_ids();
        let name = name.into();

        for stage in &stages {
            let entry_name = if stages.len() > 1 {
                format!("{}@{}", name, stage.type_name())
            } else {
                name.clone()
            };
            self.register_arc(*stage, entry_name, Arc::clone(&hook))?;
        }
        Ok(self)
    }

    /// Registers a pre-built hook for a single stage.
    ///
    /// This is the lower-level registration method used by both
    /// [`register`](Self::register) and
    /// [`register_observer`](Self::register_observer).
    ///
    /// # Errors
    ///
    /// Returns [`HookRegistrationError::DuplicateName`] if a hook with the
    /// same name already exists on the stage.
    pub fn register_arc(
        &self,
        stage: StageId,
        name: impl Into<String>,
        hook: Arc<LifecycleHook>,
    ) -> Result<(), HookRegistrationError> {
        let name = name.into();

        let mut hooks = self.hooks.write();
        let entries = hooks.entry(stage).or_default();

        // Check for duplicate names
        if entries.iter().any(|entry| entry.name == name) {
            return Err(HookRegistrationError::DuplicateName { stage, name });
        }

        tracing::trace!(stage = stage.type_name(), hook = %name, "registering router hook");
        entries.push(HookEntry { name, hook });
        Ok(())
    }

    /// Returns the ordered hook chain registered for `stage`.
    ///
    /// The chain is assembled fresh on every call; callers must not cache it.
    #[must_use]
    pub fn hooks_for(&self, stage: StageId) -> Vec<Arc<LifecycleHook>> {
        let hooks = self.hooks.read();
        hooks
            .get(&stage)
            .map(|entries| entries.iter().map(|entry| Arc::clone(&entry.hook)).collect())
            .unwrap_or_default()
    }

    /// Returns the number of hooks registered for `stage`.
    #[must_use]
    pub fn hook_count(&self, stage: StageId) -> usize {
        let hooks = self.hooks.read();
        hooks.get(&stage).map_or(0, Vec::len)
    }

    /// Checks if a hook with the given name exists on the stage.
    #[must_use]
    pub fn contains_hook(&self, stage: StageId, name: &str) -> bool {
        let hooks = self.hooks.read();
        hooks
            .get(&stage)
            .is_some_and(|entries| entries.iter().any(|entry| entry.name == name))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self.hooks.read();
        f.debug_struct("HookRegistry")
            .field("stages", &hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OnRun;
    impl Stage for OnRun {}

    struct OnStop;
    impl Stage for OnStop {}

    fn event(stage: StageId) -> StageEvent {
        StageEvent::new(stage, "test")
    }

    #[test]
    fn register_increments_count() {
        let registry = HookRegistry::new();
        let stage = StageId::of::<OnRun>();

        registry
            .register_observer::<OnRun, _>("first", |_| {})
            .expect("registration should succeed");
        assert_eq!(registry.hook_count(stage), 1);

        registry
            .register_observer::<OnRun, _>("second", |_| {})
            .expect("registration should succeed");
        assert_eq!(registry.hook_count(stage), 2);
    }

    #[test]
    fn hooks_for_preserves_registration_order() {
        let registry = HookRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order_clone = Arc::clone(&order);
            registry
                .register_observer::<OnRun, _>(name, move |_| {
                    order_clone.lock().unwrap().push(name);
                })
                .expect("registration should succeed");
        }

        let stage = StageId::of::<OnRun>();
        for hook in registry.hooks_for(stage) {
            hook.invoke(&event(stage));
        }

        assert_eq!(
            *order.lock().unwrap(),
            vec!["first", "second", "third"],
            "hooks should run in registration order"
        );
    }

    #[test]
    fn hooks_for_unknown_stage_is_empty() {
        let registry = HookRegistry::new();
        assert!(registry.hooks_for(StageId::of::<OnRun>()).is_empty());
    }

    #[test]
    fn duplicate_names_rejected_per_stage() {
        let registry = HookRegistry::new();

        registry
            .register_observer::<OnRun, _>("metrics", |_| {})
            .expect("first registration should succeed");

        let result = registry.register_observer::<OnRun, _>("metrics", |_| {});
        assert!(matches!(
            result,
            Err(HookRegistrationError::DuplicateName { name, .. }) if name == "metrics"
        ));
    }

    #[test]
    fn same_name_different_stages_allowed() {
        let registry = HookRegistry::new();

        registry
            .register_observer::<OnRun, _>("logger", |_| {})
            .expect("first registration should succeed");
        registry
            .register_observer::<OnStop, _>("logger", |_| {})
            .expect("same name on different stage should succeed");

        assert_eq!(registry.hook_count(StageId::of::<OnRun>()), 1);
        assert_eq!(registry.hook_count(StageId::of::<OnStop>()), 1);
    }

    #[test]
    fn multi_stage_registration_shares_one_hook() {
        let registry = HookRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        registry
            .register_observer::<(OnRun, OnStop), _>("tracker", move |_| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .expect("registration should succeed");

        assert_eq!(registry.hook_count(StageId::of::<OnRun>()), 1);
        assert_eq!(registry.hook_count(StageId::of::<OnStop>()), 1);

        let run = StageId::of::<OnRun>();
        let stop = StageId::of::<OnStop>();
        registry.hooks_for(run)[0].invoke(&event(run));
        registry.hooks_for(stop)[0].invoke(&event(stop));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn signal_hooks_keep_their_signal() {
        let registry = HookRegistry::new();
        registry
            .register::<OnRun, _>("gate", |_| Flow::Pause)
            .expect("registration should succeed");

        let stage = StageId::of::<OnRun>();
        let chain = registry.hooks_for(stage);
        assert_eq!(chain[0].invoke(&event(stage)), Flow::Pause);
    }

    #[test]
    fn contains_hook() {
        let registry = HookRegistry::new();
        let stage = StageId::of::<OnRun>();

        assert!(!registry.contains_hook(stage, "metrics"));

        registry
            .register_observer::<OnRun, _>("metrics", |_| {})
            .unwrap();

        assert!(registry.contains_hook(stage, "metrics"));
        assert!(!registry.contains_hook(stage, "other"));
    }

    #[test]
    fn register_chaining() {
        let registry = HookRegistry::new();

        registry
            .register_observer::<OnRun, _>("first", |_| {})
            .unwrap()
            .register_observer::<OnRun, _>("second", |_| {})
            .unwrap();

        assert_eq!(registry.hook_count(StageId::of::<OnRun>()), 2);
    }
}
