//! Hook callables and their control-flow signals.
//!
//! A lifecycle hook is a type-erased callable that receives a [`StageEvent`]
//! and answers with a [`Flow`] signal. The runner inspects the signal after
//! each hook to decide whether the remainder of the chain runs:
//!
//! - [`Flow::Continue`] — proceed to the next hook
//! - [`Flow::Pause`] — halt the chain, leaving the controller's run status
//!   untouched so another matched route can take over
//! - [`Flow::Stop`] — halt the chain and transition the controller into its
//!   terminal stopped state
//!
//! # Hook chains
//!
//! Every configuration scope may contribute zero, one or many hooks for a
//! stage. [`IntoHookChain`] normalizes all of those shapes into one flat
//! ordered `Vec<Arc<LifecycleHook>>` at insertion time, so execution never
//! branches on single-vs-list.
//!
//! # Example
//!
//! ```
//! use junction_routing::hook::{Flow, LifecycleHook, StageEvent};
//! use junction_routing::stage::StageId;
//!
//! struct OnRun;
//!
//! let hook = LifecycleHook::new(|event: &StageEvent| {
//!     if event.route() == "admin" { Flow::Stop } else { Flow::Continue }
//! });
//!
//! let event = StageEvent::new(StageId::of::<OnRun>(), "admin");
//! assert_eq!(hook.invoke(&event), Flow::Stop);
//! ```

use core::fmt;
use std::sync::Arc;

use crate::stage::StageId;

// ─────────────────────────────────────────────────────────────────────────────
// Flow
// ─────────────────────────────────────────────────────────────────────────────

/// Control signal returned by every hook invocation.
///
/// `Flow` replaces the callback-parameter style of signaling: instead of the
/// hook remembering to call a `pause` function, it returns the decision and
/// the runner acts on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    /// Run the next hook in the chain (default).
    #[default]
    Continue,
    /// Halt the remaining chain without changing the controller's run status.
    Pause,
    /// Halt the remaining chain and mark the controller stopped.
    Stop,
}

impl Flow {
    /// Returns `true` if this signal halts the remainder of the chain.
    #[must_use]
    pub fn halts(&self) -> bool {
        !matches!(self, Flow::Continue)
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Continue => write!(f, "continue"),
            Flow::Pause => write!(f, "pause"),
            Flow::Stop => write!(f, "stop"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StageEvent
// ─────────────────────────────────────────────────────────────────────────────

/// Payload passed to every hook invocation.
///
/// Carries the stage being executed and the name of the matched route, which
/// is what a hook registered across several stages needs to tell invocations
/// apart.
#[derive(Debug, Clone)]
pub struct StageEvent {
    /// The stage whose chain is executing.
    stage: StageId,
    /// Name of the matched route the controller was created for.
    route: String,
}

impl StageEvent {
    /// Creates a new event for the given stage and route name.
    #[must_use]
    pub fn new(stage: StageId, route: impl Into<String>) -> Self {
        Self {
            stage,
            route: route.into(),
        }
    }

    /// Returns the stage whose chain is executing.
    #[must_use]
    pub fn stage(&self) -> StageId {
        self.stage
    }

    /// Returns the name of the matched route.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.stage.type_name(), self.route)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LifecycleHook
// ─────────────────────────────────────────────────────────────────────────────

/// Type-erased hook that receives a `&StageEvent` and returns a [`Flow`].
///
/// Most hooks only observe — use [`LifecycleHook::observer`] for those and the
/// `Continue` signal is implied. Hooks that participate in control flow use
/// [`LifecycleHook::new`] and return the signal explicitly.
pub struct LifecycleHook {
    /// The hook function.
    handler: Box<dyn Fn(&StageEvent) -> Flow + Send + Sync>,
}

impl LifecycleHook {
    /// Creates a hook from a signal-returning function.
    #[must_use]
    pub fn new(handler: impl Fn(&StageEvent) -> Flow + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Creates a hook that only observes the event and always continues.
    #[must_use]
    pub fn observer(handler: impl Fn(&StageEvent) + Send + Sync + 'static) -> Self {
        Self::new(move |event| {
            handler(event);
            Flow::Continue
        })
    }

    /// Invokes the hook with the given event.
    pub fn invoke(&self, event: &StageEvent) -> Flow {
        (self.handler)(event)
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHook").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IntoHookChain
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion of hook values into one flat ordered chain.
///
/// A configuration scope may hold a single hook or an ordered list of hooks;
/// both normalize to `Vec<Arc<LifecycleHook>>` at insertion time, preserving
/// internal order.
pub trait IntoHookChain {
    /// Flattens this value into an ordered hook chain.
    fn into_chain(self) -> Vec<Arc<LifecycleHook>>;
}

impl IntoHookChain for LifecycleHook {
    fn into_chain(self) -> Vec<Arc<LifecycleHook>> {
        vec![Arc::new(self)]
    }
}

impl IntoHookChain for Arc<LifecycleHook> {
    fn into_chain(self) -> Vec<Arc<LifecycleHook>> {
        vec![self]
    }
}

impl IntoHookChain for Vec<LifecycleHook> {
    fn into_chain(self) -> Vec<Arc<LifecycleHook>> {
        self.into_iter().map(Arc::new).collect()
    }
}

impl IntoHookChain for Vec<Arc<LifecycleHook>> {
    fn into_chain(self) -> Vec<Arc<LifecycleHook>> {
        self
    }
}

impl<const N: usize> IntoHookChain for [LifecycleHook; N] {
    fn into_chain(self) -> Vec<Arc<LifecycleHook>> {
        self.into_iter().map(Arc::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct TestStage;

    fn event() -> StageEvent {
        StageEvent::new(StageId::of::<TestStage>(), "test")
    }

    #[test]
    fn observer_always_continues() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let hook = LifecycleHook::observer(move |event: &StageEvent| {
            seen_clone.lock().unwrap().push(event.route().to_string());
        });

        assert_eq!(hook.invoke(&event()), Flow::Continue);
        assert_eq!(*seen.lock().unwrap(), vec!["test"]);
    }

    #[test]
    fn signal_hook_returns_its_signal() {
        let hook = LifecycleHook::new(|_| Flow::Pause);
        assert_eq!(hook.invoke(&event()), Flow::Pause);
        assert!(hook.invoke(&event()).halts());
    }

    #[test]
    fn continue_does_not_halt() {
        assert!(!Flow::Continue.halts());
        assert!(Flow::Pause.halts());
        assert!(Flow::Stop.halts());
    }

    #[test]
    fn single_hook_normalizes_to_chain_of_one() {
        let chain = LifecycleHook::new(|_| Flow::Continue).into_chain();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn list_normalizes_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let make = |label: &'static str| {
            let order = Arc::clone(&order);
            LifecycleHook::observer(move |_| order.lock().unwrap().push(label))
        };

        let chain = vec![make("first"), make("second"), make("third")].into_chain();
        assert_eq!(chain.len(), 3);

        for hook in &chain {
            hook.invoke(&event());
        }
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn event_display_names_stage_and_route() {
        let rendered = event().to_string();
        assert!(rendered.contains("TestStage"));
        assert!(rendered.contains("test"));
    }
}
