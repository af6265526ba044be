//! Configuration bags carried by routers, routes and controllers.
//!
//! An [`Options`] bag has two explicitly typed sections:
//!
//! - **values** — arbitrary configuration keyed by string, stored as
//!   [`serde_json::Value`]
//! - **hooks** — hook chains keyed by [`StageId`], because route options and
//!   controller options may embed hook functions under lifecycle stages
//!
//! Keeping the sections separate avoids dynamic probing ("is this key a
//! function?") when a controller resolves properties or collects hooks.
//!
//! # Example
//!
//! ```
//! use junction_routing::hook::LifecycleHook;
//! use junction_routing::options::Options;
//! use junction_routing::stage::{Stage, StageId};
//!
//! struct OnRun;
//! impl Stage for OnRun {}
//!
//! let opts = Options::new()
//!     .with_value("template", "postShow")
//!     .with_hook::<OnRun>(LifecycleHook::observer(|_| {}));
//!
//! assert_eq!(opts.get("template").unwrap(), "postShow");
//! assert_eq!(opts.hooks_for(StageId::of::<OnRun>()).len(), 1);
//! ```

use std::sync::Arc;

use core::fmt;
use hashbrown::HashMap;
use serde_json::Value;

use crate::hook::{IntoHookChain, LifecycleHook};
use crate::stage::{Stage, StageId};

/// A configuration bag holding plain values and embedded hook chains.
#[derive(Default)]
pub struct Options {
    /// Arbitrary configuration values.
    values: HashMap<String, Value>,
    /// Hook chains keyed by lifecycle stage.
    hooks: HashMap<StageId, Vec<Arc<LifecycleHook>>>,
}

impl Options {
    /// Creates an empty options bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Appends a hook chain for stage `S`.
    ///
    /// The chain may be a single hook or an ordered list; it is flattened in
    /// place after any hooks already present for the stage.
    pub fn add_hook<S: Stage>(&mut self, chain: impl IntoHookChain) {
        self.hooks
            .entry(StageId::of::<S>())
            .or_default()
            .extend(chain.into_chain());
    }

    /// Returns the hook chain stored for `stage`, empty if none.
    #[must_use]
    pub fn hooks_for(&self, stage: StageId) -> &[Arc<LifecycleHook>] {
        self.hooks.get(&stage).map_or(&[], Vec::as_slice)
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style [`add_hook`](Self::add_hook).
    #[must_use]
    pub fn with_hook<S: Stage>(mut self, chain: impl IntoHookChain) -> Self {
        self.add_hook::<S>(chain);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("values", &self.values)
            .field("hook_stages", &self.hooks.len())
            .finish()
    }
}
