//! A single matched routing rule.
//!
//! A [`Route`] carries an immutable name/path pair plus a mutable options
//! bag. Route options may embed hook chains under lifecycle stages; those
//! chains run after the router's global hooks and before any hooks a
//! controller contributes.
//!
//! Path compilation and URL matching live with the embedding router and are
//! out of scope here — a `Route` is the already-matched rule a controller is
//! constructed against.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::hook::{IntoHookChain, LifecycleHook};
use crate::options::Options;
use crate::stage::{Stage, StageId};

// ─────────────────────────────────────────────────────────────────────────────
// RouteId
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a route.
///
/// Route IDs are generated using nanoid, providing globally unique
/// identifiers that don't require coordination between routers.
///
/// Internally uses `Arc<str>` for cheap cloning (reference count bump only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(Arc<str>);

impl RouteId {
    /// Creates a new route ID with a unique nanoid.
    #[must_use]
    pub fn new() -> Self {
        Self(nanoid::nanoid!().into())
    }

    /// Creates a route ID from a specific string value.
    ///
    /// This is primarily useful for testing.
    #[must_use]
    pub fn from_string(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route_{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Route
// ─────────────────────────────────────────────────────────────────────────────

/// One matched routing rule: an immutable name/path pair plus mutable options.
///
/// Routes are created through [`Router::route`](crate::router::Router::route),
/// which retains them for the router's lifetime; controllers reference them
/// via `Arc` without owning them.
pub struct Route {
    /// Unique identifier for this route.
    id: RouteId,
    /// The route's name (e.g. `posts.show`).
    name: String,
    /// The route's path pattern (e.g. `/posts/:id`).
    path: String,
    /// Mutable options, possibly embedding hook chains.
    options: RwLock<Options>,
}

impl Route {
    /// Creates a new route with the given name, path and options.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, options: Options) -> Self {
        Self {
            id: RouteId::new(),
            name: name.into(),
            path: path.into(),
            options: RwLock::new(options),
        }
    }

    /// Returns the route's unique identifier.
    #[must_use]
    pub fn id(&self) -> &RouteId {
        &self.id
    }

    /// Returns the route's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the route's path pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the option value stored under `key`, if any.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<Value> {
        self.options.read().get(key).cloned()
    }

    /// Stores an option value, replacing any previous value for `key`.
    pub fn set_option(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.options.write().set(key, value);
    }

    /// Removes and returns the option value stored under `key`.
    pub fn remove_option(&self, key: &str) -> Option<Value> {
        self.options.write().remove(key)
    }

    /// Appends a hook chain for stage `S` to the route's options.
    pub fn add_hook<S: Stage>(&self, chain: impl IntoHookChain) {
        self.options.write().add_hook::<S>(chain);
    }

    /// Returns the hook chain embedded in the route's options for `stage`.
    #[must_use]
    pub fn hooks_for(&self, stage: StageId) -> Vec<Arc<LifecycleHook>> {
        self.options.read().hooks_for(stage).to_vec()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
