//! The per-app routing configuration holder.
//!
//! A [`Router`] owns the global options bag, the router-level
//! [`HookRegistry`], and the routes it has defined. Controllers reference the
//! router without owning it and consult it for fallback configuration and
//! router-level hooks.
//!
//! URL matching, navigation and history integration belong to the embedding
//! application; this type models the configuration surface controllers
//! consume.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::hook::LifecycleHook;
use crate::options::Options;
use crate::registry::HookRegistry;
use crate::route::Route;
use crate::stage::StageId;

/// Process-wide (per-app) routing configuration holder.
///
/// # Thread Safety
///
/// Options and the route list use interior mutability so that an application
/// can keep configuring the router while controllers read from it. The hook
/// registry is append-only; see [`HookRegistry`].
#[derive(Default)]
pub struct Router {
    /// Global options, the last fallback scope of property resolution.
    options: RwLock<Options>,
    /// Router-level lifecycle hooks.
    hooks: HookRegistry,
    /// Routes defined on this router, in definition order.
    routes: RwLock<Vec<Arc<Route>>>,
}

impl Router {
    /// Creates a new router with empty options and no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router with the given global options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options: RwLock::new(options),
            ..Self::default()
        }
    }

    /// Returns the global option value stored under `key`, if any.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<Value> {
        self.options.read().get(key).cloned()
    }

    /// Stores a global option value, replacing any previous value for `key`.
    pub fn set_option(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.options.write().set(key, value);
    }

    /// Removes and returns the global option value stored under `key`.
    pub fn remove_option(&self, key: &str) -> Option<Value> {
        self.options.write().remove(key)
    }

    /// Returns the router-level hook registry.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Returns the router-level hook chain for `stage`.
    ///
    /// Assembled fresh on every call; controllers must not cache it.
    #[must_use]
    pub fn hooks_for(&self, stage: StageId) -> Vec<Arc<LifecycleHook>> {
        self.hooks.hooks_for(stage)
    }

    /// Defines a route on this router and returns it.
    ///
    /// The router retains the route for its own lifetime; the returned `Arc`
    /// is the reference a controller holds.
    pub fn route(
        &self,
        name: impl Into<String>,
        path: impl Into<String>,
        options: Options,
    ) -> Arc<Route> {
        let route = Arc::new(Route::new(name, path, options));
        tracing::debug!(route = route.name(), path = route.path(), "route defined");
        self.routes.write().push(Arc::clone(&route));
        route
    }

    /// Returns all routes defined on this router, in definition order.
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.routes.read().clone()
    }

    /// Returns the route with the given name, if defined.
    #[must_use]
    pub fn find_route(&self, name: &str) -> Option<Arc<Route>> {
        self.routes
            .read()
            .iter()
            .find(|route| route.name() == name)
            .cloned()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.read().len())
            .finish_non_exhaustive()
    }
}
