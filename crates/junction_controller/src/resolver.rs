//! Cascading property resolution.
//!
//! A controller resolves a named configuration property by consulting an
//! explicit ordered list of scopes; the first scope defining the key wins and
//! later scopes are fallback only. The order is:
//!
//! 1. [`PropertyScope::Instance`] — properties set directly on the controller
//! 2. [`PropertyScope::ControllerOptions`] — the controller's options bag
//! 3. [`PropertyScope::RouteOptions`] — the matched route's options
//! 4. [`PropertyScope::RouterOptions`] — the router's global options
//!
//! Each scope is a pure lookup; resolution has no side effects, and an
//! undefined key yields `None` rather than an error.

use core::fmt;

use serde_json::Value;

use crate::controller::Controller;

// ─────────────────────────────────────────────────────────────────────────────
// PropertyScope
// ─────────────────────────────────────────────────────────────────────────────

/// One source consulted when resolving a configuration property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyScope {
    /// A property set directly on the controller instance.
    Instance,
    /// The controller's own options bag.
    ControllerOptions,
    /// The matched route's options.
    RouteOptions,
    /// The router's global options.
    RouterOptions,
}

impl PropertyScope {
    /// The scopes in resolution order, highest precedence first.
    pub const ORDER: [PropertyScope; 4] = [
        PropertyScope::Instance,
        PropertyScope::ControllerOptions,
        PropertyScope::RouteOptions,
        PropertyScope::RouterOptions,
    ];
}

impl fmt::Display for PropertyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyScope::Instance => write!(f, "instance"),
            PropertyScope::ControllerOptions => write!(f, "controller options"),
            PropertyScope::RouteOptions => write!(f, "route options"),
            PropertyScope::RouterOptions => write!(f, "router options"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Reads `key` from a single scope.
fn value_in(controller: &Controller, scope: PropertyScope, key: &str) -> Option<Value> {
    match scope {
        PropertyScope::Instance => controller.property(key).cloned(),
        PropertyScope::ControllerOptions => controller.options().get(key).cloned(),
        PropertyScope::RouteOptions => controller.route().option(key),
        PropertyScope::RouterOptions => controller.router().option(key),
    }
}

/// Resolves `key` against the scopes in [`PropertyScope::ORDER`].
///
/// Returns the first defined value tagged with the scope that supplied it,
/// or `None` when no scope defines the key.
#[must_use]
pub fn lookup(controller: &Controller, key: &str) -> Option<(PropertyScope, Value)> {
    PropertyScope::ORDER
        .iter()
        .find_map(|scope| value_in(controller, *scope, key).map(|value| (*scope, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_routing::{Options, Router};
    use std::sync::Arc;

    #[test]
    fn scope_order_is_instance_first_router_last() {
        assert_eq!(PropertyScope::ORDER[0], PropertyScope::Instance);
        assert_eq!(PropertyScope::ORDER[3], PropertyScope::RouterOptions);
    }

    #[test]
    fn lookup_reports_the_supplying_scope() {
        let router = Arc::new(Router::new());
        let route = router.route("test", "/test", Options::new());
        let mut inst = Controller::new(Arc::clone(&router), route, Options::new());

        router.set_option("layout", "fromRouter");
        assert_eq!(
            lookup(&inst, "layout").unwrap().0,
            PropertyScope::RouterOptions
        );

        inst.set_property("layout", "fromInstance");
        assert_eq!(lookup(&inst, "layout").unwrap().0, PropertyScope::Instance);
    }

    #[test]
    fn undefined_key_is_none_not_an_error() {
        let router = Arc::new(Router::new());
        let route = router.route("test", "/test", Options::new());
        let inst = Controller::new(router, route, Options::new());

        assert!(lookup(&inst, "missing").is_none());
    }
}
