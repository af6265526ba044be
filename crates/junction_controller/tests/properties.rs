//! Integration tests for cascading property resolution.


use std::sync::Arc;

use junction_controller::controller::Controller;
use junction_controller::resolver::PropertyScope;
use junction_controller::stage::OnRun;
use junction_routing::{Flow, LifecycleHook, Options, StageId};
use proptest::prelude::*;
use test_utils::{Recorder, test_route, test_router};

#[test]
fn lookup_cascades_toward_the_router() {
    let router = test_router();
    let route = test_route(&router);
    let mut inst = Controller::new(Arc::clone(&router), Arc::clone(&route), Options::new());

    assert_eq!(inst.lookup_property("flavor"), None);

    router.set_option("flavor", "router");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "router");

    route.set_option("flavor", "route");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "route");

    inst.options_mut().set("flavor", "options");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "options");

    inst.set_property("flavor", "instance");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "instance");
}

#[test]
fn lookup_falls_back_as_scopes_are_cleared() {
    let router = test_router();
    let route = test_route(&router);
    let mut inst = Controller::new(Arc::clone(&router), Arc::clone(&route), Options::new());

    router.set_option("flavor", "router");
    route.set_option("flavor", "route");
    inst.options_mut().set("flavor", "options");
    inst.set_property("flavor", "instance");

    inst.remove_property("flavor");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "options");

    inst.options_mut().remove("flavor");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "route");

    route.remove_option("flavor");
    assert_eq!(inst.lookup_property("flavor").unwrap(), "router");

    router.remove_option("flavor");
    assert_eq!(inst.lookup_property("flavor"), None);
}

#[test]
fn scoped_lookup_names_the_winning_scope() {
    let router = test_router();
    let route = test_route(&router);
    let mut inst = Controller::new(Arc::clone(&router), route, Options::new());

    router.set_option("depth", 1);
    let (scope, value) = inst.lookup_property_scoped("depth").unwrap();
    assert_eq!(scope, PropertyScope::RouterOptions);
    assert_eq!(value, 1);

    inst.set_property("depth", 2);
    let (scope, value) = inst.lookup_property_scoped("depth").unwrap();
    assert_eq!(scope, PropertyScope::Instance);
    assert_eq!(value, 2);
}

#[test]
fn null_values_still_resolve() {
    let router = test_router();
    let route = test_route(&router);
    let mut inst = Controller::new(router, route, Options::new());

    inst.set_property("maybe", serde_json::Value::Null);
    assert_eq!(inst.lookup_property("maybe"), Some(serde_json::Value::Null));
}

proptest! {
    /// A pause at position `i` in a chain of continuing hooks runs exactly
    /// the first `i + 1` hooks.
    #[test]
    fn pause_position_bounds_hooks_run(len in 1usize..12, pause_at in 0usize..12) {
        prop_assume!(pause_at < len);

        let recorder = Recorder::new();
        let router = test_router();
        let route = test_route(&router);
        let mut inst = Controller::new(router, route, Options::new());

        let chain: Vec<LifecycleHook> = (0..len)
            .map(|i| {
                let recorder = recorder.clone();
                LifecycleHook::new(move |_| {
                    recorder.push("hook");
                    if i == pause_at { Flow::Pause } else { Flow::Continue }
                })
            })
            .collect();
        inst.set_hook::<OnRun>(chain);

        let outcome = inst.run_stage(StageId::of::<OnRun>(), &[]);

        prop_assert!(outcome.is_paused());
        prop_assert_eq!(recorder.calls().len(), pause_at + 1);
    }
}
