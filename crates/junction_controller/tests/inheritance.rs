//! Integration tests for blueprint method inheritance.


use junction_controller::controller::ControllerError;
use junction_controller::layer::{Blueprint, Layer};
use junction_routing::Options;
use test_utils::{Recorder, test_route, test_router};

#[test]
fn descendants_inherit_ancestor_methods() {
    let recorder = Recorder::new();
    let blueprint = Blueprint::new()
        .extend(Layer::new("grandparent").with_method("greet", {
            let recorder = recorder.clone();
            move |_| recorder.push("grandparent greet")
        }))
        .extend(Layer::new("parent"))
        .extend(Layer::new("child"));

    let router = test_router();
    let route = test_route(&router);
    let inst = blueprint.instantiate(router, route, Options::new());

    inst.invoke_method("greet").unwrap();
    assert_eq!(recorder.calls(), vec!["grandparent greet"]);
}

#[test]
fn closest_layer_wins_on_override() {
    let recorder = Recorder::new();
    let blueprint = Blueprint::new()
        .extend(Layer::new("parent").with_method("greet", {
            let recorder = recorder.clone();
            move |_| recorder.push("parent greet")
        }))
        .extend(Layer::new("child").with_method("greet", {
            let recorder = recorder.clone();
            move |_| recorder.push("child greet")
        }));

    let router = test_router();
    let route = test_route(&router);
    let inst = blueprint.instantiate(router, route, Options::new());

    inst.invoke_method("greet").unwrap();
    assert_eq!(recorder.calls(), vec!["child greet"]);
}

#[test]
fn methods_can_read_controller_state() {
    let recorder = Recorder::new();
    let blueprint = Blueprint::new().extend(Layer::new("base").with_method("report", {
        let recorder = recorder.clone();
        move |controller| {
            if controller.lookup_property("verbose").is_some() {
                recorder.push("verbose");
            }
        }
    }));

    let router = test_router();
    let route = test_route(&router);
    let mut inst = blueprint.instantiate(router, route, Options::new());
    inst.set_property("verbose", true);

    inst.invoke_method("report").unwrap();
    assert_eq!(recorder.calls(), vec!["verbose"]);
}

#[test]
fn unknown_method_is_an_error() {
    let router = test_router();
    let route = test_route(&router);
    let inst = Blueprint::new().instantiate(router, route, Options::new());

    let err = inst.invoke_method("missing").unwrap_err();
    assert!(matches!(err, ControllerError::UnknownMethod { ref name } if name == "missing"));
}

#[test]
fn has_method_reflects_the_whole_chain() {
    let blueprint = Blueprint::new()
        .extend(Layer::new("base").with_method("inherited", |_| {}))
        .extend(Layer::new("leaf"));

    assert!(blueprint.has_method("inherited"));
    assert!(!blueprint.has_method("absent"));
}
