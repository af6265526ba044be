//! Extension layers and blueprints.
//!
//! A controller type is defined by extension: a base definition plus zero or
//! more derived layers, each able to declare hook chains and named methods.
//! Rather than a pointer-based inheritance graph, the chain is an explicit
//! ordered list of [`Layer`] definitions held by a [`Blueprint`] — the
//! most-base ancestor first.
//!
//! Two asymmetric walks over that list give extension its inheritance-like
//! semantics:
//!
//! - **Methods** resolve most-derived-first, so a child overriding a method
//!   shadows its ancestors.
//! - **Hook chains** are collected ancestor-to-descendant, each layer
//!   contributing its *own* declared chain. A child declaring hooks for a
//!   stage never suppresses an ancestor's separately stored chain at the
//!   ancestor's position.
//!
//! # Example
//!
//! ```
//! use junction_controller::layer::{Blueprint, Layer};
//! use junction_controller::stage::OnRun;
//! use junction_routing::LifecycleHook;
//!
//! let parent = Blueprint::new().extend(
//!     Layer::new("parent")
//!         .with_method("greet", |_controller| {})
//!         .with_hook::<OnRun>(LifecycleHook::observer(|_| {})),
//! );
//! let child = parent.extend(Layer::new("child").with_method("wave", |_controller| {}));
//!
//! assert!(child.has_method("greet"));
//! assert!(child.has_method("wave"));
//! assert!(!parent.has_method("wave"));
//! ```

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use junction_routing::{IntoHookChain, LifecycleHook, Options, Route, Router, Stage, StageId};

use crate::controller::Controller;

/// Type alias for type-erased layer methods.
///
/// Methods are side-effecting callables dispatched by name through the
/// blueprint; the most-derived definition wins.
pub type BoxedMethod = Arc<dyn Fn(&Controller) + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Layer
// ─────────────────────────────────────────────────────────────────────────────

/// One level of a controller extension chain.
///
/// A layer declares its own hook chains and named methods. Layers are
/// immutable once added to a [`Blueprint`]; build them up-front with the
/// consuming `with_*` methods.
pub struct Layer {
    /// Name of this layer for debugging and logging.
    name: &'static str,
    /// Hook chains this layer declares, keyed by stage.
    hooks: HashMap<StageId, Vec<Arc<LifecycleHook>>>,
    /// Named methods this layer declares.
    methods: HashMap<String, BoxedMethod>,
}

impl Layer {
    /// Creates an empty layer with the given name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            hooks: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Declares a hook chain for stage `S` on this layer.
    ///
    /// The chain may be a single hook or an ordered list; repeated calls for
    /// the same stage append in declaration order.
    #[must_use]
    pub fn with_hook<S: Stage>(mut self, chain: impl IntoHookChain) -> Self {
        self.hooks
            .entry(StageId::of::<S>())
            .or_default()
            .extend(chain.into_chain());
        self
    }

    /// Declares a named method on this layer.
    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&Controller) + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Returns this layer's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the hook chain this layer declares for `stage`, empty if none.
    #[must_use]
    pub fn hooks_for(&self, stage: StageId) -> &[Arc<LifecycleHook>] {
        self.hooks.get(&stage).map_or(&[], Vec::as_slice)
    }

    /// Returns the method this layer declares under `name`, if any.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&BoxedMethod> {
        self.methods.get(name)
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("hook_stages", &self.hooks.len())
            .field("methods", &self.methods.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blueprint
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered controller extension chain, most-base ancestor first.
///
/// `Blueprint::new()` is the base controller type — it defines nothing.
/// [`extend`](Self::extend) derives a new blueprint by appending a layer;
/// the ancestor chain is shared structurally and never mutated, so extending
/// one blueprint cannot affect another derived from the same ancestors.
#[derive(Clone, Default)]
pub struct Blueprint {
    /// Layers in ancestor-to-descendant order.
    layers: Vec<Arc<Layer>>,
}

impl Blueprint {
    /// Creates the base blueprint, which defines no hooks or methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a new blueprint with `layer` appended as the most-derived level.
    #[must_use]
    pub fn extend(&self, layer: Layer) -> Self {
        let mut layers = self.layers.clone();
        layers.push(Arc::new(layer));
        Self { layers }
    }

    /// Returns the number of layers in the chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Iterates the layers in ancestor-to-descendant order.
    pub fn layers(&self) -> impl Iterator<Item = &Arc<Layer>> {
        self.layers.iter()
    }

    /// Resolves a method by name, most-derived definition first.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<BoxedMethod> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.method(name).cloned())
    }

    /// Returns `true` if any layer defines a method under `name`.
    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    /// Instantiates a controller of this blueprint for a matched route.
    #[must_use]
    pub fn instantiate(
        &self,
        router: Arc<Router>,
        route: Arc<Route>,
        options: Options,
    ) -> Controller {
        Controller::with_blueprint(self.clone(), router, route, options)
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.layers.iter().map(|layer| layer.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::OnRun;
    use junction_routing::Flow;

    #[test]
    fn base_blueprint_is_empty() {
        let base = Blueprint::new();
        assert_eq!(base.depth(), 0);
        assert!(!base.has_method("anything"));
    }

    #[test]
    fn extend_appends_most_derived_last() {
        let chain = Blueprint::new()
            .extend(Layer::new("parent"))
            .extend(Layer::new("child"));

        let names: Vec<_> = chain.layers().map(|layer| layer.name()).collect();
        assert_eq!(names, vec!["parent", "child"]);
    }

    #[test]
    fn extend_does_not_mutate_ancestors() {
        let parent = Blueprint::new().extend(Layer::new("parent"));
        let _child = parent.extend(Layer::new("child"));

        assert_eq!(parent.depth(), 1);
    }

    #[test]
    fn descendant_method_shadows_ancestor() {
        let parent = Blueprint::new()
            .extend(Layer::new("parent").with_method("title", |_| {}));
        let child = parent.extend(Layer::new("child").with_method("title", |_| {}));

        // Both resolve, but the child's definition wins in the child chain.
        let resolved = child.method("title").unwrap();
        let child_own = child.layers().last().unwrap().method("title").unwrap();
        assert!(Arc::ptr_eq(&resolved, child_own));
    }

    #[test]
    fn layer_hooks_are_per_stage() {
        let layer = Layer::new("parent")
            .with_hook::<OnRun>(LifecycleHook::new(|_| Flow::Continue))
            .with_hook::<OnRun>(LifecycleHook::new(|_| Flow::Continue));

        assert_eq!(layer.hooks_for(StageId::of::<OnRun>()).len(), 2);
    }
}
