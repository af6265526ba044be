//! Stage identifiers for lifecycle hook dispatch.
//!
//! A lifecycle stage is identified by a marker type (any `'static` type)
//! wrapped in a [`StageId`]. The stage system is split across layers:
//!
//! - **Layer 1** (`junction_routing`) — provides the identifier mechanism via
//!   `StageId` and keys all hook storage by it.
//! - **Layer 2** (`junction_controller`) — defines the canonical marker types
//!   (e.g. `OnRun`, `OnStop`, `Load`) and drives hook execution at the
//!   appropriate points of a controller's life.

use core::any::TypeId;
use variadics_please::all_tuples;

/// Identifier for a lifecycle stage, derived from a marker type.
///
/// A `StageId` wraps a `TypeId` so that any `'static` type can serve as a
/// stage marker. Registries, options bags and controllers all key their hook
/// chains by `StageId`, which makes "the same stage" a type-level fact rather
/// than a string comparison.
///
/// # Example
///
/// ```
/// # use junction_routing::stage::StageId;
/// // Define a stage marker type
/// pub struct OnRun;
///
/// // Create an identifier for it
/// let stage = StageId::of::<OnRun>();
/// assert_eq!(stage, StageId::of::<OnRun>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId {
    type_id: TypeId,
    type_name: &'static str,
}

impl StageId {
    /// Creates a `StageId` for the given stage marker type.
    #[must_use]
    pub fn of<S: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: core::any::type_name::<S>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Marker trait for lifecycle stage types.
///
/// Implemented by Layer 2 for its canonical markers (e.g. `OnRun`, `OnStop`).
/// The trait carries no methods; it exists so that [`IntoStageIds`] can accept
/// stage types by trait bound.
///
/// Note that [`StageId::of`] accepts any `'static` type and does not require
/// this trait — `Stage` is a convention, not a hard constraint.
pub trait Stage: 'static {}

// ─────────────────────────────────────────────────────────────────────────────
// IntoStageIds Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for types that can be converted into a list of stage IDs.
///
/// Implemented for single stages and tuples of stages, so that one hook can be
/// registered across several stages in a single call.
pub trait IntoStageIds {
    /// Returns the stage IDs for this type.
    fn stage_ids() -> Vec<StageId>;
}

/// Single stage implements `IntoStageIds`.
impl<S: Stage> IntoStageIds for S {
    fn stage_ids() -> Vec<StageId> {
        vec![StageId::of::<S>()]
    }
}

/// Macro to implement `IntoStageIds` for tuples of stages.
macro_rules! impl_into_stage_ids_for_tuple {
    ($($S:ident),*) => {
        impl<$($S: Stage),*> IntoStageIds for ($($S,)*) {
            fn stage_ids() -> Vec<StageId> {
                vec![$(StageId::of::<$S>()),*]
            }
        }
    };
}

// Generate implementations for tuples from 2 to 16 elements
all_tuples!(impl_into_stage_ids_for_tuple, 2, 16, S);

#[cfg(test)]
mod tests {
    use super::*;

    struct StageA;
    impl Stage for StageA {}

    struct StageB;
    impl Stage for StageB {}

    struct StageC;
    impl Stage for StageC {}

    #[test]
    fn stage_id_equality() {
        let id1 = StageId::of::<StageA>();
        let id2 = StageId::of::<StageA>();
        let id3 = StageId::of::<StageB>();

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn stage_id_type_name() {
        let id = StageId::of::<StageA>();
        assert!(id.type_name().contains("StageA"));
    }

    #[test]
    fn stage_id_type_id() {
        let id = StageId::of::<StageA>();
        assert_eq!(id.type_id(), TypeId::of::<StageA>());
    }

    #[test]
    fn into_stage_ids_single() {
        let ids = StageA::stage_ids();
        assert_eq!(ids, vec![StageId::of::<StageA>()]);
    }

    #[test]
    fn into_stage_ids_tuple() {
        let ids = <(StageA, StageB, StageC)>::stage_ids();
        assert_eq!(
            ids,
            vec![
                StageId::of::<StageA>(),
                StageId::of::<StageB>(),
                StageId::of::<StageC>(),
            ]
        );
    }
}
