//! The read-only database interface of one analysis run.

use crate::decl::{DeclData, DeclId};
use crate::types::{TypeData, TypeId};
use crate::values::AnnotationInstance;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_UNIVERSE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity tag of one analysis run. Used for logging only; derived strings
/// never depend on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniverseId(pub u32);

impl UniverseId {
    pub fn fresh() -> Self {
        UniverseId(NEXT_UNIVERSE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Everything the signature engine needs from one run.
///
/// Lookups of ids that do not belong to this database return `None` (or an
/// empty list); callers treat that as an unrecognised kind.
pub trait TypeDatabase {
    fn universe_id(&self) -> UniverseId;

    fn lookup(&self, id: TypeId) -> Option<&TypeData>;

    fn declaration(&self, id: DeclId) -> Option<&DeclData>;

    /// Direct supertypes of a type. The superclass, when there is one,
    /// comes first, followed by the directly implemented interfaces.
    fn direct_supertypes(&self, id: TypeId) -> Vec<TypeId>;

    /// Annotation instances attached to a declaration, in source order.
    fn annotations(&self, id: DeclId) -> &[AnnotationInstance];
}
