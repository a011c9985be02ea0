//! Supertype closure and cross-universe subtype queries.
//!
//! The supertype graph itself belongs to the universe
//! ([`TypeDatabase::direct_supertypes`]). This module only walks it and
//! answers questions by comparing canonical signatures, so the candidate and
//! the supposed supertypes may come from different runs.
//!
//! The default calculator walks the graph exactly as given: a malformed
//! graph with a supertype cycle makes [`SubtypeCalculator::all_super_types`]
//! recurse without end. [`SubtypeCalculator::with_cycle_guard`] adds a
//! visited set and a depth limit for inputs that cannot be trusted.

use crate::canonical::canonical;
use apidelta_common::limits::MAX_SUPERTYPE_WALK_DEPTH;
use apidelta_model::{TypeDatabase, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

pub struct SubtypeCalculator<'a> {
    db: &'a dyn TypeDatabase,
    guarded: bool,
}

impl<'a> SubtypeCalculator<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        SubtypeCalculator { db, guarded: false }
    }

    /// A calculator that never visits a type twice and stops descending past
    /// `MAX_SUPERTYPE_WALK_DEPTH`. Its closure holds each supertype once.
    pub fn with_cycle_guard(db: &'a dyn TypeDatabase) -> Self {
        SubtypeCalculator { db, guarded: true }
    }

    pub fn direct_supertypes(&self, ty: TypeId) -> Vec<TypeId> {
        self.db.direct_supertypes(ty)
    }

    /// Superclass ancestry: repeatedly follow the first direct supertype.
    pub fn super_class_chain(&self, ty: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(ty);

        let mut current = self.db.direct_supertypes(ty);
        while let Some(&super_class) = current.first() {
            if self.guarded
                && (!seen.insert(super_class) || chain.len() as u32 >= MAX_SUPERTYPE_WALK_DEPTH)
            {
                break;
            }
            chain.push(super_class);
            current = self.db.direct_supertypes(super_class);
        }
        chain
    }

    /// Transitive closure over every direct supertype, depth first, in
    /// supertype order.
    pub fn all_super_types(&self, ty: TypeId) -> Vec<TypeId> {
        let mut result = Vec::new();
        if self.guarded {
            let mut visited = FxHashSet::default();
            visited.insert(ty);
            self.fill_guarded(ty, 0, &mut visited, &mut result);
        } else {
            self.fill_all_super_types(ty, &mut result);
        }
        result
    }

    fn fill_all_super_types(&self, ty: TypeId, result: &mut Vec<TypeId>) {
        for super_type in self.db.direct_supertypes(ty) {
            result.push(super_type);
            self.fill_all_super_types(super_type, result);
        }
    }

    fn fill_guarded(
        &self,
        ty: TypeId,
        depth: u32,
        visited: &mut FxHashSet<TypeId>,
        result: &mut Vec<TypeId>,
    ) {
        if depth >= MAX_SUPERTYPE_WALK_DEPTH {
            trace!(?ty, depth, "supertype walk depth limit reached");
            return;
        }
        for super_type in self.db.direct_supertypes(ty) {
            if !visited.insert(super_type) {
                continue;
            }
            result.push(super_type);
            self.fill_guarded(super_type, depth + 1, visited, result);
        }
    }

    /// Whether `candidate` is, or inherits from, any of `super_types`.
    ///
    /// `super_types` belong to `super_db`, which may be another universe.
    /// Only canonical signatures are compared.
    pub fn is_subtype(
        &self,
        candidate: TypeId,
        super_types: &[TypeId],
        super_db: &dyn TypeDatabase,
    ) -> bool {
        if super_types.is_empty() {
            return false;
        }

        let targets: FxHashSet<String> = super_types
            .iter()
            .map(|&ty| canonical(super_db, ty))
            .collect();

        std::iter::once(candidate)
            .chain(self.all_super_types(candidate))
            .any(|ty| {
                let signature = canonical(self.db, ty);
                let found = targets.contains(&signature);
                if found {
                    trace!(%signature, "subtype match");
                }
                found
            })
    }
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
