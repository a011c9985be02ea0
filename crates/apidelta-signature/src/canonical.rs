//! Canonical signatures.
//!
//! Token grammar:
//!
//! | descriptor | canonical form |
//! |---|---|
//! | primitive | keyword (`int`) |
//! | array | `[` component `]` |
//! | declared | qualified name, then `<a,b>` when parameterized |
//! | type variable | lower bound `-` (when present), upper bound `+` |
//! | revisited type variable | `%` |
//! | wildcard | super bound `-`, extends bound `+` |
//! | executable | `<vars>` return `(p1,p2)` then `throws:e1,e2` |
//! | void / package | `void` / `package` |
//!
//! Type-variable names never appear: two runs that name a variable
//! differently but bound it identically produce the same signature.

use crate::state::SignatureState;
use apidelta_common::limits::CYCLE_PLACEHOLDER;
use apidelta_model::{NoTypeKind, TypeData, TypeDatabase, TypeId};
use tracing::trace;

/// Canonical signature of `ty` in `db`.
pub fn canonical(db: &dyn TypeDatabase, ty: TypeId) -> String {
    let mut state = SignatureState::new();
    CanonicalWriter { db }.write_type(ty, &mut state);
    state.finish()
}

/// Whether two types, possibly from two universes, have equal canonical
/// signatures.
pub fn is_same_type(
    left_db: &dyn TypeDatabase,
    left: TypeId,
    right_db: &dyn TypeDatabase,
    right: TypeId,
) -> bool {
    canonical(left_db, left) == canonical(right_db, right)
}

pub(crate) struct CanonicalWriter<'a> {
    pub(crate) db: &'a dyn TypeDatabase,
}

impl CanonicalWriter<'_> {
    pub(crate) fn write_type(&self, ty: TypeId, state: &mut SignatureState) {
        let Some(data) = self.db.lookup(ty) else {
            return;
        };

        match data {
            TypeData::Primitive(kind) => state.push(kind.keyword()),
            TypeData::Array(component) => {
                state.push("[");
                self.write_type(*component, state);
                state.push("]");
            }
            TypeData::Declared {
                qualified_name,
                type_args,
            } => {
                state.push(qualified_name);
                self.write_type_list(type_args, state);
            }
            TypeData::TypeVariable(info) => {
                if !state.first_visit(ty) {
                    trace!(var = %info.name, "canonical: type variable revisited");
                    state.push(CYCLE_PLACEHOLDER);
                    return;
                }

                if let Some(lower) = info.lower.filter(|&lower| !self.is_null(lower)) {
                    self.write_type(lower, state);
                    state.push("-");
                }

                self.write_type(info.upper, state);
                state.push("+");
            }
            TypeData::Wildcard {
                super_bound,
                extends_bound,
            } => {
                if let Some(bound) = super_bound {
                    self.write_type(*bound, state);
                    state.push("-");
                }
                if let Some(bound) = extends_bound {
                    self.write_type(*bound, state);
                    state.push("+");
                }
            }
            TypeData::Executable(shape) => {
                self.write_type_list(&shape.type_params, state);

                self.write_type(shape.return_type, state);
                state.push("(");
                self.write_separated(&shape.params, state);
                state.push(")");

                if !shape.thrown.is_empty() {
                    state.push("throws:");
                    self.write_separated(&shape.thrown, state);
                }
            }
            TypeData::NoType(NoTypeKind::Void) => state.push("void"),
            TypeData::NoType(NoTypeKind::Package) => state.push("package"),
            TypeData::Null | TypeData::Unknown => {}
        }
    }

    fn write_type_list(&self, types: &[TypeId], state: &mut SignatureState) {
        if types.is_empty() {
            return;
        }
        state.push("<");
        self.write_separated(types, state);
        state.push(">");
    }

    fn write_separated(&self, types: &[TypeId], state: &mut SignatureState) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                state.push(",");
            }
            self.write_type(ty, state);
        }
    }

    fn is_null(&self, ty: TypeId) -> bool {
        matches!(self.db.lookup(ty), Some(TypeData::Null))
    }
}

#[cfg(test)]
#[path = "../tests/canonical_tests.rs"]
mod tests;
