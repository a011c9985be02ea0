//! Human-readable signatures of types and declarations.
//!
//! The output reads like source text (`java.util.List<? extends T>`,
//! `int com.acme.Foo::bar(String a) throws java.io.IOException`). It is for
//! diagnostics and for element identity in the tree, never for comparing
//! types; use [`canonical`](crate::canonical) for that.
//!
//! Inside an executable's return, parameter and thrown types a type
//! variable renders as its bare name. Its bounds are already part of the
//! executable's `<T extends ...>` prefix.

use crate::state::SignatureState;
use apidelta_common::limits::{IMPLICIT_ROOT_TYPE, PARAM_HIGHLIGHT_MARKER};
use apidelta_model::{
    DeclData, DeclId, ExecutableDecl, NoTypeKind, TypeData, TypeDatabase, TypeId,
    TypeParameterDecl, VariableDecl,
};

/// Human-readable signature of a type descriptor.
pub fn human_readable(db: &dyn TypeDatabase, ty: TypeId) -> String {
    let mut state = SignatureState::new();
    HumanReadableWriter { db }.write_type(ty, &mut state);
    state.finish()
}

/// Human-readable signature of a declaration.
///
/// Members render through their enclosing declaration: a field as
/// `Owner.name`, a method as `R Owner::name(P p)`. A parameter renders as
/// its whole owning method with the parameter wrapped in `===` markers.
pub fn human_readable_decl(db: &dyn TypeDatabase, decl: DeclId) -> String {
    let mut state = SignatureState::new();
    HumanReadableWriter { db }.write_decl(decl, &mut state);
    state.finish()
}

pub(crate) struct HumanReadableWriter<'a> {
    pub(crate) db: &'a dyn TypeDatabase,
}

impl HumanReadableWriter<'_> {
    // =========================================================================
    // Types
    // =========================================================================

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
                state.push(&info.name);
                if !state.first_visit(ty) || state.in_executable() {
                    return;
                }

                if let Some(lower) = info.lower.filter(|&lower| !self.is_null(lower)) {
                    state.push(" super ");
                    self.write_type(lower, state);
                }
                if info.upper != TypeId::UNKNOWN {
                    state.push(" extends ");
                    self.write_type(info.upper, state);
                }
            }
            TypeData::Wildcard {
                super_bound,
                extends_bound,
            } => {
                state.push("?");
                if let Some(bound) = super_bound {
                    state.push(" super ");
                    self.write_type(*bound, state);
                }
                if let Some(bound) = extends_bound {
                    state.push(" extends ");
                    self.write_type(*bound, state);
                }
            }
            TypeData::Executable(shape) => {
                self.write_type_list(&shape.type_params, state);

                let previous = state.enter_executable();
                self.write_type(shape.return_type, state);
                state.push("(");
                self.write_separated(&shape.params, state);
                state.push(")");

                if !shape.thrown.is_empty() {
                    state.push(" throws ");
                    self.write_separated(&shape.thrown, state);
                }
                state.leave_executable(previous);
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
                state.push(", ");
            }
            self.write_type(ty, state);
        }
    }

    fn is_null(&self, ty: TypeId) -> bool {
        matches!(self.db.lookup(ty), Some(TypeData::Null))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(crate) fn write_decl(&self, decl: DeclId, state: &mut SignatureState) {
        let Some(data) = self.db.declaration(decl) else {
            return;
        };

        match data {
            DeclData::Package(package) => state.push(&package.qualified_name),
            DeclData::Type(ty) => {
                state.push(&ty.qualified_name);
                self.write_type_parameters(&ty.type_params, state);
            }
            DeclData::Executable(executable) => self.write_executable(executable, state),
            DeclData::Variable(variable) => self.write_variable(decl, variable, state),
            DeclData::TypeParameter(param) => self.write_type_parameter(param, state),
        }
    }

    fn write_type_parameters(&self, params: &[DeclId], state: &mut SignatureState) {
        if params.is_empty() {
            return;
        }
        state.push("<");
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                state.push(", ");
            }
            self.write_decl(param, state);
        }
        state.push(">");
    }

    fn write_executable(&self, executable: &ExecutableDecl, state: &mut SignatureState) {
        let previous = state.enter_executable();

        if !executable.type_params.is_empty() {
            self.write_type_parameters(&executable.type_params, state);
            state.push(" ");
        }

        self.write_type(executable.return_type, state);
        state.push(" ");
        self.write_decl(executable.enclosing, state);
        state.push("::");
        state.push(&executable.name);

        state.push("(");
        for (i, &param) in executable.params.iter().enumerate() {
            if i > 0 {
                state.push(", ");
            }
            self.write_decl(param, state);
        }
        state.push(")");

        if !executable.thrown.is_empty() {
            state.push(" throws ");
            self.write_separated(&executable.thrown, state);
        }

        state.leave_executable(previous);
    }

    fn write_variable(&self, decl: DeclId, variable: &VariableDecl, state: &mut SignatureState) {
        let enclosing = variable
            .enclosing
            .and_then(|owner| self.db.declaration(owner).map(|data| (owner, data)));

        match enclosing {
            Some((owner, DeclData::Type(_))) => {
                self.write_decl(owner, state);
                state.push(".");
                state.push(&variable.name);
            }
            Some((_, DeclData::Executable(_))) if state.in_executable() => {
                self.write_type(variable.ty, state);
                state.push(" ");
                state.push(&variable.name);
            }
            Some((owner, DeclData::Executable(executable))) => {
                // Asked for the parameter itself: render the whole method and
                // mark where this parameter sits in it.
                let Some(index) = executable.params.iter().position(|&p| p == decl) else {
                    state.push(&variable.name);
                    return;
                };
                let start = state.len();
                self.write_decl(owner, state);
                highlight_parameter(state.buffer_mut(), start, index);
            }
            _ => state.push(&variable.name),
        }
    }

    fn write_type_parameter(&self, param: &TypeParameterDecl, state: &mut SignatureState) {
        state.push(&param.name);

        match param.bounds.as_slice() {
            [] => {}
            [bound] => {
                // Rendered in a state of its own: a bound that mentions the
                // parameter expands it once more, outside any executable.
                let mut bound_state = SignatureState::new();
                self.write_type(*bound, &mut bound_state);
                let bound = bound_state.finish();
                if bound != IMPLICIT_ROOT_TYPE {
                    state.push(" extends ");
                    state.push(&bound);
                }
            }
            bounds => {
                state.push(" extends ");
                self.write_separated(bounds, state);
            }
        }
    }
}

/// Wrap the `index`-th parameter of the first parameter list found at or
/// after `from` in highlight markers.
///
/// Parameters are located by counting commas between the parentheses. The
/// scan does not track `<...>` nesting, so a parameter whose type itself
/// contains a comma (`Map<K, V> m`) shifts every later span.
fn highlight_parameter(buffer: &mut String, from: usize, index: usize) {
    let Some(open) = buffer[from..].find('(').map(|i| from + i) else {
        return;
    };
    let Some(close) = buffer[open..].find(')').map(|i| open + i) else {
        return;
    };

    let commas: Vec<usize> = buffer[open + 1..close]
        .match_indices(',')
        .map(|(i, _)| open + 1 + i)
        .collect();
    if index > commas.len() {
        return;
    }

    let start = match index {
        0 => open + 1,
        _ => {
            let after_comma = commas[index - 1] + 1;
            if buffer[after_comma..].starts_with(' ') {
                after_comma + 1
            } else {
                after_comma
            }
        }
    };
    let end = commas.get(index).copied().unwrap_or(close);

    buffer.insert_str(end, PARAM_HIGHLIGHT_MARKER);
    buffer.insert_str(start, PARAM_HIGHLIGHT_MARKER);
}

#[cfg(test)]
#[path = "../tests/human_tests.rs"]
mod tests;
