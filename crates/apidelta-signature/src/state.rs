//! Per-call traversal context shared by the signature writers.

use apidelta_model::TypeId;
use rustc_hash::FxHashSet;

/// Output buffer plus the bookkeeping one top-level rendering needs.
///
/// A state is created for exactly one top-level call and dropped with it.
/// The visited set is what stops `T extends Comparable<T>` from recursing
/// forever, so reusing a state would leak "already seen" marks into an
/// unrelated rendering.
#[derive(Debug, Default)]
pub(crate) struct SignatureState {
    out: String,
    visited: FxHashSet<TypeId>,
    in_executable: bool,
}

impl SignatureState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut String {
        &mut self.out
    }

    pub(crate) fn len(&self) -> usize {
        self.out.len()
    }

    /// Mark a type variable as visited. Returns `false` when it was already.
    pub(crate) fn first_visit(&mut self, var: TypeId) -> bool {
        self.visited.insert(var)
    }

    pub(crate) fn in_executable(&self) -> bool {
        self.in_executable
    }

    /// Enter an executable; returns the previous flag for `leave_executable`.
    pub(crate) fn enter_executable(&mut self) -> bool {
        std::mem::replace(&mut self.in_executable, true)
    }

    pub(crate) fn leave_executable(&mut self, previous: bool) {
        self.in_executable = previous;
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
