//! Element trees over per-run declaration handles.
//!
//! An [`ElementNode`] wraps one handle of a [`ProbingEnvironment`] and
//! materialises its children on first request, through an
//! [`ElementAdapter`] that decides which sub-declarations become nodes.
//! Node identity is the node's full display string (category label plus
//! human-readable signature), which is what lets a diff correlate the old
//! and the new tree without sharing anything between them.
//!
//! Trees use `Rc` and interior mutability: one tree is built by one
//! thread. Two trees for two runs can be built on two threads.
mod environment;
mod kind;
mod node;
mod universe_env;

pub use environment::{ElementAdapter, ProbingEnvironment, TreeContext};
pub use kind::ElementKind;
pub use node::{ElementNode, NodeState};
pub use universe_env::{DeclarationAdapter, UniverseEnvironment};
