//! Cross-run signature engine.
//!
//! Two analysis runs never share object graphs, so nothing here compares
//! `TypeId`s from different universes. Instead:
//!
//! - **Canonical signatures** ([`canonical`]): terse strings that are equal
//!   iff two descriptors are structurally equal, whatever run produced them
//! - **Human-readable signatures** ([`human_readable`], [`human_readable_decl`]):
//!   diagnostic text, never used for equality of types
//! - **Subtype closure** ([`SubtypeCalculator`]): supertype walks answered by
//!   comparing canonical strings
//! - **Value comparison** ([`ValueComparator`]): structural equality of
//!   annotation-like values
//!
//! Every entry point is total. Unrecognised kinds render as nothing and
//! mismatched kinds compare unequal.
mod canonical;
mod compare;
mod human;
mod state;
mod subtype;
mod value_format;

pub use canonical::{canonical, is_same_type};
pub use compare::{ValueComparator, is_equal};
pub use human::{human_readable, human_readable_decl};
pub use subtype::SubtypeCalculator;
pub use value_format::{annotation_human_readable, value_canonical, value_human_readable};
