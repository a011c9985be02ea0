//! Per-run program element model.
//!
//! Every analysis run produces one [`Universe`]: an interned set of type
//! descriptors, a store of declarations, annotation instances attached to
//! those declarations and the direct-supertype edges between types.
//!
//! - **`TypeId`**: lightweight handle into one universe's [`TypeInterner`]
//! - **`TypeData`**: the closed set of descriptor kinds
//! - **`DeclId` / `DeclData`**: declarations with enclosing back-links
//! - **`AnnotationValue`**: the closed set of annotation-like value kinds
//!
//! Ids from two universes must never be compared with each other. The
//! signature crate turns them into strings for that.
pub mod db;
pub mod decl;
pub mod error;
pub mod intern;
pub mod types;
pub mod universe;
pub mod values;

pub use db::{TypeDatabase, UniverseId};
pub use decl::{
    DeclData, DeclId, DeclarationStore, ExecutableDecl, ExecutableKind, PackageDecl, TypeDecl,
    TypeDeclKind, TypeParameterDecl, VariableDecl, VariableKind,
};
pub use error::ModelError;
pub use intern::TypeInterner;
pub use types::{ExecutableShape, NoTypeKind, PrimitiveKind, TypeData, TypeId, TypeVarInfo};
pub use universe::Universe;
pub use values::{AnnotationInstance, AnnotationValue, ScalarValue};
