//! Construction errors.
//!
//! Only the builders report errors. Rendering and comparison are total and
//! degrade to empty strings or `false` instead.

use crate::decl::DeclId;
use crate::types::TypeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("type {0:?} does not exist in this universe")]
    UnknownType(TypeId),

    #[error("type {0:?} is not a type variable")]
    NotATypeVariable(TypeId),

    #[error("declaration {0:?} does not exist in this universe")]
    UnknownDeclaration(DeclId),

    #[error("declaration {decl:?} cannot enclose a {member}")]
    InvalidEnclosing { decl: DeclId, member: &'static str },
}
