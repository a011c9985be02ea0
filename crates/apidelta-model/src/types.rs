//! Type descriptor representation.
//!
//! A descriptor is stored once in a [`TypeInterner`](crate::TypeInterner)
//! and referred to by [`TypeId`]. Children are referenced by id as well, so
//! a descriptor graph may contain cycles through type-variable bounds
//! (`T extends Comparable<T>`).

use smallvec::SmallVec;
use std::fmt;

/// Handle to a type descriptor inside one universe.
///
/// The first ids are reserved and identical in every interner, so
/// `TypeId::INT` means `int` regardless of the producing run. Every other id
/// is only meaningful together with the database that allocated it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// A descriptor of a kind this model does not recognise.
    pub const UNKNOWN: Self = Self(0);
    /// The null type. Only ever appears as an absent lower bound.
    pub const NULL: Self = Self(1);
    pub const VOID: Self = Self(2);
    pub const PACKAGE: Self = Self(3);
    pub const BOOLEAN: Self = Self(4);
    pub const BYTE: Self = Self(5);
    pub const CHAR: Self = Self(6);
    pub const SHORT: Self = Self(7);
    pub const INT: Self = Self(8);
    pub const LONG: Self = Self(9);
    pub const FLOAT: Self = Self(10);
    pub const DOUBLE: Self = Self(11);

    /// First id handed out for non-reserved descriptors.
    pub const FIRST_USER: u32 = 12;

    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Primitive descriptor kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The reserved id of this primitive.
    pub const fn type_id(self) -> TypeId {
        match self {
            PrimitiveKind::Boolean => TypeId::BOOLEAN,
            PrimitiveKind::Byte => TypeId::BYTE,
            PrimitiveKind::Char => TypeId::CHAR,
            PrimitiveKind::Short => TypeId::SHORT,
            PrimitiveKind::Int => TypeId::INT,
            PrimitiveKind::Long => TypeId::LONG,
            PrimitiveKind::Float => TypeId::FLOAT,
            PrimitiveKind::Double => TypeId::DOUBLE,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Pseudo-types that are not values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoTypeKind {
    Void,
    Package,
}

/// Type variable payload.
///
/// `lower` is `None` (or the null type) for ordinary declared type
/// parameters; captured variables may carry a real lower bound. `upper` is
/// `TypeId::UNKNOWN` until the variable is bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarInfo {
    pub name: String,
    pub lower: Option<TypeId>,
    pub upper: TypeId,
}

/// Method / constructor type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExecutableShape {
    pub type_params: Vec<TypeId>,
    pub return_type: TypeId,
    pub params: Vec<TypeId>,
    pub thrown: Vec<TypeId>,
}

/// The closed set of descriptor kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A kind the producing frontend could not classify. Renders as nothing.
    Unknown,
    Null,
    Primitive(PrimitiveKind),
    Array(TypeId),
    Declared {
        qualified_name: String,
        type_args: SmallVec<[TypeId; 4]>,
    },
    TypeVariable(TypeVarInfo),
    Wildcard {
        super_bound: Option<TypeId>,
        extends_bound: Option<TypeId>,
    },
    Executable(ExecutableShape),
    NoType(NoTypeKind),
}
