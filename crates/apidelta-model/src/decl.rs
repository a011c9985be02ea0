//! Declarations produced by one analysis run.
//!
//! Declarations reference each other by [`DeclId`]: every declaration except
//! a package records its enclosing declaration, and containers record their
//! enclosed members in declaration order.

use crate::types::TypeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExecutableKind {
    Method,
    Constructor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Field,
    EnumConstant,
    Parameter,
}

#[derive(Clone, Debug)]
pub struct PackageDecl {
    pub qualified_name: String,
    pub members: Vec<DeclId>,
}

#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub kind: TypeDeclKind,
    pub qualified_name: String,
    pub enclosing: Option<DeclId>,
    /// The declared type `Foo<T, ...>` of this declaration.
    pub ty: TypeId,
    pub type_params: Vec<DeclId>,
    pub members: Vec<DeclId>,
}

#[derive(Clone, Debug)]
pub struct ExecutableDecl {
    pub kind: ExecutableKind,
    pub name: String,
    pub enclosing: DeclId,
    pub type_params: Vec<DeclId>,
    pub return_type: TypeId,
    pub params: Vec<DeclId>,
    pub thrown: Vec<TypeId>,
}

#[derive(Clone, Debug)]
pub struct VariableDecl {
    pub kind: VariableKind,
    pub name: String,
    pub enclosing: Option<DeclId>,
    pub ty: TypeId,
}

#[derive(Clone, Debug)]
pub struct TypeParameterDecl {
    pub name: String,
    pub enclosing: DeclId,
    /// The type variable this parameter declares.
    pub var: TypeId,
    pub bounds: Vec<TypeId>,
}

#[derive(Clone, Debug)]
pub enum DeclData {
    Package(PackageDecl),
    Type(TypeDecl),
    Executable(ExecutableDecl),
    Variable(VariableDecl),
    TypeParameter(TypeParameterDecl),
}

impl DeclData {
    pub fn enclosing(&self) -> Option<DeclId> {
        match self {
            DeclData::Package(_) => None,
            DeclData::Type(decl) => decl.enclosing,
            DeclData::Executable(decl) => Some(decl.enclosing),
            DeclData::Variable(decl) => decl.enclosing,
            DeclData::TypeParameter(decl) => Some(decl.enclosing),
        }
    }

    /// Structural sub-declarations, in declaration order.
    ///
    /// Types and packages expose their members; executables expose their
    /// parameters. Type parameters are not enclosed elements.
    pub fn enclosed(&self) -> &[DeclId] {
        match self {
            DeclData::Package(decl) => &decl.members,
            DeclData::Type(decl) => &decl.members,
            DeclData::Executable(decl) => &decl.params,
            DeclData::Variable(_) | DeclData::TypeParameter(_) => &[],
        }
    }

    pub fn simple_name(&self) -> &str {
        match self {
            DeclData::Package(decl) => &decl.qualified_name,
            DeclData::Type(decl) => decl
                .qualified_name
                .rsplit('.')
                .next()
                .unwrap_or(&decl.qualified_name),
            DeclData::Executable(decl) => &decl.name,
            DeclData::Variable(decl) => &decl.name,
            DeclData::TypeParameter(decl) => &decl.name,
        }
    }
}

/// Append-only store of declarations.
#[derive(Clone, Debug, Default)]
pub struct DeclarationStore {
    decls: Vec<DeclData>,
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: DeclData) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(data);
        id
    }

    pub fn get(&self, id: DeclId) -> Option<&DeclData> {
        self.decls.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: DeclId) -> Option<&mut DeclData> {
        self.decls.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
