//! The concrete per-run database.
//!
//! A `Universe` is built single-threaded by one frontend run and is then
//! read-only. It is `Send + Sync`, so the old and the new run can each be
//! built on their own thread and shared afterwards.

use crate::db::{TypeDatabase, UniverseId};
use crate::decl::{
    DeclData, DeclId, DeclarationStore, ExecutableDecl, ExecutableKind, PackageDecl, TypeDecl,
    TypeDeclKind, TypeParameterDecl, VariableDecl, VariableKind,
};
use crate::error::ModelError;
use crate::intern::TypeInterner;
use crate::types::{ExecutableShape, TypeData, TypeId};
use crate::values::AnnotationInstance;
use apidelta_common::limits::IMPLICIT_ROOT_TYPE;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Clone, Debug)]
pub struct Universe {
    id: UniverseId,
    types: TypeInterner,
    decls: DeclarationStore,
    supertypes: FxHashMap<TypeId, Vec<TypeId>>,
    annotations: FxHashMap<DeclId, Vec<AnnotationInstance>>,
}

impl Universe {
    pub fn new() -> Self {
        let id = UniverseId::fresh();
        trace!(universe = id.0, "creating universe");
        Universe {
            id,
            types: TypeInterner::new(),
            decls: DeclarationStore::new(),
            supertypes: FxHashMap::default(),
            annotations: FxHashMap::default(),
        }
    }

    pub fn types(&self) -> &TypeInterner {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeInterner {
        &mut self.types
    }

    // =========================================================================
    // Type graph
    // =========================================================================

    /// Record direct supertypes of `ty`, superclass first.
    pub fn add_supertypes(&mut self, ty: TypeId, supertypes: &[TypeId]) {
        self.supertypes
            .entry(ty)
            .or_default()
            .extend_from_slice(supertypes);
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn add_package(&mut self, qualified_name: &str) -> DeclId {
        self.decls.alloc(DeclData::Package(PackageDecl {
            qualified_name: qualified_name.to_string(),
            members: Vec::new(),
        }))
    }

    /// Declare a type. Its declared type starts without type arguments; each
    /// [`add_type_parameter`](Self::add_type_parameter) extends it, so add
    /// type parameters before recording supertypes of the declared type.
    pub fn add_type(
        &mut self,
        kind: TypeDeclKind,
        qualified_name: &str,
        enclosing: Option<DeclId>,
    ) -> Result<DeclId, ModelError> {
        if let Some(owner) = enclosing {
            match self.decl(owner)? {
                DeclData::Package(_) | DeclData::Type(_) => {}
                _ => {
                    return Err(ModelError::InvalidEnclosing {
                        decl: owner,
                        member: "type",
                    });
                }
            }
        }

        let ty = self.types.declared(qualified_name, &[]);
        let id = self.decls.alloc(DeclData::Type(TypeDecl {
            kind,
            qualified_name: qualified_name.to_string(),
            enclosing,
            ty,
            type_params: Vec::new(),
            members: Vec::new(),
        }));
        if let Some(owner) = enclosing {
            self.push_member(owner, id);
        }
        Ok(id)
    }

    /// Declare a type parameter on a type or executable. Returns the
    /// declaration and the type variable it introduces; bind bounds with
    /// [`set_type_parameter_bounds`](Self::set_type_parameter_bounds) once
    /// the variable can be referenced from them.
    pub fn add_type_parameter(
        &mut self,
        owner: DeclId,
        name: &str,
    ) -> Result<(DeclId, TypeId), ModelError> {
        match self.decl(owner)? {
            DeclData::Type(_) | DeclData::Executable(_) => {}
            _ => {
                return Err(ModelError::InvalidEnclosing {
                    decl: owner,
                    member: "type parameter",
                });
            }
        }

        let var = self.types.type_variable(name);
        let id = self.decls.alloc(DeclData::TypeParameter(TypeParameterDecl {
            name: name.to_string(),
            enclosing: owner,
            var,
            bounds: Vec::new(),
        }));
        let mut redeclared = None;
        match self.decls.get_mut(owner) {
            Some(DeclData::Type(decl)) => {
                decl.type_params.push(id);
                redeclared = Some(decl.qualified_name.clone());
            }
            Some(DeclData::Executable(decl)) => decl.type_params.push(id),
            _ => {}
        }

        // Foo becomes Foo<T>, Foo<T> becomes Foo<T, U>
        if let Some(name) = redeclared {
            let args = self.type_parameter_vars(owner);
            let ty = self.types.declared(&name, &args);
            if let Some(DeclData::Type(decl)) = self.decls.get_mut(owner) {
                decl.ty = ty;
            }
        }

        Ok((id, var))
    }

    /// Attach bounds to a type parameter. The variable's upper bound becomes
    /// the first bound, or the implicit root type when there are none.
    pub fn set_type_parameter_bounds(
        &mut self,
        param: DeclId,
        bounds: &[TypeId],
    ) -> Result<(), ModelError> {
        let var = match self.decls.get_mut(param) {
            Some(DeclData::TypeParameter(decl)) => {
                decl.bounds = bounds.to_vec();
                decl.var
            }
            Some(_) => {
                return Err(ModelError::InvalidEnclosing {
                    decl: param,
                    member: "bound",
                });
            }
            None => return Err(ModelError::UnknownDeclaration(param)),
        };

        let upper = match bounds.first() {
            Some(&first) => first,
            None => self.types.declared(IMPLICIT_ROOT_TYPE, &[]),
        };
        self.types.bind_type_variable(var, None, upper)
    }

    pub fn add_method(
        &mut self,
        owner: DeclId,
        name: &str,
        return_type: TypeId,
    ) -> Result<DeclId, ModelError> {
        self.add_executable(owner, ExecutableKind::Method, name, return_type)
    }

    pub fn add_constructor(&mut self, owner: DeclId) -> Result<DeclId, ModelError> {
        self.add_executable(owner, ExecutableKind::Constructor, "<init>", TypeId::VOID)
    }

    fn add_executable(
        &mut self,
        owner: DeclId,
        kind: ExecutableKind,
        name: &str,
        return_type: TypeId,
    ) -> Result<DeclId, ModelError> {
        self.require_type(owner, "method")?;
        let id = self.decls.alloc(DeclData::Executable(ExecutableDecl {
            kind,
            name: name.to_string(),
            enclosing: owner,
            type_params: Vec::new(),
            return_type,
            params: Vec::new(),
            thrown: Vec::new(),
        }));
        self.push_member(owner, id);
        Ok(id)
    }

    pub fn add_parameter(
        &mut self,
        method: DeclId,
        name: &str,
        ty: TypeId,
    ) -> Result<DeclId, ModelError> {
        if !matches!(self.decl(method)?, DeclData::Executable(_)) {
            return Err(ModelError::InvalidEnclosing {
                decl: method,
                member: "parameter",
            });
        }
        let id = self.decls.alloc(DeclData::Variable(VariableDecl {
            kind: VariableKind::Parameter,
            name: name.to_string(),
            enclosing: Some(method),
            ty,
        }));
        if let Some(DeclData::Executable(decl)) = self.decls.get_mut(method) {
            decl.params.push(id);
        }
        Ok(id)
    }

    /// Replace a method's return type, e.g. with one of its own type
    /// variables once they have been declared.
    pub fn set_return_type(&mut self, method: DeclId, ty: TypeId) -> Result<(), ModelError> {
        match self.decls.get_mut(method) {
            Some(DeclData::Executable(decl)) => {
                decl.return_type = ty;
                Ok(())
            }
            Some(_) => Err(ModelError::InvalidEnclosing {
                decl: method,
                member: "return type",
            }),
            None => Err(ModelError::UnknownDeclaration(method)),
        }
    }

    pub fn add_thrown_type(&mut self, method: DeclId, ty: TypeId) -> Result<(), ModelError> {
        match self.decls.get_mut(method) {
            Some(DeclData::Executable(decl)) => {
                decl.thrown.push(ty);
                Ok(())
            }
            Some(_) => Err(ModelError::InvalidEnclosing {
                decl: method,
                member: "thrown type",
            }),
            None => Err(ModelError::UnknownDeclaration(method)),
        }
    }

    pub fn add_field(&mut self, owner: DeclId, name: &str, ty: TypeId) -> Result<DeclId, ModelError> {
        self.add_variable(owner, VariableKind::Field, name, ty)
    }

    /// Enum constants are typed by their owning enum.
    pub fn add_enum_constant(&mut self, owner: DeclId, name: &str) -> Result<DeclId, ModelError> {
        let ty = match self.decl(owner)? {
            DeclData::Type(decl) => decl.ty,
            _ => TypeId::UNKNOWN,
        };
        self.add_variable(owner, VariableKind::EnumConstant, name, ty)
    }

    fn add_variable(
        &mut self,
        owner: DeclId,
        kind: VariableKind,
        name: &str,
        ty: TypeId,
    ) -> Result<DeclId, ModelError> {
        self.require_type(owner, "field")?;
        let id = self.decls.alloc(DeclData::Variable(VariableDecl {
            kind,
            name: name.to_string(),
            enclosing: Some(owner),
            ty,
        }));
        self.push_member(owner, id);
        Ok(id)
    }

    pub fn annotate(&mut self, decl: DeclId, annotation: AnnotationInstance) -> Result<(), ModelError> {
        self.decl(decl)?;
        self.annotations.entry(decl).or_default().push(annotation);
        Ok(())
    }

    /// Intern the executable type `<T> R(P1, P2) throws E` of a method or
    /// constructor declaration.
    pub fn executable_type(&mut self, method: DeclId) -> Result<TypeId, ModelError> {
        let decl = match self.decl(method)? {
            DeclData::Executable(decl) => decl.clone(),
            _ => {
                return Err(ModelError::InvalidEnclosing {
                    decl: method,
                    member: "executable type",
                });
            }
        };

        let type_params = self.type_parameter_vars(method);
        let params = decl
            .params
            .iter()
            .filter_map(|&param| match self.decls.get(param) {
                Some(DeclData::Variable(var)) => Some(var.ty),
                _ => None,
            })
            .collect();

        Ok(self.types.executable(ExecutableShape {
            type_params,
            return_type: decl.return_type,
            params,
            thrown: decl.thrown,
        }))
    }

    /// The declared type of a type declaration.
    pub fn declared_type(&self, decl: DeclId) -> Option<TypeId> {
        match self.decls.get(decl)? {
            DeclData::Type(decl) => Some(decl.ty),
            _ => None,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn decl(&self, id: DeclId) -> Result<&DeclData, ModelError> {
        self.decls.get(id).ok_or(ModelError::UnknownDeclaration(id))
    }

    fn require_type(&self, owner: DeclId, member: &'static str) -> Result<(), ModelError> {
        match self.decl(owner)? {
            DeclData::Type(_) => Ok(()),
            _ => Err(ModelError::InvalidEnclosing {
                decl: owner,
                member,
            }),
        }
    }

    fn push_member(&mut self, owner: DeclId, member: DeclId) {
        match self.decls.get_mut(owner) {
            Some(DeclData::Package(decl)) => decl.members.push(member),
            Some(DeclData::Type(decl)) => decl.members.push(member),
            _ => {}
        }
    }

    fn type_parameter_vars(&self, owner: DeclId) -> Vec<TypeId> {
        let params: &[DeclId] = match self.decls.get(owner) {
            Some(DeclData::Type(decl)) => &decl.type_params,
            Some(DeclData::Executable(decl)) => &decl.type_params,
            _ => &[],
        };
        params
            .iter()
            .filter_map(|&param| match self.decls.get(param) {
                Some(DeclData::TypeParameter(decl)) => Some(decl.var),
                _ => None,
            })
            .collect()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDatabase for Universe {
    fn universe_id(&self) -> UniverseId {
        self.id
    }

    fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.lookup(id)
    }

    fn declaration(&self, id: DeclId) -> Option<&DeclData> {
        self.decls.get(id)
    }

    fn direct_supertypes(&self, id: TypeId) -> Vec<TypeId> {
        self.supertypes.get(&id).cloned().unwrap_or_default()
    }

    fn annotations(&self, id: DeclId) -> &[AnnotationInstance] {
        self.annotations.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
