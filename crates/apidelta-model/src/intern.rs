//! Type interning for structural deduplication.
//!
//! Structural descriptors are hash-consed: interning the same `TypeData`
//! twice yields the same `TypeId`. Type variables are the exception. Each
//! call to [`TypeInterner::type_variable`] allocates a fresh identity, and
//! its bounds are attached afterwards so that a bound may mention the
//! variable itself.

use crate::error::ModelError;
use crate::types::{ExecutableShape, NoTypeKind, PrimitiveKind, TypeData, TypeId, TypeVarInfo};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct TypeInterner {
    types: Vec<TypeData>,
    index: FxHashMap<TypeData, TypeId>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            types: Vec::with_capacity(64),
            index: FxHashMap::default(),
        };

        // Order must match the reserved TypeId constants.
        interner.intern(TypeData::Unknown);
        interner.intern(TypeData::Null);
        interner.intern(TypeData::NoType(NoTypeKind::Void));
        interner.intern(TypeData::NoType(NoTypeKind::Package));
        for kind in PrimitiveKind::ALL {
            let id = interner.intern(TypeData::Primitive(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        debug_assert_eq!(interner.types.len() as u32, TypeId::FIRST_USER);

        interner
    }

    fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.index.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(data.clone());
        self.index.insert(data, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn array(&mut self, component: TypeId) -> TypeId {
        self.intern(TypeData::Array(component))
    }

    /// A declared (class / interface / enum / annotation) type, possibly
    /// parameterized.
    pub fn declared(&mut self, qualified_name: &str, type_args: &[TypeId]) -> TypeId {
        self.intern(TypeData::Declared {
            qualified_name: qualified_name.to_string(),
            type_args: SmallVec::from_slice(type_args),
        })
    }

    pub fn wildcard(&mut self, super_bound: Option<TypeId>, extends_bound: Option<TypeId>) -> TypeId {
        self.intern(TypeData::Wildcard {
            super_bound,
            extends_bound,
        })
    }

    pub fn executable(&mut self, shape: ExecutableShape) -> TypeId {
        self.intern(TypeData::Executable(shape))
    }

    /// Allocate a fresh type variable. Its upper bound stays
    /// `TypeId::UNKNOWN` until [`bind_type_variable`](Self::bind_type_variable).
    pub fn type_variable(&mut self, name: &str) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeData::TypeVariable(TypeVarInfo {
            name: name.to_string(),
            lower: None,
            upper: TypeId::UNKNOWN,
        }));
        id
    }

    pub fn bind_type_variable(
        &mut self,
        var: TypeId,
        lower: Option<TypeId>,
        upper: TypeId,
    ) -> Result<(), ModelError> {
        let len = self.types.len();
        for bound in lower.iter().chain(std::iter::once(&upper)) {
            if bound.0 as usize >= len {
                return Err(ModelError::UnknownType(*bound));
            }
        }

        match self.types.get_mut(var.0 as usize) {
            Some(TypeData::TypeVariable(info)) => {
                info.lower = lower;
                info.upper = upper;
                Ok(())
            }
            Some(_) => Err(ModelError::NotATypeVariable(var)),
            None => Err(ModelError::UnknownType(var)),
        }
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
