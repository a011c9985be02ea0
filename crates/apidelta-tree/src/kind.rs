use apidelta_model::{DeclData, ExecutableKind, TypeDeclKind, VariableKind};
use std::fmt;

/// Category of an element node. The label is the first word of the node's
/// display string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Package,
    Class,
    Interface,
    Enum,
    AnnotationType,
    Method,
    Constructor,
    Field,
    EnumConstant,
    Parameter,
    TypeParameter,
    Annotation,
}

impl ElementKind {
    pub const fn label(self) -> &'static str {
        match self {
            ElementKind::Package => "package",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Enum => "enum",
            ElementKind::AnnotationType => "@interface",
            ElementKind::Method => "method",
            ElementKind::Constructor => "constructor",
            ElementKind::Field => "field",
            ElementKind::EnumConstant => "enum constant",
            ElementKind::Parameter => "parameter",
            ElementKind::TypeParameter => "type parameter",
            ElementKind::Annotation => "annotation",
        }
    }

    pub fn of_declaration(decl: &DeclData) -> ElementKind {
        match decl {
            DeclData::Package(_) => ElementKind::Package,
            DeclData::Type(ty) => match ty.kind {
                TypeDeclKind::Class => ElementKind::Class,
                TypeDeclKind::Interface => ElementKind::Interface,
                TypeDeclKind::Enum => ElementKind::Enum,
                TypeDeclKind::AnnotationType => ElementKind::AnnotationType,
            },
            DeclData::Executable(executable) => match executable.kind {
                ExecutableKind::Method => ElementKind::Method,
                ExecutableKind::Constructor => ElementKind::Constructor,
            },
            DeclData::Variable(variable) => match variable.kind {
                VariableKind::Field => ElementKind::Field,
                VariableKind::EnumConstant => ElementKind::EnumConstant,
                VariableKind::Parameter => ElementKind::Parameter,
            },
            DeclData::TypeParameter(_) => ElementKind::TypeParameter,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
