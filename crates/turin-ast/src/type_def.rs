use turin_core::{Name, TextRange};

use crate::ids::{ConstructorId, MethodId, PropertyId};
use crate::type_usage::{TypeUsage, TypeVariable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Interface,
}

/// A source-defined type declaration. `base` defaults to the platform root
/// object type when absent (spec.md §4.3.1 `superclass()`).
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub kind: TypeDefKind,
    pub simple_name: Name,
    pub type_variables: Vec<TypeVariable>,
    pub base: Option<TypeUsage>,
    pub implements: Vec<TypeUsage>,
    pub annotations: Vec<Name>,
    pub properties: Vec<PropertyId>,
    pub methods: Vec<MethodId>,
    /// More than one entry here is a semantic error
    /// (`MultipleExplicitConstructors`, spec.md §7) caught during validation,
    /// not an AST-level invariant -- the parser may not reject it.
    pub constructors: Vec<ConstructorId>,
    pub range: TextRange,
}

impl TypeDef {
    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeDefKind::Class)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeDefKind::Interface)
    }
}
