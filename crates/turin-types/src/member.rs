use turin_ast::TypeUsage;
use turin_classfile::MethodDescriptor;
use turin_core::{Name, QualifiedName};

/// One parameter of a synthesized or explicit internal signature, carrying
/// enough to re-derive binding at a call site (spec.md §4.3.5).
#[derive(Debug, Clone, PartialEq)]
pub struct FormalParameterInfo {
    pub name: Name,
    pub declared_type: TypeUsage,
    pub has_default: bool,
}

/// A lazily-built method signature, bound to its owner (spec.md §3 "Method
/// Signature (Internal)").
#[derive(Debug, Clone)]
pub struct InternalMethod {
    pub owner: QualifiedName,
    pub name: Name,
    pub params: Vec<FormalParameterInfo>,
    pub return_type: TypeUsage,
    pub descriptor: MethodDescriptor,
    pub is_static: bool,
    pub is_interface: bool,
}

/// A lazily-built constructor signature, bound to its owner (spec.md §3
/// "Constructor Signature (Internal)").
#[derive(Debug, Clone)]
pub struct InternalConstructor {
    pub owner: QualifiedName,
    pub params: Vec<FormalParameterInfo>,
    pub descriptor: MethodDescriptor,
}

/// What `TypeDefinition::find_symbol`'s default scan can return (spec.md
/// §4.3.1). Subclasses (external providers) may extend this with richer
/// symbol kinds; this core only needs properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Property(Name),
}
