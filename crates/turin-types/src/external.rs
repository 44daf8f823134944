use std::collections::HashMap;

use turin_ast::{TypeDefKind, TypeUsage};
use turin_core::{Name, QualifiedName};

use crate::member::{InternalConstructor, InternalMethod};

#[derive(Debug, Clone)]
pub struct ExternalFieldInfo {
    pub declared_type: TypeUsage,
    pub assignable: bool,
}

/// The shape shared by the reflective and archive providers (spec.md
/// §4.1): both build a type definition eagerly from externally-supplied
/// metadata, preserve method overloading, and need no lazy state machine
/// since nothing about them depends on the rest of the compilation unit.
#[derive(Debug, Clone)]
pub struct ExternalTypeDefinition {
    pub qualified_name: QualifiedName,
    pub kind: TypeDefKind,
    pub base: Option<TypeUsage>,
    pub interfaces: Vec<TypeUsage>,
    pub constructors: Vec<InternalConstructor>,
    pub methods: HashMap<Name, Vec<InternalMethod>>,
    pub fields: HashMap<Name, ExternalFieldInfo>,
}

impl ExternalTypeDefinition {
    /// A type definition carrying no members, used only as a last-resort
    /// stand-in for the platform root object type when a provider chain
    /// has not actually registered it (misconfiguration, not normal use).
    pub fn bare(qualified_name: QualifiedName) -> Self {
        Self {
            constructors: vec![InternalConstructor {
                owner: qualified_name.clone(),
                params: Vec::new(),
                descriptor: turin_classfile::MethodDescriptor {
                    params: Vec::new(),
                    return_type: turin_classfile::ReturnType::Void,
                },
            }],
            qualified_name,
            kind: TypeDefKind::Class,
            base: None,
            interfaces: Vec::new(),
            methods: HashMap::new(),
            fields: HashMap::new(),
        }
    }
}
