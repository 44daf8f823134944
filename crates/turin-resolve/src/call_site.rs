use turin_classfile::FieldType;
use turin_core::{Name, QualifiedName};

/// What the semantic layer hands the resolver once overload resolution has
/// already picked a candidate on some receiver type (spec.md §4.2
/// `find_jvm_definition`, used "by the emitter after type checking" per
/// §4.3.5). The resolver's job here is only to turn `owner` into a
/// `TypeDefinition` through its own composition and forward the
/// descriptor-keyed lookup -- it does not re-run overload resolution.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub owner: QualifiedName,
    pub name: Name,
    pub jvm_param_types: Vec<FieldType>,
    pub static_context: bool,
}
