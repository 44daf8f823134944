use turin_core::{ExprId, Name, TextRange};

use crate::type_usage::TypeUsage;

/// A fully declared property: name, type, optional initializer/default.
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    pub name: Name,
    pub declared_type: TypeUsage,
    pub initializer: Option<ExprId>,
    pub default_value: Option<ExprId>,
    pub range: TextRange,
}

/// A reference to a peer declaration's property, materialized against that
/// declaration during resolution (spec.md §3: "materialized from a property
/// definition or a property reference by resolving the reference against a
/// peer declaration").
#[derive(Debug, Clone)]
pub struct PropertyReference {
    pub name: Name,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub enum PropertyNode {
    Definition(PropertyDefinition),
    Reference(PropertyReference),
}

impl PropertyNode {
    pub fn name(&self) -> &Name {
        match self {
            PropertyNode::Definition(def) => &def.name,
            PropertyNode::Reference(reference) => &reference.name,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            PropertyNode::Definition(def) => def.range,
            PropertyNode::Reference(reference) => reference.range,
        }
    }
}

/// The deterministic getter/setter names synthesized for every direct
/// property of a source-defined type (spec.md §4.3.4).
pub fn getter_name(property: &str) -> String {
    format!("get{}", pascal_case(property))
}

pub fn setter_name(property: &str) -> String {
    format!("set{}", pascal_case(property))
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getter_setter_names_are_pascal_cased() {
        assert_eq!(getter_name("x"), "getX");
        assert_eq!(setter_name("nickname"), "setNickname");
    }
}
