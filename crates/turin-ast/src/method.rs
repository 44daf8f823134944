use turin_core::{ExprId, Name, TextRange};

use crate::body::Body;
use crate::type_usage::{TypeUsage, TypeVariable};

/// Belongs to a constructor or method definition (spec.md §3).
#[derive(Debug, Clone)]
pub struct FormalParameter {
    pub name: Name,
    pub declared_type: TypeUsage,
    pub default_value: Option<ExprId>,
    pub range: TextRange,
}

impl FormalParameter {
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct MethodDef {
    pub name: Name,
    pub type_variables: Vec<TypeVariable>,
    pub params: Vec<FormalParameter>,
    pub return_type: TypeUsage,
    pub body: Body,
    pub is_static: bool,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ConstructorDef {
    pub type_variables: Vec<TypeVariable>,
    pub params: Vec<FormalParameter>,
    pub body: Body,
    pub range: TextRange,
}

/// A top-level program entry point (`main`-equivalent), modeled separately
/// from methods since it has no owning type in source (spec.md §6 AST input
/// contract: top-level nodes include "program entry nodes").
#[derive(Debug, Clone)]
pub struct ProgramEntry {
    pub params: Vec<FormalParameter>,
    pub body: Body,
    pub range: TextRange,
}
