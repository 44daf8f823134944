//! The AST data model for the Turin front-end (spec.md §3).
//!
//! Declaration-level nodes live in per-kind arenas owned by [`Ast`], addressed
//! by stable ids rather than owning pointers; parent relationships are a
//! sidecar map rebuilt by a one-pass walk instead of parser-set
//! back-references (spec.md §6, §9 REDESIGN FLAGS).

mod arena;
mod ast;
mod body;
mod compilation_unit;
mod ids;
mod method;
mod property;
mod type_def;
mod type_usage;

pub use arena::{Arena, RawId};
pub use ast::Ast;
pub use body::{Argument, Body, Expr, LiteralKind, Stmt};
pub use compilation_unit::{CompilationUnit, TopLevelDecl};
pub use ids::{ConstructorId, MethodId, NodeRef, ProgramEntryId, PropertyId, TypeDefId};
pub use method::{ConstructorDef, FormalParameter, MethodDef, ProgramEntry};
pub use property::{getter_name, setter_name, PropertyDefinition, PropertyNode, PropertyReference};
pub use type_def::{TypeDef, TypeDefKind};
pub use type_usage::{PrimitiveType, TypeUsage, TypeVarDeclarationSite, TypeVariable};
