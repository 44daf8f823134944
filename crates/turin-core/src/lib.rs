//! Core shared types for the Turin front-end.
//!
//! Intentionally small: qualified names and the diagnostic sink types that
//! every layer above this one needs.

mod diagnostic;
mod name;
mod names;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use name::Name;
pub use names::{PackageName, QualifiedName};
pub use text_size::{TextRange, TextSize};
pub use turin_ids::{ExprId, FileId, NodeId, StmtId, TypeVarId};
