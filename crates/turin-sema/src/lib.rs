//! Ties the Type Definition Model (`turin_types`) and the Symbol Resolver
//! (`turin_resolve`) together: walks a compilation unit's declarations and
//! method/constructor bodies, resolves every usage, and reports the error
//! taxonomy of spec.md §7 through a `DiagnosticSink` rather than aborting on
//! the first failure. This is the crate downstream tooling (an emitter, out
//! of scope here) depends on.

mod diagnostics;
mod validate;

pub use diagnostics::{CollectingDiagnostics, DiagnosticSink};
pub use validate::{validate_compilation_unit, validate_compilation_unit_structural_only};
