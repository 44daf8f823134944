//! Diagnostics primitives used by the semantic validation sink (spec.md §7).

use text_size::TextRange;
use turin_ids::FileId;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Location {
    pub file: FileId,
    pub range: TextRange,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub severity: Severity,
    /// The error taxonomy kind, e.g. `"UnresolvedConstructor"` (spec.md §7).
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(location: Location, severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            location,
            severity,
            code,
            message: message.into(),
        }
    }

    pub fn error(location: Location, code: &'static str, message: impl Into<String>) -> Self {
        Self::new(location, Severity::Error, code, message)
    }
}
