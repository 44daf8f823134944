use turin_core::Diagnostic;

/// The in-core counterpart of the "external error collector" (spec.md §7):
/// validation records one diagnostic per semantic error and keeps going
/// rather than aborting on the first one.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A plain `Vec`-backed sink, the default a driver reaches for when it has
/// no richer reporting surface of its own.
#[derive(Debug, Default, Clone)]
pub struct CollectingDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == turin_core::Severity::Error)
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
