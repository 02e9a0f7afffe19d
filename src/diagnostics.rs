//! Non-fatal compiler diagnostics.
//!
//! The compiler never logs on its own; it reports to a [`Diagnostics`] sink
//! handed in by the caller. [`TracingDiagnostics`] forwards to `tracing`,
//! [`Recorder`] keeps everything in memory.

use std::sync::Mutex;

/// A non-fatal event raised while compiling.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Abstract type outside the known enumeration; a fallback type was used.
    UnknownType { type_name: String, fallback: String },
    /// A value could not be JSON-encoded and was passed through unchanged.
    SerializationFallback { kind: &'static str },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownType {
                type_name,
                fallback,
            } => write!(f, "Unregistered type given: '{}', using {}", type_name, fallback),
            Diagnostic::SerializationFallback { kind } => {
                write!(f, "Could not JSON-encode {} value, passing it through", kind)
            }
        }
    }
}

/// Sink for compiler diagnostics.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Default sink: emits a `tracing` event per diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownType { type_name, .. } => {
                tracing::warn!(type_name = %type_name, "{}", diagnostic);
            }
            Diagnostic::SerializationFallback { kind } => {
                tracing::debug!(kind = *kind, "{}", diagnostic);
            }
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    seen: Mutex<Vec<Diagnostic>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for Recorder {
    fn report(&self, diagnostic: Diagnostic) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for std::sync::Arc<D> {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}
