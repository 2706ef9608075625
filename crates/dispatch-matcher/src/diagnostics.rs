//! Diagnostics sinks for the match engine.

use dispatch_core::Diagnostic;
use dispatch_core::ports::Diagnostics;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Forwards diagnostics to `tracing`.
///
/// A failed match is dumped at `info` level: one line describing the event,
/// then one line per candidate with the annotation values it was checked
/// against.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::MissingAnnotations { candidate } => {
                warn!(candidate = %candidate, "Pipeline run does not have any annotations");
            }
            Diagnostic::RepositoryNotFound {
                candidate,
                namespace,
            } => {
                warn!(
                    candidate = %candidate,
                    namespace = %namespace,
                    "Could not find Repository in target namespace"
                );
            }
            Diagnostic::ResolverFailed {
                candidate,
                namespace,
                error,
            } => {
                warn!(
                    candidate = %candidate,
                    namespace = %namespace,
                    error = %error,
                    "Repository lookup failed, skipping pipeline run"
                );
            }
            Diagnostic::InvalidAnnotation {
                candidate,
                key,
                error,
            } => {
                warn!(candidate = %candidate, key = %key, error = %error, "Invalid annotation");
            }
            Diagnostic::CandidateRejected {
                candidate,
                key,
                value,
            } => {
                debug!(candidate = %candidate, key = %key, value = %value, "Pipeline run rejected");
            }
            Diagnostic::CandidateMatched { candidate } => {
                info!(candidate = %candidate, "Matched pipeline run");
            }
            Diagnostic::NoMatch(report) => {
                info!(
                    url = %report.url,
                    base_branch = %report.base_branch,
                    event_type = %report.event_type,
                    "Cannot match between event and pipeline runs"
                );
                info!("Available configuration in pipeline run annotations");
                for entry in &report.candidates {
                    let snapshot = &entry.snapshot;
                    info!(
                        candidate = %entry.candidate,
                        base_branch = snapshot.target_branch.as_deref().unwrap_or_default(),
                        target_event = snapshot.target_event.as_deref().unwrap_or_default(),
                        target_namespace = snapshot.target_namespace.as_deref().unwrap_or_default(),
                        "Pipeline run configuration"
                    );
                }
            }
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Drain the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
