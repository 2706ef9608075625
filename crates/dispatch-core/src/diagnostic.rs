//! Structured diagnostics emitted while matching.

use crate::annotations::AnnotationKey;
use crate::snapshot::NoMatchReport;
use serde::{Deserialize, Serialize};

/// A single observation made by the match engine.
///
/// Diagnostics are purely informational; sinks never feed back into the
/// matching decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The candidate carried no annotations and was skipped.
    MissingAnnotations { candidate: String },
    /// No Repository exists in the namespace the candidate targets.
    RepositoryNotFound { candidate: String, namespace: String },
    /// The resolver failed; treated the same as a miss.
    ResolverFailed {
        candidate: String,
        namespace: String,
        error: String,
    },
    /// A list annotation could not be parsed; the match is aborted.
    InvalidAnnotation {
        candidate: String,
        key: AnnotationKey,
        error: String,
    },
    /// A filter did not accept the event.
    CandidateRejected {
        candidate: String,
        key: AnnotationKey,
        value: String,
    },
    CandidateMatched { candidate: String },
    /// Every candidate was rejected.
    NoMatch(NoMatchReport),
}

impl Diagnostic {
    /// Candidate the diagnostic refers to, if any.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Diagnostic::MissingAnnotations { candidate }
            | Diagnostic::RepositoryNotFound { candidate, .. }
            | Diagnostic::ResolverFailed { candidate, .. }
            | Diagnostic::InvalidAnnotation { candidate, .. }
            | Diagnostic::CandidateRejected { candidate, .. }
            | Diagnostic::CandidateMatched { candidate } => Some(candidate),
            Diagnostic::NoMatch(_) => None,
        }
    }
}
