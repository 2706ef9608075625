//! Candidate pipeline definitions.

use crate::annotations::{AnnotationKey, PipelineAnnotations};
use serde::{Deserialize, Serialize};

/// One pipeline definition discovered for the triggering repository.
///
/// Candidates are handed to the matcher in priority order; the first one
/// whose filters all pass wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub annotations: PipelineAnnotations,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: PipelineAnnotations::default(),
        }
    }

    /// Build a candidate from a manifest's raw annotation map.
    pub fn from_annotations<I, K, V>(name: impl Into<String>, prefix: &str, annotations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            annotations: PipelineAnnotations::from_map(prefix, annotations),
        }
    }

    pub fn with_annotation(mut self, key: AnnotationKey, value: impl Into<String>) -> Self {
        self.annotations.set(key, value);
        self
    }

    pub fn is_unannotated(&self) -> bool {
        self.annotations.is_empty()
    }
}
