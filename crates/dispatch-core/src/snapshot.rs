//! Diagnostic snapshots of the annotation values observed while matching.

use crate::annotations::AnnotationKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annotation values the matcher saw on one candidate.
///
/// Only values whose filter step was reached are recorded, so a snapshot
/// also shows how far a candidate got before it was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_keep_runs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
}

impl ConfigSnapshot {
    pub fn record(&mut self, key: AnnotationKey, value: &str) {
        let slot = match key {
            AnnotationKey::MaxKeepRuns => &mut self.max_keep_runs,
            AnnotationKey::TargetNamespace => &mut self.target_namespace,
            AnnotationKey::OnEvent => &mut self.target_event,
            AnnotationKey::OnTargetBranch => &mut self.target_branch,
        };
        *slot = Some(value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.max_keep_runs.is_none()
            && self.target_namespace.is_none()
            && self.target_event.is_none()
            && self.target_branch.is_none()
    }
}

impl fmt::Display for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "baseBranch={}, targetEvent={}, targetNs={}, maxKeepRuns={}",
            self.target_branch.as_deref().unwrap_or_default(),
            self.target_event.as_deref().unwrap_or_default(),
            self.target_namespace.as_deref().unwrap_or_default(),
            self.max_keep_runs.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    pub candidate: String,
    pub snapshot: ConfigSnapshot,
}

/// Everything an operator needs to tell a misrouted event from an
/// unconfigured one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoMatchReport {
    pub event_type: String,
    pub base_branch: String,
    pub url: String,
    /// Every examined candidate, in input order.
    pub candidates: Vec<CandidateSnapshot>,
}

impl NoMatchReport {
    pub fn snapshot_for(&self, candidate: &str) -> Option<&ConfigSnapshot> {
        self.candidates
            .iter()
            .find(|entry| entry.candidate == candidate)
            .map(|entry| &entry.snapshot)
    }
}

impl fmt::Display for NoMatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot match event to any pipeline run: url={}, baseBranch={}, eventType={}, \
             candidates={}",
            self.url,
            self.base_branch,
            self.event_type,
            self.candidates.len()
        )
    }
}
