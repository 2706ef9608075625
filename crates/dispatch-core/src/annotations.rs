//! Annotation keys recognized on pipeline definitions.
//!
//! Manifests carry their routing constraints as annotations of the form
//! `<prefix>/<suffix>`. The recognized suffixes are modelled by
//! [`AnnotationKey`]; everything else is kept verbatim in
//! [`PipelineAnnotations::extra`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Annotation prefix used when none is configured.
pub const DEFAULT_ANNOTATION_PREFIX: &str = "pipelinesascode.tekton.dev";

pub const ON_EVENT: &str = "on-event";
pub const ON_TARGET_BRANCH: &str = "on-target-branch";
pub const TARGET_NAMESPACE: &str = "target-namespace";
pub const MAX_KEEP_RUNS: &str = "max-keep-runs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKey {
    OnEvent,
    OnTargetBranch,
    TargetNamespace,
    MaxKeepRuns,
}

impl AnnotationKey {
    pub const ALL: [AnnotationKey; 4] = [
        AnnotationKey::OnEvent,
        AnnotationKey::OnTargetBranch,
        AnnotationKey::TargetNamespace,
        AnnotationKey::MaxKeepRuns,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            AnnotationKey::OnEvent => ON_EVENT,
            AnnotationKey::OnTargetBranch => ON_TARGET_BRANCH,
            AnnotationKey::TargetNamespace => TARGET_NAMESPACE,
            AnnotationKey::MaxKeepRuns => MAX_KEEP_RUNS,
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.suffix() == suffix)
    }

    /// Fully qualified annotation name under `prefix`.
    pub fn qualified(&self, prefix: &str) -> String {
        format!("{}/{}", prefix, self.suffix())
    }

    /// Whether the value uses the `[a, b, ...]` list syntax.
    pub fn is_list(&self) -> bool {
        matches!(self, AnnotationKey::OnEvent | AnnotationKey::OnTargetBranch)
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Typed view of a candidate's annotations.
///
/// Values are kept raw; list values are only parsed when a filter runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_target_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_keep_runs: Option<String>,
    /// Annotations outside the recognized set, keyed by their full name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PipelineAnnotations {
    /// Split a raw annotation map into recognized keys and the residual.
    pub fn from_map<I, K, V>(prefix: &str, annotations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut parsed = Self::default();
        for (name, value) in annotations {
            let name = name.into();
            let value = value.into();
            let key = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(AnnotationKey::from_suffix);
            match key {
                Some(key) => parsed.set(key, value),
                None => {
                    parsed.extra.insert(name, value);
                }
            }
        }
        parsed
    }

    pub fn get(&self, key: AnnotationKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn set(&mut self, key: AnnotationKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    /// True when the manifest carried no annotations at all.
    pub fn is_empty(&self) -> bool {
        self.extra.is_empty() && AnnotationKey::ALL.iter().all(|key| self.get(*key).is_none())
    }

    /// Present recognized annotations in [`AnnotationKey::ALL`] order.
    pub fn recognized(&self) -> impl Iterator<Item = (AnnotationKey, &str)> {
        AnnotationKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }

    fn slot(&self, key: AnnotationKey) -> &Option<String> {
        match key {
            AnnotationKey::OnEvent => &self.on_event,
            AnnotationKey::OnTargetBranch => &self.on_target_branch,
            AnnotationKey::TargetNamespace => &self.target_namespace,
            AnnotationKey::MaxKeepRuns => &self.max_keep_runs,
        }
    }

    fn slot_mut(&mut self, key: AnnotationKey) -> &mut Option<String> {
        match key {
            AnnotationKey::OnEvent => &mut self.on_event,
            AnnotationKey::OnTargetBranch => &mut self.on_target_branch,
            AnnotationKey::TargetNamespace => &mut self.target_namespace,
            AnnotationKey::MaxKeepRuns => &mut self.max_keep_runs,
        }
    }
}
