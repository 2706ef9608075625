//! Repository resources resolved for cross-namespace candidates.

use serde::{Deserialize, Serialize};

/// A namespace-scoped Repository resource.
///
/// Owned by the surrounding controller; the matcher only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    /// Namespace the matched pipeline must run in.
    pub namespace: String,
    pub spec: RepositorySpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySpec {
    /// Web URL of the source repository.
    pub url: String,
    /// Event type this repository is declared for.
    #[serde(default)]
    pub event_type: String,
    /// Branch (or branch pattern) this repository is declared for.
    #[serde(default)]
    pub branch: String,
}

impl Repository {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        spec: RepositorySpec,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            spec,
        }
    }
}

impl RepositorySpec {
    pub fn new(
        url: impl Into<String>,
        event_type: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            event_type: event_type.into(),
            branch: branch.into(),
        }
    }
}
