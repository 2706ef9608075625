//! Version-control events handed to the matcher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A branch or tag was pushed.
pub const EVENT_PUSH: &str = "push";
/// A pull request was opened or updated.
pub const EVENT_PULL_REQUEST: &str = "pull_request";
/// A comment was left on an issue or pull request.
pub const EVENT_ISSUE_COMMENT: &str = "issue_comment";
/// A retest was requested for an existing pull request.
pub const EVENT_RETEST: &str = "retest";

/// Normalized description of an incoming trigger.
///
/// Produced by the ingestion layer and never mutated while matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type, e.g. `push` or `pull_request`.
    pub event_type: String,
    /// Branch the change targets (the pushed ref for `push`).
    pub base_branch: String,
    /// Branch the change comes from.
    #[serde(default)]
    pub head_branch: String,
    /// Web URL of the source repository.
    #[serde(default)]
    pub url: String,
    /// Commit the event refers to.
    #[serde(default)]
    pub sha: String,
}

impl Event {
    pub fn new(event_type: impl Into<String>, base_branch: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            base_branch: base_branch.into(),
            ..Default::default()
        }
    }

    pub fn with_head_branch(mut self, head_branch: impl Into<String>) -> Self {
        self.head_branch = head_branch.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = sha.into();
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} ({})",
            self.event_type, self.base_branch, self.url
        )
    }
}
