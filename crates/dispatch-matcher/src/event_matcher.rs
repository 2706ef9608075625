//! Matching of event attributes against list annotations.

use crate::glob::glob_match;
use crate::parser::parse_list;
use dispatch_core::Result;

const HEADS_PREFIX: &str = "refs/heads";

/// How target values are compared with the observed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact string equality (event types).
    Exact,
    /// Equality or branch-reference glob (target branches).
    Branch,
}

/// Decides whether an event attribute satisfies a list annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventMatcher;

impl EventMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Check `observed` against the raw `[a, b, ...]` annotation value.
    ///
    /// Parse errors are returned unchanged; a well-formed list with no
    /// matching value is `Ok(false)`. Blank elements (`[main,]`) never match.
    pub fn matches(&self, raw: &str, observed: &str, mode: MatchMode) -> Result<bool> {
        let targets = parse_list(raw)?;
        Ok(targets
            .iter()
            .filter(|target| !target.is_empty())
            .any(|target| {
                target == observed
                    || (mode == MatchMode::Branch && self.branch_matches(target, observed))
            }))
    }

    /// Match a branch target against an observed ref.
    ///
    /// Short names and full `refs/heads/...` refs are interchangeable on
    /// either side; everything else is a glob over the whole ref.
    pub fn branch_matches(&self, target: &str, observed: &str) -> bool {
        if target == observed {
            return true;
        }

        if target.starts_with(HEADS_PREFIX)
            && !observed.contains('/')
            && glob_match(target, &format!("{}/{}", HEADS_PREFIX, observed))
        {
            return true;
        }

        if observed.starts_with(HEADS_PREFIX)
            && !target.contains('/')
            && glob_match(target, base_name(observed))
        {
            return true;
        }

        glob_match(target, observed)
    }
}

fn base_name(reference: &str) -> &str {
    let trimmed = reference.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
