//! Candidate selection.

use crate::event_matcher::{EventMatcher, MatchMode};
use dispatch_core::annotations::AnnotationKey;
use dispatch_core::ports::{Diagnostics, RepositoryResolver};
use dispatch_core::{
    Candidate, CandidateSnapshot, ConfigSnapshot, Diagnostic, Error, Event, MatcherConfig,
    NoMatchReport, Repository, Result,
};

/// The candidate selected for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub candidate: Candidate,
    /// Repository resolved from `target-namespace`, if the candidate has one.
    pub repository: Option<Repository>,
    pub snapshot: ConfigSnapshot,
}

impl MatchOutcome {
    /// Namespace the pipeline must run in, when one was resolved.
    pub fn namespace(&self) -> Option<&str> {
        self.repository.as_ref().map(|repo| repo.namespace.as_str())
    }
}

enum Verdict {
    Accepted(Option<Repository>),
    Rejected,
}

/// Selects the pipeline definition to run for an event.
///
/// Candidates are evaluated in the order given and the first one whose
/// present filters all pass wins. Filters run in a fixed order: namespace
/// resolution, then event type, then target branch. A malformed list
/// annotation aborts the whole selection.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: MatcherConfig,
    matcher: EventMatcher,
}

impl MatchEngine {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            matcher: EventMatcher::new(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Select the candidate to run for `event`.
    ///
    /// Returns [`Error::NoMatchFound`] with a snapshot of every candidate
    /// when nothing matches, or the parse error of the first malformed
    /// annotation encountered.
    pub async fn select(
        &self,
        candidates: &[Candidate],
        event: &Event,
        resolver: &dyn RepositoryResolver,
        diagnostics: &dyn Diagnostics,
    ) -> Result<MatchOutcome> {
        let mut examined = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let mut snapshot = ConfigSnapshot::default();
            match self
                .evaluate(candidate, event, resolver, diagnostics, &mut snapshot)
                .await?
            {
                Verdict::Accepted(repository) => {
                    diagnostics.emit(Diagnostic::CandidateMatched {
                        candidate: candidate.name.clone(),
                    });
                    return Ok(MatchOutcome {
                        candidate: candidate.clone(),
                        repository,
                        snapshot,
                    });
                }
                Verdict::Rejected => examined.push(CandidateSnapshot {
                    candidate: candidate.name.clone(),
                    snapshot,
                }),
            }
        }

        let report = NoMatchReport {
            event_type: event.event_type.clone(),
            base_branch: event.base_branch.clone(),
            url: event.url.clone(),
            candidates: examined,
        };
        diagnostics.emit(Diagnostic::NoMatch(report.clone()));
        Err(Error::NoMatchFound(Box::new(report)))
    }

    async fn evaluate(
        &self,
        candidate: &Candidate,
        event: &Event,
        resolver: &dyn RepositoryResolver,
        diagnostics: &dyn Diagnostics,
        snapshot: &mut ConfigSnapshot,
    ) -> Result<Verdict> {
        if self.config.require_annotations && candidate.is_unannotated() {
            diagnostics.emit(Diagnostic::MissingAnnotations {
                candidate: candidate.name.clone(),
            });
            return Ok(Verdict::Rejected);
        }

        let annotations = &candidate.annotations;

        if let Some(max_keep_runs) = annotations.get(AnnotationKey::MaxKeepRuns) {
            snapshot.record(AnnotationKey::MaxKeepRuns, max_keep_runs);
        }

        let mut repository = None;
        if let Some(namespace) = annotations.get(AnnotationKey::TargetNamespace) {
            snapshot.record(AnnotationKey::TargetNamespace, namespace);
            match resolver.resolve(namespace, event).await {
                Ok(Some(found)) => repository = Some(found),
                Ok(None) => {
                    diagnostics.emit(Diagnostic::RepositoryNotFound {
                        candidate: candidate.name.clone(),
                        namespace: namespace.to_string(),
                    });
                    return Ok(Verdict::Rejected);
                }
                Err(err) => {
                    diagnostics.emit(Diagnostic::ResolverFailed {
                        candidate: candidate.name.clone(),
                        namespace: namespace.to_string(),
                        error: err.to_string(),
                    });
                    return Ok(Verdict::Rejected);
                }
            }
        }

        let filters = [
            (AnnotationKey::OnEvent, event.event_type.as_str(), MatchMode::Exact),
            (AnnotationKey::OnTargetBranch, event.base_branch.as_str(), MatchMode::Branch),
        ];
        for (key, observed, mode) in filters {
            let Some(raw) = annotations.get(key) else {
                continue;
            };
            snapshot.record(key, raw);

            let matched = self.matcher.matches(raw, observed, mode).inspect_err(|err| {
                diagnostics.emit(Diagnostic::InvalidAnnotation {
                    candidate: candidate.name.clone(),
                    key,
                    error: err.to_string(),
                });
            })?;
            if !matched {
                diagnostics.emit(Diagnostic::CandidateRejected {
                    candidate: candidate.name.clone(),
                    key,
                    value: raw.to_string(),
                });
                return Ok(Verdict::Rejected);
            }
        }

        Ok(Verdict::Accepted(repository))
    }
}
