//! Command handlers.

use crate::commands::{MatchArgs, OutputFormat};
use crate::manifest::load_candidates;
use dispatch_core::ports::RepositoryResolver;
use dispatch_core::{Candidate, Error, Event, MatcherConfig, NoMatchReport};
use dispatch_matcher::{
    HttpRepositoryResolver, MatchEngine, StaticRepositoryResolver, TracingDiagnostics, parse_list,
};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Report which pipeline run an event would trigger.
pub async fn match_event(
    config: &MatcherConfig,
    args: MatchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = load_candidates(&args.dir, &config.annotation_prefix)?;
    debug!(dir = %args.dir.display(), count = candidates.len(), "Loaded pipeline runs");
    let resolver = build_resolver(config, args.repositories.as_deref())?;
    let event = Event::new(args.event_type, args.base_branch)
        .with_head_branch(args.head_branch)
        .with_url(args.url)
        .with_sha(args.sha);

    let engine = MatchEngine::new(config.clone());
    match engine
        .select(&candidates, &event, resolver.as_ref(), &TracingDiagnostics)
        .await
    {
        Ok(outcome) => {
            match args.output {
                OutputFormat::Json => {
                    let body = MatchSummary {
                        candidate: &outcome.candidate.name,
                        namespace: outcome.namespace(),
                        snapshot: &outcome.snapshot,
                    };
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Text => {
                    println!("Matched: {}", outcome.candidate.name);
                    if let Some(namespace) = outcome.namespace() {
                        println!("  Namespace: {}", namespace);
                    }
                    println!("  {}", outcome.snapshot);
                }
            }
            Ok(())
        }
        Err(Error::NoMatchFound(report)) => {
            match args.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    println!("{}", report);
                    for entry in &report.candidates {
                        println!("  - {}: {}", entry.candidate, entry.snapshot);
                    }
                }
            }
            Err(no_match_error(&report))
        }
        Err(err) => Err(err.into()),
    }
}

/// Check every list annotation in a manifest directory.
pub fn lint(config: &MatcherConfig, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = load_candidates(dir, &config.annotation_prefix)?;
    let problems = lint_candidates(&candidates);

    if problems.is_empty() {
        println!("{} pipeline runs, no annotation problems", candidates.len());
        return Ok(());
    }

    for problem in &problems {
        println!("{}", problem);
    }
    Err(format!("{} invalid annotations", problems.len()).into())
}

/// Short summary returned after the full report has been printed.
fn no_match_error(report: &NoMatchReport) -> Box<dyn std::error::Error> {
    format!(
        "no pipeline run matches {} on {} ({} checked)",
        report.event_type,
        report.base_branch,
        report.candidates.len()
    )
    .into()
}

#[derive(Serialize)]
struct MatchSummary<'a> {
    candidate: &'a str,
    namespace: Option<&'a str>,
    snapshot: &'a dispatch_core::ConfigSnapshot,
}

fn build_resolver(
    config: &MatcherConfig,
    repositories: Option<&Path>,
) -> Result<Box<dyn RepositoryResolver>, Error> {
    if let Some(path) = repositories {
        return Ok(Box::new(StaticRepositoryResolver::from_file(path)?));
    }
    if config.resolver_url.is_some() {
        return Ok(Box::new(HttpRepositoryResolver::from_config(config)?));
    }
    Ok(Box::new(StaticRepositoryResolver::default()))
}

fn lint_candidates(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .flat_map(|candidate| {
            candidate
                .annotations
                .recognized()
                .filter(|(key, _)| key.is_list())
                .filter_map(move |(key, value)| {
                    parse_list(value)
                        .err()
                        .map(|err| format!("{} {}: {}", candidate.name, key, err))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::annotations::AnnotationKey;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lint_reports_only_list_annotations() {
        let candidates = vec![
            Candidate::new("ok")
                .with_annotation(AnnotationKey::OnEvent, "[push]")
                .with_annotation(AnnotationKey::TargetNamespace, "ci"),
            Candidate::new("bad")
                .with_annotation(AnnotationKey::OnEvent, "push")
                .with_annotation(AnnotationKey::OnTargetBranch, "[]")
                .with_annotation(AnnotationKey::MaxKeepRuns, "[oops"),
        ];

        assert_eq!(
            lint_candidates(&candidates),
            vec![
                "bad on-event: Annotation is not in `[item, ...]` format: \"push\"".to_string(),
                "bad on-target-branch: Annotation list is empty: \"[]\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_match_error_is_a_one_line_summary() {
        let report = NoMatchReport {
            event_type: "pull_request".to_string(),
            base_branch: "main".to_string(),
            url: "https://github.com/acme/app".to_string(),
            candidates: vec![dispatch_core::CandidateSnapshot {
                candidate: "push-".to_string(),
                snapshot: Default::default(),
            }],
        };

        let err = no_match_error(&report);
        assert_eq!(
            err.to_string(),
            "no pipeline run matches pull_request on main (1 checked)"
        );
        assert!(!format!("{:?}", err).contains("NoMatchReport"));
    }

    #[test]
    fn test_build_resolver_prefers_repository_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("repos.yaml");
        std::fs::write(&path, "[]\n").unwrap();

        let config = MatcherConfig {
            resolver_url: Some("http://controller:8080".to_string()),
            ..Default::default()
        };
        assert!(build_resolver(&config, Some(&path)).is_ok());
        assert!(build_resolver(&config, Some(&dir.path().join("missing.yaml"))).is_err());
    }
}
