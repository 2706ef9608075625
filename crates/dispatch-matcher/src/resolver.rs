//! In-memory Repository resolution.

use crate::event_matcher::EventMatcher;
use async_trait::async_trait;
use dispatch_core::ports::RepositoryResolver;
use dispatch_core::{Event, Repository, Result};
use std::path::Path;
use tracing::debug;

/// Whether `repository` is declared for the event's URL, type and branch.
pub fn repository_serves(repository: &Repository, event: &Event) -> bool {
    repository.spec.url == event.url
        && repository.spec.event_type == event.event_type
        && EventMatcher::new().branch_matches(&repository.spec.branch, &event.base_branch)
}

/// Resolves against a fixed list of Repository resources.
#[derive(Debug, Clone, Default)]
pub struct StaticRepositoryResolver {
    repositories: Vec<Repository>,
}

impl StaticRepositoryResolver {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self { repositories }
    }

    /// Load a YAML list of repositories.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let repositories: Vec<Repository> = serde_yaml::from_str(&contents)?;
        Ok(Self::new(repositories))
    }

    pub fn push(&mut self, repository: Repository) {
        self.repositories.push(repository);
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }
}

#[async_trait]
impl RepositoryResolver for StaticRepositoryResolver {
    async fn resolve(&self, namespace: &str, event: &Event) -> Result<Option<Repository>> {
        let found = self
            .repositories
            .iter()
            .find(|repo| repo.namespace == namespace && repository_serves(repo, event))
            .cloned();
        debug!(
            namespace = %namespace,
            found = found.is_some(),
            "Resolved repository from static list"
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::RepositorySpec;

    const URL: &str = "https://github.com/acme/app";

    fn resolver() -> StaticRepositoryResolver {
        StaticRepositoryResolver::new(vec![
            Repository::new("app-push", "ci", RepositorySpec::new(URL, "push", "main")),
            Repository::new(
                "app-pr",
                "ci",
                RepositorySpec::new(URL, "pull_request", "release-*"),
            ),
            Repository::new(
                "other",
                "ci",
                RepositorySpec::new("https://github.com/acme/other", "push", "main"),
            ),
        ])
    }

    fn resolve(namespace: &str, event: &Event) -> Option<Repository> {
        tokio_test::block_on(resolver().resolve(namespace, event)).unwrap()
    }

    #[test]
    fn test_resolves_by_url_event_and_branch() {
        let found = resolve("ci", &Event::new("push", "refs/heads/main").with_url(URL));
        assert_eq!(found.map(|r| r.name), Some("app-push".to_string()));

        let found = resolve("ci", &Event::new("pull_request", "release-2").with_url(URL));
        assert_eq!(found.map(|r| r.name), Some("app-pr".to_string()));
    }

    #[test]
    fn test_miss_is_not_an_error() {
        assert!(resolve("prod", &Event::new("push", "main").with_url(URL)).is_none());
        assert!(resolve("ci", &Event::new("push", "develop").with_url(URL)).is_none());
        assert!(resolve("ci", &Event::new("issue_comment", "main").with_url(URL)).is_none());
        assert!(resolve("ci", &Event::new("push", "main")).is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("repositories.yaml");
        std::fs::write(
            &path,
            "- name: app\n  namespace: ci\n  spec:\n    url: https://github.com/acme/app\n    \
             event_type: push\n    branch: main\n",
        )
        .expect("write");

        let resolver = StaticRepositoryResolver::from_file(&path).expect("load");
        assert_eq!(resolver.repositories().len(), 1);
        assert_eq!(resolver.repositories()[0].namespace, "ci");
    }
}
