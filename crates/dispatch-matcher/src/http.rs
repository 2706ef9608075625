//! Repository resolution over HTTP.

use crate::resolver::repository_serves;
use async_trait::async_trait;
use dispatch_core::ports::RepositoryResolver;
use dispatch_core::{Error, Event, MatcherConfig, Repository, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Lists repositories from `GET {base}/namespaces/{ns}/repositories`.
pub struct HttpRepositoryResolver {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRepositoryResolver {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Resolver(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Build a resolver from `resolver_url`, `resolver_token` and the timeout.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let url = config
            .resolver_url
            .as_deref()
            .ok_or_else(|| Error::Config("resolver_url is not set".to_string()))?;
        let resolver = Self::new(url, config.resolver_timeout())?;
        Ok(match &config.resolver_token {
            Some(token) => resolver.with_token(token.clone()),
            None => resolver,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        req
    }

    /// List the namespace's repositories; `None` when the namespace is unknown.
    ///
    /// Names that are not DNS-1123 labels never reach the API.
    pub async fn list(&self, namespace: &str) -> Result<Option<Vec<Repository>>> {
        if !is_namespace_name(namespace) {
            debug!(namespace = %namespace, "Rejected invalid namespace name");
            return Ok(None);
        }

        let res = self
            .request(&format!("/namespaces/{}/repositories", namespace))
            .send()
            .await
            .map_err(|e| Error::Resolver(e.to_string()))?;

        match res.status() {
            StatusCode::OK => res
                .json::<Vec<Repository>>()
                .await
                .map(Some)
                .map_err(|e| Error::Resolver(e.to_string())),
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Resolver(format!(
                "access to repositories in {} denied",
                namespace
            ))),
            status => Err(Error::Resolver(format!("unexpected status {}", status))),
        }
    }
}

#[async_trait]
impl RepositoryResolver for HttpRepositoryResolver {
    async fn resolve(&self, namespace: &str, event: &Event) -> Result<Option<Repository>> {
        let Some(repositories) = self.list(namespace).await? else {
            debug!(namespace = %namespace, "Namespace not found");
            return Ok(None);
        };
        Ok(repositories.into_iter().find(|repo| {
            (repo.namespace.is_empty() || repo.namespace == namespace)
                && repository_serves(repo, event)
        }))
    }
}

/// Whether `name` is a DNS-1123 label: at most 63 characters of lowercase
/// alphanumerics and `-`, starting and ending with an alphanumeric.
pub fn is_namespace_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= 63
                && alnum(first)
                && alnum(last)
                && bytes.iter().all(|b| alnum(b) || *b == b'-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_names() {
        assert!(is_namespace_name("acme-ci"));
        assert!(is_namespace_name("a"));
        assert!(is_namespace_name(&"n".repeat(63)));

        for name in [
            "",
            "a/../b",
            "..",
            "ci?watch=true",
            "ci#frag",
            "Acme",
            "-ci",
            "ci-",
            "ci.prod",
            "ci%2Fprod",
        ] {
            assert!(!is_namespace_name(name), "expected {name:?} to be rejected");
        }
        assert!(!is_namespace_name(&"n".repeat(64)));
    }
}
