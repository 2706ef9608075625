//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the match engine and the
//! controller that embeds it.

use crate::Result;
use crate::diagnostic::Diagnostic;
use crate::events::Event;
use crate::repository::Repository;
use async_trait::async_trait;
use std::sync::Arc;

/// Looks up the Repository resource a candidate targets.
///
/// Implementations may perform a remote round trip and are responsible for
/// their own timeouts. Dropping the returned future cancels the lookup.
#[async_trait]
pub trait RepositoryResolver: Send + Sync {
    /// Find the Repository in `namespace` that serves `event`.
    /// `Ok(None)` is an ordinary miss, not an error.
    async fn resolve(&self, namespace: &str, event: &Event) -> Result<Option<Repository>>;
}

#[async_trait]
impl<T: RepositoryResolver + ?Sized> RepositoryResolver for Arc<T> {
    async fn resolve(&self, namespace: &str, event: &Event) -> Result<Option<Repository>> {
        (**self).resolve(namespace, event).await
    }
}

/// Receives diagnostics for a single match call.
pub trait Diagnostics: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn emit(&self, _diagnostic: Diagnostic) {}
}
