//! Dispatch Core
//!
//! Core domain types, traits, and error handling for pipeline dispatch.
//! Everything the matcher and its adapters exchange is defined here:
//! incoming events, candidate pipeline definitions with their annotations,
//! resolved repositories, and the diagnostics emitted while matching.

pub mod annotations;
pub mod candidate;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod events;
pub mod ports;
pub mod repository;
pub mod snapshot;

pub use annotations::{AnnotationKey, PipelineAnnotations};
pub use candidate::Candidate;
pub use config::MatcherConfig;
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use events::Event;
pub use repository::{Repository, RepositorySpec};
pub use snapshot::{CandidateSnapshot, ConfigSnapshot, NoMatchReport};
