//! Event to pipeline matching for pipeline dispatch.
//!
//! Given an incoming event and the ordered pipeline definitions discovered
//! for a repository, [`MatchEngine`] selects the single definition to run
//! and resolves the namespace it runs in.

pub mod diagnostics;
pub mod engine;
pub mod event_matcher;
pub mod glob;
pub mod http;
pub mod parser;
pub mod resolver;

pub use diagnostics::{RecordingDiagnostics, TracingDiagnostics};
pub use engine::{MatchEngine, MatchOutcome};
pub use event_matcher::{EventMatcher, MatchMode};
pub use http::HttpRepositoryResolver;
pub use parser::parse_list;
pub use resolver::StaticRepositoryResolver;
