//! Analyzer gateway abstraction for pluggable entry sources
//!
//! The completion source never talks to the analyzer process directly. It goes
//! through [`AnalyzerGateway`], so tests can substitute an in-memory gateway.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::completion::rules::CategorySet;
use crate::models::StructuredEntry;

/// Common interface for all analyzer backends
pub trait AnalyzerGateway: Send + Sync {
    /// Fetch entries of the requested categories for the given document.
    ///
    /// Called at most once per completion request, never with an empty set.
    fn fetch(
        &self,
        categories: &CategorySet,
        document: &Path,
    ) -> Result<Vec<StructuredEntry>, AnalyzerError>;

    /// Get a human-readable name for this backend (for logging/debugging)
    fn backend_name(&self) -> &'static str;
}

/// Failures reported by an analyzer backend
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("no analyzer executable configured")]
    NotConfigured,

    #[error("failed to run analyzer {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("analyzer exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },

    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("analyzer output is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("malformed analyzer output: {0}")]
    Parse(#[from] serde_json::Error),
}
