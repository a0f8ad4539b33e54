//! Error types for report discovery and configuration generation.
//!
//! Failures scoped to one file ([`ExtractionError`]) are absorbed by the walk;
//! failures scoped to the whole run ([`GenerateError`]) abort it.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::LoadError;

/// A single report-definition file could not be extracted.
#[derive(Debug, Error)]
#[error("failed to extract report '{}': {source}", path.display())]
pub struct ExtractionError {
    /// File that failed.
    pub path: PathBuf,
    /// Underlying loader failure.
    #[source]
    pub source: LoadError,
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Missing or unusable input/output locations, detected before any work.
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    /// The configuration artifact could not be serialized or written.
    #[error("failed to write configuration to '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// A configuration file could not be read or parsed.
    #[error("failed to read configuration from '{}': {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The extraction thread pool could not be started.
    #[error("failed to start extraction workers: {0}")]
    Workers(String),
}

impl GenerateError {
    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias for results with [`GenerateError`].
pub type Result<T> = std::result::Result<T, GenerateError>;
