//! Error taxonomy for the indexing pipeline.
//!
//! Only [`ConfigError`] is fatal. The per-file kinds ([`ReadError`],
//! forwarding failures) are contained by the orchestrator and reported in the
//! run summary; classification never fails.

use std::path::PathBuf;

/// Missing or invalid settings at startup. No run is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Parse(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to write default configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// A file that was discovered could not be read (it vanished, or became
/// unreadable mid-run).
#[derive(Debug, thiserror::Error)]
#[error("failed to read {}: {source}", path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ReadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self { path: path.into(), source }
    }
}

/// Why a single file stopped contributing entries to a run.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("failed to forward batch from {}: {message}", path.display())]
    Forward { path: PathBuf, message: String },
}

impl FileError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::Read(e) => &e.path,
            FileError::Forward { path, .. } => path,
        }
    }

    /// The underlying error text, without the path prefix.
    pub fn detail(&self) -> String {
        match self {
            FileError::Read(e) => e.source.to_string(),
            FileError::Forward { message, .. } => message.clone(),
        }
    }
}
