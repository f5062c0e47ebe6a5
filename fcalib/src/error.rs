//! Error types for fcalib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an analysis run before or outside traversal.
///
/// Per-item failures (an unlistable directory, an unreadable file, a single
/// malformed name pattern) never surface here; they are skipped and recorded
/// in the corresponding result.
#[derive(Error, Debug)]
pub enum FcaError {
    /// Root path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Root path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Configuration file exists but could not be read
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration could not be serialized or deserialized
    #[error("invalid config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Failed to read an input list or other auxiliary file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
