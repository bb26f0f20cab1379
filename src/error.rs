use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cppfuse operations
#[derive(Error, Debug)]
pub enum FuseError {
    /// A file transitively includes itself
    #[error("Circular dependency detected: {path}")]
    CyclicInclusion { path: PathBuf },

    /// Input path doesn't exist or isn't a regular file
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A resolved file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error when writing output or canonicalizing paths
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FuseError>;
