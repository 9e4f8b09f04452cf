//! Unified error types for the cideploy workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Fewer availability zones are available than a directive requested.
    #[error(
        "requested {requested} availability zone(s) but only {available} available in region {region}"
    )]
    InsufficientCapacity {
        /// Number of zones the directive asked for.
        requested: usize,
        /// Number of zones the region reported.
        available: usize,
        /// Region the zones were listed in.
        region: String,
    },

    /// A shelled-out command exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ExternalTool {
        /// Name of the tool that failed.
        tool: String,
        /// Raw error text reported by the tool.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A package archive could not be read or unpacked.
    #[error("archive error in {path}: {message}")]
    Archive {
        /// Archive being processed.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// A configuration value or input document is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl DeployError {
    /// Builds an [`DeployError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DeployError>;
