//! Error types for the split-screen core

use std::path::PathBuf;

/// Error reported by a [`RenderHost`](crate::host::RenderHost) operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// The host could not provide the requested resource right now
    #[error("resource unavailable: {0}")]
    Unavailable(String),

    /// The surface handle does not refer to a live surface
    #[error("surface handle is no longer valid")]
    InvalidSurface,

    /// Backend-specific failure
    #[error("host backend failure: {0}")]
    Backend(String),
}

/// Error raised by a step of the per-tick pipeline.
///
/// These never escape [`SplitScreenController::tick`](crate::SplitScreenController::tick);
/// the controller converts them into a full merge back to a single view.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitScreenError {
    /// No primary surface exists and none could be created
    #[error("no primary rendering surface available")]
    NoPrimarySurface,

    /// A host operation failed in a way that cannot be recovered locally
    #[error("{operation} failed: {source}")]
    Host {
        /// Short name of the failing operation (e.g. "enable primary")
        operation: &'static str,
        /// Underlying host error
        #[source]
        source: HostError,
    },
}

impl SplitScreenError {
    /// Wrap a host error with the name of the operation that produced it
    pub fn host(operation: &'static str, source: HostError) -> Self {
        Self::Host { operation, source }
    }
}

/// Error loading or saving the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the config schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
