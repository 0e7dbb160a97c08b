use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// Failure raised by a channel operation.
///
/// Every variant except [`ChannelError::Config`] reaches the caller after
/// being logged; `Config` is raised before any transport invocation and is
/// never retried.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Host, user, or password was empty or whitespace-only.
    ///
    /// Raised before any network attempt. The named field is the first one
    /// that failed validation.
    #[error("ftp account has an empty {field}; no network operation attempted")]
    Config {
        /// Identity field that failed validation.
        field: &'static str,
    },

    /// The transport could not construct or complete a request.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A local file could not be opened, created, or inspected.
    #[error("failed to open local file '{}': {source}", path.display())]
    Local {
        /// Local path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O failure while streaming a transfer body in either direction.
    ///
    /// A failed upload leaves the remote state unknown; no partial-file
    /// cleanup is attempted.
    #[error("transfer failed for '{path}': {source}")]
    Stream {
        /// Remote path of the transfer.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ChannelError {
    pub(crate) fn local(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Local {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn stream(path: impl Into<String>, source: io::Error) -> Self {
        Self::Stream {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for configuration failures that preceded any network
    /// attempt.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}
