use std::fmt;
use std::io::{self, Read, Write};

use thiserror::Error;

/// Verb issued against a remote path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferVerb {
    /// Read a newline-delimited directory listing.
    List,
    /// Read a file's bytes.
    Retrieve,
    /// Write a file's bytes.
    Store,
    /// Remove a file.
    Delete,
}

impl TransferVerb {
    /// Lowercase protocol-style name of the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Store => "store",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TransferVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved target of one transport request.
///
/// Borrowed from the channel for the duration of a single call; the
/// transport must not hold on to it.
#[derive(Clone, Copy, Debug)]
pub struct RequestTarget<'a> {
    /// Server host or address.
    pub host: &'a str,
    /// Account name.
    pub user: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Remote path the verb applies to, `/`-joined, relative to the server
    /// root.
    pub path: &'a str,
}

/// Wire-level FTP exchange, supplied by the embedding application.
///
/// Implementations open control and data connections, authenticate with the
/// credentials in the [`RequestTarget`], and issue the LIST/RETR/STOR/DELE
/// commands. The channel assumes UTF-8-capable listing responses and binary
/// data streams; connection mode negotiation is the transport's business.
pub trait FtpTransport {
    /// Opens a readable stream for [`TransferVerb::List`] or
    /// [`TransferVerb::Retrieve`].
    fn open_read(
        &self,
        target: &RequestTarget<'_>,
        verb: TransferVerb,
    ) -> Result<Box<dyn Read>, TransportError>;

    /// Opens a writable stream for [`TransferVerb::Store`], announcing the
    /// content length up front.
    fn open_write(
        &self,
        target: &RequestTarget<'_>,
        content_length: u64,
    ) -> Result<Box<dyn Write>, TransportError>;

    /// Removes the remote file named by the target.
    fn delete(&self, target: &RequestTarget<'_>) -> Result<(), TransportError>;
}

/// Failure raised by the transport primitive.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request object could not be constructed for the path.
    ///
    /// Raised before any bytes move; the remote state is unchanged.
    #[error("failed to establish {verb} request for '{path}'")]
    Request {
        /// Remote path the request was aimed at.
        path: String,
        /// Verb that could not be established.
        verb: TransferVerb,
    },

    /// I/O failure on an established connection or stream.
    #[error("transport failure on '{path}': {source}")]
    Io {
        /// Remote path the stream belonged to.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// Convenience constructor for [`TransportError::Request`].
    #[must_use]
    pub fn request(path: impl Into<String>, verb: TransferVerb) -> Self {
        Self::Request {
            path: path.into(),
            verb,
        }
    }

    /// Convenience constructor for [`TransportError::Io`].
    #[must_use]
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
