#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `channel` is the blocking transfer layer of the ftpc workspace. An
//! [`FtpChannel`] binds one immutable [`ServerIdentity`] to an
//! [`FtpTransport`] implementation and exposes single-call operations:
//! upload, download, in-memory chunked reads, line-oriented listings, and
//! deletes. The wire-level FTP exchange itself lives behind the
//! [`FtpTransport`] trait and is supplied by the embedding application.
//!
//! # Design
//!
//! - Every operation re-validates the credentials before touching the
//!   transport. The channel's `current_path` is a plain mutable field that
//!   may be repointed between calls, so no connection state is cached or
//!   reused across operations.
//! - Transfers stream through the fixed-size codec in [`chunker`]; the
//!   channel never buffers a whole file unless the caller asked for chunks
//!   in memory via [`FtpChannel::read_chunks`].
//! - Failures are logged through [`tracing`] and propagated, with one
//!   deliberate exception: a failed listing collapses to an empty listing.
//!   Callers treat an empty directory and an inaccessible directory
//!   identically at this layer, and the tree walker depends on that.
//!
//! # Errors
//!
//! [`ChannelError`] distinguishes configuration failures (raised before any
//! network attempt), transport failures (request construction or wire I/O),
//! local file failures, and mid-stream transfer failures. No operation
//! retries; retry policy belongs to the caller.

mod channel;
mod error;
mod identity;
mod transport;

pub use channel::FtpChannel;
pub use error::ChannelError;
pub use identity::ServerIdentity;
pub use transport::{FtpTransport, RequestTarget, TransferVerb, TransportError};
