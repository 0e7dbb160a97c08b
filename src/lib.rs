#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `ftpc` is a client facade for enumerating, uploading, downloading, and
//! deleting files against a single remote FTP server. The hard part lives in
//! the member crates: recursive directory discovery over a listing format
//! with no directory marker ([`walk`]), exclusion filtering ([`filters`]),
//! and fixed-size chunked streaming with a byte-exact end-of-stream policy
//! ([`chunker`]), all driven through a blocking transfer channel
//! ([`channel`]).
//!
//! The wire-level FTP exchange is not implemented here: callers supply an
//! [`FtpTransport`] for the control/data connections and a
//! [`DirectoryProbe`] for directory classification. Everything is
//! single-threaded, synchronous, and blocking; there is no cancellation and
//! no retry.
//!
//! # Examples
//!
//! ```
//! use ftpc::{FtpClient, ServerIdentity};
//! use test_support::MemoryTransport;
//!
//! let transport = MemoryTransport::new();
//! transport.add_file("pub/notes.txt", b"hello".to_vec());
//!
//! let probe = transport.probe();
//! let identity = ServerIdentity::new("ftp.example.net", "archive", "secret");
//! let mut client = FtpClient::new(identity, transport, probe);
//!
//! client.set_path("pub");
//! let entries = client.list_tree();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].path(), "pub/notes.txt");
//! assert!(!entries[0].is_directory());
//! ```

mod client;
pub mod config;

pub use channel::{
    ChannelError, FtpChannel, FtpTransport, RequestTarget, ServerIdentity, TransferVerb,
    TransportError,
};
pub use chunker::{ChunkReader, READ_LENGTH, copy_chunked};
pub use client::FtpClient;
pub use config::{ClientConfig, ConfigFileError};
pub use filters::ExclusionSet;
pub use walk::{DirectoryProbe, NameSource, RemoteEntry, Walker};
