use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chunker::{ChunkReader, copy_chunked};
use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::identity::ServerIdentity;
use crate::transport::{FtpTransport, RequestTarget, TransferVerb};

/// Blocking transfer channel against one server identity.
///
/// The channel owns a mutable `current_path` used to scope transfer
/// operations; listing calls take an explicit path instead, so a tree walk
/// never has to mutate channel state between levels. Because the path can be
/// repointed at any time, every operation independently re-validates the
/// credentials and opens a fresh request; nothing is cached across calls.
#[derive(Debug)]
pub struct FtpChannel<T> {
    identity: ServerIdentity,
    current_path: String,
    transport: T,
}

impl<T: FtpTransport> FtpChannel<T> {
    /// Binds an identity to a transport. The current path starts at the
    /// server root.
    pub fn new(identity: ServerIdentity, transport: T) -> Self {
        Self {
            identity,
            current_path: String::new(),
            transport,
        }
    }

    /// The configured server identity.
    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Current remote path used to scope transfer operations.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Repoints the current path. Pure mutation; no network effect until the
    /// next operation.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    /// Uploads the local file at `local_path` under `remote_name`, scoped to
    /// the current path. Returns the number of bytes streamed.
    ///
    /// A failure mid-stream leaves the remote state unknown; no cleanup is
    /// attempted.
    pub fn upload(&self, local_path: &Path, remote_name: &str) -> Result<u64, ChannelError> {
        let result = self.upload_inner(local_path, remote_name);
        if let Err(error) = &result {
            warn!("upload of '{}' failed: {error}", local_path.display());
        }
        result
    }

    fn upload_inner(&self, local_path: &Path, remote_name: &str) -> Result<u64, ChannelError> {
        self.identity.validate()?;
        let mut file =
            File::open(local_path).map_err(|source| ChannelError::local(local_path, source))?;
        let length = file
            .metadata()
            .map_err(|source| ChannelError::local(local_path, source))?
            .len();

        let remote_path = self.scoped(remote_name);
        let mut body = self
            .transport
            .open_write(&self.target(&remote_path), length)?;
        let written = copy_chunked(&mut file, &mut *body)
            .map_err(|source| ChannelError::stream(&remote_path, source))?;
        body.flush()
            .map_err(|source| ChannelError::stream(&remote_path, source))?;
        debug!("uploaded {written} bytes to '{remote_path}'");
        Ok(written)
    }

    /// Downloads `remote_name` (scoped to the current path) into a
    /// created-or-truncated local file. Returns the number of bytes written.
    ///
    /// The local file is created and truncated before the remote request is
    /// issued, so a download that fails at the remote end leaves an empty
    /// local file rather than stale bytes from a previous run.
    pub fn download(&self, remote_name: &str, local_path: &Path) -> Result<u64, ChannelError> {
        let result = self.download_inner(remote_name, local_path);
        if let Err(error) = &result {
            warn!("download of '{remote_name}' failed: {error}");
        }
        result
    }

    fn download_inner(&self, remote_name: &str, local_path: &Path) -> Result<u64, ChannelError> {
        self.identity.validate()?;
        let remote_path = self.scoped(remote_name);
        let mut file =
            File::create(local_path).map_err(|source| ChannelError::local(local_path, source))?;
        let mut body = self
            .transport
            .open_read(&self.target(&remote_path), TransferVerb::Retrieve)?;
        let written = copy_chunked(&mut *body, &mut file)
            .map_err(|source| ChannelError::stream(&remote_path, source))?;
        debug!("downloaded {written} bytes from '{remote_path}'");
        Ok(written)
    }

    /// Reads `remote_name` (scoped to the current path) into memory as a
    /// sequence of fixed-size chunks.
    ///
    /// Lower-level sibling of [`FtpChannel::download`] for callers that need
    /// the bytes in memory rather than written to a local file. Each chunk is
    /// a freshly allocated copy.
    pub fn read_chunks(&self, remote_name: &str) -> Result<Vec<Vec<u8>>, ChannelError> {
        let result = self.read_chunks_inner(remote_name);
        if let Err(error) = &result {
            warn!("chunked read of '{remote_name}' failed: {error}");
        }
        result
    }

    fn read_chunks_inner(&self, remote_name: &str) -> Result<Vec<Vec<u8>>, ChannelError> {
        self.identity.validate()?;
        let remote_path = self.scoped(remote_name);
        let body = self
            .transport
            .open_read(&self.target(&remote_path), TransferVerb::Retrieve)?;
        let mut chunks = Vec::new();
        for chunk in ChunkReader::new(body) {
            chunks.push(chunk.map_err(|source| ChannelError::stream(&remote_path, source))?);
        }
        Ok(chunks)
    }

    /// Lists the names under `path` as the non-empty lines of a UTF-8
    /// listing response.
    ///
    /// This is the one operation that swallows its failures: an inaccessible
    /// directory is reported as "no files", exactly like an empty one. The
    /// failure is still logged. The tree walker relies on this asymmetry to
    /// treat listing failure as "no children" instead of aborting the walk.
    pub fn list(&self, path: &str) -> Vec<String> {
        match self.list_inner(path) {
            Ok(names) => names,
            Err(error) => {
                warn!("listing of '{path}' failed, treating as empty: {error}");
                Vec::new()
            }
        }
    }

    fn list_inner(&self, path: &str) -> Result<Vec<String>, ChannelError> {
        self.identity.validate()?;
        let body = self
            .transport
            .open_read(&self.target(path), TransferVerb::List)?;
        let mut names = Vec::new();
        for line in BufReader::new(body).lines() {
            let line = line.map_err(|source| ChannelError::stream(path, source))?;
            let name = line.trim_end_matches('\r');
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Removes `remote_name` (scoped to the current path) from the server.
    pub fn delete(&self, remote_name: &str) -> Result<(), ChannelError> {
        let result = self.delete_inner(remote_name);
        if let Err(error) = &result {
            warn!("delete of '{remote_name}' failed: {error}");
        }
        result
    }

    fn delete_inner(&self, remote_name: &str) -> Result<(), ChannelError> {
        self.identity.validate()?;
        let remote_path = self.scoped(remote_name);
        self.transport.delete(&self.target(&remote_path))?;
        debug!("deleted '{remote_path}'");
        Ok(())
    }

    /// Joins a name onto the current path.
    fn scoped(&self, name: &str) -> String {
        if self.current_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.current_path)
        }
    }

    fn target<'a>(&'a self, path: &'a str) -> RequestTarget<'a> {
        RequestTarget {
            host: self.identity.host(),
            user: self.identity.user(),
            password: self.identity.password(),
            path,
        }
    }
}
