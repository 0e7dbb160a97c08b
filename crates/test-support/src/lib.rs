#![deny(unsafe_code)]

//! In-memory FTP transport double shared by the workspace test suites.
//!
//! [`MemoryTransport`] implements [`FtpTransport`] over a synthetic remote
//! tree held in memory. It counts every transport invocation per verb so
//! credential-validation tests can assert that no network call was observable,
//! and supports failure injection per path for exercising the error paths.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use channel::{FtpTransport, RequestTarget, TransferVerb, TransportError};

/// Per-verb invocation counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Calls {
    /// Listing requests opened.
    pub list: usize,
    /// Retrieve requests opened.
    pub retrieve: usize,
    /// Store requests opened.
    pub store: usize,
    /// Delete requests issued.
    pub delete: usize,
}

impl Calls {
    /// Total number of transport invocations of any kind.
    #[must_use]
    pub fn total(&self) -> usize {
        self.list + self.retrieve + self.store + self.delete
    }
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    failing: BTreeSet<String>,
    broken_streams: BTreeSet<String>,
    calls: Calls,
}

impl Inner {
    fn children(&self, path: &str) -> Vec<String> {
        let mut names = BTreeSet::new();
        for candidate in self.files.keys().chain(self.dirs.iter()) {
            let (parent, name) = split_parent(candidate);
            if parent == path && !name.is_empty() {
                names.insert(name.to_string());
            }
        }
        names.into_iter().collect()
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(|&(_, c)| c == '/')
        .map(move |(i, _)| &path[..i])
}

/// In-memory [`FtpTransport`] implementation backed by a synthetic tree.
///
/// Cloning shares the underlying tree and counters.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryTransport {
    /// Creates an empty remote tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory transport poisoned")
    }

    /// Registers a directory, creating missing ancestors.
    pub fn add_dir(&self, path: &str) {
        let mut inner = self.lock();
        for ancestor in ancestors(path) {
            if !ancestor.is_empty() {
                inner.dirs.insert(ancestor.to_string());
            }
        }
        inner.dirs.insert(path.to_string());
    }

    /// Stores a file, creating missing ancestor directories.
    pub fn add_file(&self, path: &str, contents: impl Into<Vec<u8>>) {
        let mut inner = self.lock();
        for ancestor in ancestors(path) {
            if !ancestor.is_empty() {
                inner.dirs.insert(ancestor.to_string());
            }
        }
        inner.files.insert(path.to_string(), contents.into());
    }

    /// Makes every request against `path` fail at construction time.
    pub fn fail_path(&self, path: &str) {
        self.lock().failing.insert(path.to_string());
    }

    /// Makes reads of `path` succeed at request time but fail mid-stream.
    pub fn break_stream(&self, path: &str) {
        self.lock().broken_streams.insert(path.to_string());
    }

    /// Snapshot of the per-verb invocation counters.
    #[must_use]
    pub fn calls(&self) -> Calls {
        self.lock().calls
    }

    /// Contents of a stored file, if present.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// Whether `path` is a registered directory.
    #[must_use]
    pub fn is_directory(&self, path: &str) -> bool {
        self.lock().dirs.contains(path)
    }

    /// Directory probe closure over this tree, for injecting into a walker
    /// or facade.
    #[must_use]
    pub fn probe(&self) -> impl FnMut(&str) -> bool + 'static {
        let transport = self.clone();
        move |path: &str| transport.is_directory(path)
    }

    fn check_failing(&self, path: &str, verb: TransferVerb) -> Result<(), TransportError> {
        if self.lock().failing.contains(path) {
            return Err(TransportError::request(path, verb));
        }
        Ok(())
    }
}

impl FtpTransport for MemoryTransport {
    fn open_read(
        &self,
        target: &RequestTarget<'_>,
        verb: TransferVerb,
    ) -> Result<Box<dyn Read>, TransportError> {
        {
            let mut inner = self.lock();
            match verb {
                TransferVerb::List => inner.calls.list += 1,
                _ => inner.calls.retrieve += 1,
            }
        }
        self.check_failing(target.path, verb)?;
        if self.lock().broken_streams.contains(target.path) {
            return Ok(Box::new(BrokenStream));
        }
        match verb {
            TransferVerb::List => {
                let inner = self.lock();
                if !target.path.is_empty() && !inner.dirs.contains(target.path) {
                    return Err(TransportError::request(target.path, verb));
                }
                let mut body = String::new();
                for name in inner.children(target.path) {
                    body.push_str(&name);
                    body.push_str("\r\n");
                }
                Ok(Box::new(Cursor::new(body.into_bytes())))
            }
            _ => {
                let inner = self.lock();
                let contents = inner
                    .files
                    .get(target.path)
                    .cloned()
                    .ok_or_else(|| TransportError::request(target.path, verb))?;
                Ok(Box::new(Cursor::new(contents)))
            }
        }
    }

    fn open_write(
        &self,
        target: &RequestTarget<'_>,
        _content_length: u64,
    ) -> Result<Box<dyn Write>, TransportError> {
        self.lock().calls.store += 1;
        self.check_failing(target.path, TransferVerb::Store)?;
        Ok(Box::new(StoreBody {
            path: target.path.to_string(),
            buf: Vec::new(),
            inner: Arc::clone(&self.inner),
        }))
    }

    fn delete(&self, target: &RequestTarget<'_>) -> Result<(), TransportError> {
        self.lock().calls.delete += 1;
        self.check_failing(target.path, TransferVerb::Delete)?;
        let mut inner = self.lock();
        if inner.files.remove(target.path).is_none() {
            return Err(TransportError::request(target.path, TransferVerb::Delete));
        }
        Ok(())
    }
}

/// Write body that commits into the tree when dropped.
struct StoreBody {
    path: String,
    buf: Vec<u8>,
    inner: Arc<Mutex<Inner>>,
}

impl Write for StoreBody {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for StoreBody {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().expect("memory transport poisoned");
        for ancestor in ancestors(&self.path) {
            if !ancestor.is_empty() {
                inner.dirs.insert(ancestor.to_string());
            }
        }
        inner
            .files
            .insert(std::mem::take(&mut self.path), std::mem::take(&mut self.buf));
    }
}

/// Reader that fails on the first read, simulating a dropped data connection.
struct BrokenStream;

impl Read for BrokenStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "data connection reset",
        ))
    }
}
