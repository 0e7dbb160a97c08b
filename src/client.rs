use std::path::Path;

use channel::{ChannelError, FtpChannel, FtpTransport, ServerIdentity};
use filters::ExclusionSet;
use walk::{DirectoryProbe, RemoteEntry, Walker};

/// Client facade over one server identity.
///
/// Owns the transfer channel, the configured exclusions, the injected
/// directory classification probe, and the last-computed entry sequence.
/// Single-threaded use only: the current path is unsynchronized mutable
/// state, so concurrent calls on one client are outside the contract.
pub struct FtpClient<T> {
    channel: FtpChannel<T>,
    exclusions: ExclusionSet,
    probe: Box<dyn DirectoryProbe>,
    entries: Vec<RemoteEntry>,
}

impl<T: FtpTransport> FtpClient<T> {
    /// Creates a client from an identity, a transport, and a directory
    /// classification probe.
    pub fn new(
        identity: ServerIdentity,
        transport: T,
        probe: impl DirectoryProbe + 'static,
    ) -> Self {
        Self {
            channel: FtpChannel::new(identity, transport),
            exclusions: ExclusionSet::new(),
            probe: Box::new(probe),
            entries: Vec::new(),
        }
    }

    /// Replaces the configured exclusion set.
    pub fn set_exclusions(&mut self, exclusions: ExclusionSet) {
        self.exclusions = exclusions;
    }

    /// The configured exclusion set.
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Repoints the current remote path used to scope listings and
    /// transfers. Pure mutation; no network effect until the next operation.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.channel.set_path(path);
    }

    /// Current remote path.
    pub fn current_path(&self) -> &str {
        self.channel.current_path()
    }

    /// Borrows the underlying channel for lower-level operations such as
    /// [`FtpChannel::read_chunks`].
    pub fn channel(&self) -> &FtpChannel<T> {
        &self.channel
    }

    /// The entry sequence computed by the most recent listing call.
    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    /// Lists one level at the current path, classifies each surviving name,
    /// and materializes the result eagerly.
    ///
    /// An inaccessible current path produces an empty level, exactly like an
    /// empty directory.
    pub fn list_level(&mut self) -> &[RemoteEntry] {
        let current = self.channel.current_path().to_string();
        let names = self.exclusions.apply(self.channel.list(&current));
        let mut level = Vec::with_capacity(names.len());
        for name in names {
            let path = if current.is_empty() {
                name
            } else {
                format!("{current}/{name}")
            };
            let is_directory = self.probe.is_directory(&path);
            level.push(RemoteEntry::new(path, is_directory));
        }
        self.entries = level;
        &self.entries
    }

    /// Walks the entire tree below the current path and materializes it
    /// eagerly, dropping any entry with an empty name.
    ///
    /// Ordering follows the walker: each directory's entry precedes its
    /// descendants and sibling subtrees are expanded in listing order.
    pub fn list_tree(&mut self) -> &[RemoteEntry] {
        let root = self.channel.current_path().to_string();
        let channel = &self.channel;
        let probe = &mut self.probe;
        let entries: Vec<RemoteEntry> = Walker::new(
            root,
            |path: &str| channel.list(path),
            |path: &str| probe.is_directory(path),
            self.exclusions.clone(),
        )
        .filter(|entry| !entry.file_name().is_empty())
        .collect();
        self.entries = entries;
        &self.entries
    }

    /// Uploads a local file under `remote_name`, scoped to the current path.
    pub fn upload(&self, local_path: &Path, remote_name: &str) -> Result<u64, ChannelError> {
        self.channel.upload(local_path, remote_name)
    }

    /// Downloads `remote_name` (scoped to the current path) into a local
    /// file.
    pub fn download(&self, remote_name: &str, local_path: &Path) -> Result<u64, ChannelError> {
        self.channel.download(remote_name, local_path)
    }

    /// Removes `remote_name` (scoped to the current path) from the server.
    pub fn delete(&self, remote_name: &str) -> Result<(), ChannelError> {
        self.channel.delete(remote_name)
    }
}
