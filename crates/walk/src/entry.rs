/// Single entry discovered during a remote tree walk.
///
/// Transient: produced by the walker, consumed within one enumeration call,
/// never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteEntry {
    path: String,
    is_directory: bool,
}

impl RemoteEntry {
    /// Creates an entry from a full remote path and its classification.
    #[must_use]
    pub fn new(path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            path: path.into(),
            is_directory,
        }
    }

    /// Full remote path, `/`-joined from the walk root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Whether the entry was classified as a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Consumes the entry, returning its path.
    #[must_use]
    pub fn into_path(self) -> String {
        self.path
    }
}
