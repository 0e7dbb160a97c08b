/// Source of child names for a remote path.
///
/// Implemented by the transfer channel's listing operation. An inaccessible
/// path must be reported as empty, not as an error; the walker cannot and
/// does not distinguish the two.
pub trait NameSource {
    /// Returns the names under `path`, already in listing order.
    fn names(&mut self, path: &str) -> Vec<String>;
}

impl<F> NameSource for F
where
    F: FnMut(&str) -> Vec<String>,
{
    fn names(&mut self, path: &str) -> Vec<String> {
        self(path)
    }
}

/// Oracle deciding whether a remote path denotes a directory.
///
/// The listing response carries no directory marker, so classification is an
/// injected capability. A protocol-correct implementation might attempt a
/// CWD into the path or parse MLSD-style listing facts; tests answer from a
/// synthetic tree.
pub trait DirectoryProbe {
    /// Returns `true` when `path` denotes a directory.
    fn is_directory(&mut self, path: &str) -> bool;
}

impl<F> DirectoryProbe for F
where
    F: FnMut(&str) -> bool,
{
    fn is_directory(&mut self, path: &str) -> bool {
        self(path)
    }
}
