use filters::ExclusionSet;
use tracing::trace;

use crate::entry::RemoteEntry;
use crate::source::{DirectoryProbe, NameSource};

/// Depth-first iterator over the entries of a remote tree.
///
/// Driven by an explicit stack of directory states instead of call-stack
/// recursion. Each stack frame holds one directory's filtered name list and
/// a cursor; descending into a child directory pushes a new frame, so the
/// child's subtree is exhausted before the parent's next name is visited.
pub struct Walker<S, P> {
    source: S,
    probe: P,
    exclusions: ExclusionSet,
    stack: Vec<DirectoryState>,
}

impl<S: NameSource, P: DirectoryProbe> Walker<S, P> {
    /// Starts a walk at `root`.
    ///
    /// The root's own entry is not part of the output; the walk yields its
    /// children, recursively. The root is listed eagerly so a walker over an
    /// empty or inaccessible root is immediately exhausted.
    pub fn new(root: impl Into<String>, source: S, probe: P, exclusions: ExclusionSet) -> Self {
        let mut walker = Self {
            source,
            probe,
            exclusions,
            stack: Vec::new(),
        };
        walker.push_directory(root.into());
        walker
    }

    fn push_directory(&mut self, path: String) {
        let names = self.exclusions.apply(self.source.names(&path));
        trace!("found {} entries under '{path}'", names.len());
        self.stack.push(DirectoryState::new(path, names));
    }
}

impl<S: NameSource, P: DirectoryProbe> Iterator for Walker<S, P> {
    type Item = RemoteEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let child = {
                let state = self.stack.last_mut()?;
                match state.next_name() {
                    Some(name) => join(&state.path, &name),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                }
            };

            let is_directory = self.probe.is_directory(&child);
            if is_directory {
                self.push_directory(child.clone());
            }
            return Some(RemoteEntry::new(child, is_directory));
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    path: String,
    names: Vec<String>,
    index: usize,
}

impl DirectoryState {
    fn new(path: String, names: Vec<String>) -> Self {
        Self {
            path,
            names,
            index: 0,
        }
    }

    fn next_name(&mut self) -> Option<String> {
        let name = self.names.get(self.index)?.clone();
        self.index += 1;
        Some(name)
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
