#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` expands a remote root path into a flattened sequence of
//! [`RemoteEntry`] values. The FTP listing response used here carries bare
//! names with no directory marker, so the walker combines two injected
//! capabilities: a [`NameSource`] that lists the children of a path (the
//! transfer channel's swallowed-error listing) and a [`DirectoryProbe`] that
//! classifies a path as directory or file. Both traits have blanket
//! implementations for closures so tests and callers can inject behavior
//! without adapter types.
//!
//! # Design
//!
//! - [`Walker`] implements [`Iterator`] and yields entries lazily in
//!   depth-first order. Recursion is driven by an explicit work stack rather
//!   than the call stack, so arbitrarily deep trees cannot overflow.
//! - Each listed name is filtered through an [`ExclusionSet`] before
//!   classification; an excluded directory is neither yielded nor descended
//!   into.
//! - An empty listing is the base case of the walk. The name source reports
//!   an inaccessible directory as empty too, by design, so a listing failure
//!   prunes one subtree instead of aborting the walk.
//!
//! # Invariants
//!
//! - The root itself is never yielded; only its children, recursively.
//! - A directory's entry precedes every one of its descendants, and a
//!   sibling's entire subtree is exhausted before the next sibling begins.
//! - Child paths are `/`-joined onto the path they were listed under; names
//!   keep the listing source's order. No cycle detection is performed: the
//!   remote tree is assumed acyclic, as on conventional filesystems.
//!
//! # Examples
//!
//! ```
//! use filters::ExclusionSet;
//! use std::collections::HashMap;
//! use walk::Walker;
//!
//! let mut tree = HashMap::new();
//! tree.insert("pub".to_string(), vec!["a.txt".to_string(), "sub".to_string()]);
//! tree.insert("pub/sub".to_string(), vec!["b.txt".to_string()]);
//!
//! let source = |path: &str| tree.get(path).cloned().unwrap_or_default();
//! let probe = |path: &str| tree.contains_key(path);
//! let paths: Vec<String> = Walker::new("pub", source, probe, ExclusionSet::new())
//!     .map(walk::RemoteEntry::into_path)
//!     .collect();
//! assert_eq!(paths, ["pub/a.txt", "pub/sub", "pub/sub/b.txt"]);
//! ```

mod entry;
mod source;
mod walker;

pub use entry::RemoteEntry;
pub use source::{DirectoryProbe, NameSource};
pub use walker::Walker;
