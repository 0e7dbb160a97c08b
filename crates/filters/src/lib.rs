#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` prunes configured names out of raw remote listings. Matching is
//! an exact string comparison: no globbing, no case folding, no path
//! normalization. The caller configures an [`ExclusionSet`] once per client
//! session and every listing passes through it before classification or
//! recursion happens.
//!
//! # Invariants
//!
//! - An empty set, or an empty listing, passes through unchanged.
//! - Filtering is a pure set difference: no name is ever added, and surviving
//!   names keep the order the listing source produced. Listings arrive in
//!   server-native collation order, which for non-ASCII names is not
//!   lexicographic, so no ordering is imposed here.
//!
//! # Examples
//!
//! ```
//! use filters::ExclusionSet;
//!
//! let excluded: ExclusionSet = ["tmp", "lost+found"].into_iter().collect();
//! let names = vec!["data".to_string(), "tmp".to_string(), "logs".to_string()];
//! assert_eq!(excluded.apply(names), vec!["data", "logs"]);
//! ```

use std::collections::HashSet;

/// Set of literal names excluded from remote listings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name to the set. Returns `false` if it was already present.
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.names.insert(name.into())
    }

    /// Returns `true` when no names are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of configured names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when `name` is excluded (exact match).
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Removes excluded names from a listing.
    ///
    /// Returns `names` unchanged when either side is empty; otherwise the set
    /// difference, preserving the listing's original order.
    #[must_use]
    pub fn apply(&self, names: Vec<String>) -> Vec<String> {
        if self.names.is_empty() || names.is_empty() {
            return names;
        }
        names
            .into_iter()
            .filter(|name| !self.names.contains(name))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_set_is_identity() {
        let set = ExclusionSet::new();
        let names = listing(&["b", "a", "c"]);
        assert_eq!(set.apply(names.clone()), names);
    }

    #[test]
    fn empty_listing_stays_empty() {
        let set: ExclusionSet = ["a"].into_iter().collect();
        assert!(set.apply(Vec::new()).is_empty());
    }

    #[test]
    fn removes_only_exact_matches() {
        let set: ExclusionSet = ["tmp", "cache"].into_iter().collect();
        let survivors = set.apply(listing(&["tmp", "tmpfile", "data", "cache", "Cache"]));
        assert_eq!(survivors, listing(&["tmpfile", "data", "Cache"]));
    }

    #[test]
    fn preserves_listing_order() {
        // Server-native collation: deliberately not lexicographic.
        let set: ExclusionSet = ["x"].into_iter().collect();
        let survivors = set.apply(listing(&["zeta", "x", "alpha", "mu"]));
        assert_eq!(survivors, listing(&["zeta", "alpha", "mu"]));
    }

    #[test]
    fn never_adds_names() {
        let set: ExclusionSet = ["a", "b"].into_iter().collect();
        let input = listing(&["a", "c"]);
        let survivors = set.apply(input.clone());
        assert!(survivors.iter().all(|name| input.contains(name)));
    }

    #[test]
    fn excludes_reports_membership() {
        let mut set = ExclusionSet::new();
        assert!(set.insert("node_modules"));
        assert!(!set.insert("node_modules"));
        assert!(set.excludes("node_modules"));
        assert!(!set.excludes("src"));
        assert_eq!(set.len(), 1);
    }
}
