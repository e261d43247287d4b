//! Visited set for the state on the current depth-first path.
//!
//! [`PathSet::enter`] adds a state and returns a guard that removes it when
//! dropped, so a state leaves the set on every exit from its frame: normal
//! return, early return on success, or a halt unwinding through `?`.
//! Siblings therefore never inherit exclusions that belong to another branch.

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashSet;

use crate::cube::StateKey;

#[derive(Default)]
pub(crate) struct PathSet {
    keys: FxHashSet<StateKey>,
}

impl PathSet {
    /// Marks `key` as on the path, or returns `None` if it already is.
    pub(crate) fn enter(&mut self, key: StateKey) -> Option<PathEntry<'_>> {
        if self.keys.insert(key) {
            Some(PathEntry { set: self, key })
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &StateKey) -> bool {
        self.keys.contains(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Holds one state on the path until dropped.
pub(crate) struct PathEntry<'a> {
    set: &'a mut PathSet,
    key: StateKey,
}

impl Deref for PathEntry<'_> {
    type Target = PathSet;

    fn deref(&self) -> &PathSet {
        self.set
    }
}

impl DerefMut for PathEntry<'_> {
    fn deref_mut(&mut self) -> &mut PathSet {
        self.set
    }
}

impl Drop for PathEntry<'_> {
    fn drop(&mut self) {
        self.set.keys.remove(&self.key);
    }
}
