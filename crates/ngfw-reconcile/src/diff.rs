//! Keyed collection deltas.
//!
//! The subnet-attachment API mutates only through associate/disassociate
//! lists, so collection updates are expressed as a set difference over a
//! natural key. Elements whose key appears on both sides are left alone
//! regardless of non-key attribute changes; the API has no in-place update
//! verb for them.

use std::collections::HashSet;
use std::hash::Hash;

/// Result of diffing two keyed collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta<T> {
    /// Elements whose key is in `new` but not `old`.
    pub to_add: Vec<T>,
    /// Elements whose key is in `old` but not `new`.
    pub to_remove: Vec<T>,
}

impl<T> Delta<T> {
    /// Check whether the delta carries any change.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff `old` against `new` over the key extracted by `key`.
pub fn diff_by_key<T, K, F>(old: &[T], new: &[T], key: F) -> Delta<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let old_keys: HashSet<K> = old.iter().map(&key).collect();
    let new_keys: HashSet<K> = new.iter().map(&key).collect();

    Delta {
        to_add: new
            .iter()
            .filter(|item| !old_keys.contains(&key(item)))
            .cloned()
            .collect(),
        to_remove: old
            .iter()
            .filter(|item| !new_keys.contains(&key(item)))
            .cloned()
            .collect(),
    }
}
