//! Container conversions between declared and wire shapes.
//!
//! Tags are a key/value mapping on the declared side and an unordered pair
//! list on the wire. URL lists are a set on the declared side and a plain
//! list on the wire. All conversions synthesize empty containers, never
//! absent ones: the remote API may omit a collection entirely when empty,
//! but declared state must keep a stable shape across passes or every later
//! pass sees a spurious diff.

use std::collections::{BTreeMap, BTreeSet};

use ngfw_api::types::Tag;

/// Convert a declared tag mapping into the wire pair list.
pub fn tags_from_map(tags: &BTreeMap<String, String>) -> Vec<Tag> {
    tags.iter()
        .map(|(key, value)| Tag::new(key.clone(), value.clone()))
        .collect()
}

/// Convert a wire pair list into the declared tag mapping.
///
/// Later duplicates of a key win, matching map-insert semantics.
pub fn tags_into_map(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|tag| (tag.key.clone(), tag.value.clone()))
        .collect()
}

/// Convert a declared string set into the wire list.
pub fn set_to_vec(values: &BTreeSet<String>) -> Vec<String> {
    values.iter().cloned().collect()
}

/// Convert a wire list into the declared string set.
pub fn vec_to_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}
