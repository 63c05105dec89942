use alloc::string::String;
use alloc::vec::{self, Vec};
use core::{fmt, mem, slice};

use sg_utils::hash::HashMap;
use sg_utils::hash::hash_map::Entry;

use crate::wire::WireValue;

/// A string keyed map that keeps insertion order.
///
/// Entries live in a `Vec`, a hash index maps each key to its position.
#[derive(Clone, Default)]
pub struct WireMap {
    entries: Vec<(String, WireValue)>,
    index: HashMap<String, usize>,
}

impl WireMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts an entry, returns the replaced value if `key` was present.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: WireValue) -> Option<WireValue> {
        match self.index.entry(key.into()) {
            Entry::Occupied(slot) => Some(mem::replace(&mut self.entries[*slot.get()].1, value)),
            Entry::Vacant(slot) => {
                self.entries.push((slot.key().clone(), value));
                slot.insert(self.entries.len() - 1);
                None
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, (String, WireValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

// The index is derived from the entries.
impl PartialEq for WireMap {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for WireMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>> FromIterator<(K, WireValue)> for WireMap {
    fn from_iter<I: IntoIterator<Item = (K, WireValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for WireMap {
    type Item = (String, WireValue);
    type IntoIter = vec::IntoIter<(String, WireValue)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a WireMap {
    type Item = &'a (String, WireValue);
    type IntoIter = slice::Iter<'a, (String, WireValue)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests
