//! Provide `FixedHasher`.
//!
//! `FixedHasher` based on `foldhash` crate,
//! Provide stable hash results through a fixed hash seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5D3A_91C7_4E08_B26F);

/// A fixed hasher provided hash results that only related on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`] .
///
/// Which can be created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed Hash State based upon a random but fixed seed.
///
/// Type identities are hashed many times while a type graph is walked,
/// a fixed seed keeps the discovery order of equal inputs reproducible.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use sg_utils::hash::{FixedHashState, HashMap};
///
/// let a = FixedHashState.hash_one("Node");
/// let b = FixedHashState.hash_one("Node");
/// assert_eq!(a, b);
///
/// let mut map = HashMap::with_hasher(FixedHashState);
/// map.insert("Node", 1);
/// assert_eq!(map.get("Node"), Some(&1));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::FixedHashState;
    use crate::hash::{HashMap, HashSet};

    #[test]
    fn fixed_state_is_deterministic() {
        let first = FixedHashState.hash_one((1_u32, "seq"));
        let second = FixedHashState.hash_one((1_u32, "seq"));
        assert_eq!(first, second);
        assert_ne!(first, FixedHashState.hash_one((2_u32, "seq")));
    }

    #[test]
    fn containers_use_fixed_state() {
        let mut map: HashMap<u32, &str> = HashMap::default();
        map.insert(7, "seven");
        assert_eq!(map.get(&7), Some(&"seven"));

        let mut set: HashSet<&str> = HashSet::with_hasher(FixedHashState);
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
    }
}
