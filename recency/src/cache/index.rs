//! Key-to-slot index

use std::collections::HashMap;
use std::hash::Hash;

use super::list::SlotId;

/// O(1) translation from key to arena slot
///
/// Thin wrapper over `HashMap`. The index never owns entry storage, only
/// slot ids; keeping it consistent with the order list is the cache façade's
/// job, not something guarded here.
#[derive(Debug)]
pub(crate) struct KeyIndex<K> {
    map: HashMap<K, SlotId>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Looks up the slot for a key, with no side effects
    pub fn lookup(&self, key: &K) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    /// Associates a key with a slot, overwriting any prior association
    pub fn insert(&mut self, key: K, slot: SlotId) {
        self.map.insert(key, slot);
    }

    /// Drops the association for a key; a no-op if the key is absent
    pub fn remove(&mut self, key: &K) -> Option<SlotId> {
        self.map.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
