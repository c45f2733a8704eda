//! Fixed-capacity caching with strict recency ordering
//!
//! The cache couples two structures that must stay in lock-step on every
//! operation:
//! - an [order list](list::OrderList), a doubly-linked sequence of entries
//!   from most to least recently used, backed by a slot arena with sentinel
//!   endpoints, and
//! - a [key index](index::KeyIndex), mapping each key to the slot id of its
//!   entry.
//!
//! The index holds slot ids rather than references, so promoting an entry to
//! most-recently-used is a pure relink of arena links with no search and no
//! aliasing. Eviction pops the slot next to the tail sentinel and drops the
//! matching index association before the operation returns.

mod index;
mod list;

pub use list::Iter;

use index::KeyIndex;
use list::OrderList;

use crate::Error;
use std::hash::Hash;

/// Fixed-capacity key-value cache with least-recently-used eviction
///
/// Every operation runs in O(1): lookups go through a hash index to a slot
/// in the recency list, and recency updates are pure relinks. Once the cache
/// holds `capacity` entries, inserting a new key silently evicts the entry
/// that has gone longest without being read or written.
///
/// ```
/// use recency::LruCache;
///
/// let mut cache = LruCache::new(2)?;
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // Touching "a" protects it; inserting "c" now evicts "b"
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.insert("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// # Ok::<(), recency::Error>(())
/// ```
///
/// Keys are stored twice, once in the index and once alongside the value in
/// the recency list, so insertion of a new key requires `K: Clone`. The
/// clone happens once per inserted key; reads and updates never clone.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    index: KeyIndex<K>,
    list: OrderList<K, V>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Builds a cache that holds up to `capacity` entries
    ///
    /// Storage for the arena and the index is reserved up front, so the
    /// cache does not allocate during steady-state operation.
    ///
    /// A zero capacity has no well-defined eviction behavior and is refused
    /// rather than clamped:
    /// ```
    /// use recency::{Error, LruCache};
    ///
    /// assert!(matches!(
    ///     LruCache::<u64, u64>::new(0),
    ///     Err(Error::ZeroCapacity)
    /// ));
    /// ```
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            index: KeyIndex::with_capacity(capacity),
            list: OrderList::with_capacity(capacity),
        })
    }

    /// Number of entries the cache can hold, fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held; never exceeds
    /// [`capacity`](Self::capacity)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// Looks up a key, marking its entry as most recently used on a hit
    ///
    /// A miss is a normal outcome, not an error, and leaves the recency
    /// order untouched.
    ///
    /// ```
    /// use recency::LruCache;
    ///
    /// let mut cache = LruCache::new(4)?;
    /// cache.insert('x', 10);
    /// assert_eq!(cache.get(&'x'), Some(&10));
    /// assert_eq!(cache.get(&'y'), None);
    /// # Ok::<(), recency::Error>(())
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = self.index.lookup(key)?;
        self.list.move_to_front(slot);
        Some(&self.list.entry(slot).value)
    }

    /// Like [`get`](Self::get), but returns a mutable borrow of the value
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.index.lookup(key)?;
        self.list.move_to_front(slot);
        Some(&mut self.list.entry_mut(slot).value)
    }

    /// Looks up a key without affecting recency order
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = self.index.lookup(key)?;
        Some(&self.list.entry(slot).value)
    }

    /// Mutably borrows a value without affecting recency order
    pub fn peek_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.index.lookup(key)?;
        Some(&mut self.list.entry_mut(slot).value)
    }

    /// Borrows the entry next in line for eviction, without touching it
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let slot = self.list.back()?;
        let entry = self.list.entry(slot);
        Some((&entry.key, &entry.value))
    }

    /// Checks for a key without affecting recency order
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Inserts or updates an entry, returning the previous value when the
    /// key was already present
    ///
    /// Either way the entry becomes the most recently used. When the key is
    /// new and the cache is full, the least-recently-used entry is evicted
    /// first; the eviction is silent. Among entries that have never been
    /// touched since insertion, eviction order is insertion order.
    ///
    /// ```
    /// use recency::LruCache;
    ///
    /// let mut cache = LruCache::new(1)?;
    /// assert_eq!(cache.insert("k", 1), None);
    /// assert_eq!(cache.insert("k", 2), Some(1)); // update, not insert
    /// assert_eq!(cache.insert("other", 3), None); // evicts "k"
    /// assert_eq!(cache.len(), 1);
    /// # Ok::<(), recency::Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        if let Some(slot) = self.index.lookup(&key) {
            let prev =
                std::mem::replace(&mut self.list.entry_mut(slot).value, value);
            self.list.move_to_front(slot);
            return Some(prev);
        }

        // Evict before allocating so the arena never grows past capacity
        if self.list.len() == self.capacity {
            if let Some(slot) = self.list.pop_back() {
                let (old_key, _) = self.list.release(slot);
                self.index.remove(&old_key);
            }
        }

        let slot = self.list.alloc(key.clone(), value);
        self.list.push_front(slot);
        self.index.insert(key, slot);
        None
    }

    /// Removes an entry, returning its value if the key was present
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.list.unlink(slot);
        let (_, value) = self.list.release(slot);
        Some(value)
    }

    /// Removes and returns the least-recently-used entry
    ///
    /// ```
    /// use recency::LruCache;
    ///
    /// let mut cache = LruCache::new(4)?;
    /// cache.insert("old", 1);
    /// cache.insert("new", 2);
    /// assert_eq!(cache.pop_lru(), Some(("old", 1)));
    /// # Ok::<(), recency::Error>(())
    /// ```
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let slot = self.list.pop_back()?;
        let (key, value) = self.list.release(slot);
        self.index.remove(&key);
        Some((key, value))
    }

    /// Drops every entry, keeping the capacity and backing allocations
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    /// Iterates over entries from most to least recently used
    ///
    /// Iteration does not count as a touch: recency order is unchanged.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_capacity() {
        assert!(matches!(
            LruCache::<u32, u32>::new(0),
            Err(Error::ZeroCapacity)
        ));
        assert!(LruCache::<u32, u32>::new(1).is_ok());
    }

    #[test]
    fn test_read_your_write() {
        let mut cache = LruCache::new(4).unwrap();
        cache.insert("k", 123);
        assert_eq!(cache.get(&"k"), Some(&123));
    }

    #[test]
    fn test_miss_is_idempotent() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');

        // Repeated misses mutate nothing, including recency order
        for _ in 0..3 {
            assert_eq!(cache.get(&99), None);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek_lru(), Some((&1, &'a')));
    }

    #[test]
    fn test_update_is_not_insert() {
        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(cache.insert("k", 1), None);
        assert_eq!(cache.insert("k", 2), Some(1));
        assert_eq!(cache.get(&"k"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overflow_evicts_exactly_one() {
        let mut cache = LruCache::new(3).unwrap();
        for i in 0..4 {
            cache.insert(i, i * 10);
        }
        assert_eq!(cache.len(), 3);

        // Key 0 was the least recently touched
        assert_eq!(cache.get(&0), None);
        for i in 1..4 {
            assert_eq!(cache.peek(&i), Some(&(i * 10)));
        }
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, ());
        cache.insert(2, ());
        cache.insert(3, ());

        // Touch the oldest key, then push two new ones through
        assert_eq!(cache.get(&1), Some(&()));
        cache.insert(4, ());
        cache.insert(5, ());

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(!cache.contains(&3));
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert('a', 0);
        cache.insert('b', 1);
        cache.insert('c', 2);

        // Never-touched entries leave in the order they arrived
        assert_eq!(cache.pop_lru(), Some(('a', 0)));
        assert_eq!(cache.pop_lru(), Some(('b', 1)));
        assert_eq!(cache.pop_lru(), Some(('c', 2)));
        assert_eq!(cache.pop_lru(), None);
    }

    #[test]
    fn test_capacity_two_scenario() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.get(&1), Some(&1));
        cache.insert(3, 3); // evicts 2
        assert_eq!(cache.get(&2), None);
        cache.insert(4, 4); // evicts 1
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&3), Some(&3));
        assert_eq!(cache.get(&4), Some(&4));
    }

    #[test]
    fn test_capacity_one_scenario() {
        let mut cache = LruCache::new(1).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2); // evicts 1 immediately
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&2));
    }

    #[test]
    fn test_peek_does_not_promote() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');

        // A peek at the LRU entry must not save it
        assert_eq!(cache.peek(&1), Some(&'a'));
        cache.insert(3, 'c');
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
    }

    #[test]
    fn test_get_mut_promotes() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);
        *cache.get_mut(&1).unwrap() += 1;
        cache.insert(3, 30);

        assert_eq!(cache.peek(&1), Some(&11));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn test_remove() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.remove(&"a"), None);
        assert_eq!(cache.len(), 1);

        // The freed slot is reusable without evicting "b"
        cache.insert("c", 3);
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.get(&1), None);

        cache.insert(3, 'c');
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&3), Some(&'c'));
    }

    #[test]
    fn test_iter_is_recency_ordered() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert('a', 0);
        cache.insert('b', 1);
        cache.insert('c', 2);
        cache.get(&'a');

        let keys: Vec<char> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!['a', 'c', 'b']);
        assert_eq!(cache.iter().len(), 3);
    }

    /// Drives the cache and a naive linear-scan model through the same
    /// operation stream and requires identical observable behavior
    #[test]
    fn test_matches_linear_model() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        struct Model {
            capacity: usize,
            entries: Vec<(u8, u32)>, // most recent first
        }

        impl Model {
            fn get(&mut self, key: u8) -> Option<u32> {
                let i = self.entries.iter().position(|&(k, _)| k == key)?;
                let e = self.entries.remove(i);
                self.entries.insert(0, e);
                Some(e.1)
            }

            fn insert(&mut self, key: u8, value: u32) -> Option<u32> {
                let prev = self
                    .entries
                    .iter()
                    .position(|&(k, _)| k == key)
                    .map(|i| self.entries.remove(i).1);
                self.entries.insert(0, (key, value));
                self.entries.truncate(self.capacity);
                prev
            }

            fn remove(&mut self, key: u8) -> Option<u32> {
                let i = self.entries.iter().position(|&(k, _)| k == key)?;
                Some(self.entries.remove(i).1)
            }
        }

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut cache = LruCache::new(16).unwrap();
            let mut model = Model {
                capacity: 16,
                entries: vec![],
            };

            for i in 0..10_000u32 {
                let key: u8 = rng.gen_range(0..48);
                match rng.gen_range(0..10) {
                    0..=4 => {
                        assert_eq!(cache.get(&key).copied(), model.get(key))
                    }
                    5..=8 => {
                        assert_eq!(cache.insert(key, i), model.insert(key, i))
                    }
                    _ => {
                        assert_eq!(cache.remove(&key), model.remove(key))
                    }
                }
                assert_eq!(cache.len(), model.entries.len());
                assert!(cache.len() <= cache.capacity());
            }

            let entries: Vec<(u8, u32)> =
                cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(entries, model.entries);
        }
    }
}
