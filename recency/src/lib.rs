//! Recency is a small library for fixed-capacity key-value caching with
//! strict least-recently-used eviction.
//!
//! An **LRU cache** holds up to a fixed number of entries; once full, each
//! insertion of a new key silently drops the entry that has gone longest
//! without being read or written. Every operation — lookup, insertion,
//! update, eviction — runs in O(1).
//!
//! # Quick tour
//!
//! A cache is built with a fixed capacity, which must be at least one:
//! ```
//! use recency::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! # Ok::<(), recency::Error>(())
//! ```
//!
//! Reads and writes both count as a *touch*, refreshing an entry's position
//! in the recency order; inserting past capacity evicts the least recently
//! touched entry:
//! ```
//! # use recency::LruCache;
//! # let mut cache = LruCache::new(2)?;
//! # cache.insert("a", 1);
//! # cache.insert("b", 2);
//! # cache.get(&"a");
//! cache.insert("c", 3);
//! assert_eq!(cache.get(&"b"), None); // "b" was least recently touched
//! assert_eq!(cache.get(&"a"), Some(&1));
//! # Ok::<(), recency::Error>(())
//! ```
//!
//! Misses are ordinary `None`s, never errors and never sentinels, and a miss
//! leaves the recency order untouched. For reads that deliberately *don't*
//! refresh recency, see [`LruCache::peek`]; for inspection of the next
//! eviction candidate, [`LruCache::peek_lru`]; for explicit removal,
//! [`LruCache::remove`] and [`LruCache::pop_lru`].
//!
//! # Design
//!
//! Internally the cache couples a hash index with a doubly-linked recency
//! list. The list lives in a slot arena addressed by stable integer ids and
//! is delimited by permanent head/tail sentinels; the index maps each key to
//! the slot id of its entry. Because the index holds plain ids rather than
//! references, "mark as most recently used" is a handful of link writes with
//! no search, no reference counting, and no unsafe aliasing.
//!
//! The cache is a single-owner structure: every mutating operation takes
//! `&mut self`, so a whole `get` or `insert` (index lookup, relink, possible
//! eviction) is one critical section by construction. Callers that share a
//! cache across threads wrap it in a lock around the whole façade.
#![warn(missing_docs)]

mod cache;
mod error;

pub use cache::{Iter, LruCache};
pub use error::Error;
