//! Bounded LRU memo for decoded records.
//!
//! Recency is tracked with a monotonically increasing access tick; the
//! `order` map from tick to key makes "least recently accessed" a
//! `pop_first`. Both `get` and `put` count as an access.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::{DecodeOutcome, RecordDecoder};
use crate::error::{LogviewError, Result};
use crate::types::{FilteredIndex, RawIndex};

struct Entry<R> {
    outcome: DecodeOutcome<R>,
    last_access: u64,
}

/// Hit/miss/eviction counters since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
}

/// Decode cache keyed by filtered index.
///
/// A filtered index only identifies a record until the next rebuild, so the
/// owner must call [`DecodeCache::invalidate_all`] with every rebuild.
pub struct DecodeCache<R> {
    entries: HashMap<FilteredIndex, Entry<R>>,
    order: BTreeMap<u64, FilteredIndex>,
    capacity: usize,
    tick: u64,
    stats: CacheStats,
}

impl<R> DecodeCache<R> {
    /// Create a cache holding at most `capacity` outcomes.
    ///
    /// A capacity of 0 is rejected. A capacity of 1 is accepted but only
    /// memoizes the row queried last, which defeats caching across a repaint.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LogviewError::InvalidCacheCapacity(capacity));
        }
        if capacity == 1 {
            warn!(
                capacity,
                "decode cache capacity of 1 only memoizes a single row; size it to the visible rows plus scroll margin"
            );
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            capacity,
            tick: 0,
            stats: CacheStats::default(),
        })
    }

    /// Look up an outcome, promoting it to most recently accessed.
    ///
    /// `None` means decoding was never attempted for this key (or its entry
    /// was evicted/invalidated); `Some(Failed)` means it was attempted and
    /// failed.
    pub fn get(&mut self, key: FilteredIndex) -> Option<&DecodeOutcome<R>> {
        let tick = self.next_tick();
        let Some(entry) = self.entries.get_mut(&key) else {
            self.stats.misses += 1;
            return None;
        };
        self.stats.hits += 1;
        self.order.remove(&entry.last_access);
        entry.last_access = tick;
        self.order.insert(tick, key);
        Some(&entry.outcome)
    }

    /// Insert or overwrite an outcome, evicting the least recently accessed
    /// entry if capacity is exceeded.
    pub fn put(&mut self, key: FilteredIndex, outcome: DecodeOutcome<R>) {
        let tick = self.next_tick();
        let entry = Entry {
            outcome,
            last_access: tick,
        };
        if let Some(old) = self.entries.insert(key, entry) {
            self.order.remove(&old.last_access);
        }
        self.order.insert(tick, key);
        self.enforce_cap();
    }

    /// Run `f` on the outcome for `key`, decoding `raw` on a miss.
    ///
    /// Decode errors are logged and memoized as [`DecodeOutcome::Failed`].
    pub fn with_decoded<D, T>(
        &mut self,
        key: FilteredIndex,
        raw: RawIndex,
        decoder: &D,
        f: impl FnOnce(&DecodeOutcome<R>) -> T,
    ) -> T
    where
        D: RecordDecoder<Record = R> + ?Sized,
    {
        if let Some(outcome) = self.get(key) {
            return f(outcome);
        }
        let outcome: DecodeOutcome<R> = decoder
            .decode(raw)
            .inspect_err(|err| debug!(filtered = key, raw, error = %err, "record decode failed"))
            .into();
        let result = f(&outcome);
        self.put(key, outcome);
        result
    }

    /// Peek without promoting.
    pub fn contains(&self, key: FilteredIndex) -> bool {
        self.entries.contains_key(&key)
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        if !self.entries.is_empty() {
            debug!(dropped = self.entries.len(), "decode cache invalidated");
        }
        self.entries.clear();
        self.order.clear();
        self.stats.invalidations += 1;
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    /// Evict least recently accessed entries until we're at or below capacity.
    fn enforce_cap(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some((_, oldest)) = self.order.pop_first() {
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
            } else {
                break;
            }
        }
    }
}
