// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded glyph mask cache with sampled eviction.

mod key;
mod session;

pub use key::MaskKey;
pub use session::CacheSession;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use foldhash::fast::FixedState;
use hashbrown::HashMap;
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::mask::AlphaMask;

/// Entries examined per eviction round. Sampling a small pool and evicting its coldest
/// member approximates LRU at a fraction of the bookkeeping.
const EVICTION_SAMPLE: usize = 10;

/// Cap on eviction rounds per insertion. Text rendering access is bursty-repetitive, so
/// giving up on caching one mask only costs a future miss, never correctness.
const MAX_EVICTION_ATTEMPTS: usize = 32;

/// Fixed per-entry byte overhead charged on top of the raw pixels.
const ENTRY_OVERHEAD: usize = size_of::<MaskKey>() + size_of::<CacheEntry>() + size_of::<AlphaMask>();

struct CacheEntry {
    mask: Arc<AlphaMask>,
    /// Footprint charged against the budget, fixed at insertion.
    bytes: usize,
    /// Tick of the last hit or insertion; eviction picks the lowest in its sample.
    freshness: u64,
}

struct CacheInner {
    entries: HashMap<MaskKey, CacheEntry, FixedState>,
    rng: SmallRng,
    tick: u64,
}

/// A concurrent glyph mask store enforcing a byte budget.
///
/// Rendering the same text across frames asks for the same masks over and over; this
/// cache keeps them under a fixed budget so repeated rasterization is a map lookup.
/// When an insertion needs room, a small random sample of entries is taken and the
/// sample's least recently used member is evicted, repeating a bounded number of times.
/// Insertions that still don't fit are silently skipped — capacity exhaustion is
/// expected, never an error.
///
/// `get` and `put` are safe to call from multiple threads; a single mutex guards the
/// map, which is plenty for the render-loop access patterns this is built for. Byte
/// counters are atomics readable without the lock, updated after the map commit: a
/// `peak_bytes` observed at or after some point is always at least the `current_bytes`
/// observed at that point. The cache owns its masks; readers get `Arc` clones.
///
/// The eviction RNG and the freshness counter are owned per instance and seeded at
/// construction, so tests can pin eviction behavior with
/// [`with_capacity_and_seed`](Self::with_capacity_and_seed).
pub struct MaskCache {
    max_bytes: usize,
    current_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    inner: Mutex<CacheInner>,
}

impl MaskCache {
    /// Creates a cache bounded to `max_bytes`.
    ///
    /// Panics if `max_bytes` is zero: a cache that can hold nothing is a configuration
    /// error, not a degraded mode.
    pub fn with_capacity(max_bytes: usize) -> Self {
        let mut seeder = SmallRng::from_entropy();
        Self::with_capacity_and_seed(max_bytes, seeder.gen_range(0..u64::MAX))
    }

    /// Creates a cache bounded to `max_bytes` with a fixed seed for eviction sampling
    /// and map iteration order. Panics if `max_bytes` is zero.
    pub fn with_capacity_and_seed(max_bytes: usize, seed: u64) -> Self {
        assert!(max_bytes > 0, "mask cache capacity must be positive");
        Self {
            max_bytes,
            current_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_hasher(FixedState::with_seed(seed)),
                rng: SmallRng::seed_from_u64(seed),
                tick: 0,
            }),
        }
    }

    /// The footprint a mask would be charged against the budget: one byte per pixel
    /// plus fixed bookkeeping overhead.
    pub fn entry_footprint(mask: &AlphaMask) -> usize {
        mask.width() as usize * mask.height() as usize + ENTRY_OVERHEAD
    }

    /// Looks up a mask, bumping its freshness on a hit. A miss has no side effects.
    pub fn get(&self, key: &MaskKey) -> Option<Arc<AlphaMask>> {
        let mut guard = self.lock();
        let CacheInner { entries, tick, .. } = &mut *guard;
        match entries.get_mut(key) {
            Some(entry) => {
                *tick += 1;
                entry.freshness = *tick;
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.mask))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts a mask, evicting sampled cold entries as needed to fit the budget.
    ///
    /// Returns whether the mask was stored. Insertion is best-effort and never an
    /// error: masks larger than the whole budget are skipped, as are masks that can't
    /// be fit within the bounded eviction attempts (any space those attempts freed
    /// stays freed). If the key is already present the new mask is dropped — a stable
    /// key always maps to the same pixels, so first writer wins.
    pub fn put(&self, key: MaskKey, mask: Arc<AlphaMask>) -> bool {
        let bytes = Self::entry_footprint(&mask);
        if bytes > self.max_bytes {
            debug!(
                "glyph {} mask footprint ({bytes} B) exceeds the cache budget ({} B); not caching",
                key.glyph_id, self.max_bytes
            );
            return false;
        }

        let mut inner = self.lock();
        if inner.entries.contains_key(&key) {
            return false;
        }

        let mut attempts = 0;
        while self.current_bytes.load(Ordering::Relaxed) + bytes > self.max_bytes {
            if attempts == MAX_EVICTION_ATTEMPTS || !self.evict_coldest_sampled(&mut inner) {
                trace!("could not free {bytes} B for glyph {}; not caching", key.glyph_id);
                return false;
            }
            attempts += 1;
        }

        inner.tick += 1;
        let freshness = inner.tick;
        inner.entries.insert(
            key,
            CacheEntry {
                mask,
                bytes,
                freshness,
            },
        );
        let now = self.current_bytes.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.peak_bytes.fetch_max(now, Ordering::Relaxed);
        true
    }

    /// Evicts the least fresh member of a random sample. Returns whether anything was
    /// evicted.
    fn evict_coldest_sampled(&self, inner: &mut CacheInner) -> bool {
        let len = inner.entries.len();
        if len == 0 {
            return false;
        }
        let start = inner.rng.gen_range(0..len);
        let victim = inner
            .entries
            .iter()
            .cycle()
            .skip(start)
            .take(EVICTION_SAMPLE.min(len))
            .min_by_key(|(_, entry)| entry.freshness)
            .map(|(key, _)| *key);
        let Some(victim) = victim else {
            return false;
        };
        match inner.entries.remove(&victim) {
            Some(entry) => {
                self.current_bytes.fetch_sub(entry.bytes, Ordering::Relaxed);
                trace!("evicted glyph {} mask ({} B)", victim.glyph_id, entry.bytes);
                true
            }
            None => false,
        }
    }

    /// The configured byte budget.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_bytes
    }

    /// Bytes currently charged against the budget. Never exceeds
    /// [`capacity`](Self::capacity).
    #[inline]
    pub fn current_bytes(&self) -> usize {
        self.current_bytes.load(Ordering::Relaxed)
    }

    /// High-water mark of [`current_bytes`](Self::current_bytes) over the cache's
    /// lifetime.
    #[inline]
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    /// Number of cached masks.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no masks.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of cache hits since construction or the last
    /// [`clear_stats`](Self::clear_stats).
    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of cache misses since construction or the last
    /// [`clear_stats`](Self::clear_stats).
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Resets hit/miss statistics without touching the cached masks.
    pub fn clear_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Drops every cached mask and resets statistics. The peak byte counter is a
    /// lifetime high-water mark and survives.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        self.current_bytes.store(0, Ordering::Relaxed);
        self.clear_stats();
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A panicking caller cannot leave the map structurally inconsistent, so a
        // poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for MaskCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MaskCache")
            .field("capacity", &self.max_bytes)
            .field("current_bytes", &self.current_bytes())
            .field("peak_bytes", &self.peak_bytes())
            .finish_non_exhaustive()
    }
}
