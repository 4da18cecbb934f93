//! Bounded, time-limited cache of rendezvous solutions.
//!
//! Entries are keyed by the sorted target ids, the search start and the sampling
//! parameters, so a hit always returns exactly what a fresh search would compute. Entries
//! expire after a fixed time-to-live (wall clock) and the oldest entry is evicted when the
//! cache is full.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use hifitime::Epoch;

use crate::route::rendezvous::{RendezvousParams, RendezvousSolution};
use crate::time::unix_seconds;

pub const DEFAULT_CACHE_CAPACITY: usize = 10;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RendezvousKey {
    ids: Vec<String>,
    start_bits: u64,
    horizon_bits: u64,
    step_bits: u64,
    max_steps: usize,
}

impl RendezvousKey {
    pub fn new<S: AsRef<str>>(ids: &[S], start: Epoch, params: &RendezvousParams) -> Self {
        let mut ids: Vec<String> = ids.iter().map(|s| s.as_ref().to_string()).collect();
        ids.sort();
        RendezvousKey {
            ids,
            start_bits: unix_seconds(start).to_bits(),
            horizon_bits: params.horizon_hours.to_bits(),
            step_bits: params.step_minutes.to_bits(),
            max_steps: params.max_steps,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: RendezvousKey,
    stored_at: Instant,
    solution: RendezvousSolution,
}

#[derive(Debug)]
pub struct RendezvousCache {
    capacity: usize,
    ttl: Duration,
    entries: VecDeque<CacheEntry>,
}

impl Default for RendezvousCache {
    fn default() -> Self {
        RendezvousCache::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

impl RendezvousCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        RendezvousCache {
            capacity,
            ttl,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|e| now.saturating_duration_since(e.stored_at) < ttl);
    }

    /// Cached solution for `key`, if present and younger than the TTL at `now`.
    pub fn get(&mut self, key: &RendezvousKey, now: Instant) -> Option<RendezvousSolution> {
        self.purge_expired(now);
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.solution.clone())
    }

    pub fn insert(&mut self, key: RendezvousKey, solution: RendezvousSolution, now: Instant) {
        if self.capacity == 0 {
            return;
        }
        self.purge_expired(now);
        self.entries.retain(|e| e.key != key);
        self.entries.push_back(CacheEntry {
            key,
            stored_at: now,
            solution,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}
