//! The keyed index of per-document record lists.
//!
//! # Consistency Strategy
//!
//! The store is the crate's only shared mutable structure, guarded by a single
//! `RwLock` around a `BTreeMap`. Critical sections are bounded by a map splice
//! (no parsing or I/O ever happens under the lock), so the lock realizes the
//! "one exclusive owner serializing mutations" discipline.
//!
//! - **Atomic replacement**: a key's record list is swapped wholesale, never
//!   merged. A reader taking a snapshot can never observe a half-replaced
//!   list.
//!
//! - **Generation ordering**: every write is tagged with a per-key monotonic
//!   generation issued by [`Store::begin_write`]. An upsert carrying a
//!   generation older than the one currently applied is discarded, so the
//!   latest content wins regardless of which reparse finishes last.
//!
//! - **Deletion tombstones**: removal clears the records but keeps the key's
//!   generation counter, so a stale in-flight upsert cannot resurrect a
//!   deleted document. A full-rescan [`Store::replace_all`] drops tombstones
//!   along with every key absent from the new set.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{Result, bail};

use crate::models::Record;

/// A consistent point-in-time view of the store, ordered by document key.
pub type Snapshot = Vec<(String, Vec<Record>)>;

#[derive(Debug, Default)]
struct KeyState {
    /// Highest generation handed out for this key.
    issued: u64,
    /// Generation of the write currently visible.
    applied: u64,
    /// `None` marks a deletion tombstone.
    records: Option<Vec<Record>>,
}

#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<BTreeMap<String, KeyState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation for `key`.
    ///
    /// Call before parsing the key's new content; pass the returned generation
    /// to [`Store::upsert`] so out-of-order completions resolve correctly.
    pub fn begin_write(&self, key: &str) -> u64 {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let state = inner.entry(key.to_string()).or_default();
        state.issued += 1;
        state.issued
    }

    /// Atomically replace the record list for `key`.
    ///
    /// Returns `false` (and changes nothing) when `generation` is older than
    /// the generation already applied for this key.
    pub fn upsert(&self, key: &str, generation: u64, records: Vec<Record>) -> bool {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let state = inner.entry(key.to_string()).or_default();
        if generation < state.applied {
            return false;
        }
        state.applied = generation;
        if state.issued < generation {
            state.issued = generation;
        }
        state.records = Some(records);
        true
    }

    /// Delete `key`'s records, leaving a generation tombstone behind.
    pub fn remove(&self, key: &str) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if let Some(state) = inner.get_mut(key) {
            state.issued += 1;
            state.applied = state.issued;
            state.records = None;
        }
    }

    /// A consistent point-in-time view, ordered by key. Tombstones are absent.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().expect("store lock poisoned");
        inner
            .iter()
            .filter_map(|(key, state)| {
                state.records.as_ref().map(|records| (key.clone(), records.clone()))
            })
            .collect()
    }

    /// Wholesale replacement for a full rescan.
    ///
    /// Keys absent from `documents` disappear entirely (no orphaned entries
    /// for deleted documents); surviving keys keep advancing their generation
    /// counters so later incremental writes stay ordered.
    pub fn replace_all(&self, documents: BTreeMap<String, Vec<Record>>) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let mut next = BTreeMap::new();
        for (key, records) in documents {
            let generation = inner.get(&key).map_or(0, |s| s.issued) + 1;
            next.insert(
                key,
                KeyState { issued: generation, applied: generation, records: Some(records) },
            );
        }
        *inner = next;
    }

    /// Drop everything, tombstones included.
    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.clear();
    }

    /// Number of documents currently visible (tombstones excluded).
    pub fn document_count(&self) -> usize {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.values().filter(|s| s.records.is_some()).count()
    }

    /// Defensive invariant check.
    ///
    /// A key with visible records but no applied generation, or an applied
    /// generation ahead of the issued counter, means the store is corrupted.
    /// Development builds assert; release callers get an error instructing a
    /// full rescan, which rebuilds the store from scratch.
    pub fn check_integrity(&self) -> Result<()> {
        let inner = self.inner.read().expect("store lock poisoned");
        for (key, state) in inner.iter() {
            let valid = state.applied <= state.issued
                && (state.records.is_none() || state.applied > 0);
            debug_assert!(
                valid,
                "store invariant violated for '{}': issued={} applied={} present={}",
                key,
                state.issued,
                state.applied,
                state.records.is_some()
            );
            if !valid {
                bail!("store invariant violated for '{}': run a full rescan to rebuild", key);
            }
        }
        Ok(())
    }
}
