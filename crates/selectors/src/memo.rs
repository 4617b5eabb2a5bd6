//! # Memoization
//!
//! Selectors are evaluated on every render, so each keeps the last input
//! tuple and the result computed for it. Inputs are compared by identity:
//! snapshot slices are `Arc`s that the sync layer replaces when (and only
//! when) their content changes, so `Arc::ptr_eq` is both cheap and exact.

use std::sync::{Arc, Mutex};

use civil_types::{ChallengeId, EthAddress};

/// Cheap "did this input change" comparison
pub trait MemoKey {
    fn same_as(&self, other: &Self) -> bool;
}

impl<T: ?Sized> MemoKey for Arc<T> {
    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: MemoKey> MemoKey for Option<T> {
    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1)
    }
}

impl<A: MemoKey, B: MemoKey, C: MemoKey> MemoKey for (A, B, C) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1) && self.2.same_as(&other.2)
    }
}

impl MemoKey for EthAddress {
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl MemoKey for ChallengeId {
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

/// Single-entry cache owned by one selector instance
#[derive(Debug)]
pub struct Memo<K, V> {
    last: Mutex<Option<(K, V)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

impl<K: MemoKey, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value when `key` matches the previous key, else run
    /// `compute` and remember its result. The flag reports a recomputation.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> (V, bool)
    where
        F: FnOnce(&K) -> V,
    {
        // A panic inside `compute` only loses the cache entry
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some((cached_key, cached_value)) = last.as_ref() {
            if cached_key.same_as(&key) {
                return (cached_value.clone(), false);
            }
        }

        let value = compute(&key);
        *last = Some((key, value.clone()));
        (value, true)
    }

    /// Drop the cached entry
    pub fn clear(&self) {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = None;
    }
}
