//! Memoized selector: an input projection plus a result function

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use civil_types::StateSnapshot;
use tracing::trace;

use crate::memo::{Memo, MemoKey};

type InputFn<P, K> = Box<dyn Fn(&StateSnapshot, &P) -> K + Send + Sync>;
type ResultFn<K, V> = Box<dyn Fn(&K) -> V + Send + Sync>;

/// A selector instance with its own cache.
///
/// `input` projects the snapshot and props onto the slices the derivation
/// depends on; `result` runs only when that projection changed since the
/// previous call. Instances never share caches, so one view's result cannot
/// leak into another's.
pub struct Selector<P: ?Sized, K, V> {
    name: &'static str,
    input: InputFn<P, K>,
    result: ResultFn<K, V>,
    memo: Memo<K, V>,
    recomputations: AtomicUsize,
}

impl<P: ?Sized, K: MemoKey, V: Clone> Selector<P, K, V> {
    pub fn new<I, R>(name: &'static str, input: I, result: R) -> Self
    where
        I: Fn(&StateSnapshot, &P) -> K + Send + Sync + 'static,
        R: Fn(&K) -> V + Send + Sync + 'static,
    {
        Self {
            name,
            input: Box::new(input),
            result: Box::new(result),
            memo: Memo::new(),
            recomputations: AtomicUsize::new(0),
        }
    }

    pub fn select(&self, state: &StateSnapshot, props: &P) -> V {
        let key = (self.input)(state, props);
        let (value, recomputed) = self.memo.get_or_compute(key, |key| (self.result)(key));
        if recomputed {
            let count = self.recomputations.fetch_add(1, Ordering::Relaxed) + 1;
            trace!(selector = self.name, recomputations = count, "selector recomputed");
        }
        value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How many times `result` has run
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    pub fn reset_recomputations(&self) {
        self.recomputations.store(0, Ordering::Relaxed);
    }

    /// Forget the cached result; the next call recomputes
    pub fn invalidate(&self) {
        self.memo.clear();
    }
}

impl<P: ?Sized, K, V> fmt::Debug for Selector<P, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("name", &self.name)
            .field("recomputations", &self.recomputations.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recomputes_only_on_input_change() {
        let selector: Selector<(), Arc<civil_types::ListingMap>, usize> = Selector::new(
            "listing_count",
            |state: &StateSnapshot, _: &()| state.listings.clone(),
            |listings: &Arc<civil_types::ListingMap>| listings.len(),
        );

        let state = StateSnapshot::default();
        assert_eq!(selector.select(&state, &()), 0);
        assert_eq!(selector.select(&state, &()), 0);
        assert_eq!(selector.recomputations(), 1);

        let mut next = state.clone();
        next.listings = Arc::new(Default::default());
        selector.select(&next, &());
        assert_eq!(selector.recomputations(), 2);

        selector.invalidate();
        selector.select(&next, &());
        assert_eq!(selector.recomputations(), 3);

        selector.reset_recomputations();
        assert_eq!(selector.recomputations(), 0);
    }
}
