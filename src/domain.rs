//! Reversible finite-value domains over an immutable universe.
//!
//! Ground: section 4.A of the spec. The active-value set is a bitmask
//! (`bitvec`, the way `Ivan-Sergeyev-mrf-map` reaches for a bit-vector
//! crate rather than hand-rolling one) over an immutable, ordered universe
//! shared by every copy of the domain.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitvec::prelude::*;

use crate::value::Value;

/// The immutable set of candidate values a domain ranges over, in a fixed
/// order. Shared (via `Arc`) by every `Domain` and every checkpoint/copy
/// derived from it; never mutated after construction.
#[derive(Debug)]
struct Universe<V> {
    values: Vec<V>,
    index: HashMap<V, usize>,
}

impl<V: Value> Universe<V> {
    fn new(values: Vec<V>) -> Self {
        let index = values
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        Universe { values, index }
    }
}

/// A reversible finite set of active values drawn from an immutable
/// universe. See section 4.A for the full operation/invariant list.
pub struct Domain<V> {
    universe: Arc<Universe<V>>,
    active: BitVec,
    size: usize,
    checkpoints: Vec<BitVec>,
}

impl<V: Value> Domain<V> {
    /// Builds a domain whose universe and initial active set are both
    /// `values`, in the given order.
    pub fn new(values: Vec<V>) -> Self {
        let universe = Arc::new(Universe::new(values));
        let size = universe.values.len();
        let active = bitvec![1; size];
        Domain {
            universe,
            active,
            size,
            checkpoints: Vec::new(),
        }
    }

    /// Number of currently active values.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_singleton(&self) -> bool {
        self.size == 1
    }

    fn index_of(&self, v: &V) -> Option<usize> {
        self.universe.index.get(v).copied()
    }

    pub fn contains(&self, v: &V) -> bool {
        self.index_of(v).is_some_and(|i| self.active[i])
    }

    /// Removes `v` from the active set. Returns `false` if `v` was not
    /// active (or not in the universe at all).
    pub fn remove(&mut self, v: &V) -> bool {
        match self.index_of(v) {
            Some(i) if self.active[i] => {
                self.active.set(i, false);
                self.size -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restores `v` to the active set. Returns `false` if `v` was already
    /// active (or not in the universe).
    pub fn restore(&mut self, v: &V) -> bool {
        match self.index_of(v) {
            Some(i) if !self.active[i] => {
                self.active.set(i, true);
                self.size += 1;
                true
            }
            _ => false,
        }
    }

    /// Reduces the active set to the singleton `{v}`.
    ///
    /// # Panics
    /// Panics if `v` is not a member of the universe.
    pub fn reduce_to(&mut self, v: &V) {
        let i = self
            .index_of(v)
            .unwrap_or_else(|| panic!("{v:?} is not in this domain's universe"));
        self.active.fill(false);
        self.active.set(i, true);
        self.size = 1;
    }

    /// The first active value in universe order.
    ///
    /// # Panics
    /// Panics if the domain is empty.
    pub fn first(&self) -> &V {
        let i = self.active.first_one().expect("domain is empty");
        &self.universe.values[i]
    }

    /// Active values, in universe order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.active.iter_ones().map(move |i| &self.universe.values[i])
    }

    /// Removes every active value for which `keep` returns `false`.
    /// Returns whether anything was removed. This is the domain's
    /// "iterate with in-place removal" operation: `keep` sees each
    /// currently-active value exactly once and the domain mutates safely
    /// underneath it.
    pub fn retain<F: FnMut(&V) -> bool>(&mut self, mut keep: F) -> bool {
        let mut removed = false;
        for i in self.active.iter_ones().collect::<Vec<_>>() {
            if !keep(&self.universe.values[i]) {
                self.active.set(i, false);
                self.size -= 1;
                removed = true;
            }
        }
        removed
    }

    /// Pushes a snapshot of the active set onto the checkpoint stack.
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.active.clone());
    }

    /// Pops the most recent checkpoint and restores it as the active set.
    ///
    /// # Panics
    /// Panics if there is no checkpoint to roll back to.
    pub fn rollback(&mut self) {
        self.active = self.checkpoints.pop().expect("no checkpoint to roll back to");
        self.size = self.active.count_ones();
    }

    /// Discards the most recent checkpoint without restoring it.
    ///
    /// # Panics
    /// Panics if there is no checkpoint to discard.
    pub fn commit(&mut self) {
        self.checkpoints.pop().expect("no checkpoint to commit");
    }

    /// Drops every outstanding checkpoint.
    pub fn clear_checkpoints(&mut self) {
        self.checkpoints.clear();
    }

    /// A deep copy of the active mask sharing the immutable universe.
    /// The copy starts with an empty checkpoint stack.
    pub fn copy(&self) -> Self {
        Domain {
            universe: Arc::clone(&self.universe),
            active: self.active.clone(),
            size: self.size,
            checkpoints: Vec::new(),
        }
    }
}

impl<V: Value> Clone for Domain<V> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<V: Value> PartialEq for Domain<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values().collect::<Vec<_>>() == other.values().collect::<Vec<_>>()
    }
}

impl<V: Value> Eq for Domain<V> {}

impl<V: Value> fmt::Debug for Domain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_tracks_active_population() {
        let mut d = Domain::new(vec![1, 2, 3, 4]);
        assert_eq!(d.size(), 4);
        assert!(d.remove(&2));
        assert_eq!(d.size(), 3);
        assert!(!d.contains(&2));
    }

    #[test]
    fn removing_absent_value_returns_false() {
        let mut d = Domain::new(vec![1, 2, 3]);
        d.remove(&2);
        assert!(!d.remove(&2));
    }

    #[test]
    fn restoring_present_value_returns_false() {
        let mut d = Domain::new(vec![1, 2, 3]);
        assert!(!d.restore(&1));
    }

    #[test]
    fn restore_brings_value_back() {
        let mut d = Domain::new(vec![1, 2, 3]);
        d.remove(&2);
        assert!(d.restore(&2));
        assert!(d.contains(&2));
        assert_eq!(d.size(), 3);
    }

    #[test]
    fn reduce_to_leaves_singleton() {
        let mut d = Domain::new(vec![1, 2, 3]);
        d.reduce_to(&2);
        assert!(d.is_singleton());
        assert_eq!(d.values().collect::<Vec<_>>(), vec![&2]);
    }

    #[test]
    #[should_panic]
    fn reduce_to_value_outside_universe_panics() {
        let mut d = Domain::new(vec![1, 2, 3]);
        d.reduce_to(&9);
    }

    #[test]
    #[should_panic]
    fn first_on_empty_domain_panics() {
        let mut d = Domain::new(vec![1]);
        d.remove(&1);
        d.first();
    }

    #[test]
    #[should_panic]
    fn rollback_without_checkpoint_panics() {
        let mut d: Domain<i32> = Domain::new(vec![1, 2]);
        d.rollback();
    }

    #[test]
    fn checkpoint_then_rollback_restores_values() {
        let mut d = Domain::new(vec![1, 2, 3, 4]);
        let before: Vec<i32> = d.values().copied().collect();
        d.checkpoint();
        d.remove(&2);
        d.remove(&3);
        d.rollback();
        let after: Vec<i32> = d.values().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn commit_discards_the_checkpoint_without_restoring() {
        let mut d = Domain::new(vec![1, 2, 3, 4]);
        d.checkpoint();
        d.remove(&2);
        d.commit();
        assert_eq!(d.values().copied().collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn copy_is_independent() {
        let mut d = Domain::new(vec![1, 2, 3]);
        let copy = d.copy();
        d.remove(&1);
        assert!(!d.contains(&1));
        assert!(copy.contains(&1));
    }

    #[test]
    fn values_are_yielded_in_universe_order() {
        let d = Domain::new(vec![5, 1, 3]);
        assert_eq!(d.values().copied().collect::<Vec<_>>(), vec![5, 1, 3]);
    }

    #[test]
    fn retain_removes_failing_values_and_reports_change() {
        let mut d = Domain::new(vec![1, 2, 3, 4, 5]);
        let changed = d.retain(|v| v % 2 == 0);
        assert!(changed);
        assert_eq!(d.values().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert!(!d.retain(|v| v % 2 == 0));
    }
}
