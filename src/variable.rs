//! A CSP variable: an immutable name/index/initial-domain triple plus a
//! mutable weight used by Dom/WDeg.
//!
//! Ground: section 3 ("Variable"), teacher's `Variable`/`VariableID` split
//! in `variable_provider.rs` (index assigned densely at insertion, identity
//! separate from the value domain itself).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Domain;
use crate::value::Value;

/// A single CSP variable. `index` is dense (`0..N-1`) within its owning
/// [`crate::csp::Csp`]. `weight` is mutable and defaults to `1.0`;
/// Dom/WDeg increments it whenever a contradiction is attributed to a
/// constraint involving this variable (design notes §9: the field is kept
/// and wired through, rather than removed as dead).
pub struct Variable<V> {
    name: String,
    index: usize,
    initial_domain: Domain<V>,
    weight: AtomicU64,
}

impl<V: Value> Variable<V> {
    pub fn new(name: impl Into<String>, index: usize, initial_domain: Domain<V>) -> Self {
        Variable {
            name: name.into(),
            index,
            initial_domain,
            weight: AtomicU64::new(1.0f64.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn initial_domain(&self) -> &Domain<V> {
        &self.initial_domain
    }

    /// Current weight, loaded with relaxed ordering (read-mostly,
    /// observational use only; see §5 on the concurrency model for why a
    /// relaxed load is sufficient here, matching the cancellation flag).
    pub fn weight(&self) -> f64 {
        f64::from_bits(self.weight.load(Ordering::Relaxed))
    }

    pub fn set_weight(&self, w: f64) {
        self.weight.store(w.to_bits(), Ordering::Relaxed);
    }

    /// Resets the weight to its default (`1.0`). Called at the start of
    /// every solve so repeated or concurrent solves over the same `Csp`
    /// don't see weights accumulated by a previous run (section 5).
    pub fn reset_weight(&self) {
        self.set_weight(1.0);
    }

    /// Atomic fetch-add: a CAS loop over the bit pattern, since `AtomicU64`
    /// has no native float add. Needed because section 5 permits multiple
    /// solves to share one `Csp` concurrently; a load-then-store pair here
    /// would race.
    pub fn add_weight(&self, delta: f64) {
        let mut current = self.weight.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.weight.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

impl<V> PartialEq for Variable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index == other.index
    }
}

impl<V> Eq for Variable<V> {}

impl<V> fmt::Debug for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("weight", &self.weight())
            .finish()
    }
}

impl<V> fmt::Display for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_is_by_name_and_index() {
        let a = Variable::new("x", 0, Domain::new(vec![1, 2]));
        let b = Variable::new("x", 0, Domain::new(vec![9, 9, 9]));
        let c = Variable::new("x", 1, Domain::new(vec![1, 2]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn weight_defaults_to_one_and_accumulates() {
        let v = Variable::new("x", 0, Domain::new(vec![1]));
        assert_eq!(v.weight(), 1.0);
        v.add_weight(1.0);
        v.add_weight(1.0);
        assert_eq!(v.weight(), 3.0);
    }

    #[test]
    fn reset_weight_restores_the_default() {
        let v = Variable::new("x", 0, Domain::new(vec![1]));
        v.add_weight(5.0);
        assert_eq!(v.weight(), 6.0);
        v.reset_weight();
        assert_eq!(v.weight(), 1.0);
    }
}
