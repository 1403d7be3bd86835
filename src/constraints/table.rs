//! Extensional (allowed- or disallowed-tuple) constraint. Ground: section
//! 4.B, "Table".
//!
//! AC-3 preprocessing decomposes the table into pairwise projections
//! between every pair of scope positions (a sound but weaker-than-global
//! arc-consistency approximation for arity > 2); the precise joint check
//! used during search lives in `is_consistent_with`/`is_consistent`,
//! which consult the full per-position support index.

use std::collections::HashMap;

use crate::assignment::Assignment;
use crate::constraint::{ArcRef, Constraint, Domains, PropagateOutcome};
use crate::value::Value;

#[derive(Debug)]
pub struct TableConstraint<V> {
    name: String,
    scope: Vec<usize>,
    tuples: Vec<Vec<V>>,
    /// `supports[pos]` maps a value at that position to the indices of
    /// `tuples` taking that value there.
    supports: Vec<HashMap<V, Vec<usize>>>,
}

impl<V: Value> TableConstraint<V> {
    fn build(name: impl Into<String>, scope: Vec<usize>, tuples: Vec<Vec<V>>) -> Self {
        let arity = scope.len();
        let mut supports: Vec<HashMap<V, Vec<usize>>> = vec![HashMap::new(); arity];
        for (ti, tuple) in tuples.iter().enumerate() {
            assert_eq!(tuple.len(), arity, "tuple arity must match scope arity");
            for (pos, value) in tuple.iter().enumerate() {
                supports[pos].entry(value.clone()).or_default().push(ti);
            }
        }
        TableConstraint {
            name: name.into(),
            scope,
            tuples,
            supports,
        }
    }

    /// Builds the constraint directly from the allowed tuples.
    pub fn allowed(name: impl Into<String>, scope: Vec<usize>, tuples: Vec<Vec<V>>) -> Self {
        Self::build(name, scope, tuples)
    }

    /// Builds the constraint as the complement of `disallowed` within the
    /// cartesian product of `domain_values` (one value list per scope
    /// position, in scope order).
    pub fn disallowed(
        name: impl Into<String>,
        scope: Vec<usize>,
        domain_values: Vec<Vec<V>>,
        disallowed: Vec<Vec<V>>,
    ) -> Self {
        let forbidden: std::collections::HashSet<Vec<V>> = disallowed.into_iter().collect();
        let mut tuples = Vec::new();
        let mut current = Vec::with_capacity(domain_values.len());
        cartesian(&domain_values, &mut current, &mut |tuple: &[V]| {
            if !forbidden.contains(tuple) {
                tuples.push(tuple.to_vec());
            }
        });
        Self::build(name, scope, tuples)
    }

    fn position_of(&self, var: usize) -> usize {
        self.scope.iter().position(|&v| v == var).expect("var not in scope")
    }

    fn matches_assigned(&self, tuple_index: usize, skip_pos: usize, assignment: &Assignment<V>) -> bool {
        self.scope.iter().enumerate().all(|(p, &v)| {
            p == skip_pos
                || match assignment.get_value(v) {
                    Some(val) => self.tuples[tuple_index][p] == *val,
                    None => true,
                }
        })
    }
}

fn cartesian<V: Clone>(remaining: &[Vec<V>], current: &mut Vec<V>, emit: &mut impl FnMut(&[V])) {
    match remaining.split_first() {
        None => emit(current),
        Some((head, tail)) => {
            for v in head {
                current.push(v.clone());
                cartesian(tail, current, emit);
                current.pop();
            }
        }
    }
}

impl<V: Value> Constraint<V> for TableConstraint<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[usize] {
        &self.scope
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        let row: Option<Vec<&V>> = self.scope.iter().map(|&v| assignment.get_value(v)).collect();
        match row {
            Some(row) => self
                .tuples
                .iter()
                .any(|t| t.iter().zip(row.iter()).all(|(a, b)| a == *b)),
            None => false,
        }
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        if self.scope.iter().all(|&v| !assignment.is_assigned(v)) {
            return true;
        }
        self.tuples
            .iter()
            .enumerate()
            .any(|(ti, _)| self.matches_assigned(ti, usize::MAX, assignment))
    }

    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool {
        let pos = self.position_of(var);
        match self.supports[pos].get(value) {
            Some(idxs) => idxs.iter().any(|&ti| self.matches_assigned(ti, pos, assignment)),
            None => false,
        }
    }

    fn propagate(
        &self,
        assigned_var: usize,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagateOutcome {
        crate::constraint::generic_forward_check(self, assigned_var, domains, assignment)
    }

    /// Pairwise projections between every two scope positions, used as a
    /// (sound, not complete) approximation during AC-3 preprocessing.
    fn arcs(&self, self_index: usize) -> Vec<ArcRef> {
        let mut arcs = Vec::new();
        for &x in &self.scope {
            for &y in &self.scope {
                if x != y {
                    arcs.push(ArcRef {
                        x,
                        y,
                        constraint: self_index,
                    });
                }
            }
        }
        arcs
    }

    fn revise(&self, x: usize, y: usize, domains: &mut Domains<V>) -> bool {
        let px = self.position_of(x);
        let py = self.position_of(y);
        domains[x].retain(|vx| {
            domains_contains_support(&self.tuples, px, vx, py, &domains[y])
        })
    }
}

fn domains_contains_support<V: Value>(
    tuples: &[Vec<V>],
    px: usize,
    vx: &V,
    py: usize,
    dy: &crate::domain::Domain<V>,
) -> bool {
    tuples
        .iter()
        .any(|t| &t[px] == vx && dy.contains(&t[py]))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn allowed_tuples_drive_consistency() {
        let c = TableConstraint::allowed(
            "t",
            vec![0, 1],
            vec![vec![1, 2], vec![2, 3], vec![3, 1]],
        );
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(0, 1);
        assert!(Constraint::<i32>::is_consistent_with(&c, 1, &2, &a));
        assert!(!Constraint::<i32>::is_consistent_with(&c, 1, &3, &a));
    }

    #[test]
    fn disallowed_is_complement_of_cartesian_product() {
        let c = TableConstraint::disallowed(
            "t",
            vec![0, 1],
            vec![vec![1, 2], vec![1, 2]],
            vec![vec![1, 1]],
        );
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(0, 1);
        assert!(Constraint::<i32>::is_consistent_with(&c, 1, &2, &a));
        assert!(!Constraint::<i32>::is_consistent_with(&c, 1, &1, &a));
    }

    #[test]
    fn revise_drops_values_without_any_support() {
        let c = TableConstraint::allowed("t", vec![0, 1], vec![vec![1, 2], vec![2, 3]]);
        let mut domains: Domains<i32> = vec![Domain::new(vec![1, 2, 3]), Domain::new(vec![3])];
        assert!(Constraint::<i32>::revise(&c, 0, 1, &mut domains));
        assert_eq!(domains[0].values().copied().collect::<Vec<_>>(), vec![2]);
    }
}
