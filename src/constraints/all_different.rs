//! `AllDifferent` over an arbitrary-arity scope. Ground: section 4.B.

use std::collections::HashSet;

use crate::assignment::Assignment;
use crate::constraint::{ArcRef, Constraint, Domains, PropagateOutcome};
use crate::value::Value;

#[derive(Debug)]
pub struct AllDifferentConstraint {
    name: String,
    scope: Vec<usize>,
}

impl AllDifferentConstraint {
    pub fn new(name: impl Into<String>, scope: Vec<usize>) -> Self {
        AllDifferentConstraint {
            name: name.into(),
            scope,
        }
    }
}

impl<V: Value> Constraint<V> for AllDifferentConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[usize] {
        &self.scope
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::with_capacity(self.scope.len());
        for &v in &self.scope {
            match assignment.get_value(v) {
                Some(val) => {
                    if !seen.insert(val) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Duplicate-free on partials, by linear scan of the currently
    /// assigned scope variables (section 4.B).
    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::with_capacity(self.scope.len());
        for &v in &self.scope {
            if let Some(val) = assignment.get_value(v) {
                if !seen.insert(val) {
                    return false;
                }
            }
        }
        true
    }

    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool {
        self.scope
            .iter()
            .filter(|&&v| v != var)
            .all(|&v| assignment.get_value(v) != Some(value))
    }

    /// Remove the just-assigned value from every other unassigned scope
    /// variable (section 4.C): cheaper than the generic forward-check
    /// loop since the value to remove is already known.
    fn propagate(
        &self,
        assigned_var: usize,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagateOutcome {
        let Some(value) = assignment.get_value(assigned_var) else {
            return PropagateOutcome::ok(0);
        };
        let value = value.clone();
        let mut reductions = 0;
        for &v in &self.scope {
            if v == assigned_var || assignment.is_assigned(v) {
                continue;
            }
            if domains[v].remove(&value) {
                reductions += 1;
                if domains[v].is_empty() {
                    return PropagateOutcome {
                        contradiction: true,
                        domain_reductions: reductions,
                    };
                }
            }
        }
        PropagateOutcome::ok(reductions)
    }

    /// Every ordered pair within the scope contributes an arc; AC-3
    /// revision is singleton-pruning only (section 4.B).
    fn arcs(&self, self_index: usize) -> Vec<ArcRef> {
        let mut arcs = Vec::with_capacity(self.scope.len() * (self.scope.len() - 1));
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
        if domains[y].is_singleton() {
            let v = domains[y].first().clone();
            domains[x].remove(&v)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn is_consistent_rejects_duplicate_partial() {
        let c = AllDifferentConstraint::new("alldiff", vec![0, 1, 2]);
        let mut a: Assignment<i32> = Assignment::new(3);
        a.assign(0, 1);
        a.assign(1, 1);
        assert!(!Constraint::<i32>::is_consistent(&c, &a));
    }

    #[test]
    fn propagate_removes_assigned_value_from_peers() {
        let c = AllDifferentConstraint::new("alldiff", vec![0, 1, 2]);
        let mut domains: Domains<i32> = vec![
            Domain::new(vec![1]),
            Domain::new(vec![1, 2, 3]),
            Domain::new(vec![1, 2]),
        ];
        let mut a: Assignment<i32> = Assignment::new(3);
        a.assign(0, 1);
        let outcome = Constraint::<i32>::propagate(&c, 0, &mut domains, &a);
        assert!(!outcome.contradiction);
        assert!(!domains[1].contains(&1));
        assert!(!domains[2].contains(&1));
    }

    #[test]
    fn propagate_reports_contradiction_on_domain_wipeout() {
        let c = AllDifferentConstraint::new("alldiff", vec![0, 1]);
        let mut domains: Domains<i32> = vec![Domain::new(vec![1]), Domain::new(vec![1])];
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(0, 1);
        let outcome = Constraint::<i32>::propagate(&c, 0, &mut domains, &a);
        assert!(outcome.contradiction);
    }
}
