//! `left <= right`. Ground: section 4.B, "LessThanOrEqual".
//!
//! Design notes §9 flags the teacher's bounds revision as buggy: revising
//! `D(right)` against `D(left)` must drop values below `min(D(left))`, not
//! `min(D(right))`. This implementation applies the corrected rule.

use crate::assignment::Assignment;
use crate::constraint::{binary_arcs, generic_forward_check, ArcRef, Constraint, Domains, PropagateOutcome};
use crate::value::OrderedValue;

#[derive(Debug)]
pub struct LessThanOrEqualConstraint {
    name: String,
    left: usize,
    right: usize,
    scope: [usize; 2],
}

impl LessThanOrEqualConstraint {
    pub fn new(name: impl Into<String>, left: usize, right: usize) -> Self {
        LessThanOrEqualConstraint {
            name: name.into(),
            left,
            right,
            scope: [left, right],
        }
    }
}

impl<V: OrderedValue> Constraint<V> for LessThanOrEqualConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[usize] {
        &self.scope
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        match (
            assignment.get_value(self.left),
            assignment.get_value(self.right),
        ) {
            (Some(l), Some(r)) => l <= r,
            _ => false,
        }
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        match (
            assignment.get_value(self.left),
            assignment.get_value(self.right),
        ) {
            (Some(l), Some(r)) => l <= r,
            _ => true,
        }
    }

    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool {
        if var == self.left {
            match assignment.get_value(self.right) {
                Some(r) => value <= r,
                None => true,
            }
        } else {
            match assignment.get_value(self.left) {
                Some(l) => l <= value,
                None => true,
            }
        }
    }

    fn propagate(
        &self,
        assigned_var: usize,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagateOutcome {
        generic_forward_check(self, assigned_var, domains, assignment)
    }

    fn arcs(&self, self_index: usize) -> Vec<ArcRef> {
        binary_arcs(&self.scope, self_index)
    }

    fn revise(&self, x: usize, y: usize, domains: &mut Domains<V>) -> bool {
        if x == self.left {
            debug_assert_eq!(y, self.right);
            let max_y = domains[y].values().max().cloned();
            match max_y {
                Some(max_y) => domains[x].retain(|v| *v <= max_y),
                None => false,
            }
        } else {
            debug_assert_eq!(y, self.left);
            let min_y = domains[y].values().min().cloned();
            match min_y {
                Some(min_y) => domains[x].retain(|v| *v >= min_y),
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn revise_left_drops_values_above_right_max() {
        let c = LessThanOrEqualConstraint::new("x<=y", 0, 1);
        let mut domains: Domains<i32> = vec![Domain::new(vec![1, 5, 9]), Domain::new(vec![1, 2, 3])];
        assert!(Constraint::<i32>::revise(&c, 0, 1, &mut domains));
        assert_eq!(domains[0].values().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn revise_right_drops_values_below_left_min() {
        let c = LessThanOrEqualConstraint::new("x<=y", 0, 1);
        let mut domains: Domains<i32> = vec![Domain::new(vec![3, 4, 5]), Domain::new(vec![1, 2, 6])];
        assert!(Constraint::<i32>::revise(&c, 1, 0, &mut domains));
        assert_eq!(domains[1].values().copied().collect::<Vec<_>>(), vec![6]);
    }
}
