//! `x != y`. Ground: section 4.B, "NotEqual".

use crate::assignment::Assignment;
use crate::constraint::{binary_arcs, generic_forward_check, ArcRef, Constraint, Domains, PropagateOutcome};
use crate::value::Value;

#[derive(Debug)]
pub struct NotEqualConstraint {
    name: String,
    scope: [usize; 2],
}

impl NotEqualConstraint {
    pub fn new(name: impl Into<String>, x: usize, y: usize) -> Self {
        NotEqualConstraint {
            name: name.into(),
            scope: [x, y],
        }
    }
}

impl<V: Value> Constraint<V> for NotEqualConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[usize] {
        &self.scope
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        assignment.get_value(self.scope[0]) != assignment.get_value(self.scope[1])
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        match (
            assignment.get_value(self.scope[0]),
            assignment.get_value(self.scope[1]),
        ) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }

    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool {
        let other = if var == self.scope[0] {
            self.scope[1]
        } else {
            self.scope[0]
        };
        match assignment.get_value(other) {
            Some(v) => v != value,
            None => true,
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
    fn revise_prunes_only_against_singleton() {
        let c = NotEqualConstraint::new("x!=y", 0, 1);
        let mut domains: Domains<i32> = vec![Domain::new(vec![1, 2, 3]), Domain::new(vec![2, 9])];
        assert!(!Constraint::<i32>::revise(&c, 0, 1, &mut domains));
        domains[1].reduce_to(&2);
        assert!(Constraint::<i32>::revise(&c, 0, 1, &mut domains));
        assert!(!domains[0].contains(&2));
    }

    #[test]
    fn satisfied_iff_values_differ() {
        let c = NotEqualConstraint::new("x!=y", 0, 1);
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(0, 1);
        a.assign(1, 2);
        assert!(Constraint::<i32>::is_satisfied(&c, &a));
        a.assign(1, 1);
        assert!(!Constraint::<i32>::is_satisfied(&c, &a));
    }
}
