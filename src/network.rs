//! Precomputed adjacency over a CSP's variables and constraints. Ground:
//! section 3, "Constraint Network". Built once at CSP construction and
//! immutable thereafter; the network owns only indices, never the
//! variables/constraints themselves (those belong to the `Csp`).

use std::collections::{HashMap, HashSet};

use crate::constraint::Constraint;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct ConstraintNetwork {
    /// Constraint indices touching each variable.
    constraints_on: Vec<Vec<usize>>,
    /// Binary constraint indices linking each unordered pair of variables.
    constraints_between: HashMap<(usize, usize), Vec<usize>>,
    /// Variables sharing at least one constraint with each variable.
    neighbors: Vec<HashSet<usize>>,
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ConstraintNetwork {
    pub fn build<V: Value>(num_variables: usize, constraints: &[Box<dyn Constraint<V>>]) -> Self {
        let mut constraints_on = vec![Vec::new(); num_variables];
        let mut constraints_between: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut neighbors = vec![HashSet::new(); num_variables];

        for (ci, c) in constraints.iter().enumerate() {
            let scope = c.scope();
            for &v in scope {
                constraints_on[v].push(ci);
            }
            for &a in scope {
                for &b in scope {
                    if a != b {
                        neighbors[a].insert(b);
                    }
                }
            }
            if scope.len() == 2 {
                constraints_between
                    .entry(pair_key(scope[0], scope[1]))
                    .or_default()
                    .push(ci);
            }
        }

        ConstraintNetwork {
            constraints_on,
            constraints_between,
            neighbors,
        }
    }

    pub fn constraints_on(&self, var: usize) -> &[usize] {
        &self.constraints_on[var]
    }

    pub fn constraints_between(&self, a: usize, b: usize) -> &[usize] {
        self.constraints_between
            .get(&pair_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn neighbors(&self, var: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[var].iter().copied()
    }

    pub fn degree(&self, var: usize) -> usize {
        self.constraints_on[var].len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;

    #[test]
    fn degree_and_neighbors_reflect_scopes() {
        let constraints: Vec<Box<dyn Constraint<i32>>> = vec![
            Box::new(NotEqualConstraint::new("a!=b", 0, 1)),
            Box::new(NotEqualConstraint::new("b!=c", 1, 2)),
        ];
        let net = ConstraintNetwork::build::<i32>(3, &constraints);
        assert_eq!(net.degree(1), 2);
        assert_eq!(net.degree(0), 1);
        assert_eq!(net.neighbors(1).collect::<HashSet<_>>(), HashSet::from([0, 2]));
        assert_eq!(net.constraints_between(0, 1), &[0]);
        assert!(net.constraints_between(0, 2).is_empty());
    }
}
