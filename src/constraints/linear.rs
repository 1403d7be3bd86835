//! `sum(coeff_i * x_i) op rhs`, evaluated by bounds analysis. Ground:
//! section 4.B, "Linear".
//!
//! `is_consistent`/`is_consistent_with` don't receive live domains (the
//! trait's contract, section 3), so they bound free variables by their
//! *initial* domain range, precomputed at construction — a sound
//! over-approximation (it can only widen the feasible interval, never
//! wrongly narrow it, so it never rejects a partial that could still be
//! completed). `propagate`, which does receive live domains, uses the
//! tighter current bounds for real pruning.

use crate::assignment::Assignment;
use crate::constraint::{ArcRef, Constraint, Domains, PropagateOutcome};
use crate::value::NumericValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearOp {
    Eq,
    Le,
    Ge,
    Lt,
    Gt,
}

impl LinearOp {
    fn feasible(self, min: i64, max: i64, rhs: i64) -> bool {
        match self {
            LinearOp::Eq => min <= rhs && rhs <= max,
            LinearOp::Le => min <= rhs,
            LinearOp::Ge => max >= rhs,
            LinearOp::Lt => min < rhs,
            LinearOp::Gt => max > rhs,
        }
    }

    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            LinearOp::Eq => lhs == rhs,
            LinearOp::Le => lhs <= rhs,
            LinearOp::Ge => lhs >= rhs,
            LinearOp::Lt => lhs < rhs,
            LinearOp::Gt => lhs > rhs,
        }
    }
}

#[derive(Debug)]
pub struct LinearConstraint {
    name: String,
    scope: Vec<usize>,
    coeffs: Vec<i64>,
    rhs: i64,
    op: LinearOp,
    initial_bounds: Vec<(i64, i64)>,
}

impl LinearConstraint {
    pub fn new<V: NumericValue>(
        name: impl Into<String>,
        scope: Vec<usize>,
        coeffs: Vec<i64>,
        op: LinearOp,
        rhs: i64,
        initial_domains: &[&crate::domain::Domain<V>],
    ) -> Self {
        assert_eq!(scope.len(), coeffs.len());
        assert_eq!(scope.len(), initial_domains.len());
        let initial_bounds = initial_domains
            .iter()
            .map(|d| {
                let mut it = d.values().map(|v| v.to_i64());
                let first = it.next().expect("domain must be non-empty");
                it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
            })
            .collect();
        LinearConstraint {
            name: name.into(),
            scope,
            coeffs,
            rhs,
            op,
            initial_bounds,
        }
    }

    fn position_of(&self, var: usize) -> usize {
        self.scope.iter().position(|&v| v == var).expect("var not in scope")
    }

    /// Contribution bounds `(min, max)` of position `pos` to the sum,
    /// given `assignment` and a fallback bound for unassigned positions.
    fn term_bounds<V: NumericValue>(
        &self,
        pos: usize,
        assignment: &Assignment<V>,
        free_bounds: &(i64, i64),
    ) -> (i64, i64) {
        let var = self.scope[pos];
        let c = self.coeffs[pos];
        if let Some(v) = assignment.get_value(var) {
            let term = c * v.to_i64();
            (term, term)
        } else {
            let (lo, hi) = *free_bounds;
            if c >= 0 {
                (c * lo, c * hi)
            } else {
                (c * hi, c * lo)
            }
        }
    }

    fn sum_bounds<V: NumericValue>(&self, assignment: &Assignment<V>) -> (i64, i64) {
        let mut min = 0i64;
        let mut max = 0i64;
        for pos in 0..self.scope.len() {
            let (lo, hi) = self.term_bounds(pos, assignment, &self.initial_bounds[pos]);
            min += lo;
            max += hi;
        }
        (min, max)
    }
}

impl<V: NumericValue> Constraint<V> for LinearConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[usize] {
        &self.scope
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        let mut sum = 0i64;
        for pos in 0..self.scope.len() {
            match assignment.get_value(self.scope[pos]) {
                Some(v) => sum += self.coeffs[pos] * v.to_i64(),
                None => return false,
            }
        }
        self.op.holds(sum, self.rhs)
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        let (min, max) = self.sum_bounds(assignment);
        self.op.feasible(min, max, self.rhs)
    }

    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool {
        let pos = self.position_of(var);
        let mut min = 0i64;
        let mut max = 0i64;
        for p in 0..self.scope.len() {
            let (lo, hi) = if p == pos {
                let term = self.coeffs[p] * value.to_i64();
                (term, term)
            } else {
                self.term_bounds(p, assignment, &self.initial_bounds[p])
            };
            min += lo;
            max += hi;
        }
        self.op.feasible(min, max, self.rhs)
    }

    fn propagate(
        &self,
        assigned_var: usize,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagateOutcome {
        let mut reductions = 0;
        for pos in 0..self.scope.len() {
            let y = self.scope[pos];
            if y == assigned_var || assignment.is_assigned(y) {
                continue;
            }
            // Live bounds for every other position, using the current
            // (possibly propagation-shrunk) domains rather than the
            // constructor-time snapshot.
            let mut other_min = 0i64;
            let mut other_max = 0i64;
            for p2 in 0..self.scope.len() {
                if p2 == pos {
                    continue;
                }
                let var2 = self.scope[p2];
                let c2 = self.coeffs[p2];
                if let Some(v) = assignment.get_value(var2) {
                    let term = c2 * v.to_i64();
                    other_min += term;
                    other_max += term;
                } else {
                    let mut it = domains[var2].values().map(|v| v.to_i64());
                    let first = match it.next() {
                        Some(v) => v,
                        None => {
                            return PropagateOutcome::contradiction();
                        }
                    };
                    let (lo, hi) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
                    if c2 >= 0 {
                        other_min += c2 * lo;
                        other_max += c2 * hi;
                    } else {
                        other_min += c2 * hi;
                        other_max += c2 * lo;
                    }
                }
            }
            let c = self.coeffs[pos];
            let op = self.op;
            let rhs = self.rhs;
            let shrank = domains[y].retain(|w| {
                let term = c * w.to_i64();
                op.feasible(other_min + term, other_max + term, rhs)
            });
            if shrank {
                reductions += 1;
                if domains[y].is_empty() {
                    return PropagateOutcome {
                        contradiction: true,
                        domain_reductions: reductions,
                    };
                }
            }
        }
        PropagateOutcome::ok(reductions)
    }

    /// No binary decomposition: this constraint never participates in
    /// AC-3 preprocessing (section 4.B).
    fn arcs(&self, _self_index: usize) -> Vec<ArcRef> {
        Vec::new()
    }

    fn revise(&self, _x: usize, _y: usize, _domains: &mut Domains<V>) -> bool {
        false
    }
}
