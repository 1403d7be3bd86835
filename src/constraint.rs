//! The polymorphic constraint contract and directed arcs.
//!
//! Ground: section 3 ("Constraint", "Arc") and section 4.B. Modeled as a
//! `dyn` trait object the way `rust-ninjas`' `ch3_constraint_satisfaction_problems.rs`
//! and `MVanderloo-constraint-solver`'s `Constraint<T>` both do — an
//! interface-bound, open-extensible set of variants rather than a closed
//! tagged union (design notes §9 call both valid; this keeps the set open
//! for external problem builders to add their own constraint kinds).

use std::fmt;

use crate::assignment::Assignment;
use crate::domain::Domain;
use crate::value::Value;

/// Working domains indexed by variable index.
pub type Domains<V> = Vec<Domain<V>>;

/// A directed arc `(x, y, constraint)`: "make x consistent against y under
/// constraint". Equality is by all three fields (section 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcRef {
    pub x: usize,
    pub y: usize,
    pub constraint: usize,
}

/// Result of a single constraint's `propagate` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropagateOutcome {
    pub contradiction: bool,
    pub domain_reductions: usize,
}

impl PropagateOutcome {
    pub fn ok(reductions: usize) -> Self {
        PropagateOutcome {
            contradiction: false,
            domain_reductions: reductions,
        }
    }

    pub fn contradiction() -> Self {
        PropagateOutcome {
            contradiction: true,
            domain_reductions: 0,
        }
    }
}

/// The uniform contract every constraint (binary or global) satisfies.
///
/// `is_consistent` must never reject a partial assignment that some
/// completion could still satisfy (it may over-approve); `is_satisfied` is
/// exact on complete assignments.
pub trait Constraint<V: Value>: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Ordered list of variable indices this constraint restricts.
    fn scope(&self) -> &[usize];

    fn arity(&self) -> usize {
        self.scope().len()
    }

    /// Exact check on a complete assignment.
    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool;

    /// Approximate check on a partial assignment; never rejects a
    /// partial that could still be completed.
    fn is_consistent(&self, assignment: &Assignment<V>) -> bool;

    /// As if `assignment` additionally mapped `var -> value`.
    /// `assignment` must not already assign `var`.
    fn is_consistent_with(&self, var: usize, value: &V, assignment: &Assignment<V>) -> bool;

    /// Called once `assigned_var` has just been assigned in `assignment`.
    /// Removes values inconsistent with that assignment from the domains
    /// of other (still-unassigned) scope variables.
    fn propagate(
        &self,
        assigned_var: usize,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagateOutcome;

    /// Directed arcs this constraint contributes to AC-3's queue.
    /// `self_index` is this constraint's index within the owning CSP.
    fn arcs(&self, self_index: usize) -> Vec<ArcRef>;

    /// Removes from `D(x)` every value lacking support in `D(y)` under
    /// this constraint. Returns whether `D(x)` shrank.
    fn revise(&self, x: usize, y: usize, domains: &mut Domains<V>) -> bool;
}

/// Arcs for a binary constraint: both directions between the two scope
/// variables. Shared helper for every binary constraint's `arcs` impl.
pub fn binary_arcs(scope: &[usize], self_index: usize) -> Vec<ArcRef> {
    debug_assert_eq!(scope.len(), 2);
    vec![
        ArcRef {
            x: scope[0],
            y: scope[1],
            constraint: self_index,
        },
        ArcRef {
            x: scope[1],
            y: scope[0],
            constraint: self_index,
        },
    ]
}

/// Generic forward-checking propagation: for every other unassigned
/// variable in `scope`, drop every value inconsistent with the
/// assignment just made. Valid for any constraint that implements
/// `is_consistent_with` faithfully; constraints with a cheaper
/// specialized path (e.g. `AllDifferent`) may override `propagate`
/// instead of calling this.
pub fn generic_forward_check<V: Value, C: Constraint<V> + ?Sized>(
    constraint: &C,
    assigned_var: usize,
    domains: &mut Domains<V>,
    assignment: &Assignment<V>,
) -> PropagateOutcome {
    let mut reductions = 0;
    for &y in constraint.scope() {
        if y == assigned_var || assignment.is_assigned(y) {
            continue;
        }
        let shrank = domains[y].retain(|w| constraint.is_consistent_with(y, w, assignment));
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
