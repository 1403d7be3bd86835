//! Forward checking: a no-op preprocessor, and an after-assignment pass
//! that delegates to each affected constraint's own `propagate`. Ground:
//! section 4.C, "Forward Checker".

use crate::assignment::Assignment;
use crate::constraint::Domains;
use crate::csp::Csp;
use crate::value::Value;

use super::{PropagationResult, PropagationStats, Propagator};

#[derive(Debug, Default)]
pub struct ForwardChecker;

impl ForwardChecker {
    pub fn new() -> Self {
        ForwardChecker
    }
}

impl<V: Value> Propagator<V> for ForwardChecker {
    fn preprocess(&self, _csp: &Csp<V>, _domains: &mut Domains<V>) -> PropagationResult {
        PropagationResult::ok(PropagationStats::default())
    }

    fn propagate_after_assignment(
        &self,
        var: usize,
        csp: &Csp<V>,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagationResult {
        let mut stats = PropagationStats::default();
        for &ci in csp.network().constraints_on(var) {
            let constraint = &csp.constraints()[ci];
            let outcome = constraint.propagate(var, domains, assignment);
            stats.constraint_checks += 1;
            stats.domain_reductions += outcome.domain_reductions as u64;
            if outcome.contradiction {
                return PropagationResult::contradiction(Some(ci), stats);
            }
        }
        PropagationResult::ok(stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;
    use crate::csp::CspBuilder;
    use crate::domain::Domain;

    #[test]
    fn propagate_after_assignment_prunes_neighbors() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1, 2, 3])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2, 3])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let mut domains = csp.working_domains();
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(x, 1);
        domains[x].reduce_to(&1);

        let fc = ForwardChecker::new();
        let result = fc.propagate_after_assignment(x, &csp, &mut domains, &a);
        assert!(!result.contradiction);
        assert!(!domains[y].contains(&1));
    }

    #[test]
    fn propagate_after_assignment_reports_contradiction_and_offending_constraint() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let mut domains = csp.working_domains();
        let mut a: Assignment<i32> = Assignment::new(2);
        a.assign(x, 1);
        domains[x].reduce_to(&1);

        let fc = ForwardChecker::new();
        let result = fc.propagate_after_assignment(x, &csp, &mut domains, &a);
        assert!(result.contradiction);
        assert_eq!(result.failed_constraint, Some(0));
    }
}
