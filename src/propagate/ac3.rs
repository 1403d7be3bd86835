//! AC-3 arc-consistency propagation. Ground: section 4.C, "AC-3
//! Propagator". Used for preprocessing by default (`ac3_preprocessing`);
//! available, but not the default, as the per-assignment propagator
//! (maintaining arc consistency during search, seeded only from the
//! arcs touching the variable just assigned).

use std::collections::{HashSet, VecDeque};

use crate::assignment::Assignment;
use crate::constraint::{ArcRef, Domains};
use crate::csp::Csp;
use crate::value::Value;

use super::{PropagationResult, PropagationStats, Propagator};

#[derive(Debug, Default)]
pub struct Ac3Propagator;

impl Ac3Propagator {
    pub fn new() -> Self {
        Ac3Propagator
    }

    fn run_queue<V: Value>(
        csp: &Csp<V>,
        domains: &mut Domains<V>,
        mut queue: VecDeque<ArcRef>,
        mut in_queue: HashSet<ArcRef>,
    ) -> PropagationResult {
        let mut stats = PropagationStats::default();
        while let Some(arc) = queue.pop_front() {
            in_queue.remove(&arc);
            let constraint = &csp.constraints()[arc.constraint];
            stats.arc_revisions += 1;
            let shrank = constraint.revise(arc.x, arc.y, domains);
            if !shrank {
                continue;
            }
            stats.domain_reductions += 1;
            if domains[arc.x].is_empty() {
                return PropagationResult::contradiction(Some(arc.constraint), stats);
            }
            for &ci2 in csp.network().constraints_on(arc.x) {
                let c2 = &csp.constraints()[ci2];
                for &k in c2.scope() {
                    if k != arc.x && k != arc.y {
                        let new_arc = ArcRef {
                            x: k,
                            y: arc.x,
                            constraint: ci2,
                        };
                        if in_queue.insert(new_arc) {
                            queue.push_back(new_arc);
                        }
                    }
                }
            }
        }
        PropagationResult::ok(stats)
    }
}

impl<V: Value> Propagator<V> for Ac3Propagator {
    /// Seeds the queue with every arc of every constraint (deduped).
    fn preprocess(&self, csp: &Csp<V>, domains: &mut Domains<V>) -> PropagationResult {
        let mut queue = VecDeque::new();
        let mut in_queue = HashSet::new();
        for (ci, constraint) in csp.constraints().iter().enumerate() {
            for arc in constraint.arcs(ci) {
                if in_queue.insert(arc) {
                    queue.push_back(arc);
                }
            }
        }
        Self::run_queue(csp, domains, queue, in_queue)
    }

    /// Seeds the queue with arcs `(k, var, c)` for every constraint `c` on
    /// `var` and every other variable `k` in its scope, then runs the same
    /// cascading revision loop as `preprocess`.
    fn propagate_after_assignment(
        &self,
        var: usize,
        csp: &Csp<V>,
        domains: &mut Domains<V>,
        _assignment: &Assignment<V>,
    ) -> PropagationResult {
        let mut queue = VecDeque::new();
        let mut in_queue = HashSet::new();
        for &ci in csp.network().constraints_on(var) {
            let constraint = &csp.constraints()[ci];
            for &k in constraint.scope() {
                if k != var {
                    let arc = ArcRef {
                        x: k,
                        y: var,
                        constraint: ci,
                    };
                    if in_queue.insert(arc) {
                        queue.push_back(arc);
                    }
                }
            }
        }
        Self::run_queue(csp, domains, queue, in_queue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;
    use crate::csp::CspBuilder;
    use crate::domain::Domain;

    #[test]
    fn preprocess_cascades_singleton_pruning() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2])).unwrap();
        let z = b.add_variable("z", Domain::new(vec![1, 2])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("y!=z", y, z))).unwrap();
        let csp = b.build().unwrap();
        let mut domains = csp.working_domains();

        let ac3 = Ac3Propagator::new();
        let result = ac3.preprocess(&csp, &mut domains);
        assert!(!result.contradiction);
        assert_eq!(domains[y].values().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(domains[z].values().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn preprocess_is_idempotent() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let mut domains = csp.working_domains();

        let ac3 = Ac3Propagator::new();
        ac3.preprocess(&csp, &mut domains);
        let second = ac3.preprocess(&csp, &mut domains);
        assert_eq!(second.stats.domain_reductions, 0);
    }

    #[test]
    fn preprocess_reports_contradiction_on_domain_wipeout() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let mut domains = csp.working_domains();

        let ac3 = Ac3Propagator::new();
        let result = ac3.preprocess(&csp, &mut domains);
        assert!(result.contradiction);
    }
}
