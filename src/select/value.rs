//! Value-ordering heuristics. Ground: section 4.E.

use std::fmt;

use crate::assignment::Assignment;
use crate::constraint::Domains;
use crate::csp::Csp;
use crate::domain::Domain;
use crate::value::Value;

/// Orders the candidate values of the variable just selected.
pub trait ValueSelector<V: Value>: fmt::Debug + Send + Sync {
    fn order(
        &self,
        var: usize,
        domain: &Domain<V>,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &Domains<V>,
    ) -> Vec<V>;
}

/// Universe order, unchanged.
#[derive(Debug, Default)]
pub struct DefaultValueSelector;

impl DefaultValueSelector {
    pub fn new() -> Self {
        DefaultValueSelector
    }
}

impl<V: Value> ValueSelector<V> for DefaultValueSelector {
    fn order(
        &self,
        _var: usize,
        domain: &Domain<V>,
        _csp: &Csp<V>,
        _assignment: &Assignment<V>,
        _domains: &Domains<V>,
    ) -> Vec<V> {
        domain.values().cloned().collect()
    }
}

/// Least Constraining Value: orders by fewest neighbor-domain values ruled
/// out, ascending. Degenerates to domain order above `max_domain_size`
/// (default 20), per section 4.E.
#[derive(Debug)]
pub struct LcvValueSelector {
    max_domain_size: usize,
}

impl Default for LcvValueSelector {
    fn default() -> Self {
        LcvValueSelector { max_domain_size: 20 }
    }
}

impl LcvValueSelector {
    pub fn new(max_domain_size: usize) -> Self {
        LcvValueSelector { max_domain_size }
    }

    fn ruled_out_count<V: Value>(
        &self,
        var: usize,
        value: &V,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &Domains<V>,
    ) -> usize {
        let mut trial = assignment.clone();
        trial.assign(var, value.clone());
        let mut count = 0;
        for &ci in csp.network().constraints_on(var) {
            let constraint = &csp.constraints()[ci];
            for &y in constraint.scope() {
                if y == var || assignment.is_assigned(y) {
                    continue;
                }
                for w in domains[y].values() {
                    if !constraint.is_consistent_with(y, w, &trial) {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}

impl<V: Value> ValueSelector<V> for LcvValueSelector {
    fn order(
        &self,
        var: usize,
        domain: &Domain<V>,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &Domains<V>,
    ) -> Vec<V> {
        if domain.size() > self.max_domain_size {
            return domain.values().cloned().collect();
        }
        let mut candidates: Vec<(V, usize)> = domain
            .values()
            .map(|v| (v.clone(), self.ruled_out_count(var, v, csp, assignment, domains)))
            .collect();
        // Stable sort preserves domain order among ties.
        candidates.sort_by_key(|(_, cost)| *cost);
        candidates.into_iter().map(|(v, _)| v).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;
    use crate::csp::CspBuilder;

    #[test]
    fn default_selector_yields_universe_order() {
        let d = Domain::new(vec![3, 1, 2]);
        let mut b: CspBuilder<i32> = CspBuilder::new();
        b.add_variable("x", Domain::new(vec![3, 1, 2])).unwrap();
        let csp = b.build().unwrap();
        let domains = csp.working_domains();
        let a: Assignment<i32> = Assignment::new(1);
        let sel = DefaultValueSelector::new();
        assert_eq!(sel.order(0, &d, &csp, &a, &domains), vec![3, 1, 2]);
    }

    #[test]
    fn lcv_prefers_value_ruling_out_fewer_neighbor_values() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2, 3])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let domains = csp.working_domains();
        let a: Assignment<i32> = Assignment::new(2);
        let sel = LcvValueSelector::new(20);
        let order = sel.order(x, &domains[x], &csp, &a, &domains);
        // Both 1 and 2 rule out exactly one neighbor value here; order is
        // stable, so domain order (1, 2) is preserved.
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn lcv_degenerates_to_default_above_threshold() {
        let d = Domain::new(vec![1, 2, 3]);
        let mut b: CspBuilder<i32> = CspBuilder::new();
        b.add_variable("x", Domain::new(vec![1, 2, 3])).unwrap();
        let csp = b.build().unwrap();
        let domains = csp.working_domains();
        let a: Assignment<i32> = Assignment::new(1);
        let sel = LcvValueSelector::new(1);
        assert_eq!(sel.order(0, &d, &csp, &a, &domains), vec![1, 2, 3]);
    }
}
