//! Variable-ordering heuristics. Ground: section 4.D.

use std::collections::HashMap;
use std::fmt;

use crate::assignment::Assignment;
use crate::constraint::Domains;
use crate::csp::Csp;
use crate::value::Value;

/// Chooses the next unassigned variable to branch on. `record_failure` is
/// invoked by the search whenever propagation attributes a contradiction
/// to a specific constraint, before backtracking (section 4.D); most
/// selectors ignore it. `reset` runs once at the start of every solve.
pub trait VariableSelector<V: Value>: fmt::Debug + Send + Sync {
    fn reset(&mut self) {}

    fn select(&mut self, csp: &Csp<V>, domains: &Domains<V>, assignment: &Assignment<V>) -> Option<usize>;

    fn record_failure(&mut self, _csp: &Csp<V>, _var: usize, _constraint: usize) {}
}

fn unassigned<V: Value>(csp: &Csp<V>, assignment: &Assignment<V>) -> impl Iterator<Item = usize> + '_ {
    (0..csp.num_variables()).filter(move |&v| !assignment.is_assigned(v))
}

/// Number of constraints on `v` that still connect it to at least one
/// other unassigned variable (section 4.D, "Degree").
fn live_degree<V: Value>(csp: &Csp<V>, v: usize, assignment: &Assignment<V>) -> usize {
    csp.network()
        .constraints_on(v)
        .iter()
        .filter(|&&ci| {
            csp.constraints()[ci]
                .scope()
                .iter()
                .any(|&u| u != v && !assignment.is_assigned(u))
        })
        .count()
}

/// Minimum Remaining Values: smallest current domain, ties broken by
/// iteration order.
#[derive(Debug, Default)]
pub struct MrvSelector;

impl MrvSelector {
    pub fn new() -> Self {
        MrvSelector
    }
}

impl<V: Value> VariableSelector<V> for MrvSelector {
    fn select(&mut self, csp: &Csp<V>, domains: &Domains<V>, assignment: &Assignment<V>) -> Option<usize> {
        unassigned(csp, assignment).min_by_key(|&v| domains[v].size())
    }
}

/// Most constraints connecting it to other unassigned variables.
#[derive(Debug, Default)]
pub struct DegreeSelector;

impl DegreeSelector {
    pub fn new() -> Self {
        DegreeSelector
    }
}

impl<V: Value> VariableSelector<V> for DegreeSelector {
    fn select(&mut self, csp: &Csp<V>, _domains: &Domains<V>, assignment: &Assignment<V>) -> Option<usize> {
        unassigned(csp, assignment).max_by_key(|&v| live_degree(csp, v, assignment))
    }
}

/// MRV first; ties on `|D|` broken by Degree.
#[derive(Debug, Default)]
pub struct MrvDegreeSelector;

impl MrvDegreeSelector {
    pub fn new() -> Self {
        MrvDegreeSelector
    }
}

impl<V: Value> VariableSelector<V> for MrvDegreeSelector {
    fn select(&mut self, csp: &Csp<V>, domains: &Domains<V>, assignment: &Assignment<V>) -> Option<usize> {
        let best_size = unassigned(csp, assignment).map(|v| domains[v].size()).min()?;
        unassigned(csp, assignment)
            .filter(|&v| domains[v].size() == best_size)
            .max_by_key(|&v| live_degree(csp, v, assignment))
    }
}

/// Domain-size-over-weighted-degree. Each constraint carries a weight,
/// initialized to 1.0 and incremented by 1.0 whenever it is blamed for a
/// contradiction; the weight map is reset at the start of every solve
/// (section 4.D, "Dom/WDeg"). The aggregate is also mirrored onto
/// `Variable::weight` for external observability (design notes §9).
#[derive(Debug, Default)]
pub struct DomWdegSelector {
    weights: HashMap<usize, f64>,
}

const EPSILON: f64 = 1e-6;

impl DomWdegSelector {
    pub fn new() -> Self {
        DomWdegSelector {
            weights: HashMap::new(),
        }
    }

    fn weight(&self, constraint: usize) -> f64 {
        self.weights.get(&constraint).copied().unwrap_or(1.0)
    }

    fn weighted_degree<V: Value>(&self, csp: &Csp<V>, v: usize, assignment: &Assignment<V>) -> f64 {
        csp.network()
            .constraints_on(v)
            .iter()
            .filter(|&&ci| {
                csp.constraints()[ci]
                    .scope()
                    .iter()
                    .any(|&u| u != v && !assignment.is_assigned(u))
            })
            .map(|&ci| self.weight(ci))
            .sum()
    }
}

impl<V: Value> VariableSelector<V> for DomWdegSelector {
    fn reset(&mut self) {
        self.weights.clear();
    }

    fn select(&mut self, csp: &Csp<V>, domains: &Domains<V>, assignment: &Assignment<V>) -> Option<usize> {
        unassigned(csp, assignment)
            .map(|v| {
                let score = domains[v].size() as f64 / self.weighted_degree(csp, v, assignment).max(EPSILON);
                (v, score)
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).expect("scores are never NaN"))
            .map(|(v, _)| v)
    }

    /// Bumps the failing constraint's weight, then mirrors the bump onto
    /// `Variable::weight` for every variable in its scope — the aggregate
    /// used for external observability while `weights` stays authoritative
    /// for scoring (design notes §9).
    fn record_failure(&mut self, csp: &Csp<V>, _var: usize, constraint: usize) {
        let w = self.weights.entry(constraint).or_insert(1.0);
        *w += 1.0;
        for &u in csp.constraints()[constraint].scope() {
            csp.variables()[u].add_weight(1.0);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;
    use crate::csp::CspBuilder;
    use crate::domain::Domain;

    fn triangle() -> Csp<i32> {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2, 3])).unwrap();
        let z = b.add_variable("z", Domain::new(vec![1, 2, 3])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("y!=z", y, z))).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn mrv_picks_smallest_domain() {
        let csp = triangle();
        let domains = csp.working_domains();
        let a: Assignment<i32> = Assignment::new(3);
        let mut sel = MrvSelector::new();
        assert_eq!(sel.select(&csp, &domains, &a), Some(0));
    }

    #[test]
    fn degree_prefers_most_connected_variable() {
        let csp = triangle();
        let domains = csp.working_domains();
        let a: Assignment<i32> = Assignment::new(3);
        let mut sel = DegreeSelector::new();
        assert_eq!(sel.select(&csp, &domains, &a), Some(1));
    }

    #[test]
    fn dom_wdeg_reset_clears_learned_weights() {
        let csp = triangle();
        let mut sel = DomWdegSelector::new();
        sel.record_failure(&csp, 0, 0);
        assert_eq!(sel.weight(0), 2.0);
        assert_eq!(csp.variables()[0].weight(), 2.0);
        sel.reset();
        assert_eq!(sel.weight(0), 1.0);
    }
}
