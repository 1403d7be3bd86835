//! The `Csp` container and its builder. Ground: section 3 ("CSP") and
//! section 7 ("Structural" errors are builder-time and fatal).

use std::collections::HashMap;

use crate::constraint::{Constraint, Domains};
use crate::domain::Domain;
use crate::error::CspError;
use crate::network::ConstraintNetwork;
use crate::value::Value;
use crate::variable::Variable;

/// Immutable variables and constraints, the network derived from them, and
/// a by-name index. The CSP owns its variables and constraints; the
/// network owns only indices into them (section 3).
pub struct Csp<V> {
    variables: Vec<Variable<V>>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    network: ConstraintNetwork,
    by_name: HashMap<String, usize>,
}

impl<V: Value> Csp<V> {
    pub fn builder() -> CspBuilder<V> {
        CspBuilder::new()
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint<V>>] {
        &self.constraints
    }

    pub fn network(&self) -> &ConstraintNetwork {
        &self.network
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn variable_named(&self, name: &str) -> Option<&Variable<V>> {
        self.variable_index(name).map(|i| &self.variables[i])
    }

    /// One fresh copy of each variable's initial domain, indexed the same
    /// way as `variables()`. The search mutates these, never the
    /// variables' own `initial_domain`.
    pub fn working_domains(&self) -> Domains<V> {
        self.variables.iter().map(|v| v.initial_domain().copy()).collect()
    }

    /// Resets every variable's weight to its default. Called at the start
    /// of a solve using Dom/WDeg (section 5: weight is reset at each
    /// solve's start, since a `Csp` may be reused, even concurrently,
    /// across multiple solves).
    pub fn reset_variable_weights(&self) {
        for v in &self.variables {
            v.reset_weight();
        }
    }
}

/// Accumulates variables and constraints, validating as it goes, then
/// assembles a `Csp`. Validation failures are reported eagerly at the call
/// that caused them, matching section 7's "surfaced to the caller as
/// invalid-input" for structural errors.
pub struct CspBuilder<V> {
    variables: Vec<Variable<V>>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    by_name: HashMap<String, usize>,
}

impl<V: Value> Default for CspBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> CspBuilder<V> {
    pub fn new() -> Self {
        CspBuilder {
            variables: Vec::new(),
            constraints: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Appends a variable with the given initial domain, returning its
    /// dense index for use in later `add_constraint` scopes.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        initial_domain: Domain<V>,
    ) -> Result<usize, CspError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(CspError::DuplicateVariable(name));
        }
        if initial_domain.is_empty() {
            return Err(CspError::EmptyDomain(name));
        }
        let index = self.variables.len();
        self.by_name.insert(name.clone(), index);
        self.variables.push(Variable::new(name, index, initial_domain));
        Ok(index)
    }

    /// Appends a constraint, validating that every variable in its scope
    /// was already added.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint<V>>) -> Result<(), CspError> {
        for &v in constraint.scope() {
            if v >= self.variables.len() {
                return Err(CspError::UnknownVariable {
                    constraint: constraint.name().to_string(),
                    variable: format!("#{v}"),
                });
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn build(self) -> Result<Csp<V>, CspError> {
        let network = ConstraintNetwork::build(self.variables.len(), &self.constraints);
        Ok(Csp {
            variables: self.variables,
            constraints: self.constraints,
            network,
            by_name: self.by_name,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;

    #[test]
    fn duplicate_variable_name_is_rejected() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let err = b.add_variable("x", Domain::new(vec![1])).unwrap_err();
        assert_eq!(err, CspError::DuplicateVariable("x".to_string()));
    }

    #[test]
    fn constraint_referencing_unknown_variable_is_rejected() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let err = b
            .add_constraint(Box::new(NotEqualConstraint::new("x!=y", 0, 5)))
            .unwrap_err();
        assert!(matches!(err, CspError::UnknownVariable { .. }));
    }

    #[test]
    fn build_produces_a_working_network() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        assert_eq!(csp.num_variables(), 2);
        assert_eq!(csp.network().degree(0), 1);
        assert_eq!(csp.variable_index("y"), Some(1));
        let domains = csp.working_domains();
        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].size(), 2);
    }

    #[test]
    fn empty_domain_is_rejected() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let err = b.add_variable("x", Domain::new(vec![])).unwrap_err();
        assert_eq!(err, CspError::EmptyDomain("x".to_string()));
    }

    #[test]
    fn reset_variable_weights_restores_every_default() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        b.add_variable("y", Domain::new(vec![1, 2])).unwrap();
        let csp = b.build().unwrap();
        csp.variables()[0].add_weight(4.0);
        csp.variables()[1].add_weight(9.0);
        csp.reset_variable_weights();
        assert_eq!(csp.variables()[0].weight(), 1.0);
        assert_eq!(csp.variables()[1].weight(), 1.0);
    }
}
