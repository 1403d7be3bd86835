//! Graph/map coloring. Ground: section 6 ("Graph/Map coloring,
//! cryptarithmetic: as in §3/§4") and section 8's Australia scenario.

use std::collections::HashMap;

use crate::constraints::NotEqualConstraint;
use crate::csp::{Csp, CspBuilder};
use crate::domain::Domain;
use crate::error::CspError;

/// Builds a coloring CSP: one variable per region ranging over
/// `0..num_colors`, a `NotEqual` constraint per edge.
pub fn build(regions: &[String], edges: &[(String, String)], num_colors: usize) -> Result<Csp<i64>, CspError> {
    if num_colors == 0 {
        return Err(CspError::MalformedInput("num_colors must be at least 1".to_string()));
    }
    let mut b: CspBuilder<i64> = CspBuilder::new();
    let mut idx = HashMap::with_capacity(regions.len());
    for name in regions {
        let domain = Domain::new((0..num_colors as i64).collect());
        idx.insert(name.clone(), b.add_variable(name.clone(), domain)?);
    }
    for (u, v) in edges {
        let &ui = idx
            .get(u)
            .ok_or_else(|| CspError::MalformedInput(format!("edge references unknown region `{u}`")))?;
        let &vi = idx
            .get(v)
            .ok_or_else(|| CspError::MalformedInput(format!("edge references unknown region `{v}`")))?;
        b.add_constraint(Box::new(NotEqualConstraint::new(format!("{u}!={v}"), ui, vi)))?;
    }
    b.build()
}

/// The canonical Australia map-coloring instance from section 8's
/// concrete scenarios: WA, NT, SA, Q, NSW, V with their standard
/// adjacencies, 3 colors.
pub fn australia() -> (Vec<String>, Vec<(String, String)>, usize) {
    let regions = ["WA", "NT", "SA", "Q", "NSW", "V"].map(String::from).to_vec();
    let edges = [
        ("WA", "NT"),
        ("WA", "SA"),
        ("NT", "SA"),
        ("NT", "Q"),
        ("SA", "Q"),
        ("SA", "NSW"),
        ("SA", "V"),
        ("Q", "NSW"),
        ("NSW", "V"),
    ]
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .to_vec();
    (regions, edges, 3)
}
