//! N-Queens. Ground: section 6's N-Queens builder entry and the routing
//! rule ("N-Queens with N ≥ 50 bypasses backtracking and invokes
//! min-conflicts").

use crate::constraints::{NQueensDiagonalConstraint, NotEqualConstraint};
use crate::csp::{Csp, CspBuilder};
use crate::domain::Domain;
use crate::error::CspError;
use crate::metrics::MetricsSnapshot;
use crate::minconflicts::{self, MinConflictsConfig};
use crate::result::{Solution, SolveResult};
use crate::search::{BacktrackingSolver, SolverConfig};

/// N ≥ this routes to min-conflicts instead of backtracking search.
pub const MIN_CONFLICTS_THRESHOLD: usize = 50;

pub const MAX_N: usize = 10_000;

/// Variables `Q0..QN-1`, each ranging over `0..N`; pairwise `NotEqual` and
/// `NQueensDiagonal` constraints between every pair of rows.
pub fn build(n: usize) -> Result<Csp<i64>, CspError> {
    if n == 0 || n > MAX_N {
        return Err(CspError::MalformedInput(format!(
            "n-queens board size must be between 1 and {MAX_N}, got {n}"
        )));
    }
    let mut b: CspBuilder<i64> = CspBuilder::new();
    let mut vars = Vec::with_capacity(n);
    for row in 0..n {
        vars.push(b.add_variable(format!("Q{row}"), Domain::new((0..n as i64).collect()))?);
    }
    for i in 0..n {
        for j in (i + 1)..n {
            b.add_constraint(Box::new(NotEqualConstraint::new(format!("Q{i}!=Q{j}"), vars[i], vars[j])))?;
            b.add_constraint(Box::new(NQueensDiagonalConstraint::new(
                format!("Q{i}~Q{j}"),
                vars[i],
                vars[j],
                (j - i) as i64,
            )))?;
        }
    }
    b.build()
}

/// Solves N-Queens, routing to min-conflicts at or above
/// [`MIN_CONFLICTS_THRESHOLD`] and to backtracking search below it.
pub fn solve(n: usize, config: SolverConfig, mc_config: MinConflictsConfig) -> Result<SolveResult<i64>, CspError> {
    if n >= MIN_CONFLICTS_THRESHOLD {
        if n == 0 || n > MAX_N {
            return Err(CspError::MalformedInput(format!(
                "n-queens board size must be between 1 and {MAX_N}, got {n}"
            )));
        }
        let metrics = MetricsSnapshot::default();
        return Ok(match minconflicts::solve(n, mc_config) {
            Some(queens) => {
                let solution: Solution<i64> = queens
                    .iter()
                    .enumerate()
                    .map(|(row, &col)| (format!("Q{row}"), col as i64))
                    .collect();
                SolveResult::satisfiable(vec![solution], metrics)
            }
            None => SolveResult::unsatisfiable(metrics),
        });
    }
    let csp = build(n)?;
    let solver = BacktrackingSolver::new(config);
    Ok(solver.solve(&csp))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::result::SolveStatus;

    #[test]
    fn four_queens_is_satisfiable() {
        let result = solve(4, SolverConfig::default(), MinConflictsConfig::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert!(result.metrics.nodes_explored >= 4);
    }

    #[test]
    fn two_queens_is_unsatisfiable() {
        let result = solve(2, SolverConfig::default(), MinConflictsConfig::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Unsatisfiable);
        assert!(result.solutions.is_empty());
    }

    #[test]
    fn one_queen_has_a_single_solution() {
        let result = solve(1, SolverConfig::default(), MinConflictsConfig::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert_eq!(result.solutions[0]["Q0"], 0);
    }

    #[test]
    fn out_of_range_n_is_rejected() {
        assert!(build(0).is_err());
        assert!(build(MAX_N + 1).is_err());
    }

    #[test]
    fn large_n_routes_through_min_conflicts() {
        let result = solve(100, SolverConfig::default(), MinConflictsConfig::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert_eq!(result.solutions[0].len(), 100);
    }
}
