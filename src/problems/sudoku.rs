//! Sudoku. Ground: section 6, "Sudoku(9×9, 0 = blank)".

use crate::constraints::AllDifferentConstraint;
use crate::csp::{Csp, CspBuilder};
use crate::domain::Domain;
use crate::error::CspError;
use crate::result::Solution;

pub const SIZE: usize = 9;
pub const BOX_SIZE: usize = 3;

/// Parses a `9×9` row-major grid (`0` = blank) into a `Csp`: cells named
/// `C{row}{col}`, blanks ranging over `1..=9`, pre-filled cells pinned to
/// a singleton domain, and 27 `AllDifferent` constraints (9 rows, 9
/// columns, 9 boxes).
pub fn build(rows: &[Vec<u8>]) -> Result<Csp<i64>, CspError> {
    if rows.len() != SIZE || rows.iter().any(|r| r.len() != SIZE) {
        return Err(CspError::MalformedInput(format!(
            "sudoku grid must be {SIZE}x{SIZE}, got {} rows",
            rows.len()
        )));
    }
    let mut b: CspBuilder<i64> = CspBuilder::new();
    let mut idx = [[0usize; SIZE]; SIZE];
    for (r, row) in rows.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            let name = format!("C{r}{c}");
            let domain = match cell {
                0 => Domain::new((1..=9i64).collect()),
                1..=9 => Domain::new(vec![cell as i64]),
                other => {
                    return Err(CspError::MalformedInput(format!(
                        "cell {name} has out-of-range value {other}"
                    )))
                }
            };
            idx[r][c] = b.add_variable(name, domain)?;
        }
    }
    for r in 0..SIZE {
        let scope: Vec<usize> = (0..SIZE).map(|c| idx[r][c]).collect();
        b.add_constraint(Box::new(AllDifferentConstraint::new(format!("row{r}"), scope)))?;
    }
    for c in 0..SIZE {
        let scope: Vec<usize> = (0..SIZE).map(|r| idx[r][c]).collect();
        b.add_constraint(Box::new(AllDifferentConstraint::new(format!("col{c}"), scope)))?;
    }
    for box_row in 0..BOX_SIZE {
        for box_col in 0..BOX_SIZE {
            let mut scope = Vec::with_capacity(SIZE);
            for dr in 0..BOX_SIZE {
                for dc in 0..BOX_SIZE {
                    scope.push(idx[box_row * BOX_SIZE + dr][box_col * BOX_SIZE + dc]);
                }
            }
            b.add_constraint(Box::new(AllDifferentConstraint::new(
                format!("box{box_row}{box_col}"),
                scope,
            )))?;
        }
    }
    b.build()
}

/// Reassembles a solution map back into a `9×9` grid, in row-major order.
pub fn solution_to_grid(solution: &Solution<i64>) -> Vec<Vec<i64>> {
    (0..SIZE)
        .map(|r| (0..SIZE).map(|c| solution[&format!("C{r}{c}")]).collect())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::result::SolveStatus;
    use crate::search::{BacktrackingSolver, SolverConfig};

    fn easy_grid() -> Vec<Vec<u8>> {
        vec![
            vec![5, 3, 0, 0, 7, 0, 0, 0, 0],
            vec![6, 0, 0, 1, 9, 5, 0, 0, 0],
            vec![0, 9, 8, 0, 0, 0, 0, 6, 0],
            vec![8, 0, 0, 0, 6, 0, 0, 0, 3],
            vec![4, 0, 0, 8, 0, 3, 0, 0, 1],
            vec![7, 0, 0, 0, 2, 0, 0, 0, 6],
            vec![0, 6, 0, 0, 0, 0, 2, 8, 0],
            vec![0, 0, 0, 4, 1, 9, 0, 0, 5],
            vec![0, 0, 0, 0, 8, 0, 0, 7, 9],
        ]
    }

    #[test]
    fn easy_puzzle_solves_with_the_documented_first_row() {
        let csp = build(&easy_grid()).unwrap();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        let result = solver.solve(&csp);
        assert_eq!(result.status, SolveStatus::Satisfiable);
        let grid = solution_to_grid(&result.solutions[0]);
        assert_eq!(grid[0], vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[test]
    fn fully_filled_grid_solves_in_zero_backtracks() {
        let csp = build(&easy_grid()).unwrap();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        let result = solver.solve(&csp);
        let grid = solution_to_grid(&result.solutions[0]);
        let rows: Vec<Vec<u8>> = grid.iter().map(|r| r.iter().map(|&v| v as u8).collect()).collect();

        let csp2 = build(&rows).unwrap();
        let solver2 = BacktrackingSolver::new(SolverConfig::default());
        let result2 = solver2.solve(&csp2);
        assert_eq!(result2.metrics.backtracks, 0);
    }

    #[test]
    fn wrong_size_grid_is_rejected() {
        assert!(build(&vec![vec![0; 9]; 8]).is_err());
    }
}
