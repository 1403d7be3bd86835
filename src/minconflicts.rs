//! Min-conflicts local search, the large-N-Queens escape hatch. Ground:
//! section 4.G. Runs entirely outside the `Csp`/`Domain` machinery — it
//! operates directly on the N-Queens state (column per row, plus running
//! conflict counters), the way the spec describes it.

use rand::rngs::SmallRng;
use rand::Rng;
use rand_seeder::Seeder;

/// `seed` and `max_iter` are exposed as configuration rather than
/// hard-coded (design notes §9); the reference implementation's fixed
/// seed (42) becomes this crate's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinConflictsConfig {
    pub seed: u64,
    /// `None` means the section 4.G budget of `50 * n`.
    pub max_iter: Option<usize>,
}

impl Default for MinConflictsConfig {
    fn default() -> Self {
        MinConflictsConfig { seed: 42, max_iter: None }
    }
}

struct Board {
    n: usize,
    queens: Vec<usize>,
    col_counts: Vec<u32>,
    diag1_counts: Vec<u32>,
    diag2_counts: Vec<u32>,
}

impl Board {
    fn diag1(&self, row: usize, col: usize) -> usize {
        row + col
    }

    fn diag2(&self, row: usize, col: usize) -> usize {
        row + self.n - 1 - col
    }

    fn place(&mut self, row: usize, col: usize) {
        self.queens[row] = col;
        self.col_counts[col] += 1;
        self.diag1_counts[self.diag1(row, col)] += 1;
        self.diag2_counts[self.diag2(row, col)] += 1;
    }

    fn remove(&mut self, row: usize) {
        let col = self.queens[row];
        self.col_counts[col] -= 1;
        self.diag1_counts[self.diag1(row, col)] -= 1;
        self.diag2_counts[self.diag2(row, col)] -= 1;
    }

    /// Number of other queens attacking `(row, col)` if it were occupied,
    /// not counting `row`'s own current queen.
    fn conflicts_at(&self, row: usize, col: usize) -> u32 {
        self.col_counts[col] + self.diag1_counts[self.diag1(row, col)] + self.diag2_counts[self.diag2(row, col)]
    }

    fn row_conflicts(&self, row: usize) -> u32 {
        let col = self.queens[row];
        // The queen at `row` counts itself in each counter once.
        self.conflicts_at(row, col) - 3
    }

    fn total_conflicts(&self) -> u32 {
        (0..self.n).map(|r| self.row_conflicts(r)).sum::<u32>() / 2
    }
}

/// Greedy init followed by min-conflicts hill-climbing. Returns the
/// column-per-row placement on success, `None` if `max_iter` (default
/// `50 * n`) is exhausted first.
pub fn solve(n: usize, config: MinConflictsConfig) -> Option<Vec<usize>> {
    if n == 0 {
        return Some(Vec::new());
    }
    let mut rng: SmallRng = Seeder::from(config.seed).make_rng();
    let max_iter = config.max_iter.unwrap_or(50 * n);

    let mut board = Board {
        n,
        queens: vec![0; n],
        col_counts: vec![0; n],
        diag1_counts: vec![0; 2 * n - 1],
        diag2_counts: vec![0; 2 * n - 1],
    };

    for row in 0..n {
        let best_col = min_conflict_column(&board, row, &mut rng);
        board.place(row, best_col);
    }

    if board.total_conflicts() == 0 {
        return Some(board.queens.clone());
    }

    for _ in 0..max_iter {
        let conflicted_rows: Vec<usize> = (0..n).filter(|&r| board.row_conflicts(r) > 0).collect();
        if conflicted_rows.is_empty() {
            return Some(board.queens.clone());
        }
        let row = conflicted_rows[rng.gen_range(0..conflicted_rows.len())];
        board.remove(row);
        let best_col = min_conflict_column(&board, row, &mut rng);
        board.place(row, best_col);
        if board.total_conflicts() == 0 {
            return Some(board.queens.clone());
        }
    }
    None
}

/// Column in `row` minimizing conflicts against the board's current state
/// (the row itself must already be unoccupied — both the greedy init and
/// the iteration step call this after clearing `row`'s own counters);
/// ties broken uniformly at random.
fn min_conflict_column(board: &Board, row: usize, rng: &mut SmallRng) -> usize {
    let mut best_cols = Vec::with_capacity(board.n);
    let mut best_count = u32::MAX;
    for col in 0..board.n {
        let count = board.conflicts_at(row, col);
        match count.cmp(&best_count) {
            std::cmp::Ordering::Less => {
                best_count = count;
                best_cols.clear();
                best_cols.push(col);
            }
            std::cmp::Ordering::Equal => best_cols.push(col),
            std::cmp::Ordering::Greater => {}
        }
    }
    best_cols[rng.gen_range(0..best_cols.len())]
}

/// Rejects any permutation placing two queens on the same row, column, or
/// diagonal (section 8, "N-Queens: `validateSolution`").
pub fn validate_solution(queens: &[usize]) -> bool {
    let n = queens.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if queens[i] == queens[j] {
                return false;
            }
            if (queens[i] as i64 - queens[j] as i64).abs() == (i as i64 - j as i64).abs() {
                return false;
            }
        }
    }
    true
}
