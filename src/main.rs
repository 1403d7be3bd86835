//! Solve N-Queens, Sudoku, map coloring, or a cryptarithmetic puzzle from
//! the command line. A thin harness over the `csp` library; all of the
//! actual solving lives there.

use clap::{Parser, Subcommand};
use csp::minconflicts::MinConflictsConfig;
use csp::problems::{coloring, cryptarithmetic, queens, sudoku};
use csp::search::{BacktrackingSolver, SolverConfig};
use csp::{Solution, SolveStatus};

#[derive(Parser)]
#[command(name = "csp", about = "Finite-domain constraint satisfaction solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the N-Queens problem for an N x N board.
    Queens {
        n: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Solve a 9x9 Sudoku grid given as 81 digits, row-major, 0 = blank.
    Sudoku { digits: String },
    /// Solve the canonical Australia map-coloring instance.
    Australia,
    /// Solve a cryptarithmetic puzzle, e.g. `csp cryptarithmetic SEND MORE -- MONEY`.
    Cryptarithmetic {
        addends: Vec<String>,
        #[arg(last = true)]
        result: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Queens { n, seed } => {
            let mc_config = MinConflictsConfig {
                seed,
                ..MinConflictsConfig::default()
            };
            match queens::solve(n, SolverConfig::default(), mc_config) {
                Ok(result) => print_result(&result.status, &result.solutions, result.metrics.elapsed_ms),
                Err(err) => eprintln!("error: {err}"),
            }
        }
        Command::Sudoku { digits } => match parse_grid(&digits) {
            Ok(grid) => match sudoku::build(&grid) {
                Ok(csp) => {
                    let solver = BacktrackingSolver::new(SolverConfig::default());
                    let result = solver.solve(&csp);
                    if result.status == SolveStatus::Satisfiable {
                        let out = sudoku::solution_to_grid(&result.solutions[0]);
                        for row in out {
                            println!("{}", row.iter().map(i64::to_string).collect::<Vec<_>>().join(" "));
                        }
                    } else {
                        println!("{:?}", result.status);
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            },
            Err(err) => eprintln!("error: {err}"),
        },
        Command::Australia => {
            let (regions, edges, k) = coloring::australia();
            match coloring::build(&regions, &edges, k) {
                Ok(csp) => {
                    let solver = BacktrackingSolver::new(SolverConfig::default());
                    let result = solver.solve(&csp);
                    print_result(&result.status, &result.solutions, result.metrics.elapsed_ms);
                }
                Err(err) => eprintln!("error: {err}"),
            }
        }
        Command::Cryptarithmetic { addends, result } => {
            let Some(result_word) = result.into_iter().next() else {
                eprintln!("error: expected a single result word after `--`");
                return;
            };
            match cryptarithmetic::build(&addends, &result_word) {
                Ok(csp) => {
                    let solver = BacktrackingSolver::new(SolverConfig::default());
                    let result = solver.solve(&csp);
                    print_result(&result.status, &result.solutions, result.metrics.elapsed_ms);
                }
                Err(err) => eprintln!("error: {err}"),
            }
        }
    }
}

fn parse_grid(digits: &str) -> Result<Vec<Vec<u8>>, String> {
    let digits: Vec<u8> = digits
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10).map(|d| d as u8).ok_or_else(|| format!("invalid digit `{c}`")))
        .collect::<Result<_, _>>()?;
    if digits.len() != 81 {
        return Err(format!("expected 81 digits, got {}", digits.len()));
    }
    Ok(digits.chunks(9).map(<[u8]>::to_vec).collect())
}

fn print_result(status: &SolveStatus, solutions: &[Solution<i64>], elapsed_ms: u64) {
    println!("{status:?} in {elapsed_ms}ms");
    if let Some(solution) = solutions.first() {
        let mut pairs: Vec<_> = solution.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in pairs {
            println!("  {name} = {value}");
        }
    }
}
