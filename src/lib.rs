#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
// Disallow mod.rs, its too confusing to see a bunch of mod.rs files in various tools.
#![forbid(clippy::mod_module_files)]

//! A finite-domain constraint satisfaction solver: reversible bitmask
//! domains, a constraint network precomputed once from a set of
//! polymorphic `Constraint` trait objects, AC-3 and forward-checking
//! propagation, pluggable variable/value ordering heuristics, a
//! backtracking search engine, a min-conflicts local search for large
//! instances, and a handful of curated problem builders (N-Queens,
//! Sudoku, map coloring, cryptarithmetic).

pub mod assignment;
pub mod constraint;
pub mod constraints;
pub mod csp;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod minconflicts;
pub mod network;
pub mod problems;
pub mod propagate;
pub mod result;
pub mod search;
pub mod select;
pub mod value;
pub mod variable;

pub use assignment::Assignment;
pub use constraint::{ArcRef, Constraint, Domains, PropagateOutcome};
pub use csp::{Csp, CspBuilder};
pub use domain::Domain;
pub use error::CspError;
pub use events::{EventPublisher, LoggingEventPublisher, NoopEventPublisher};
pub use metrics::{Metrics, MetricsSnapshot};
pub use network::ConstraintNetwork;
pub use propagate::{Ac3Propagator, ForwardChecker, PropagationResult, PropagationStats, Propagator};
pub use result::{Solution, SolveResult, SolveStatus};
pub use search::{BacktrackingSolver, PropagatorKind, SolverConfig, ValueHeuristic, VariableHeuristic};
pub use select::{
    DefaultValueSelector, DegreeSelector, DomWdegSelector, LcvValueSelector, MrvDegreeSelector, MrvSelector,
    ValueSelector, VariableSelector,
};
pub use value::{NumericValue, OrderedValue, Value};
pub use variable::Variable;
