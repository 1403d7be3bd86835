//! Propagation engines: Forward Checking (default) and AC-3. Ground:
//! section 4.C.

pub mod ac3;
pub mod forward_checking;

pub use ac3::Ac3Propagator;
pub use forward_checking::ForwardChecker;

use std::fmt;

use crate::assignment::Assignment;
use crate::constraint::Domains;
use crate::csp::Csp;
use crate::value::Value;

/// Per-call counters accumulated by a propagation pass. These feed into
/// the solve-wide `Metrics` (section 6's result shape).
#[derive(Debug, Clone, Copy, Default)]
pub struct PropagationStats {
    pub constraint_checks: u64,
    pub arc_revisions: u64,
    pub domain_reductions: u64,
}

/// Outcome of a propagation pass: whether a domain emptied, the
/// constraint responsible (best-effort, per section 7, for Dom/WDeg
/// learning), and accumulated counters.
#[derive(Debug, Clone, Default)]
pub struct PropagationResult {
    pub contradiction: bool,
    pub failed_constraint: Option<usize>,
    pub stats: PropagationStats,
}

impl PropagationResult {
    pub fn ok(stats: PropagationStats) -> Self {
        PropagationResult {
            contradiction: false,
            failed_constraint: None,
            stats,
        }
    }

    pub fn contradiction(constraint: Option<usize>, stats: PropagationStats) -> Self {
        PropagationResult {
            contradiction: true,
            failed_constraint: constraint,
            stats,
        }
    }
}

/// A propagation engine: runs once, eagerly, before search starts
/// (`preprocess`), and/or after each assignment during search
/// (`propagate_after_assignment`).
pub trait Propagator<V: Value>: fmt::Debug + Send + Sync {
    fn preprocess(&self, csp: &Csp<V>, domains: &mut Domains<V>) -> PropagationResult;

    fn propagate_after_assignment(
        &self,
        var: usize,
        csp: &Csp<V>,
        domains: &mut Domains<V>,
        assignment: &Assignment<V>,
    ) -> PropagationResult;
}
