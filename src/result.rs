//! The result shape returned from `solve` and its on-the-wire pieces.
//! Ground: section 6, "Result shape".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Satisfiable,
    Unsatisfiable,
    Timeout,
    Cancelled,
    Error,
}

/// A complete assignment, keyed by variable name rather than index so it
/// survives outside the process that produced it.
pub type Solution<V> = HashMap<String, V>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult<V> {
    pub status: SolveStatus,
    pub solutions: Vec<Solution<V>>,
    pub metrics: MetricsSnapshot,
    pub error: Option<String>,
}

impl<V> SolveResult<V> {
    pub fn satisfiable(solutions: Vec<Solution<V>>, metrics: MetricsSnapshot) -> Self {
        SolveResult {
            status: SolveStatus::Satisfiable,
            solutions,
            metrics,
            error: None,
        }
    }

    pub fn unsatisfiable(metrics: MetricsSnapshot) -> Self {
        SolveResult {
            status: SolveStatus::Unsatisfiable,
            solutions: Vec::new(),
            metrics,
            error: None,
        }
    }

    pub fn timeout(partial: Vec<Solution<V>>, metrics: MetricsSnapshot) -> Self {
        SolveResult {
            status: SolveStatus::Timeout,
            solutions: partial,
            metrics,
            error: None,
        }
    }

    pub fn cancelled(partial: Vec<Solution<V>>, metrics: MetricsSnapshot) -> Self {
        SolveResult {
            status: SolveStatus::Cancelled,
            solutions: partial,
            metrics,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, metrics: MetricsSnapshot) -> Self {
        SolveResult {
            status: SolveStatus::Error,
            solutions: Vec::new(),
            metrics,
            error: Some(message.into()),
        }
    }
}
