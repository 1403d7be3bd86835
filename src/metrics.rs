//! Atomic solve counters and their point-in-time snapshot. Ground: section
//! 6, result shape's metrics object; section 5 ("Metrics counters use
//! atomic increments so that a concurrent observer... reads a monotonic,
//! if momentarily stale, snapshot").

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Owned exclusively by one solve (section 5); a reference may be handed
/// to an event publisher for progress snapshots while the solve runs.
#[derive(Debug, Default)]
pub struct Metrics {
    nodes_explored: AtomicU64,
    backtracks: AtomicU64,
    constraint_checks: AtomicU64,
    arc_revisions: AtomicU64,
    domain_reductions: AtomicU64,
    solutions_found: AtomicU64,
    start: Option<Instant>,
}

/// Immutable point-in-time copy, serializable for the result shape and
/// for progress events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub nodes_explored: u64,
    pub backtracks: u64,
    pub constraint_checks: u64,
    pub arc_revisions: u64,
    pub domain_reductions: u64,
    pub solutions_found: u64,
    pub elapsed_ms: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            start: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Metrics::new();
    }

    pub fn record_node(&self) {
        self.nodes_explored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backtrack(&self) {
        self.backtracks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_solution(&self) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_propagation(&self, constraint_checks: u64, arc_revisions: u64, domain_reductions: u64) {
        self.constraint_checks.fetch_add(constraint_checks, Ordering::Relaxed);
        self.arc_revisions.fetch_add(arc_revisions, Ordering::Relaxed);
        self.domain_reductions.fetch_add(domain_reductions, Ordering::Relaxed);
    }

    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let elapsed_ms = self
            .start
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or_default();
        MetricsSnapshot {
            nodes_explored: self.nodes_explored.load(Ordering::Relaxed),
            backtracks: self.backtracks.load(Ordering::Relaxed),
            constraint_checks: self.constraint_checks.load(Ordering::Relaxed),
            arc_revisions: self.arc_revisions.load(Ordering::Relaxed),
            domain_reductions: self.domain_reductions.load(Ordering::Relaxed),
            solutions_found: self.solutions_found.load(Ordering::Relaxed),
            elapsed_ms,
        }
    }
}
