//! The optional search-progress collaborator. Ground: section 6, "Event
//! publisher callbacks", and section 5 ("must be non-blocking on the fast
//! path; it is responsible for internal fan-out").

use std::fmt;

use crate::metrics::MetricsSnapshot;
use crate::value::Value;

/// Invoked synchronously on the search thread at each named point. Every
/// method has a no-op default; implementations override only what they
/// need.
pub trait EventPublisher<V: Value>: fmt::Debug + Send + Sync {
    fn on_solve_started(&self, _num_vars: usize, _num_constraints: usize) {}
    fn on_variable_selected(&self, _var: &str, _domain_size: usize, _depth: usize) {}
    fn on_value_assigned(&self, _var: &str, _value: &V, _depth: usize) {}
    fn on_backtrack(&self, _var: &str, _depth: usize) {}
    fn on_solution_found(&self, _n: usize, _metrics: &MetricsSnapshot) {}
    /// Called every 1 000 explored nodes (section 6).
    fn on_progress(&self, _metrics: &MetricsSnapshot) {}
    fn on_solve_completed(&self, _satisfiable: bool, _metrics: &MetricsSnapshot) {}
}

/// The default when no publisher is configured.
#[derive(Debug, Default)]
pub struct NoopEventPublisher;

impl<V: Value> EventPublisher<V> for NoopEventPublisher {}

/// Mirrors every callback onto the `log` crate, the way
/// `Ivan-Sergeyev-mrf-map` wires its solver's progress logging — `debug!`
/// for lifecycle events, `trace!` for the high-frequency ones.
#[derive(Debug, Default)]
pub struct LoggingEventPublisher;

impl<V: Value> EventPublisher<V> for LoggingEventPublisher {
    fn on_solve_started(&self, num_vars: usize, num_constraints: usize) {
        log::debug!("solve started: {num_vars} variables, {num_constraints} constraints");
    }

    fn on_variable_selected(&self, var: &str, domain_size: usize, depth: usize) {
        log::trace!("depth {depth}: selected `{var}` (|D|={domain_size})");
    }

    fn on_value_assigned(&self, var: &str, value: &V, depth: usize) {
        log::trace!("depth {depth}: {var} = {value:?}");
    }

    fn on_backtrack(&self, var: &str, depth: usize) {
        log::trace!("depth {depth}: backtrack on `{var}`");
    }

    fn on_solution_found(&self, n: usize, metrics: &MetricsSnapshot) {
        log::debug!("solution {n} found after {} nodes", metrics.nodes_explored);
    }

    fn on_progress(&self, metrics: &MetricsSnapshot) {
        log::debug!("progress: {} nodes explored", metrics.nodes_explored);
    }

    fn on_solve_completed(&self, satisfiable: bool, metrics: &MetricsSnapshot) {
        log::debug!(
            "solve completed: satisfiable={satisfiable}, {} nodes, {} backtracks",
            metrics.nodes_explored,
            metrics.backtracks
        );
    }
}
