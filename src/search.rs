//! Backtracking search: configuration, state machine, and the recursive
//! algorithm itself. Ground: section 4.F, section 5 (concurrency model),
//! section 6 (solver contract, configuration), section 7 (error taxonomy).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::assignment::Assignment;
use crate::constraint::Domains;
use crate::csp::Csp;
use crate::events::{EventPublisher, NoopEventPublisher};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::propagate::{Ac3Propagator, ForwardChecker, Propagator};
use crate::result::{Solution, SolveResult};
use crate::select::value::{DefaultValueSelector, LcvValueSelector, ValueSelector};
use crate::select::variable::{DegreeSelector, DomWdegSelector, MrvDegreeSelector, MrvSelector, VariableSelector};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableHeuristic {
    Mrv,
    Degree,
    DomWdeg,
    MrvDegree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHeuristic {
    Default,
    Lcv { max_domain_size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagatorKind {
    ForwardChecking,
    Ac3,
}

/// Every option named in section 6, with the defaults given there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub variable_heuristic: VariableHeuristic,
    pub value_heuristic: ValueHeuristic,
    pub propagator: PropagatorKind,
    pub ac3_preprocessing: bool,
    pub timeout_ms: u64,
    pub find_all_solutions: bool,
    pub max_solutions: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            variable_heuristic: VariableHeuristic::MrvDegree,
            value_heuristic: ValueHeuristic::Default,
            propagator: PropagatorKind::ForwardChecking,
            ac3_preprocessing: true,
            timeout_ms: 60_000,
            find_all_solutions: false,
            max_solutions: 1,
        }
    }
}

fn make_variable_selector<V: Value>(kind: VariableHeuristic) -> Box<dyn VariableSelector<V>> {
    match kind {
        VariableHeuristic::Mrv => Box::new(MrvSelector::new()),
        VariableHeuristic::Degree => Box::new(DegreeSelector::new()),
        VariableHeuristic::DomWdeg => Box::new(DomWdegSelector::new()),
        VariableHeuristic::MrvDegree => Box::new(MrvDegreeSelector::new()),
    }
}

fn make_value_selector<V: Value>(kind: ValueHeuristic) -> Box<dyn ValueSelector<V>> {
    match kind {
        ValueHeuristic::Default => Box::new(DefaultValueSelector::new()),
        ValueHeuristic::Lcv { max_domain_size } => Box::new(LcvValueSelector::new(max_domain_size)),
    }
}

fn make_propagator<V: Value>(kind: PropagatorKind) -> Box<dyn Propagator<V>> {
    match kind {
        PropagatorKind::ForwardChecking => Box::new(ForwardChecker::new()),
        PropagatorKind::Ac3 => Box::new(Ac3Propagator::new()),
    }
}

fn assignment_to_solution<V: Value>(csp: &Csp<V>, assignment: &Assignment<V>) -> Solution<V> {
    assignment
        .iter()
        .map(|(i, v)| (csp.variables()[i].name().to_string(), v.clone()))
        .collect()
}

/// Threads the pieces the recursive search needs without an unwieldy
/// parameter list at every call site.
struct SearchContext<'a, V> {
    csp: &'a Csp<V>,
    config: &'a SolverConfig,
    cancelled: &'a AtomicBool,
    deadline: Instant,
    metrics: &'a Metrics,
    events: &'a dyn EventPublisher<V>,
    timed_out: bool,
}

impl<'a, V: Value> SearchContext<'a, V> {
    fn should_stop(&mut self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return true;
        }
        false
    }

    /// Section 4.F's `backtrack`, transcribed directly: per-candidate save
    /// and restore of the whole domain map (design notes §9's "whole-map
    /// shallow-copy" strategy, cheap here since `Domain::clone` shares the
    /// immutable universe and only deep-copies the active bitmask).
    #[allow(clippy::too_many_arguments)]
    fn backtrack(
        &mut self,
        assignment: &mut Assignment<V>,
        domains: &mut Domains<V>,
        depth: usize,
        var_selector: &mut dyn VariableSelector<V>,
        value_selector: &dyn ValueSelector<V>,
        propagator: &dyn Propagator<V>,
        solutions: &mut Vec<Assignment<V>>,
    ) -> bool {
        if self.should_stop() {
            return false;
        }
        if assignment.is_complete() {
            solutions.push(assignment.copy());
            self.metrics.record_solution();
            self.events.on_solution_found(solutions.len(), &self.metrics.snapshot());
            return !self.config.find_all_solutions || solutions.len() >= self.config.max_solutions;
        }
        let x = match var_selector.select(self.csp, domains, assignment) {
            Some(x) => x,
            None => return false,
        };
        if domains[x].is_empty() {
            return false;
        }
        self.events
            .on_variable_selected(self.csp.variables()[x].name(), domains[x].size(), depth);
        let candidates = value_selector.order(x, &domains[x], self.csp, assignment, domains);
        for v in candidates {
            if self.should_stop() {
                return false;
            }
            self.metrics.record_node();
            if self.metrics.nodes_explored() % 1000 == 0 {
                self.events.on_progress(&self.metrics.snapshot());
            }
            let save = domains.clone();
            assignment.assign(x, v.clone());
            domains[x].reduce_to(&v);
            self.events.on_value_assigned(self.csp.variables()[x].name(), &v, depth);

            let outcome = propagator.propagate_after_assignment(x, self.csp, domains, assignment);
            self.metrics.record_propagation(
                outcome.stats.constraint_checks,
                outcome.stats.arc_revisions,
                outcome.stats.domain_reductions,
            );

            if !outcome.contradiction
                && self.backtrack(assignment, domains, depth + 1, var_selector, value_selector, propagator, solutions)
            {
                return true;
            }

            self.metrics.record_backtrack();
            self.events.on_backtrack(self.csp.variables()[x].name(), depth);
            assignment.unassign(x);
            *domains = save;
            if let Some(c) = outcome.failed_constraint {
                var_selector.record_failure(self.csp, x, c);
            }
        }
        false
    }
}

/// A single-use-at-a-time solver instance. State machine: `Idle → Solving
/// → {Completed | Cancelled | Error}` (section 4.F); `cancel()` is a
/// thread-safe one-shot flag, `is_solving()` a cheap atomic read.
#[derive(Debug)]
pub struct BacktrackingSolver<V> {
    config: SolverConfig,
    event_publisher: Option<Box<dyn EventPublisher<V>>>,
    cancelled: AtomicBool,
    solving: AtomicBool,
}

impl<V: Value> BacktrackingSolver<V> {
    pub fn new(config: SolverConfig) -> Self {
        BacktrackingSolver {
            config,
            event_publisher: None,
            cancelled: AtomicBool::new(false),
            solving: AtomicBool::new(false),
        }
    }

    pub fn with_event_publisher(mut self, publisher: Box<dyn EventPublisher<V>>) -> Self {
        self.event_publisher = Some(publisher);
        self
    }

    pub fn configuration(&self) -> &SolverConfig {
        &self.config
    }

    /// Thread-safe one-shot cancellation (section 5).
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Blocking solve. Only one solve per instance may run at a time;
    /// concurrent solves are undefined behavior per section 4.F, not
    /// guarded against here.
    pub fn solve(&self, csp: &Csp<V>) -> SolveResult<V> {
        self.solving.store(true, Ordering::SeqCst);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(csp)));
        self.solving.store(false, Ordering::SeqCst);
        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(&payload);
                log::error!("solve panicked: {message}");
                SolveResult::error(message, MetricsSnapshot::default())
            }
        }
    }

    fn run(&self, csp: &Csp<V>) -> SolveResult<V> {
        let metrics = Metrics::new();
        if self.config.variable_heuristic == VariableHeuristic::DomWdeg {
            csp.reset_variable_weights();
        }
        let mut var_selector = make_variable_selector::<V>(self.config.variable_heuristic);
        var_selector.reset();
        let value_selector = make_value_selector::<V>(self.config.value_heuristic);
        let propagator = make_propagator::<V>(self.config.propagator);
        let noop = NoopEventPublisher;
        let events: &dyn EventPublisher<V> = self.event_publisher.as_deref().unwrap_or(&noop);

        events.on_solve_started(csp.num_variables(), csp.constraints().len());
        log::debug!(
            "solve started: {} variables, {} constraints",
            csp.num_variables(),
            csp.constraints().len()
        );

        let deadline = Instant::now() + Duration::from_millis(self.config.timeout_ms);
        let mut domains = csp.working_domains();

        if self.config.ac3_preprocessing {
            let ac3 = Ac3Propagator::new();
            let outcome = ac3.preprocess(csp, &mut domains);
            metrics.record_propagation(
                outcome.stats.constraint_checks,
                outcome.stats.arc_revisions,
                outcome.stats.domain_reductions,
            );
            if outcome.contradiction {
                let snap = metrics.snapshot();
                events.on_solve_completed(false, &snap);
                return SolveResult::unsatisfiable(snap);
            }
        }

        let mut assignment = Assignment::new(csp.num_variables());
        let mut solutions: Vec<Assignment<V>> = Vec::new();
        let mut ctx = SearchContext {
            csp,
            config: &self.config,
            cancelled: &self.cancelled,
            deadline,
            metrics: &metrics,
            events,
            timed_out: false,
        };
        ctx.backtrack(
            &mut assignment,
            &mut domains,
            0,
            var_selector.as_mut(),
            value_selector.as_ref(),
            propagator.as_ref(),
            &mut solutions,
        );

        let snap = metrics.snapshot();
        let named: Vec<Solution<V>> = solutions.iter().map(|a| assignment_to_solution(csp, a)).collect();

        let result = if self.cancelled.load(Ordering::Relaxed) {
            SolveResult::cancelled(named, snap)
        } else if ctx.timed_out {
            SolveResult::timeout(named, snap)
        } else if !solutions.is_empty() {
            SolveResult::satisfiable(named, snap)
        } else {
            SolveResult::unsatisfiable(snap)
        };
        events.on_solve_completed(!result.solutions.is_empty(), &snap);
        log::debug!(
            "solve completed: status={:?}, {} nodes, {} backtracks",
            result.status,
            snap.nodes_explored,
            snap.backtracks
        );
        result
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraints::NotEqualConstraint;
    use crate::csp::CspBuilder;
    use crate::domain::Domain;

    fn two_variable_csp() -> Csp<i32> {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1, 2])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1, 2])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn solves_a_trivial_csp() {
        let csp = two_variable_csp();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        let result = solver.solve(&csp);
        assert_eq!(result.status, crate::result::SolveStatus::Satisfiable);
        assert_eq!(result.solutions.len(), 1);
        let sol = &result.solutions[0];
        assert_ne!(sol["x"], sol["y"]);
    }

    #[test]
    fn reports_unsatisfiable_when_no_assignment_exists() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        let result = solver.solve(&csp);
        assert_eq!(result.status, crate::result::SolveStatus::Unsatisfiable);
        assert!(result.solutions.is_empty());
    }

    #[test]
    fn cancel_before_solving_yields_cancelled_status() {
        let csp = two_variable_csp();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        solver.cancel();
        let result = solver.solve(&csp);
        assert_eq!(result.status, crate::result::SolveStatus::Cancelled);
    }

    #[test]
    fn find_all_solutions_collects_every_completion() {
        let csp = two_variable_csp();
        let mut config = SolverConfig::default();
        config.find_all_solutions = true;
        config.max_solutions = 10;
        let solver = BacktrackingSolver::new(config);
        let result = solver.solve(&csp);
        assert_eq!(result.solutions.len(), 2);
    }

    #[test]
    fn dom_wdeg_solve_resets_variable_weights_on_reentry() {
        let mut b: CspBuilder<i32> = CspBuilder::new();
        let x = b.add_variable("x", Domain::new(vec![1])).unwrap();
        let y = b.add_variable("y", Domain::new(vec![1])).unwrap();
        b.add_constraint(Box::new(NotEqualConstraint::new("x!=y", x, y))).unwrap();
        let csp = b.build().unwrap();

        let mut config = SolverConfig::default();
        config.variable_heuristic = VariableHeuristic::DomWdeg;
        let solver = BacktrackingSolver::new(config.clone());
        solver.solve(&csp);
        let weight_after_first = csp.variables()[x].weight();
        assert!(weight_after_first > 1.0);

        let solver2 = BacktrackingSolver::new(config);
        solver2.solve(&csp);
        assert_eq!(csp.variables()[x].weight(), weight_after_first);
    }
}
