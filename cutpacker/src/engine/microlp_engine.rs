use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, error, info, warn};
use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use crate::engine::{LinearTerm, ObjectiveSense, SolveBudget, SolveStatus, SolverEngine, VarId};

/// [`SolverEngine`] backed by the pure-Rust `microlp` branch-and-bound solver.
///
/// The model is buffered and only turned into a [`microlp::Problem`] when [`SolverEngine::solve`] is called.
/// The search runs on a dedicated worker thread. `microlp` cannot be interrupted, so when the time limit
/// expires the worker is detached and keeps its core busy until the search ends on its own. Its result is discarded.
/// [`MicrolpEngine::live_workers`] reports how many of these threads are still running.
#[derive(Debug, Clone)]
pub struct MicrolpEngine {
    var_names: Vec<String>,
    constraints: Vec<BufferedConstraint>,
    objective: Vec<LinearTerm>,
    sense: ObjectiveSense,
    solution: Option<SolvedValues>,
}

#[derive(Debug, Clone)]
struct BufferedConstraint {
    terms: Vec<LinearTerm>,
    lower: f64,
    upper: f64,
}

#[derive(Debug, Clone)]
struct SolvedValues {
    objective: f64,
    values: Vec<f64>,
}

impl MicrolpEngine {
    pub fn new() -> Self {
        Self {
            var_names: vec![],
            constraints: vec![],
            objective: vec![],
            sense: ObjectiveSense::Minimize,
            solution: None,
        }
    }

    pub fn var_name(&self, var: VarId) -> Option<&str> {
        self.var_names.get(var.0).map(|n| n.as_str())
    }

    /// Number of solver threads of this process still searching, including those abandoned after a time limit.
    pub fn live_workers() -> usize {
        LIVE_WORKERS.load(Ordering::SeqCst)
    }

    /// A constraint without terms reads `lower <= 0 <= upper` and is either void or unsatisfiable.
    fn violated_empty_constraint(&self) -> Option<&BufferedConstraint> {
        self.constraints
            .iter()
            .filter(|c| merge_terms(&c.terms).is_empty())
            .find(|c| !(c.lower <= 0.0 && 0.0 <= c.upper))
    }

    fn build_problem(&self) -> (Problem, Vec<Variable>) {
        let direction = match self.sense {
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let mut obj_coeffs = vec![0.0; self.var_names.len()];
        for &(VarId(v), coef) in &self.objective {
            obj_coeffs[v] += coef;
        }
        let vars = obj_coeffs
            .iter()
            .map(|&coef| problem.add_binary_var(coef))
            .collect_vec();

        for BufferedConstraint {
            terms,
            lower,
            upper,
        } in &self.constraints
        {
            //microlp silently drops expressions without terms, those are checked before solving
            let expr = merge_terms(terms)
                .into_iter()
                .map(|(VarId(v), coef)| (vars[v], coef))
                .collect_vec();
            if expr.is_empty() {
                continue;
            }

            match (lower.is_finite(), upper.is_finite()) {
                _ if lower == upper => {
                    problem.add_constraint(expr.as_slice(), ComparisonOp::Eq, *lower)
                }
                (true, true) => {
                    problem.add_constraint(expr.as_slice(), ComparisonOp::Ge, *lower);
                    problem.add_constraint(expr.as_slice(), ComparisonOp::Le, *upper);
                }
                (true, false) => problem.add_constraint(expr.as_slice(), ComparisonOp::Ge, *lower),
                (false, true) => problem.add_constraint(expr.as_slice(), ComparisonOp::Le, *upper),
                (false, false) => {}
            }
        }
        (problem, vars)
    }
}

/// Sums the coefficients of repeated variables and drops zero terms,
/// microlp does not accept a variable twice in the same expression.
fn merge_terms(terms: &[LinearTerm]) -> Vec<LinearTerm> {
    terms
        .iter()
        .copied()
        .sorted_by_key(|(v, _)| *v)
        .coalesce(|(v1, c1), (v2, c2)| match v1 == v2 {
            true => Ok((v1, c1 + c2)),
            false => Err(((v1, c1), (v2, c2))),
        })
        .filter(|(_, coef)| *coef != 0.0)
        .collect_vec()
}

impl Default for MicrolpEngine {
    fn default() -> Self {
        Self::new()
    }
}

type WorkerResult = Result<SolvedValues, microlp::Error>;

/// Solver threads that have not finished yet, detached ones included
static LIVE_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// Decrements [`LIVE_WORKERS`] when the worker ends, also on panic
struct WorkerGuard;

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        LIVE_WORKERS.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SolverEngine for MicrolpEngine {
    fn add_binary_var(&mut self, name: &str) -> VarId {
        self.solution = None;
        self.var_names.push(name.to_string());
        VarId(self.var_names.len() - 1)
    }

    fn add_constraint(&mut self, terms: &[LinearTerm], lower: f64, upper: f64) {
        debug_assert!(lower <= upper, "empty constraint range [{lower}, {upper}]");
        debug_assert!(terms.iter().all(|(v, _)| v.0 < self.var_names.len()));
        self.solution = None;
        self.constraints.push(BufferedConstraint {
            terms: terms.to_vec(),
            lower,
            upper,
        });
    }

    fn set_objective(&mut self, terms: &[LinearTerm], sense: ObjectiveSense) {
        self.solution = None;
        self.objective = terms.to_vec();
        self.sense = sense;
    }

    fn solve(&mut self, budget: SolveBudget) -> SolveStatus {
        self.solution = None;

        if let Some(c) = self.violated_empty_constraint() {
            info!(
                "[MIP] constraint without terms requires {} <= 0 <= {}, model is infeasible",
                c.lower, c.upper
            );
            return SolveStatus::Infeasible;
        }

        if self.var_names.is_empty() {
            debug!("[MIP] model has no variables, trivially optimal");
            self.solution = Some(SolvedValues {
                objective: 0.0,
                values: vec![],
            });
            return SolveStatus::Optimal;
        }

        let (problem, vars) = self.build_problem();
        info!(
            "[MIP] solving model with {} binary variables and {} constraints (time limit: {:?})",
            self.var_names.len(),
            self.constraints.len(),
            budget.time_limit
        );

        let start = Instant::now();
        let (tx, rx) = mpsc::channel::<WorkerResult>();
        LIVE_WORKERS.fetch_add(1, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name("mip-solver".to_string())
            .spawn(move || {
                let _guard = WorkerGuard;
                let result = problem.solve().map(|sol| SolvedValues {
                    objective: sol.objective(),
                    values: vars.iter().map(|v| *sol.var_value(*v)).collect(),
                });
                //the receiver is gone if the time limit expired
                let _ = tx.send(result);
            });

        if let Err(e) = spawned {
            LIVE_WORKERS.fetch_sub(1, Ordering::SeqCst);
            error!("[MIP] could not spawn solver thread: {e}");
            return SolveStatus::NotSolved;
        }

        let received = match budget.time_limit {
            Some(limit) => rx.recv_timeout(limit).map_err(|e| match e {
                mpsc::RecvTimeoutError::Timeout => {
                    warn!(
                        "[MIP] time limit of {limit:?} exceeded, abandoning the search ({} solver threads still running)",
                        LIVE_WORKERS.load(Ordering::SeqCst)
                    );
                }
                mpsc::RecvTimeoutError::Disconnected => {
                    error!("[MIP] solver thread terminated without a result");
                }
            }),
            None => rx.recv().map_err(|_| {
                error!("[MIP] solver thread terminated without a result");
            }),
        };

        let status = match received {
            Ok(Ok(solved)) => {
                self.solution = Some(solved);
                SolveStatus::Optimal
            }
            Ok(Err(microlp::Error::Infeasible)) => SolveStatus::Infeasible,
            Ok(Err(microlp::Error::Unbounded)) => {
                error!("[MIP] model reported unbounded, which is impossible over binary variables");
                SolveStatus::NotSolved
            }
            Ok(Err(microlp::Error::InternalError(msg))) => {
                error!("[MIP] backend failure: {msg}");
                SolveStatus::NotSolved
            }
            Err(()) => SolveStatus::NotSolved,
        };

        info!(
            "[MIP] search finished with status {status:?} in {:.3}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        status
    }

    fn value(&self, var: VarId) -> Option<f64> {
        self.solution
            .as_ref()
            .and_then(|s| s.values.get(var.0).copied())
    }

    fn objective_value(&self) -> Option<f64> {
        self.solution.as_ref().map(|s| s.objective)
    }

    fn n_vars(&self) -> usize {
        self.var_names.len()
    }

    fn n_constraints(&self) -> usize {
        self.constraints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn solves_small_knapsack() {
        //maximize 3a + 2b + 4c subject to 2a + 2b + 3c <= 5
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        let b = engine.add_binary_var("b");
        let c = engine.add_binary_var("c");
        engine.add_constraint(&[(a, 2.0), (b, 2.0), (c, 3.0)], f64::NEG_INFINITY, 5.0);
        engine.set_objective(&[(a, 3.0), (b, 2.0), (c, 4.0)], ObjectiveSense::Maximize);

        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Optimal);
        assert!((engine.objective_value().unwrap() - 7.0).abs() < 1e-6);
        assert!((engine.value(a).unwrap() - 1.0).abs() < 1e-6);
        assert!(engine.value(b).unwrap().abs() < 1e-6);
        assert!((engine.value(c).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reports_infeasibility() {
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        engine.add_constraint(&[(a, 1.0)], 2.0, 2.0);
        engine.set_objective(&[(a, 1.0)], ObjectiveSense::Minimize);

        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Infeasible);
        assert_eq!(engine.value(a), None);
        assert_eq!(engine.objective_value(), None);
    }

    #[test]
    fn duplicate_terms_are_merged() {
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        let b = engine.add_binary_var("b");
        // a + a + b == 2 forces a = 1, b = 0
        engine.add_constraint(&[(a, 1.0), (b, 1.0), (a, 1.0)], 2.0, 2.0);
        engine.set_objective(&[(b, 1.0)], ObjectiveSense::Maximize);

        assert_eq!(
            engine.solve(SolveBudget::with_time_limit(Duration::from_secs(10))),
            SolveStatus::Optimal
        );
        assert!((engine.value(a).unwrap() - 1.0).abs() < 1e-6);
        assert!(engine.value(b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn empty_model_is_optimal() {
        let mut engine = MicrolpEngine::new();
        engine.set_objective(&[], ObjectiveSense::Minimize);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Optimal);
        assert_eq!(engine.objective_value(), Some(0.0));
    }

    #[test]
    fn unsatisfiable_empty_constraint_is_infeasible() {
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        engine.add_constraint(&[], 1.0, 1.0);
        engine.set_objective(&[(a, 1.0)], ObjectiveSense::Minimize);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Infeasible);
        assert_eq!(engine.value(a), None);

        //terms cancelling out are the same as no terms
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        engine.add_constraint(&[(a, 1.0), (a, -1.0)], f64::NEG_INFINITY, -1.0);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Infeasible);

        //also without any variable
        let mut engine = MicrolpEngine::new();
        engine.add_constraint(&[], 1.0, 1.0);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Infeasible);
        assert_eq!(engine.objective_value(), None);
    }

    #[test]
    fn satisfied_empty_constraint_is_void() {
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        engine.add_constraint(&[], 0.0, f64::INFINITY);
        engine.add_constraint(&[(a, 1.0)], 1.0, 1.0);
        engine.set_objective(&[(a, 1.0)], ObjectiveSense::Minimize);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Optimal);
        assert!((engine.value(a).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn abandoned_workers_are_tracked() {
        let mut engine = MicrolpEngine::new();
        let vars = (0..12)
            .map(|i| engine.add_binary_var(&format!("v{i}")))
            .collect_vec();
        let weights = vars.iter().enumerate().map(|(i, &v)| (v, (i + 3) as f64)).collect_vec();
        engine.add_constraint(&weights, f64::NEG_INFINITY, 40.0);
        engine.set_objective(&weights, ObjectiveSense::Maximize);

        let status = engine.solve(SolveBudget::with_time_limit(Duration::ZERO));
        if status == SolveStatus::NotSolved {
            assert_eq!(engine.objective_value(), None);
        }

        //every worker, detached or not, eventually ends and is accounted for
        let deadline = Instant::now() + Duration::from_secs(60);
        while MicrolpEngine::live_workers() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(MicrolpEngine::live_workers(), 0);
    }

    #[test]
    fn model_changes_invalidate_solution() {
        let mut engine = MicrolpEngine::new();
        let a = engine.add_binary_var("a");
        engine.set_objective(&[(a, 1.0)], ObjectiveSense::Maximize);
        assert_eq!(engine.solve(SolveBudget::unlimited()), SolveStatus::Optimal);
        assert!(engine.value(a).is_some());

        engine.add_constraint(&[(a, 1.0)], f64::NEG_INFINITY, 0.0);
        assert_eq!(engine.value(a), None);
        assert_eq!(engine.var_name(a), Some("a"));
    }
}
