//! Mixed-integer programming backend via `good_lp`.
//!
//! Translates a [`LinearModel`] into a `good_lp` problem with one binary
//! variable per model variable and solves it with the pure-Rust `microlp`
//! solver.
//!
//! # Time Budget
//!
//! `microlp` has no native time limit. When a budget is configured the
//! solve runs on a worker thread and the caller waits at most the budget;
//! on expiry a `Timeout` error is returned and the worker's result is
//! discarded when it eventually finishes. The worker is not cancelled and
//! keeps a CPU busy until then.
//!
//! # Ties
//!
//! Among equally-scored optimal selections, the one returned is whatever
//! the simplex/branching order of `microlp` reaches first.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    microlp, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::debug;

use super::model::{LinearModel, Objective, Sense};
use super::solver::{accept_selection, check_model, LpSolver, SolveOutcome, SolverConfig};
use crate::error::{SolverError, SolverErrorKind};

/// `good_lp` + `microlp` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

impl MilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MilpSolver {
    fn name(&self) -> &str {
        "milp"
    }

    fn solve(
        &self,
        model: &LinearModel,
        config: &SolverConfig,
    ) -> Result<SolveOutcome, SolverError> {
        check_model(model)?;
        let started = Instant::now();

        let selection = match config.time_limit {
            None => solve_microlp(model)?,
            Some(budget) => {
                let owned = model.clone();
                let (tx, rx) = mpsc::channel();
                thread::Builder::new()
                    .name("u-roster-milp".into())
                    .spawn(move || {
                        let _ = tx.send(solve_microlp(&owned));
                    })
                    .map_err(|e| SolverError::new(SolverErrorKind::Backend, e.to_string()))?;

                match rx.recv_timeout(budget) {
                    Ok(result) => result?,
                    Err(RecvTimeoutError::Timeout) => return Err(SolverError::timeout(budget)),
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SolverError::new(
                            SolverErrorKind::Backend,
                            "solver thread ended without a result",
                        ))
                    }
                }
            }
        };

        match selection {
            Some(values) => accept_selection(model, values, started),
            None => Ok(SolveOutcome::Infeasible),
        }
    }
}

/// `Some(values)` when optimal, `None` when proven infeasible.
fn solve_microlp(model: &LinearModel) -> Result<Option<Vec<bool>>, SolverError> {
    if model.var_count() == 0 {
        // Nothing to decide; only constant constraints remain.
        let values = Vec::new();
        return Ok(model.is_satisfied(&values, 0.0).then_some(values));
    }

    let mut vars = ProblemVariables::new();
    let xs: Vec<Variable> = model
        .vars()
        .iter()
        .map(|_| vars.add(variable().binary()))
        .collect();

    let linear = |terms: &[(super::VarId, f64)]| {
        let mut expr = Expression::from(0.0);
        for (v, coef) in terms {
            expr += xs[v.get()] * *coef;
        }
        expr
    };

    let objective = linear(model.objective().terms());
    let mut problem = match model.objective() {
        Objective::Maximize { .. } => vars.maximise(objective).using(microlp),
        Objective::Minimize { .. } => vars.minimise(objective).using(microlp),
    };

    for c in model.constraints() {
        let lhs = linear(&c.terms);
        let constraint = match c.sense {
            Sense::Eq => eq(lhs, c.rhs),
            Sense::Ge => geq(lhs, c.rhs),
            Sense::Le => leq(lhs, c.rhs),
        };
        problem.add_constraint(constraint);
    }

    debug!(
        vars = model.var_count(),
        constraints = model.constraint_count(),
        "handing model to microlp"
    );

    match problem.solve() {
        Ok(solution) => Ok(Some(xs.iter().map(|x| solution.value(*x) > 0.5).collect())),
        Err(ResolutionError::Infeasible) => Ok(None),
        Err(e) => Err(SolverError::new(SolverErrorKind::Backend, e.to_string())),
    }
}
