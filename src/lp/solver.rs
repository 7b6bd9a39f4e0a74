//! Solver interface shared by the 0-1 backends.

use std::time::{Duration, Instant};

use super::model::LinearModel;
use crate::error::{SolverError, SolverErrorKind};

/// Tolerance used when checking a backend's selection against the model.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Solver configuration.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall-clock budget. `None` = unlimited.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// A proven-optimal assignment.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Value of every variable, indexed by [`VarId`](super::VarId).
    pub values: Vec<bool>,
    /// Objective value recomputed from `values`.
    pub objective_value: f64,
    /// Wall-clock time spent in the backend.
    pub solve_time: Duration,
}

impl LpSolution {
    /// Ids of variables set to true.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| i)
    }
}

/// Terminal status of one solve attempt.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A globally optimal feasible assignment.
    Optimal(LpSolution),
    /// No assignment satisfies every constraint.
    Infeasible,
}

/// Trait for 0-1 linear program backends.
///
/// A call is one synchronous attempt: it proves optimality, proves
/// infeasibility, or fails. No retries and no partial results.
pub trait LpSolver {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Solves the model.
    fn solve(&self, model: &LinearModel, config: &SolverConfig)
        -> Result<SolveOutcome, SolverError>;
}

/// Rejects models that fail [`LinearModel::validate`].
pub(crate) fn check_model(model: &LinearModel) -> Result<(), SolverError> {
    model
        .validate()
        .map_err(|msg| SolverError::new(SolverErrorKind::ModelInvalid, msg))
}

/// Verifies a backend selection and packages it as an optimal outcome.
pub(crate) fn accept_selection(
    model: &LinearModel,
    values: Vec<bool>,
    started: Instant,
) -> Result<SolveOutcome, SolverError> {
    if let Some(violated) = model.first_violation(&values, FEASIBILITY_TOLERANCE) {
        return Err(SolverError::new(
            SolverErrorKind::Numerical,
            format!("backend selection violates constraint '{}'", violated.name),
        ));
    }
    let objective_value = model.objective_value(&values);
    Ok(SolveOutcome::Optimal(LpSolution {
        values,
        objective_value,
        solve_time: started.elapsed(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{LinearConstraint, Objective, Sense};

    #[test]
    fn test_solver_config_default() {
        let config = SolverConfig::default();
        assert!(config.time_limit.is_none());
        let config = config.with_time_limit(Duration::from_secs(2));
        assert_eq!(config.time_limit, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_accept_selection_rejects_violations() {
        let mut m = LinearModel::new("test");
        let a = m.add_bool_var("a");
        m.add_constraint(LinearConstraint::new("need_a", vec![(a, 1.0)], Sense::Eq, 1.0));
        m.set_objective(Objective::Maximize {
            terms: vec![(a, 0.5)],
        });

        let err = accept_selection(&m, vec![false], Instant::now()).unwrap_err();
        assert_eq!(err.kind(), SolverErrorKind::Numerical);

        match accept_selection(&m, vec![true], Instant::now()).unwrap() {
            SolveOutcome::Optimal(sol) => {
                assert!((sol.objective_value - 0.5).abs() < 1e-12);
                assert_eq!(sol.selected().collect::<Vec<_>>(), vec![0]);
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }
}
