//! Roster optimizer.
//!
//! Runs one solve cycle end to end:
//!
//! ```text
//! Vec<CandidatePairing>
//!   → CandidateStore        (validate + index)
//!   → RosterFormulation     (0-1 model: staffing, hours, double booking)
//!   → LpSolver              (MILP or branch and bound)
//!   → ResultProjector       (Optimal roster | Infeasible)
//! ```
//!
//! Each cycle builds a fresh model; nothing is cached between calls, so
//! one optimizer can be reused for any number of independent solves.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{OptimizerConfig, SolverBackend};
use crate::error::RosterError;
use crate::formulation::RosterFormulation;
use crate::lp::{BranchAndBoundSolver, LpSolver, MilpSolver, SolverConfig};
use crate::models::{CandidatePairing, Roster, RosterOutcome};
use crate::projector::ResultProjector;
use crate::store::CandidateStore;

/// Selects the roster that maximizes total pairing score subject to
/// staffing and workload rules.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_roster::config::OptimizerConfig;
/// use u_roster::models::{CandidatePairing, WardRequirementTable};
/// use u_roster::optimizer::RosterOptimizer;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let candidates = vec![
///     CandidatePairing::new("N1", day, "ICU", "07:00", "15:00").with_duration(8.0).with_score(0.9),
///     CandidatePairing::new("N2", day, "ICU", "07:00", "15:00").with_duration(8.0).with_score(0.4),
/// ];
/// let config = OptimizerConfig::default()
///     .with_min_fortnight_hours(0.0)
///     .with_ward_requirements(WardRequirementTable::new().with_ward("ICU", 1));
///
/// let outcome = RosterOptimizer::new(config).solve(candidates).unwrap();
/// let roster = outcome.roster().unwrap();
/// assert_eq!(roster.assignment_count(), 1);
/// assert_eq!(roster.assignments[0].nurse_id, "N1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterOptimizer {
    config: OptimizerConfig,
}

impl RosterOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Validates, indexes and solves one candidate batch.
    ///
    /// # Errors
    /// - [`RosterError::Config`] for an invalid configuration
    /// - [`RosterError::DataIntegrity`] when the batch is rejected
    /// - [`RosterError::Solver`] on timeout or backend failure
    ///
    /// Infeasibility is not an error: it is [`RosterOutcome::Infeasible`].
    pub fn solve(&self, candidates: Vec<CandidatePairing>) -> Result<RosterOutcome, RosterError> {
        let store = CandidateStore::new(candidates)?;
        self.solve_store(&store)
    }

    /// Solves an already indexed candidate set.
    pub fn solve_store(&self, store: &CandidateStore) -> Result<RosterOutcome, RosterError> {
        self.config.validate()?;
        let started = Instant::now();

        if store.is_empty() {
            debug!("no candidate pairings, returning an empty roster");
            return Ok(RosterOutcome::Optimal(Roster::new()));
        }

        let model = RosterFormulation::new(store, &self.config).build()?;

        let solver = self.solver();
        let mut solver_config = SolverConfig::default();
        if let Some(budget) = self.config.time_budget() {
            solver_config = solver_config.with_time_limit(budget);
        }

        let outcome = match solver.solve(model.linear_model(), &solver_config) {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_timeout() {
                    warn!(backend = solver.name(), error = %e, "roster solve timed out");
                } else {
                    warn!(backend = solver.name(), error = %e, "roster solve failed");
                }
                return Err(e.into());
            }
        };

        let result = ResultProjector::new(store, &model).project(&outcome);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            RosterOutcome::Optimal(roster) => info!(
                backend = solver.name(),
                candidates = store.len(),
                assignments = roster.assignment_count(),
                total_score = roster.total_score,
                elapsed_ms,
                "optimal roster found"
            ),
            RosterOutcome::Infeasible => warn!(
                backend = solver.name(),
                candidates = store.len(),
                elapsed_ms,
                "roster model is infeasible"
            ),
        }
        Ok(result)
    }

    fn solver(&self) -> Box<dyn LpSolver> {
        match self.config.backend {
            SolverBackend::Milp => Box::new(MilpSolver::new()),
            SolverBackend::BranchAndBound => Box::new(BranchAndBoundSolver::new()),
        }
    }
}
