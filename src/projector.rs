//! Solution projection.
//!
//! Maps a backend's [`SolveOutcome`] back onto the candidate arena.

use crate::formulation::RosterModel;
use crate::lp::SolveOutcome;
use crate::models::{Roster, RosterAssignment, RosterOutcome};
use crate::store::CandidateStore;

/// Turns solver outcomes into rosters.
pub struct ResultProjector<'a> {
    store: &'a CandidateStore,
    model: &'a RosterModel,
}

impl<'a> ResultProjector<'a> {
    pub fn new(store: &'a CandidateStore, model: &'a RosterModel) -> Self {
        Self { store, model }
    }

    /// Selected pairings, in candidate arena order, with their full
    /// attributes. `Infeasible` stays `Infeasible`.
    pub fn project(&self, outcome: &SolveOutcome) -> RosterOutcome {
        match outcome {
            SolveOutcome::Infeasible => RosterOutcome::Infeasible,
            SolveOutcome::Optimal(solution) => {
                let mut roster = Roster::new();
                for var in solution.selected() {
                    let pairing = self.store.get(self.model.candidate_of(var));
                    roster.add_assignment(RosterAssignment::from(pairing));
                }
                RosterOutcome::Optimal(roster)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizerConfig;
    use crate::formulation::RosterFormulation;
    use crate::lp::LpSolution;
    use crate::models::CandidatePairing;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn store() -> CandidateStore {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        CandidateStore::new(vec![
            CandidatePairing::new("N1", day, "ICU", "07:00", "15:00")
                .with_shift("Early")
                .with_duration(8.0)
                .with_score(0.9),
            CandidatePairing::new("N2", day, "ICU", "07:00", "15:00")
                .with_duration(8.0)
                .with_score(0.4),
            CandidatePairing::new("N2", day, "A", "15:00", "23:00")
                .with_duration(8.0)
                .with_score(0.3),
        ])
        .unwrap()
    }

    #[test]
    fn test_project_optimal() {
        let store = store();
        let config = OptimizerConfig::default();
        let model = RosterFormulation::new(&store, &config).build().unwrap();
        let outcome = SolveOutcome::Optimal(LpSolution {
            values: vec![true, false, true],
            objective_value: 1.2,
            solve_time: Duration::ZERO,
        });

        let roster = ResultProjector::new(&store, &model)
            .project(&outcome)
            .into_roster();
        assert_eq!(roster.assignment_count(), 2);
        assert_eq!(roster.assignments[0].nurse_id, "N1");
        assert_eq!(roster.assignments[0].shift, "Early");
        assert_eq!(roster.assignments[1].ward, "A");
        assert!((roster.total_score - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_project_infeasible() {
        let store = store();
        let config = OptimizerConfig::default();
        let model = RosterFormulation::new(&store, &config).build().unwrap();
        let projected = ResultProjector::new(&store, &model).project(&SolveOutcome::Infeasible);
        assert!(projected.is_infeasible());
        assert!(projected.into_roster().is_empty());
    }
}
