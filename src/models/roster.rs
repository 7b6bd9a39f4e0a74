//! Roster (solution) model.
//!
//! A roster is the set of selected candidate pairings, each serialized with
//! its full shift attributes and originating score. A solve ends either in
//! an optimal roster or in a proven-infeasible outcome; the two are kept
//! distinct even when the optimal roster happens to be empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CandidatePairing, ShiftSlotKey};

/// A selected nurse → shift slot assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAssignment {
    pub nurse_id: String,
    pub date: NaiveDate,
    pub shift: String,
    pub ward: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
    /// Score of the originating candidate pairing.
    pub score: f64,
}

impl RosterAssignment {
    /// The slot this assignment staffs.
    pub fn slot_key(&self) -> ShiftSlotKey {
        ShiftSlotKey {
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            ward: self.ward.clone(),
        }
    }
}

impl From<&CandidatePairing> for RosterAssignment {
    fn from(c: &CandidatePairing) -> Self {
        Self {
            nurse_id: c.nurse_id.clone(),
            date: c.date,
            shift: c.shift.clone(),
            ward: c.ward.clone(),
            start_time: c.start_time.clone(),
            end_time: c.end_time.clone(),
            duration_hours: c.duration_hours,
            score: c.score,
        }
    }
}

/// A complete roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Selected assignments.
    pub assignments: Vec<RosterAssignment>,
    /// Sum of selected scores.
    pub total_score: f64,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment and accumulates its score.
    pub fn add_assignment(&mut self, assignment: RosterAssignment) {
        self.total_score += assignment.score;
        self.assignments.push(assignment);
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// All assignments of one nurse.
    pub fn assignments_for_nurse(&self, nurse_id: &str) -> Vec<&RosterAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.nurse_id == nurse_id)
            .collect()
    }

    /// All assignments staffing one slot.
    pub fn assignments_for_slot(&self, slot: &ShiftSlotKey) -> Vec<&RosterAssignment> {
        self.assignments
            .iter()
            .filter(|a| {
                a.date == slot.date
                    && a.ward == slot.ward
                    && a.start_time == slot.start_time
                    && a.end_time == slot.end_time
            })
            .collect()
    }

    /// Total worked hours of one nurse.
    pub fn hours_for_nurse(&self, nurse_id: &str) -> f64 {
        self.assignments
            .iter()
            .filter(|a| a.nurse_id == nurse_id)
            .map(|a| a.duration_hours)
            .sum()
    }

    /// Headcount per slot.
    pub fn headcount_by_slot(&self) -> BTreeMap<ShiftSlotKey, u32> {
        let mut counts = BTreeMap::new();
        for a in &self.assignments {
            *counts.entry(a.slot_key()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct nurses on the roster, sorted.
    pub fn nurses(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.assignments.iter().map(|a| a.nurse_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Terminal outcome of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterOutcome {
    /// A globally optimal feasible roster (possibly empty for empty input).
    Optimal(Roster),
    /// No selection satisfies every hard constraint.
    Infeasible,
}

impl RosterOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, RosterOutcome::Optimal(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, RosterOutcome::Infeasible)
    }

    /// The optimal roster, if any.
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            RosterOutcome::Optimal(r) => Some(r),
            RosterOutcome::Infeasible => None,
        }
    }

    /// The roster to publish: the optimal one, or an explicitly empty one.
    pub fn into_roster(self) -> Roster {
        match self {
            RosterOutcome::Optimal(r) => r,
            RosterOutcome::Infeasible => Roster::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(nurse: &str, d: u32, ward: &str, hours: f64, score: f64) -> RosterAssignment {
        let c = CandidatePairing::new(
            nurse,
            NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            ward,
            "07:00",
            "15:00",
        )
        .with_duration(hours)
        .with_score(score);
        RosterAssignment::from(&c)
    }

    fn sample_roster() -> Roster {
        let mut r = Roster::new();
        r.add_assignment(assignment("N1", 4, "ICU", 8.0, 0.9));
        r.add_assignment(assignment("N2", 4, "ICU", 8.0, 0.5));
        r.add_assignment(assignment("N1", 5, "A", 6.0, 0.25));
        r
    }

    #[test]
    fn test_total_score_accumulates() {
        let r = sample_roster();
        assert_eq!(r.assignment_count(), 3);
        assert!((r.total_score - 1.65).abs() < 1e-10);
    }

    #[test]
    fn test_hours_for_nurse() {
        let r = sample_roster();
        assert!((r.hours_for_nurse("N1") - 14.0).abs() < 1e-10);
        assert!((r.hours_for_nurse("N2") - 8.0).abs() < 1e-10);
        assert!((r.hours_for_nurse("N9") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_headcount_by_slot() {
        let r = sample_roster();
        let counts = r.headcount_by_slot();
        assert_eq!(counts.len(), 2);
        let icu = r.assignments[0].slot_key();
        assert_eq!(counts[&icu], 2);
        assert_eq!(r.assignments_for_slot(&icu).len(), 2);
    }

    #[test]
    fn test_nurses_sorted_unique() {
        let r = sample_roster();
        assert_eq!(r.nurses(), vec!["N1", "N2"]);
        assert_eq!(r.assignments_for_nurse("N1").len(), 2);
    }

    #[test]
    fn test_outcome_into_roster() {
        let r = sample_roster();
        let optimal = RosterOutcome::Optimal(r.clone());
        assert!(optimal.is_optimal());
        assert_eq!(optimal.roster(), Some(&r));
        assert_eq!(optimal.into_roster(), r);

        let infeasible = RosterOutcome::Infeasible;
        assert!(infeasible.is_infeasible());
        assert!(infeasible.roster().is_none());
        assert!(infeasible.into_roster().is_empty());
    }

    #[test]
    fn test_empty_optimal_is_not_infeasible() {
        let outcome = RosterOutcome::Optimal(Roster::new());
        assert!(!outcome.is_infeasible());
        assert!(outcome.roster().is_some_and(Roster::is_empty));
    }
}
