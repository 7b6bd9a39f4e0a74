//! Roster quality metrics (KPIs).
//!
//! Summarizes a published roster: how much score it collects, how work is
//! spread across nurses, whether listed wards are staffed, and how often
//! assignments coincide with nurses' stated preferences.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Σ score over assignments |
//! | Mean score | Total score / assignment count |
//! | Hours by nurse | Σ duration per nurse |
//! | Ward coverage | Σ min(headcount, required) / Σ required, over slots seen |
//! | Preference match rate | Fraction of assignments with an identical (nurse, date, shift, ward) preference |
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering", §5

use std::collections::BTreeMap;

use crate::config::OptimizerConfig;
use crate::models::{Roster, ShiftPreference};

/// Staffing of one listed ward across the slots that appear in a roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WardCoverage {
    /// Distinct slots of this ward in the roster.
    pub slots: usize,
    /// Slots whose headcount is below the requirement.
    pub understaffed_slots: usize,
    /// Σ min(headcount, required) / Σ required, in 0.0..=1.0.
    pub rate: f64,
}

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    pub assignment_count: usize,
    /// Distinct nurses with at least one assignment.
    pub nurse_count: usize,
    pub total_score: f64,
    /// 0.0 for an empty roster.
    pub mean_score: f64,
    pub hours_by_nurse: BTreeMap<String, f64>,
    /// Coverage per listed ward, over the slots present in the roster.
    pub coverage_by_ward: BTreeMap<String, WardCoverage>,
    /// Set by [`evaluate`](Self::evaluate); `None` for an empty roster.
    pub preference_match_rate: Option<f64>,
    pub preference_match_by_nurse: BTreeMap<String, f64>,
}

impl RosterKpi {
    /// Computes KPIs from a roster and the configuration it was solved under.
    pub fn calculate(roster: &Roster, config: &OptimizerConfig) -> Self {
        let mut hours_by_nurse: BTreeMap<String, f64> = BTreeMap::new();
        for a in &roster.assignments {
            *hours_by_nurse.entry(a.nurse_id.clone()).or_insert(0.0) += a.duration_hours;
        }

        // (covered, required) accumulators per ward
        let mut coverage: BTreeMap<String, (WardCoverage, u64, u64)> = BTreeMap::new();
        for (slot, headcount) in roster.headcount_by_slot() {
            let Some(required) = config.ward_requirements.required(&slot.ward) else {
                continue;
            };
            let entry = coverage.entry(slot.ward).or_default();
            entry.0.slots += 1;
            if headcount < required {
                entry.0.understaffed_slots += 1;
            }
            entry.1 += u64::from(headcount.min(required));
            entry.2 += u64::from(required);
        }
        let coverage_by_ward = coverage
            .into_iter()
            .map(|(ward, (mut cov, covered, required))| {
                cov.rate = if required == 0 {
                    1.0
                } else {
                    covered as f64 / required as f64
                };
                (ward, cov)
            })
            .collect();

        let assignment_count = roster.assignment_count();
        let mean_score = if assignment_count == 0 {
            0.0
        } else {
            roster.total_score / assignment_count as f64
        };

        Self {
            assignment_count,
            nurse_count: hours_by_nurse.len(),
            total_score: roster.total_score,
            mean_score,
            hours_by_nurse,
            coverage_by_ward,
            preference_match_rate: None,
            preference_match_by_nurse: BTreeMap::new(),
        }
    }

    /// Computes KPIs together with preference match rates.
    ///
    /// An assignment matches when some preference has the same nurse,
    /// date, shift label and ward.
    pub fn evaluate(roster: &Roster, config: &OptimizerConfig, preferences: &[ShiftPreference]) -> Self {
        let mut kpi = Self::calculate(roster, config);
        let mut per_nurse: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        let mut matched_total = 0usize;

        for a in &roster.assignments {
            let matched = preferences.iter().any(|p| p.matches(a));
            let entry = per_nurse.entry(a.nurse_id.clone()).or_default();
            entry.1 += 1;
            if matched {
                entry.0 += 1;
                matched_total += 1;
            }
        }

        kpi.preference_match_rate = if roster.is_empty() {
            None
        } else {
            Some(matched_total as f64 / roster.assignment_count() as f64)
        };
        kpi.preference_match_by_nurse = per_nurse
            .into_iter()
            .map(|(nurse, (matched, total))| (nurse, matched as f64 / total as f64))
            .collect();
        kpi
    }

    /// Whether every listed-ward slot present in the roster meets its
    /// requirement.
    ///
    /// A roster only carries slots with at least one assignment: a listed
    /// slot nobody was assigned to is not seen and does not count here.
    pub fn seen_slots_fully_staffed(&self) -> bool {
        self.coverage_by_ward.values().all(|c| c.understaffed_slots == 0)
    }
}
