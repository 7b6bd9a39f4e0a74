//! Constraint families of the roster model.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{DoubleBooking, OptimizerConfig};
use crate::error::DataIntegrityError;
use crate::lp::{LinearConstraint, Sense, VarId};
use crate::models::{StaffingMode, UnlistedWardPolicy};
use crate::store::{CandidateId, CandidateStore};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Tag identifying which family a model constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintFamily {
    /// Headcount per shift slot on a listed ward.
    WardStaffing,
    /// Worked hours per nurse per fortnight bucket.
    MinimumHours,
    /// One pairing per nurse, date and start time.
    NoDoubleBooking,
}

/// Emits the linear constraints of each family over one variable per candidate.
///
/// `vars[i]` is the decision variable of the candidate stored at
/// [`CandidateId`] `i`.
pub struct ConstraintBuilder<'a> {
    store: &'a CandidateStore,
    config: &'a OptimizerConfig,
    vars: &'a [VarId],
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(store: &'a CandidateStore, config: &'a OptimizerConfig, vars: &'a [VarId]) -> Self {
        Self {
            store,
            config,
            vars,
        }
    }

    fn var(&self, id: CandidateId) -> VarId {
        self.vars[id.get()]
    }

    /// Staffing constraints, one per slot on a listed ward.
    ///
    /// `Σx == required` under [`StaffingMode::Exact`], `Σx >= required`
    /// under [`StaffingMode::Minimum`]. Slots on unlisted wards are left
    /// unconstrained, or rejected under [`UnlistedWardPolicy::Reject`].
    pub fn ward_staffing(&self) -> Result<Vec<LinearConstraint>, DataIntegrityError> {
        let table = &self.config.ward_requirements;
        let sense = match self.config.staffing_mode {
            StaffingMode::Exact => Sense::Eq,
            StaffingMode::Minimum => Sense::Ge,
        };

        let mut constraints = Vec::new();
        let mut unlisted: BTreeSet<&str> = BTreeSet::new();
        let mut skipped = 0usize;

        for (slot, ids) in self.store.by_slot() {
            let Some(required) = table.required(&slot.ward) else {
                match self.config.unlisted_wards {
                    UnlistedWardPolicy::Unconstrained => skipped += 1,
                    UnlistedWardPolicy::Reject => {
                        unlisted.insert(slot.ward.as_str());
                    }
                }
                continue;
            };

            let terms = ids.iter().map(|&id| (self.var(id), 1.0)).collect();
            constraints.push(LinearConstraint::new(
                format!("staff[{slot}]"),
                terms,
                sense,
                f64::from(required),
            ));
        }

        if !unlisted.is_empty() {
            let errors = unlisted
                .into_iter()
                .map(|ward| {
                    ValidationError::new(
                        ValidationErrorKind::UnlistedWard,
                        format!("Ward '{ward}' has shift slots but no staffing requirement"),
                    )
                })
                .collect();
            return Err(DataIntegrityError::new(errors));
        }

        if skipped > 0 {
            debug!(slots = skipped, "slots on unlisted wards left unconstrained");
        }
        Ok(constraints)
    }

    /// Hour constraints, one per (nurse, fortnight) bucket:
    /// `Σ duration·x >= min_fortnight_hours`.
    pub fn minimum_hours(&self) -> Vec<LinearConstraint> {
        let threshold = self.config.min_fortnight_hours;
        self.store
            .by_bucket()
            .map(|(bucket, ids)| {
                let terms = ids
                    .iter()
                    .map(|&id| (self.var(id), self.store.get(id).duration_hours))
                    .collect();
                LinearConstraint::new(
                    format!("hours[{}/f{}]", bucket.nurse_id, bucket.fortnight),
                    terms,
                    Sense::Ge,
                    threshold,
                )
            })
            .collect()
    }

    /// No-double-booking constraints, one per nurse and (date, start time)
    /// shared by at least two of the nurse's pairings: `Σx <= 1`.
    ///
    /// Empty when [`DoubleBooking::Off`].
    pub fn no_double_booking(&self) -> Vec<LinearConstraint> {
        if self.config.double_booking == DoubleBooking::Off {
            return Vec::new();
        }

        let mut constraints = Vec::new();
        for (nurse, ids) in self.store.by_nurse() {
            let mut groups: BTreeMap<(NaiveDate, &str), Vec<CandidateId>> = BTreeMap::new();
            for &id in ids {
                let c = self.store.get(id);
                groups
                    .entry((c.date, c.start_time.as_str()))
                    .or_default()
                    .push(id);
            }

            for ((date, start), group) in groups {
                if group.len() < 2 {
                    continue;
                }
                let terms = group.iter().map(|&id| (self.var(id), 1.0)).collect();
                constraints.push(LinearConstraint::new(
                    format!("single[{nurse} {date} {start}]"),
                    terms,
                    Sense::Le,
                    1.0,
                ));
            }
        }
        constraints
    }
}
