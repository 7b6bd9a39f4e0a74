//! Roster formulation as a 0-1 linear program.
//!
//! Translates a [`CandidateStore`] and an [`OptimizerConfig`] into a
//! [`LinearModel`]: one boolean variable per candidate pairing (1 = the
//! nurse is rostered on that slot), the constraint families of
//! [`ConstraintBuilder`], and the objective of [`ObjectiveBuilder`].
//!
//! # Model
//!
//! ```text
//! maximize    Σ score_i · x_i
//! subject to  Σ_{i ∈ slot} x_i  = req(ward)        listed wards (≥ under Minimum)
//!             Σ_{i ∈ bucket} dur_i · x_i ≥ H        every (nurse, fortnight)
//!             Σ_{i ∈ group} x_i ≤ 1                 same nurse/date/start (optional)
//!             x_i ∈ {0, 1}
//! ```
//!
//! # Reference
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Wolsey (1998), "Integer Programming", ch. 1

mod constraints;
mod objective;

pub use constraints::{ConstraintBuilder, ConstraintFamily};
pub use objective::ObjectiveBuilder;

use tracing::debug;

use crate::config::OptimizerConfig;
use crate::error::DataIntegrityError;
use crate::lp::{LinearConstraint, LinearModel, VarId};
use crate::store::{CandidateId, CandidateStore};

/// Builds the roster model for one solve cycle.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_roster::config::OptimizerConfig;
/// use u_roster::formulation::{ConstraintFamily, RosterFormulation};
/// use u_roster::models::CandidatePairing;
/// use u_roster::store::CandidateStore;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let store = CandidateStore::new(vec![
///     CandidatePairing::new("N1", day, "ICU", "07:00", "15:00").with_duration(8.0),
///     CandidatePairing::new("N2", day, "ICU", "07:00", "15:00").with_duration(8.0),
/// ])
/// .unwrap();
/// let config = OptimizerConfig::default();
///
/// let model = RosterFormulation::new(&store, &config).build().unwrap();
/// assert_eq!(model.linear_model().var_count(), 2);
/// assert_eq!(model.family_count(ConstraintFamily::WardStaffing), 1);
/// assert_eq!(model.family_count(ConstraintFamily::MinimumHours), 2);
/// ```
pub struct RosterFormulation<'a> {
    store: &'a CandidateStore,
    config: &'a OptimizerConfig,
}

impl<'a> RosterFormulation<'a> {
    pub fn new(store: &'a CandidateStore, config: &'a OptimizerConfig) -> Self {
        Self { store, config }
    }

    /// Builds a fresh model.
    ///
    /// # Errors
    /// [`DataIntegrityError`] when a slot's ward is unlisted and the
    /// configuration rejects unlisted wards.
    pub fn build(&self) -> Result<RosterModel, DataIntegrityError> {
        let mut model = LinearModel::new("roster");
        let mut candidates = Vec::with_capacity(self.store.len());
        let vars: Vec<VarId> = self
            .store
            .iter()
            .map(|(id, c)| {
                candidates.push(id);
                model.add_bool_var(format!("x[{}@{}]", c.nurse_id, c.slot_key()))
            })
            .collect();

        let builder = ConstraintBuilder::new(self.store, self.config, &vars);
        let mut roster = RosterModel {
            model,
            candidates,
            families: Vec::new(),
        };
        roster.extend(ConstraintFamily::WardStaffing, builder.ward_staffing()?);
        roster.extend(ConstraintFamily::MinimumHours, builder.minimum_hours());
        roster.extend(ConstraintFamily::NoDoubleBooking, builder.no_double_booking());
        roster
            .model
            .set_objective(ObjectiveBuilder::new(self.store, &vars).build());

        debug!(
            vars = roster.model.var_count(),
            staffing = roster.family_count(ConstraintFamily::WardStaffing),
            hours = roster.family_count(ConstraintFamily::MinimumHours),
            double_booking = roster.family_count(ConstraintFamily::NoDoubleBooking),
            "roster model built"
        );
        Ok(roster)
    }
}

/// A built roster model together with its variable and constraint maps.
#[derive(Debug, Clone)]
pub struct RosterModel {
    model: LinearModel,
    candidates: Vec<CandidateId>,
    families: Vec<ConstraintFamily>,
}

impl RosterModel {
    fn extend(&mut self, family: ConstraintFamily, constraints: Vec<LinearConstraint>) {
        for c in constraints {
            self.model.add_constraint(c);
            self.families.push(family);
        }
    }

    /// The underlying 0-1 program.
    pub fn linear_model(&self) -> &LinearModel {
        &self.model
    }

    /// Candidate decided by `var`.
    #[inline]
    pub fn candidate_of(&self, var: usize) -> CandidateId {
        self.candidates[var]
    }

    /// Family of the constraint at `index`.
    pub fn family_of(&self, index: usize) -> Option<ConstraintFamily> {
        self.families.get(index).copied()
    }

    /// Number of constraints emitted for `family`.
    pub fn family_count(&self, family: ConstraintFamily) -> usize {
        self.families.iter().filter(|f| **f == family).count()
    }
}
