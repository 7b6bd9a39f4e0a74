//! Optimizer configuration.
//!
//! Everything a solve depends on besides the candidate set is passed in
//! through [`OptimizerConfig`]; nothing is read from ambient state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::{StaffingMode, UnlistedWardPolicy, WardRequirementTable};

/// Optional per-nurse "one pairing per start time" constraint family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleBooking {
    /// A nurse may be selected for several slots starting at the same time.
    #[default]
    Off,
    /// At most one selected pairing per nurse, date and start time.
    Enabled,
}

/// Solver backend used by [`RosterOptimizer`](crate::optimizer::RosterOptimizer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Mixed-integer programming through `good_lp` (microlp).
    #[default]
    Milp,
    /// Built-in exact 0-1 branch and bound, deterministic on ties.
    BranchAndBound,
}

/// Configuration for one roster solve.
///
/// # Examples
///
/// ```
/// use u_roster::config::{DoubleBooking, OptimizerConfig};
/// use u_roster::models::{StaffingMode, WardRequirementTable};
///
/// let config = OptimizerConfig::default()
///     .with_min_fortnight_hours(24.0)
///     .with_ward_requirements(WardRequirementTable::new().with_ward("ICU", 2))
///     .with_staffing_mode(StaffingMode::Minimum)
///     .with_double_booking(DoubleBooking::Enabled)
///     .with_time_budget_ms(5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Minimum worked hours per nurse per fortnight bucket.
    pub min_fortnight_hours: f64,

    /// Required headcount per slot, by ward.
    pub ward_requirements: WardRequirementTable,

    /// Exact or minimum headcount for listed wards.
    pub staffing_mode: StaffingMode,

    /// Handling of slots on wards absent from `ward_requirements`.
    pub unlisted_wards: UnlistedWardPolicy,

    /// No-double-booking constraint family.
    pub double_booking: DoubleBooking,

    /// Wall-clock solve budget in milliseconds. `None` = unlimited.
    ///
    /// With [`SolverBackend::Milp`] the solve runs on a worker thread. On
    /// expiry the call returns a `Timeout` error at once, but the worker is
    /// not interrupted: it keeps a CPU busy until `microlp` finishes on its
    /// own. Callers that time out repeatedly accumulate such threads.
    /// [`SolverBackend::BranchAndBound`] stops searching at the budget.
    pub time_budget_ms: Option<u64>,

    /// Solver backend.
    pub backend: SolverBackend,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_fortnight_hours: 10.0,
            ward_requirements: WardRequirementTable::default(),
            staffing_mode: StaffingMode::Exact,
            unlisted_wards: UnlistedWardPolicy::Unconstrained,
            double_booking: DoubleBooking::Off,
            time_budget_ms: None,
            backend: SolverBackend::Milp,
        }
    }
}

impl OptimizerConfig {
    pub fn with_min_fortnight_hours(mut self, hours: f64) -> Self {
        self.min_fortnight_hours = hours;
        self
    }

    pub fn with_ward_requirements(mut self, table: WardRequirementTable) -> Self {
        self.ward_requirements = table;
        self
    }

    pub fn with_staffing_mode(mut self, mode: StaffingMode) -> Self {
        self.staffing_mode = mode;
        self
    }

    pub fn with_unlisted_wards(mut self, policy: UnlistedWardPolicy) -> Self {
        self.unlisted_wards = policy;
        self
    }

    pub fn with_double_booking(mut self, rule: DoubleBooking) -> Self {
        self.double_booking = rule;
        self
    }

    /// Sets the solve budget; see [`time_budget_ms`](Self::time_budget_ms)
    /// for what happens to an expired MILP worker.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = Some(ms);
        self
    }

    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    /// The solve budget as a [`Duration`].
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Validates the configuration.
    ///
    /// The hour threshold may be zero or negative (the hour constraint is
    /// then trivially satisfied) but must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_fortnight_hours.is_finite() {
            return Err(ConfigError::new(format!(
                "min_fortnight_hours must be finite, got {}",
                self.min_fortnight_hours
            )));
        }
        if self.time_budget_ms == Some(0) {
            return Err(ConfigError::new("time_budget_ms must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = OptimizerConfig::default();
        assert!((c.min_fortnight_hours - 10.0).abs() < 1e-10);
        assert_eq!(c.ward_requirements, WardRequirementTable::default());
        assert_eq!(c.staffing_mode, StaffingMode::Exact);
        assert_eq!(c.double_booking, DoubleBooking::Off);
        assert_eq!(c.unlisted_wards, UnlistedWardPolicy::Unconstrained);
        assert!(c.time_budget().is_none());
        assert_eq!(c.backend, SolverBackend::Milp);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let c = OptimizerConfig::default().with_min_fortnight_hours(f64::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let c = OptimizerConfig::default().with_time_budget_ms(0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_negative_threshold_allowed() {
        let c = OptimizerConfig::default().with_min_fortnight_hours(-1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "min_fortnight_hours": 20,
            "double_booking": "enabled",
            "ward_requirements": {"ICU": 2},
            "time_budget_ms": 1500,
            "backend": "branch_and_bound"
        }"#;
        let c: OptimizerConfig = serde_json::from_str(json).unwrap();
        assert!((c.min_fortnight_hours - 20.0).abs() < 1e-10);
        assert_eq!(c.double_booking, DoubleBooking::Enabled);
        assert_eq!(c.ward_requirements.required("ICU"), Some(2));
        assert_eq!(c.ward_requirements.required("C"), None);
        assert_eq!(c.staffing_mode, StaffingMode::Exact);
        assert_eq!(c.time_budget(), Some(Duration::from_millis(1500)));
        assert_eq!(c.backend, SolverBackend::BranchAndBound);
    }
}
