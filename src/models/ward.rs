//! Ward staffing requirements.
//!
//! Maps a ward label to the headcount required for every shift slot on
//! that ward. The table is fixed for the life of one solve. Wards absent
//! from the table are unconstrained on staffing unless the configuration
//! selects [`UnlistedWardPolicy::Reject`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static mapping ward label → required headcount per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WardRequirementTable {
    requirements: BTreeMap<String, u32>,
}

impl WardRequirementTable {
    /// Creates an empty table (every ward unconstrained).
    pub fn new() -> Self {
        Self {
            requirements: BTreeMap::new(),
        }
    }

    /// Adds or replaces a ward requirement.
    pub fn with_ward(mut self, ward: impl Into<String>, required: u32) -> Self {
        self.set(ward, required);
        self
    }

    /// Adds or replaces a ward requirement.
    pub fn set(&mut self, ward: impl Into<String>, required: u32) {
        self.requirements.insert(ward.into(), required);
    }

    /// Required headcount for a ward, `None` if the ward is unlisted.
    pub fn required(&self, ward: &str) -> Option<u32> {
        self.requirements.get(ward).copied()
    }

    /// Whether the ward is listed.
    pub fn contains(&self, ward: &str) -> bool {
        self.requirements.contains_key(ward)
    }

    /// Iterates over (ward, required) in ward order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.requirements.iter().map(|(w, r)| (w.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Historical establishment: C needs 4, B needs 2, A and ICU need 1.
impl Default for WardRequirementTable {
    fn default() -> Self {
        Self::new()
            .with_ward("C", 4)
            .with_ward("B", 2)
            .with_ward("A", 1)
            .with_ward("ICU", 1)
    }
}

impl FromIterator<(String, u32)> for WardRequirementTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}

/// How a listed ward's headcount is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingMode {
    /// Selected count == required (fixed establishment, no over-staffing).
    #[default]
    Exact,
    /// Selected count >= required.
    Minimum,
}

/// What to do with slots whose ward is not in the requirement table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlistedWardPolicy {
    /// No staffing constraint for the slot.
    #[default]
    Unconstrained,
    /// Reject the batch as a data-integrity error.
    Reject,
}
