//! Nurse shift preferences.
//!
//! A preference records that a nurse asked for a given shift on a given
//! ward and date. Preferences are not constraints; they are only used to
//! evaluate how well a published roster honours requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RosterAssignment;

/// A requested (nurse, date, shift, ward).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftPreference {
    pub nurse_id: String,
    pub date: NaiveDate,
    #[serde(alias = "preferred_shift")]
    pub shift: String,
    #[serde(alias = "preferred_ward")]
    pub ward: String,
}

impl ShiftPreference {
    pub fn new(
        nurse_id: impl Into<String>,
        date: NaiveDate,
        shift: impl Into<String>,
        ward: impl Into<String>,
    ) -> Self {
        Self {
            nurse_id: nurse_id.into(),
            date,
            shift: shift.into(),
            ward: ward.into(),
        }
    }

    /// Whether an assignment honours this preference.
    pub fn matches(&self, a: &RosterAssignment) -> bool {
        self.nurse_id == a.nurse_id && self.date == a.date && self.shift == a.shift && self.ward == a.ward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidatePairing;

    #[test]
    fn test_matches_on_all_four_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let c = CandidatePairing::new("N1", date, "ICU", "07:00", "15:00").with_shift("Day");
        let a = RosterAssignment::from(&c);

        assert!(ShiftPreference::new("N1", date, "Day", "ICU").matches(&a));
        assert!(!ShiftPreference::new("N1", date, "Night", "ICU").matches(&a));
        assert!(!ShiftPreference::new("N2", date, "Day", "ICU").matches(&a));
        assert!(!ShiftPreference::new("N1", date, "Day", "A").matches(&a));
    }

    #[test]
    fn test_deserialize_preferred_columns() {
        let json = r#"{"nurse_id":"N1","date":"2024-03-04","preferred_shift":"Day","preferred_ward":"B"}"#;
        let p: ShiftPreference = serde_json::from_str(json).unwrap();
        assert_eq!(p.shift, "Day");
        assert_eq!(p.ward, "B");
    }
}
