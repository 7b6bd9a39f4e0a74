//! Candidate pairing model.
//!
//! A candidate pairing is one scored application of a nurse to a concrete
//! shift slot. Pairings are produced upstream (scoring model, candidate
//! generation) and are read-only inside the optimizer.
//!
//! # Slot Identity
//!
//! A shift slot is identified by `(date, start_time, end_time, ward)`.
//! The shift label (e.g. "Day", "Night") is informational only and does
//! not take part in slot identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scored (nurse, shift slot) application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePairing {
    /// Opaque nurse identifier.
    pub nurse_id: String,
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Shift label (informational).
    #[serde(default)]
    pub shift: String,
    /// Ward label.
    pub ward: String,
    /// Shift start time, as supplied upstream (e.g. "07:00").
    pub start_time: String,
    /// Shift end time, as supplied upstream.
    pub end_time: String,
    /// Worked hours if this pairing is selected.
    pub duration_hours: f64,
    /// Suitability score, typically in [0, 1].
    #[serde(alias = "gat_score")]
    pub score: f64,
}

impl CandidatePairing {
    /// Creates a pairing with zero duration and zero score.
    pub fn new(
        nurse_id: impl Into<String>,
        date: NaiveDate,
        ward: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            nurse_id: nurse_id.into(),
            date,
            shift: String::new(),
            ward: ward.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            duration_hours: 0.0,
            score: 0.0,
        }
    }

    /// Sets the shift label.
    pub fn with_shift(mut self, shift: impl Into<String>) -> Self {
        self.shift = shift.into();
        self
    }

    /// Sets the worked hours.
    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Sets the suitability score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// The slot this pairing applies to.
    pub fn slot_key(&self) -> ShiftSlotKey {
        ShiftSlotKey {
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            ward: self.ward.clone(),
        }
    }
}

/// Identity of a concrete point-in-time staffing unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftSlotKey {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub ward: String,
}

impl fmt::Display for ShiftSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} @ {}",
            self.date, self.start_time, self.end_time, self.ward
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_candidate_builder() {
        let c = CandidatePairing::new("N1", day(4), "ICU", "07:00", "15:00")
            .with_shift("Day")
            .with_duration(8.0)
            .with_score(0.75);

        assert_eq!(c.nurse_id, "N1");
        assert_eq!(c.shift, "Day");
        assert!((c.duration_hours - 8.0).abs() < 1e-10);
        assert!((c.score - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_slot_key_ignores_shift_label() {
        let a = CandidatePairing::new("N1", day(4), "C", "07:00", "15:00").with_shift("Day");
        let b = CandidatePairing::new("N2", day(4), "C", "07:00", "15:00").with_shift("Early");
        assert_eq!(a.slot_key(), b.slot_key());

        let c = CandidatePairing::new("N1", day(4), "B", "07:00", "15:00");
        assert_ne!(a.slot_key(), c.slot_key());
    }

    #[test]
    fn test_slot_key_display() {
        let c = CandidatePairing::new("N1", day(4), "ICU", "07:00", "15:00");
        assert_eq!(c.slot_key().to_string(), "2024-03-04 07:00-15:00 @ ICU");
    }

    #[test]
    fn test_deserialize_upstream_record() {
        let json = r#"{
            "nurse_id": "N7",
            "date": "2024-03-05",
            "shift": "Night",
            "ward": "B",
            "start_time": "19:00",
            "end_time": "07:00",
            "duration_hours": 12.0,
            "gat_score": 0.42
        }"#;
        let c: CandidatePairing = serde_json::from_str(json).unwrap();
        assert_eq!(c.nurse_id, "N7");
        assert_eq!(c.date, day(5));
        assert!((c.score - 0.42).abs() < 1e-10);
    }
}
