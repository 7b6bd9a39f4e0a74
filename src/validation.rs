//! Input validation for candidate pairings.
//!
//! Checks structural integrity of the candidate set before it is indexed.
//! Detects:
//! - Duplicate (nurse, shift slot) pairings
//! - Negative or non-finite durations
//! - Non-finite scores
//! - Empty nurse or ward identifiers
//!
//! Every issue is collected; the batch is rejected as a whole.

use std::collections::HashMap;
use std::fmt;

use crate::models::{CandidatePairing, ShiftSlotKey};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two pairings share the same (nurse, slot).
    DuplicatePairing,
    /// Duration below zero.
    NegativeDuration,
    /// NaN or infinite duration or score.
    NonFiniteValue,
    /// Empty nurse or ward identifier.
    EmptyIdentifier,
    /// A slot's ward is missing from the requirement table under strict policy.
    UnlistedWard,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a candidate set.
///
/// Checks, for each pairing `i`:
/// 1. `nurse_id` and `ward` are non-empty
/// 2. `duration_hours` is finite and non-negative
/// 3. `score` is finite
/// 4. No earlier pairing has the same nurse and slot key
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_candidates(candidates: &[CandidatePairing]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen: HashMap<(&str, ShiftSlotKey), usize> = HashMap::new();

    for (i, c) in candidates.iter().enumerate() {
        if c.nurse_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIdentifier,
                format!("Candidate #{i} has an empty nurse_id"),
            ));
        }
        if c.ward.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIdentifier,
                format!("Candidate #{i} ({}) has an empty ward", c.nurse_id),
            ));
        }

        if !c.duration_hours.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Candidate #{i} ({}) has non-finite duration", c.nurse_id),
            ));
        } else if c.duration_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Candidate #{i} ({}) has negative duration {}",
                    c.nurse_id, c.duration_hours
                ),
            ));
        }

        if !c.score.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Candidate #{i} ({}) has non-finite score", c.nurse_id),
            ));
        }

        if let Some(first) = seen.insert((c.nurse_id.as_str(), c.slot_key()), i) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePairing,
                format!(
                    "Candidates #{first} and #{i} both pair nurse '{}' with slot {}",
                    c.nurse_id,
                    c.slot_key()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
