//! Rostering domain models.
//!
//! Provides the data types exchanged with the optimizer: scored candidate
//! pairings going in, rosters coming out, and the static ward staffing
//! table that shapes the model.
//!
//! # Domain Mappings
//!
//! | u-roster | Meaning |
//! |----------|---------|
//! | CandidatePairing | One scored nurse → shift-slot application |
//! | ShiftSlotKey | (date, start, end, ward): one staffing unit |
//! | WardRequirementTable | Headcount required per slot of a ward |
//! | Roster | Selected pairings and their total score |
//! | ShiftPreference | A nurse's requested shift, for evaluation only |

mod candidate;
mod preference;
mod roster;
mod ward;

pub use candidate::{CandidatePairing, ShiftSlotKey};
pub use preference::ShiftPreference;
pub use roster::{Roster, RosterAssignment, RosterOutcome};
pub use ward::{StaffingMode, UnlistedWardPolicy, WardRequirementTable};
