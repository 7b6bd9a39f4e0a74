//! Nurse roster optimizer.
//!
//! Selects, from a pre-scored set of nurse → shift-slot candidate pairings,
//! the subset that maximizes total score while meeting ward staffing
//! requirements and a minimum worked-hours threshold per nurse per
//! fortnight. The selection is solved exactly as a 0-1 linear program.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CandidatePairing`, `ShiftSlotKey`,
//!   `WardRequirementTable`, `Roster`, `RosterOutcome`, `ShiftPreference`
//! - **`validation`**: Input integrity checks (duplicate pairings, bad durations, empty ids)
//! - **`store`**: Validated candidate arena with by-nurse, by-slot and by-bucket indices
//! - **`fortnight`**: ISO-week based fortnight bucketing
//! - **`formulation`**: Staffing, hours and double-booking constraints; score objective
//! - **`lp`**: Solver-agnostic 0-1 model, MILP and branch-and-bound backends
//! - **`projector`**: Solver outcome → roster
//! - **`optimizer`**: One end-to-end solve cycle
//! - **`kpi`**: Roster quality metrics and preference match rates
//! - **`config`**, **`error`**: Solve configuration and error types
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_roster::config::OptimizerConfig;
//! use u_roster::models::CandidatePairing;
//! use u_roster::optimizer::RosterOptimizer;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let candidates: Vec<_> = ["N1", "N2", "N3"]
//!     .iter()
//!     .zip([0.9, 0.7, 0.2])
//!     .map(|(nurse, score)| {
//!         CandidatePairing::new(*nurse, day, "B", "07:00", "19:00")
//!             .with_duration(12.0)
//!             .with_score(score)
//!     })
//!     .collect();
//!
//! // Ward B needs two nurses; every nurse must work 10h in the fortnight.
//! let outcome = RosterOptimizer::new(OptimizerConfig::default()).solve(candidates).unwrap();
//! assert!(outcome.is_infeasible());
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Wolsey (1998), "Integer Programming"

pub mod config;
pub mod error;
pub mod formulation;
pub mod fortnight;
pub mod kpi;
pub mod lp;
pub mod models;
pub mod optimizer;
pub mod projector;
pub mod store;
pub mod validation;
