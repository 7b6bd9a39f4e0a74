//! 0-1 linear programming layer.
//!
//! Provides a solver-agnostic model for problems over boolean decision
//! variables with linear constraints and a linear objective.
//!
//! # Key Components
//!
//! - **Model**: [`LinearModel`] with variables, [`LinearConstraint`]s, [`Objective`]
//! - **Solver**: [`LpSolver`] trait, one synchronous solve attempt
//! - **Backends**: [`MilpSolver`] (`good_lp` + `microlp`),
//!   [`BranchAndBoundSolver`] (exact, deterministic on ties)
//!
//! # Design
//!
//! Nothing here knows about nurses or wards; the rostering formulation
//! lives in [`crate::formulation`]. A model is built fresh for every solve
//! and owns its variables, so variables are never shared between solves.
//! Every backend's selection is re-checked against the model before it is
//! reported as optimal.

mod bnb;
mod milp;
mod model;
mod solver;

pub use bnb::BranchAndBoundSolver;
pub use milp::MilpSolver;
pub use model::{BoolVar, LinearConstraint, LinearModel, Objective, Sense, VarId};
pub use solver::{LpSolution, LpSolver, SolveOutcome, SolverConfig, FEASIBILITY_TOLERANCE};
