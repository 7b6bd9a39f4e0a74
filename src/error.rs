//! Error taxonomy.
//!
//! Infeasibility is not an error: it is reported as
//! [`RosterOutcome::Infeasible`](crate::models::RosterOutcome). Errors are
//! reserved for rejected input, invalid configuration and solver failures.

use std::fmt;
use std::time::Duration;

use crate::validation::ValidationError;

/// Malformed or duplicate candidate input. The whole batch is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct DataIntegrityError {
    errors: Vec<ValidationError>,
}

impl DataIntegrityError {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl From<ValidationError> for DataIntegrityError {
    fn from(error: ValidationError) -> Self {
        Self::new(vec![error])
    }
}

impl fmt::Display for DataIntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} data integrity issue(s)", self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n  - {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DataIntegrityError {}

/// Category of a solver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErrorKind {
    /// The wall-clock budget ran out before optimality or infeasibility was proven.
    Timeout,
    /// The model references unknown variables or carries non-finite coefficients.
    ModelInvalid,
    /// The backend returned a selection that violates the model.
    Numerical,
    /// Any other backend failure.
    Backend,
}

/// Backend-level failure. Never retried by the optimizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverError {
    kind: SolverErrorKind,
    message: String,
}

impl SolverError {
    pub fn new(kind: SolverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(budget: Duration) -> Self {
        Self::new(
            SolverErrorKind::Timeout,
            format!("time budget of {} ms exhausted", budget.as_millis()),
        )
    }

    #[inline]
    pub fn kind(&self) -> SolverErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_timeout(&self) -> bool {
        self.kind == SolverErrorKind::Timeout
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver error ({:?}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SolverError {}

/// Invalid optimizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Any failure of a roster solve.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterError {
    DataIntegrity(DataIntegrityError),
    Config(ConfigError),
    Solver(SolverError),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::DataIntegrity(e) => e.fmt(f),
            RosterError::Config(e) => e.fmt(f),
            RosterError::Solver(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::DataIntegrity(e) => Some(e),
            RosterError::Config(e) => Some(e),
            RosterError::Solver(e) => Some(e),
        }
    }
}

impl From<DataIntegrityError> for RosterError {
    fn from(e: DataIntegrityError) -> Self {
        RosterError::DataIntegrity(e)
    }
}

impl From<ConfigError> for RosterError {
    fn from(e: ConfigError) -> Self {
        RosterError::Config(e)
    }
}

impl From<SolverError> for RosterError {
    fn from(e: SolverError) -> Self {
        RosterError::Solver(e)
    }
}
