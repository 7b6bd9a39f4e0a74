//! 0-1 linear model definition.

use std::fmt;

/// Index of a boolean variable within one [`LinearModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A boolean decision variable.
#[derive(Debug, Clone)]
pub struct BoolVar {
    /// Variable name (for diagnostics).
    pub name: String,
}

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `lhs == rhs`
    Eq,
    /// `lhs >= rhs`
    Ge,
    /// `lhs <= rhs`
    Le,
}

/// A linear constraint `Σ coef·x  (sense)  rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Constraint name (for diagnostics).
    pub name: String,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            name: name.into(),
            terms,
            sense,
            rhs,
        }
    }

    /// Left-hand side under a full assignment.
    pub fn activity(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| values[v.0])
            .map(|(_, c)| c)
            .sum()
    }

    /// Whether `activity` satisfies the constraint within `tolerance`.
    pub fn holds(&self, activity: f64, tolerance: f64) -> bool {
        match self.sense {
            Sense::Eq => (activity - self.rhs).abs() <= tolerance,
            Sense::Ge => activity >= self.rhs - tolerance,
            Sense::Le => activity <= self.rhs + tolerance,
        }
    }
}

/// Optimization direction and linear objective terms.
#[derive(Debug, Clone)]
pub enum Objective {
    Maximize { terms: Vec<(VarId, f64)> },
    Minimize { terms: Vec<(VarId, f64)> },
}

impl Objective {
    pub fn terms(&self) -> &[(VarId, f64)] {
        match self {
            Objective::Maximize { terms } | Objective::Minimize { terms } => terms,
        }
    }

    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize { .. })
    }
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Maximize { terms: Vec::new() }
    }
}

/// A 0-1 linear program: boolean variables, linear constraints, one objective.
///
/// # Examples
///
/// ```
/// use u_roster::lp::{LinearConstraint, LinearModel, Objective, Sense};
///
/// let mut model = LinearModel::new("pick-one");
/// let a = model.add_bool_var("a");
/// let b = model.add_bool_var("b");
/// model.add_constraint(LinearConstraint::new("one", vec![(a, 1.0), (b, 1.0)], Sense::Eq, 1.0));
/// model.set_objective(Objective::Maximize { terms: vec![(a, 0.9), (b, 0.4)] });
/// assert!(model.validate().is_ok());
/// assert!(model.is_satisfied(&[true, false], 1e-9));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    /// Model name.
    pub name: String,
    vars: Vec<BoolVar>,
    constraints: Vec<LinearConstraint>,
    objective: Objective,
}

impl LinearModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a boolean variable and returns its id.
    pub fn add_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.vars.push(BoolVar { name: name.into() });
        VarId(self.vars.len() - 1)
    }

    /// Adds a constraint and returns its position.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    pub fn vars(&self) -> &[BoolVar] {
        &self.vars
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and every coefficient
    /// and right-hand side is finite.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.vars.len();
        for c in &self.constraints {
            if !c.rhs.is_finite() {
                return Err(format!("constraint '{}': non-finite rhs", c.name));
            }
            for (v, coef) in &c.terms {
                if v.0 >= n {
                    return Err(format!("constraint '{}': undefined variable {v}", c.name));
                }
                if !coef.is_finite() {
                    return Err(format!("constraint '{}': non-finite coefficient on {v}", c.name));
                }
            }
        }
        for (v, coef) in self.objective.terms() {
            if v.0 >= n {
                return Err(format!("objective: undefined variable {v}"));
            }
            if !coef.is_finite() {
                return Err(format!("objective: non-finite coefficient on {v}"));
            }
        }
        Ok(())
    }

    /// Objective value of a full assignment.
    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective
            .terms()
            .iter()
            .filter(|(v, _)| values[v.0])
            .map(|(_, c)| c)
            .sum()
    }

    /// First constraint violated by `values`, if any.
    pub fn first_violation(&self, values: &[bool], tolerance: f64) -> Option<&LinearConstraint> {
        self.constraints
            .iter()
            .find(|c| !c.holds(c.activity(values), tolerance))
    }

    /// Whether `values` satisfies every constraint.
    pub fn is_satisfied(&self, values: &[bool], tolerance: f64) -> bool {
        values.len() == self.vars.len() && self.first_violation(values, tolerance).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var_model() -> (LinearModel, VarId, VarId) {
        let mut m = LinearModel::new("test");
        let a = m.add_bool_var("a");
        let b = m.add_bool_var("b");
        (m, a, b)
    }

    #[test]
    fn test_model_creation() {
        let (mut m, a, b) = two_var_model();
        m.add_constraint(LinearConstraint::new("c", vec![(a, 1.0), (b, 1.0)], Sense::Le, 1.0));
        m.set_objective(Objective::Maximize {
            terms: vec![(a, 2.0), (b, 3.0)],
        });

        assert_eq!(m.var_count(), 2);
        assert_eq!(m.constraint_count(), 1);
        assert!(m.objective().is_maximize());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_undefined_variable() {
        let (mut m, a, _) = two_var_model();
        let ghost = VarId(7);
        m.add_constraint(LinearConstraint::new("c", vec![(a, 1.0), (ghost, 1.0)], Sense::Eq, 1.0));
        assert!(m.validate().unwrap_err().contains("undefined variable x7"));
    }

    #[test]
    fn test_non_finite_coefficient() {
        let (mut m, a, _) = two_var_model();
        m.set_objective(Objective::Maximize {
            terms: vec![(a, f64::NAN)],
        });
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_constraint_senses() {
        let (_, a, b) = two_var_model();
        let terms = vec![(a, 4.0), (b, 6.0)];
        let eq = LinearConstraint::new("eq", terms.clone(), Sense::Eq, 10.0);
        let ge = LinearConstraint::new("ge", terms.clone(), Sense::Ge, 5.0);
        let le = LinearConstraint::new("le", terms, Sense::Le, 5.0);

        let both = [true, true];
        let only_a = [true, false];
        assert!(eq.holds(eq.activity(&both), 1e-9));
        assert!(!eq.holds(eq.activity(&only_a), 1e-9));
        assert!(ge.holds(ge.activity(&both), 1e-9));
        assert!(!ge.holds(ge.activity(&only_a), 1e-9));
        assert!(le.holds(le.activity(&only_a), 1e-9));
        assert!(!le.holds(le.activity(&both), 1e-9));
    }

    #[test]
    fn test_objective_value_and_violation() {
        let (mut m, a, b) = two_var_model();
        m.add_constraint(LinearConstraint::new("one", vec![(a, 1.0), (b, 1.0)], Sense::Eq, 1.0));
        m.set_objective(Objective::Maximize {
            terms: vec![(a, 0.9), (b, 0.4)],
        });

        assert!((m.objective_value(&[true, false]) - 0.9).abs() < 1e-12);
        assert!(m.is_satisfied(&[false, true], 1e-9));
        assert_eq!(
            m.first_violation(&[true, true], 1e-9).map(|c| c.name.as_str()),
            Some("one")
        );
        assert!(!m.is_satisfied(&[true], 1e-9));
    }
}
