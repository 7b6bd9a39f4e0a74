//! Exact 0-1 branch and bound.
//!
//! Depth-first search over the boolean variables with two pruning rules:
//!
//! - **Activity bounds**: every constraint tracks the activity of its fixed
//!   variables plus the sums of positive and negative coefficients of its
//!   free variables. A branch is cut as soon as the reachable range
//!   `[fixed + free_neg, fixed + free_pos]` can no longer satisfy the
//!   constraint.
//! - **Objective bound**: current value plus the positive coefficients of
//!   all free variables must beat the incumbent strictly.
//!
//! Variables are branched in descending objective coefficient order (index
//! order on ties), trying the more profitable value first. Because only
//! strict improvements replace the incumbent, the returned optimum is the
//! first one met in this fixed order: ties are broken deterministically.
//!
//! The search keeps its own stack of frames, one per fixed variable, so
//! the search depth does not consume call stack.
//!
//! # Complexity
//! Worst case O(2^n · nnz); practical on small and tightly constrained
//! instances. Use [`MilpSolver`](super::MilpSolver) for large rosters.
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 7 (Branch and Bound)

use std::time::{Duration, Instant};

use tracing::debug;

use super::model::{LinearModel, Sense};
use super::solver::{accept_selection, check_model, LpSolver, SolveOutcome, SolverConfig};
use crate::error::SolverError;

const EPS: f64 = 1e-9;

/// Exact depth-first 0-1 branch and bound.
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBoundSolver {
    check_interval: u64,
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self {
            check_interval: 1024,
        }
    }

    /// Number of search nodes between two clock reads.
    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes.max(1);
        self
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LpSolver for BranchAndBoundSolver {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn solve(
        &self,
        model: &LinearModel,
        config: &SolverConfig,
    ) -> Result<SolveOutcome, SolverError> {
        check_model(model)?;
        let started = Instant::now();

        let mut search = Search::new(model, config.time_limit, self.check_interval, started);
        if search.root_feasible() {
            search.run()?;
        }
        debug!(nodes = search.nodes, "branch and bound finished");

        match search.best {
            Some((_, values)) => accept_selection(model, values, started),
            None => Ok(SolveOutcome::Infeasible),
        }
    }
}

struct Search<'a> {
    model: &'a LinearModel,
    /// Objective coefficients, oriented for maximization.
    gain: Vec<f64>,
    order: Vec<usize>,
    /// var → (constraint, coefficient)
    incidence: Vec<Vec<(usize, f64)>>,
    fixed: Vec<f64>,
    free_pos: Vec<f64>,
    free_neg: Vec<f64>,
    values: Vec<bool>,
    current: f64,
    upside: f64,
    best: Option<(f64, Vec<bool>)>,
    nodes: u64,
    since_check: u64,
    check_interval: u64,
    started: Instant,
    budget: Option<Duration>,
}

impl<'a> Search<'a> {
    fn new(
        model: &'a LinearModel,
        budget: Option<Duration>,
        check_interval: u64,
        started: Instant,
    ) -> Self {
        let n = model.var_count();
        let m = model.constraint_count();
        let sign = if model.objective().is_maximize() { 1.0 } else { -1.0 };

        let mut gain = vec![0.0; n];
        for (v, c) in model.objective().terms() {
            gain[v.get()] += sign * c;
        }

        let mut incidence = vec![Vec::new(); n];
        let mut free_pos = vec![0.0; m];
        let mut free_neg = vec![0.0; m];
        for (ci, c) in model.constraints().iter().enumerate() {
            for (v, coef) in &c.terms {
                incidence[v.get()].push((ci, *coef));
                if *coef > 0.0 {
                    free_pos[ci] += coef;
                } else {
                    free_neg[ci] += coef;
                }
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| gain[b].total_cmp(&gain[a]).then(a.cmp(&b)));

        let upside: f64 = gain.iter().filter(|g| **g > 0.0).sum();

        Self {
            model,
            gain,
            order,
            incidence,
            fixed: vec![0.0; m],
            free_pos,
            free_neg,
            values: vec![false; n],
            current: 0.0,
            upside,
            best: None,
            nodes: 0,
            since_check: 0,
            check_interval,
            started,
            budget,
        }
    }

    fn reachable(&self, ci: usize) -> bool {
        let c = &self.model.constraints()[ci];
        let lo = self.fixed[ci] + self.free_neg[ci];
        let hi = self.fixed[ci] + self.free_pos[ci];
        match c.sense {
            Sense::Eq => lo <= c.rhs + EPS && hi >= c.rhs - EPS,
            Sense::Ge => hi >= c.rhs - EPS,
            Sense::Le => lo <= c.rhs + EPS,
        }
    }

    fn root_feasible(&self) -> bool {
        (0..self.model.constraint_count()).all(|ci| self.reachable(ci))
    }

    /// Fixes `v`; returns whether every touched constraint stays reachable.
    fn assign(&mut self, v: usize, value: bool) -> bool {
        let mut ok = true;
        for k in 0..self.incidence[v].len() {
            let (ci, coef) = self.incidence[v][k];
            if coef > 0.0 {
                self.free_pos[ci] -= coef;
            } else {
                self.free_neg[ci] -= coef;
            }
            if value {
                self.fixed[ci] += coef;
            }
            ok &= self.reachable(ci);
        }
        if self.gain[v] > 0.0 {
            self.upside -= self.gain[v];
        }
        if value {
            self.current += self.gain[v];
        }
        self.values[v] = value;
        ok
    }

    fn unassign(&mut self, v: usize, value: bool) {
        for &(ci, coef) in &self.incidence[v] {
            if coef > 0.0 {
                self.free_pos[ci] += coef;
            } else {
                self.free_neg[ci] += coef;
            }
            if value {
                self.fixed[ci] -= coef;
            }
        }
        if self.gain[v] > 0.0 {
            self.upside += self.gain[v];
        }
        if value {
            self.current -= self.gain[v];
        }
        self.values[v] = false;
    }

    fn tick(&mut self) -> Result<(), SolverError> {
        self.nodes += 1;
        self.since_check += 1;
        if self.since_check >= self.check_interval {
            self.since_check = 0;
            if let Some(budget) = self.budget {
                if self.started.elapsed() > budget {
                    return Err(SolverError::timeout(budget));
                }
            }
        }
        Ok(())
    }

    /// Node entry at `depth`: leaf bookkeeping and the objective bound.
    /// Returns whether the node still has to be branched on.
    fn enter(&mut self, depth: usize) -> Result<bool, SolverError> {
        self.tick()?;

        if depth == self.order.len() {
            let improves = match &self.best {
                None => true,
                Some((best, _)) => self.current > best + EPS,
            };
            if improves {
                self.best = Some((self.current, self.values.clone()));
            }
            return Ok(false);
        }

        if let Some((best, _)) = &self.best {
            if self.current + self.upside <= best + EPS {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn frame(&self, depth: usize) -> Frame {
        let var = self.order[depth];
        Frame {
            var,
            first: self.gain[var] > 0.0,
            tried: 0,
        }
    }

    /// Depth-first search on an explicit stack, one frame per fixed variable.
    fn run(&mut self) -> Result<(), SolverError> {
        let mut stack: Vec<Frame> = Vec::with_capacity(self.order.len());
        if self.enter(0)? {
            stack.push(self.frame(0));
        }

        while let Some(top) = stack.last().copied() {
            let depth = stack.len() - 1;
            if top.tried > 0 {
                self.unassign(top.var, top.value(top.tried - 1));
            }
            if top.tried == 2 {
                stack.pop();
                continue;
            }

            let value = top.value(top.tried);
            if let Some(frame) = stack.last_mut() {
                frame.tried += 1;
            }
            if self.assign(top.var, value) && self.enter(depth + 1)? {
                stack.push(self.frame(depth + 1));
            }
        }
        Ok(())
    }
}

/// Branching state of one variable on the search stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    var: usize,
    /// Value tried first.
    first: bool,
    /// Values tried so far; the last one is still assigned.
    tried: u8,
}

impl Frame {
    fn value(&self, attempt: u8) -> bool {
        if attempt == 0 {
            self.first
        } else {
            !self.first
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverErrorKind;
    use crate::lp::{LinearConstraint, Objective, VarId};

    fn vars(model: &mut LinearModel, n: usize) -> Vec<VarId> {
        (0..n).map(|i| model.add_bool_var(format!("x{i}"))).collect()
    }

    fn solve(model: &LinearModel) -> SolveOutcome {
        BranchAndBoundSolver::new()
            .solve(model, &SolverConfig::default())
            .unwrap()
    }

    fn values(outcome: SolveOutcome) -> Vec<bool> {
        match outcome {
            SolveOutcome::Optimal(sol) => sol.values,
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_pick_best_of_two() {
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 2);
        m.add_constraint(LinearConstraint::new("one", vec![(xs[0], 1.0), (xs[1], 1.0)], Sense::Eq, 1.0));
        m.set_objective(Objective::Maximize {
            terms: vec![(xs[0], 0.4), (xs[1], 0.9)],
        });
        assert_eq!(values(solve(&m)), vec![false, true]);
    }

    #[test]
    fn test_infeasible_equality() {
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 2);
        m.add_constraint(LinearConstraint::new("three", vec![(xs[0], 1.0), (xs[1], 1.0)], Sense::Eq, 3.0));
        assert!(matches!(solve(&m), SolveOutcome::Infeasible));
    }

    #[test]
    fn test_infeasible_hours() {
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 2);
        m.add_constraint(LinearConstraint::new("hours", vec![(xs[0], 2.0), (xs[1], 4.0)], Sense::Ge, 10.0));
        assert!(matches!(solve(&m), SolveOutcome::Infeasible));
    }

    #[test]
    fn test_forced_low_value_selection() {
        // Hours force picking x2 even though it scores badly.
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 3);
        m.add_constraint(LinearConstraint::new(
            "hours",
            vec![(xs[0], 4.0), (xs[1], 4.0), (xs[2], 8.0)],
            Sense::Ge,
            12.0,
        ));
        m.add_constraint(LinearConstraint::new(
            "cap",
            vec![(xs[0], 1.0), (xs[1], 1.0), (xs[2], 1.0)],
            Sense::Le,
            2.0,
        ));
        m.set_objective(Objective::Maximize {
            terms: vec![(xs[0], 0.9), (xs[1], 0.8), (xs[2], 0.1)],
        });
        let v = values(solve(&m));
        assert!(v[2]);
        assert!(v[0]);
        assert!(!v[1]);
    }

    #[test]
    fn test_minimize() {
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 3);
        m.add_constraint(LinearConstraint::new(
            "two",
            xs.iter().map(|x| (*x, 1.0)).collect(),
            Sense::Ge,
            2.0,
        ));
        m.set_objective(Objective::Minimize {
            terms: vec![(xs[0], 5.0), (xs[1], 1.0), (xs[2], 2.0)],
        });
        assert_eq!(values(solve(&m)), vec![false, true, true]);
    }

    #[test]
    fn test_deterministic_tie_break() {
        // Equal scores: the lower index wins in branching order.
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 3);
        m.add_constraint(LinearConstraint::new(
            "one",
            xs.iter().map(|x| (*x, 1.0)).collect(),
            Sense::Eq,
            1.0,
        ));
        m.set_objective(Objective::Maximize {
            terms: xs.iter().map(|x| (*x, 0.5)).collect(),
        });
        for _ in 0..3 {
            assert_eq!(values(solve(&m)), vec![true, false, false]);
        }
    }

    #[test]
    fn test_negative_scores_left_out_when_free() {
        let mut m = LinearModel::new("test");
        let xs = vars(&mut m, 2);
        m.set_objective(Objective::Maximize {
            terms: vec![(xs[0], -0.3), (xs[1], 0.2)],
        });
        assert_eq!(values(solve(&m)), vec![false, true]);
    }

    #[test]
    fn test_empty_model_is_optimal() {
        let m = LinearModel::new("empty");
        assert!(values(solve(&m)).is_empty());
    }

    #[test]
    fn test_empty_constraint_unsatisfiable() {
        let mut m = LinearModel::new("test");
        m.add_constraint(LinearConstraint::new("empty", Vec::new(), Sense::Ge, 1.0));
        assert!(matches!(solve(&m), SolveOutcome::Infeasible));
    }

    #[test]
    fn test_timeout_is_error_not_infeasible() {
        // A budget that is spent before the first node is expanded.
        let mut m = LinearModel::new("big");
        let xs = vars(&mut m, 40);
        m.add_constraint(LinearConstraint::new(
            "half",
            xs.iter().map(|x| (*x, 1.0)).collect(),
            Sense::Eq,
            20.0,
        ));
        m.add_constraint(LinearConstraint::new(
            "odd",
            xs.iter().enumerate().map(|(i, x)| (*x, if i % 2 == 0 { 2.0 } else { 3.0 })).collect(),
            Sense::Eq,
            51.0,
        ));
        m.set_objective(Objective::Maximize {
            terms: xs.iter().map(|x| (*x, 1.0)).collect(),
        });

        let config = SolverConfig::default().with_time_limit(Duration::from_nanos(1));
        let err = BranchAndBoundSolver::new()
            .with_check_interval(1)
            .solve(&m, &config)
            .unwrap_err();
        assert_eq!(err.kind(), SolverErrorKind::Timeout);
    }

    #[test]
    fn test_deep_search_does_not_grow_the_call_stack() {
        // One variable per level: depth equals the variable count.
        let n = 120_000;
        let mut m = LinearModel::new("deep");
        let xs = vars(&mut m, n);
        for (i, x) in xs.iter().enumerate() {
            m.add_constraint(LinearConstraint::new(format!("c{i}"), vec![(*x, 8.0)], Sense::Ge, 0.0));
        }
        m.set_objective(Objective::Maximize {
            terms: xs.iter().enumerate().map(|(i, x)| (*x, if i % 3 == 0 { -0.5 } else { 1.0 })).collect(),
        });

        let values = values(solve(&m));
        assert_eq!(values.len(), n);
        assert!(values.iter().enumerate().all(|(i, v)| *v == (i % 3 != 0)));
    }
}
