//! Roster objective.

use crate::lp::{Objective, VarId};
use crate::store::CandidateStore;

/// Builds `maximize Σ score·x` over every candidate pairing.
///
/// Scores enter unscaled; there is no secondary tie-break term.
pub struct ObjectiveBuilder<'a> {
    store: &'a CandidateStore,
    vars: &'a [VarId],
}

impl<'a> ObjectiveBuilder<'a> {
    pub fn new(store: &'a CandidateStore, vars: &'a [VarId]) -> Self {
        Self { store, vars }
    }

    pub fn build(&self) -> Objective {
        let terms = self
            .store
            .iter()
            .map(|(id, c)| (self.vars[id.get()], c.score))
            .collect();
        Objective::Maximize { terms }
    }
}
