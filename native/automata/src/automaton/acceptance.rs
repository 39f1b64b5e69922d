//! Acceptance decision and run verdicts.

use crate::automaton::intern::Interner;
use crate::automaton::state::{StateId, StateSet};
use crate::error::Halt;
use std::hash::Hash;

/// The reached states that are accepting. A run accepts iff this is non-empty.
pub fn decide(reached: &StateSet, accepting: &StateSet) -> StateSet {
    reached.intersection(accepting)
}

/// Outcome of a run, in terms of the caller's state values.
///
/// Besides the boolean verdict it keeps the states the run ended in, so a
/// presentation layer can explain the result without re-running the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<Q> {
    reached: Vec<Q>,
    accepting: Vec<Q>,
    halt: Option<Halt>,
}

impl<Q: Clone + Eq + Hash> Verdict<Q> {
    pub(crate) fn from_states(
        reached: &StateSet,
        accepting: &StateSet,
        states: &Interner<Q>,
    ) -> Self {
        Self {
            reached: lookup(reached, states),
            accepting: lookup(&decide(reached, accepting), states),
            halt: None,
        }
    }

    /// A deterministic pushdown run that stopped early in `state`.
    pub(crate) fn halted(state: StateId, halt: Halt, states: &Interner<Q>) -> Self {
        Self {
            reached: states.get(state).cloned().into_iter().collect(),
            accepting: Vec::new(),
            halt: Some(halt),
        }
    }
}

impl<Q> Verdict<Q> {
    pub fn is_accepted(&self) -> bool {
        !self.accepting.is_empty()
    }

    /// Every state the run ended in, accepting or not, in declaration order.
    pub fn reached(&self) -> &[Q] {
        &self.reached
    }

    pub fn accepting_states(&self) -> &[Q] {
        &self.accepting
    }

    /// The single state a deterministic run ended in.
    pub fn final_state(&self) -> Option<&Q> {
        match self.reached.as_slice() {
            [state] => Some(state),
            _ => None,
        }
    }

    /// Why a deterministic pushdown run stopped before the end of its input.
    pub fn halt(&self) -> Option<Halt> {
        self.halt
    }
}

fn lookup<Q: Clone + Eq + Hash>(set: &StateSet, states: &Interner<Q>) -> Vec<Q> {
    set.iter().filter_map(|id| states.get(id).cloned()).collect()
}
