//! Epsilon closure shared by the state-set and configuration-set simulators.

use crate::automaton::state::{StateId, StateSet};
use indexmap::IndexSet;
use std::hash::Hash;
use tracing::trace;

/// A set that can be grown one element at a time during closure.
pub trait ClosureSet: Clone {
    type Item: Clone;

    /// Add an element, returning `true` if it was not already present.
    fn add(&mut self, item: Self::Item) -> bool;

    /// Snapshot of the current elements.
    fn elements(&self) -> Vec<Self::Item>;

    fn size(&self) -> usize;
}

impl ClosureSet for StateSet {
    type Item = StateId;

    fn add(&mut self, item: StateId) -> bool {
        self.insert(item)
    }

    fn elements(&self) -> Vec<StateId> {
        self.iter().collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone + Eq + Hash> ClosureSet for IndexSet<T> {
    type Item = T;

    fn add(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn elements(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Smallest superset of `seed` closed under `step`.
///
/// `step` appends the elements one silent move away from its argument.
/// Each round expands only the elements discovered in the previous round,
/// and the loop ends when a round discovers nothing new. `admit` is called
/// after every round that grew the closure and may abort it.
pub fn resolve<S, E>(
    seed: &S,
    mut step: impl FnMut(&S::Item, &mut Vec<S::Item>) -> Result<(), E>,
    mut admit: impl FnMut(&S) -> Result<(), E>,
) -> Result<S, E>
where
    S: ClosureSet,
{
    let mut closure = seed.clone();
    let mut frontier = seed.elements();
    let mut round = 0usize;

    while !frontier.is_empty() {
        let mut reached = Vec::new();
        for item in &frontier {
            step(item, &mut reached)?;
        }
        frontier = reached
            .into_iter()
            .filter(|item| closure.add(item.clone()))
            .collect();
        round += 1;

        if !frontier.is_empty() {
            trace!(
                target: "automata::closure",
                round,
                added = frontier.len(),
                size = closure.size(),
                "epsilon round"
            );
            admit(&closure)?;
        }
    }

    Ok(closure)
}
