//! Interface shared by every machine kind.

use crate::automaton::acceptance::Verdict;
use crate::automaton::symbol::Alphabet;
use crate::error::AutomatonError;

/// A built, immutable machine description that can decide its input.
///
/// Runs borrow the description and keep all working state local, so any
/// number of runs may share one machine across threads.
pub trait Automaton {
    type State;
    type Symbol;

    /// Consume `input` and report the states the machine ended in.
    ///
    /// Fails only for input outside the alphabet or, depending on the
    /// machine kind, for an undefined transition or an exhausted resource.
    fn run(&self, input: &[Self::Symbol]) -> Result<Verdict<Self::State>, AutomatonError>;

    fn accepts(&self, input: &[Self::Symbol]) -> Result<bool, AutomatonError> {
        Ok(self.run(input)?.is_accepted())
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    fn is_accepting(&self, state: &Self::State) -> bool;
}
