//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::acceptance::Verdict;
use crate::automaton::intern::{Element, Interner};
use crate::automaton::machine::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, SymbolId};
use crate::automaton::table::DeterministicTable;
use crate::error::{AutomatonError, MalformedDescription, render};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A Deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct Dfa<Q, A> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    /// Transitions: (source, symbol) -> destination
    transitions: DeterministicTable,
    start_state: StateId,
    final_states: StateSet,
}

impl<Q: Element, A: Element> Dfa<Q, A> {
    /// Start describing a DFA over the given states and alphabet.
    pub fn builder(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
    ) -> Result<DfaBuilder<Q, A>, MalformedDescription> {
        DfaBuilder::new(states, alphabet)
    }

    /// Advance one symbol. A missing table entry is an error, not a rejection.
    fn step(&self, state: StateId, symbol: SymbolId) -> Result<StateId, AutomatonError> {
        let next = self.transitions.get(state, symbol).ok_or_else(|| {
            AutomatonError::UndefinedTransition {
                state: render(&self.states[state]),
                symbol: render(&self.alphabet[symbol]),
            }
        })?;
        trace!(target: "automata::dfa", state, symbol, next, "step");
        Ok(next)
    }

    /// The state reached from `state` on `symbol`, or `None` when either is
    /// undeclared or the table has no entry for the pair.
    pub fn next_state(&self, state: &Q, symbol: &A) -> Option<&Q> {
        let source = self.states.id(state)?;
        let symbol = self.alphabet.id(symbol)?;
        self.transitions
            .get(source, symbol)
            .map(|next| &self.states[next])
    }

    /// Fold the stepper over `input` from the start state.
    pub fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        let symbols = self.alphabet.encode(input)?;
        let last = symbols
            .iter()
            .try_fold(self.start_state, |state, &symbol| self.step(state, symbol))?;

        let reached = StateSet::singleton(last, self.states.len());
        let verdict = Verdict::from_states(&reached, &self.final_states, &self.states);
        debug!(
            target: "automata::dfa",
            symbols = input.len(),
            final_state = ?self.states[last],
            accepted = verdict.is_accepted(),
            "run finished"
        );
        Ok(verdict)
    }

    /// Whether every `(state, symbol)` pair has a transition.
    pub fn is_total(&self) -> bool {
        self.transitions
            .first_gap(self.states.len(), self.alphabet.ids())
            .is_none()
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.final_states.is_empty() {
            return true;
        }

        // BFS to find if any final state is reachable
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue = VecDeque::from([self.start_state]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            if self.final_states.contains(state) {
                return false;
            }
            for symbol in self.alphabet.ids() {
                if let Some(next) = self.transitions.get(state, symbol) {
                    if !visited.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        true
    }

    pub fn start_state(&self) -> &Q {
        &self.states[self.start_state]
    }

    pub fn states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.states.iter().map(|(_, state)| state)
    }

    pub fn final_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.final_states.iter().map(|state| &self.states[state])
    }

    /// Get all transitions as `(source, symbol, destination)`.
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, &A, &Q)> + '_ {
        self.transitions
            .iter()
            .map(|(src, sym, dst)| (&self.states[src], &self.alphabet[sym], &self.states[dst]))
    }
}

impl<Q: Element, A: Element> Automaton for Dfa<Q, A> {
    type State = Q;
    type Symbol = A;

    fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        Dfa::run(self, input)
    }

    fn alphabet(&self) -> &Alphabet<A> {
        &self.alphabet
    }

    fn is_accepting(&self, state: &Q) -> bool {
        self.states
            .id(state)
            .is_some_and(|id| self.final_states.contains(id))
    }
}

/// Validating builder for [`Dfa`].
///
/// Every call checks its arguments against the declared states and alphabet
/// immediately, so a bad transition is reported where it is written.
#[derive(Debug, Clone)]
pub struct DfaBuilder<Q, A> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    transitions: DeterministicTable,
    start_state: Option<StateId>,
    final_states: StateSet,
    require_total: bool,
}

impl<Q: Element, A: Element> DfaBuilder<Q, A> {
    pub fn new(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
    ) -> Result<Self, MalformedDescription> {
        let states = Interner::declare_states(states)?;
        let final_states = StateSet::with_capacity(states.len());
        Ok(Self {
            states,
            alphabet: Alphabet::input(alphabet)?,
            transitions: DeterministicTable::new(),
            start_state: None,
            final_states,
            require_total: false,
        })
    }

    /// Add a transition.
    pub fn transition(
        &mut self,
        source: Q,
        symbol: A,
        destination: Q,
    ) -> Result<&mut Self, MalformedDescription> {
        let src = self.states.resolve(&source, MalformedDescription::UnknownState)?;
        let sym = self.alphabet.resolve(&symbol)?;
        let dst = self.states.resolve(&destination, MalformedDescription::UnknownState)?;

        match self.transitions.insert(src, sym, dst) {
            Ok(()) => Ok(self),
            Err(existing) if existing == dst => Err(MalformedDescription::DuplicateTransition(
                format!("({source:?}, {symbol:?}) -> {destination:?}"),
            )),
            Err(existing) => Err(MalformedDescription::ConflictingTransition {
                key: format!("({source:?}, {symbol:?})"),
                existing: render(&self.states[existing]),
                attempted: render(&destination),
            }),
        }
    }

    pub fn start_state(&mut self, state: Q) -> Result<&mut Self, MalformedDescription> {
        self.start_state = Some(self.states.resolve(&state, MalformedDescription::UnknownState)?);
        Ok(self)
    }

    /// Add a final (accepting) state.
    pub fn final_state(&mut self, state: Q) -> Result<&mut Self, MalformedDescription> {
        let id = self.states.resolve(&state, MalformedDescription::UnknownState)?;
        self.final_states.insert(id);
        Ok(self)
    }

    pub fn final_states(
        &mut self,
        states: impl IntoIterator<Item = Q>,
    ) -> Result<&mut Self, MalformedDescription> {
        for state in states {
            self.final_state(state)?;
        }
        Ok(self)
    }

    /// Reject the description at build time unless every
    /// `(state, symbol)` pair has a transition.
    pub fn require_total(&mut self) -> &mut Self {
        self.require_total = true;
        self
    }

    pub fn build(self) -> Result<Dfa<Q, A>, MalformedDescription> {
        let start_state = self
            .start_state
            .ok_or(MalformedDescription::MissingInitialState)?;

        if self.require_total {
            if let Some((state, symbol)) = self
                .transitions
                .first_gap(self.states.len(), self.alphabet.ids())
            {
                return Err(MalformedDescription::IncompleteTable(format!(
                    "({:?}, {:?})",
                    self.states[state], self.alphabet[symbol],
                )));
            }
        }

        debug!(
            target: "automata::builder",
            kind = "dfa",
            states = self.states.len(),
            symbols = self.alphabet.len(),
            transitions = self.transitions.len(),
            "machine built"
        );
        Ok(Dfa {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start_state,
            final_states: self.final_states,
        })
    }
}
