//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::acceptance::Verdict;
use crate::automaton::closure;
use crate::automaton::intern::{Element, Interner};
use crate::automaton::machine::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, Symbol, SymbolId};
use crate::automaton::table::NondeterministicTable;
use crate::error::{AutomatonError, MalformedDescription};
use std::collections::VecDeque;
use std::convert::Infallible;
use tracing::{debug, trace};

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct Nfa<Q, A> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    /// Transitions: (source, symbol) -> set of destination states.
    /// Epsilon transitions are stored under `Symbol::Epsilon`.
    transitions: NondeterministicTable,
    start_state: StateId,
    final_states: StateSet,
    /// Epsilon closure of each single state, indexed by state id.
    epsilon_closures: Vec<StateSet>,
}

impl<Q: Element, A: Element> Nfa<Q, A> {
    /// Start describing an NFA over the given states and alphabet.
    pub fn builder(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
    ) -> Result<NfaBuilder<Q, A>, MalformedDescription> {
        NfaBuilder::new(states, alphabet)
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(cached) = self.epsilon_closures.get(state as usize) {
                closure.union_with(cached);
            }
        }
        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let label = Symbol::Literal(symbol);
        let mut reached = StateSet::with_capacity(self.states.len());

        for state in states.iter() {
            if let Some(destinations) = self.transitions.destinations(state, label) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Epsilon closure of the start state: where every run begins.
    pub fn start_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(self.start_state, self.states.len()))
    }

    /// Simulate all computation paths at once by tracking the set of
    /// reachable states.
    pub fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        let symbols = self.alphabet.encode(input)?;
        let mut current = self.start_closure();

        for (position, &symbol) in symbols.iter().enumerate() {
            current = self.move_on_symbol(&current, symbol);
            trace!(target: "automata::nfa", position, symbol, reachable = current.len(), "step");
            if current.is_empty() {
                debug!(target: "automata::nfa", position, "no reachable states left");
                break;
            }
        }

        let verdict = Verdict::from_states(&current, &self.final_states, &self.states);
        debug!(
            target: "automata::nfa",
            symbols = input.len(),
            reachable = current.len(),
            accepted = verdict.is_accepted(),
            "run finished"
        );
        Ok(verdict)
    }

    /// Check if the NFA accepts no string at all.
    /// Uses BFS from the start closure following all transitions.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.start_closure().iter().collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for symbol in self.alphabet.ids() {
                let closure = self.move_on_symbol(&StateSet::singleton(state, 1), symbol);
                queue.extend(closure.iter().filter(|&dest| !visited.contains(dest)));
            }
        }

        true
    }

    pub fn state_id(&self, state: &Q) -> Option<StateId> {
        self.states.id(state)
    }

    pub fn state(&self, id: StateId) -> Option<&Q> {
        self.states.get(id)
    }

    pub fn start_state(&self) -> &Q {
        &self.states[self.start_state]
    }

    pub fn final_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.final_states.iter().map(|state| &self.states[state])
    }

    /// Get all transitions as `(source, label, destination)`.
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, Symbol<&A>, &Q)> + '_ {
        self.transitions.iter().map(|(src, label, dst)| {
            (
                &self.states[src],
                label.map(|sym| &self.alphabet[sym]),
                &self.states[dst],
            )
        })
    }
}

impl<Q: Element, A: Element> Automaton for Nfa<Q, A> {
    type State = Q;
    type Symbol = A;

    fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        Nfa::run(self, input)
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

/// Validating builder for [`Nfa`].
#[derive(Debug, Clone)]
pub struct NfaBuilder<Q, A> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    transitions: NondeterministicTable,
    start_state: Option<StateId>,
    final_states: StateSet,
}

impl<Q: Element, A: Element> NfaBuilder<Q, A> {
    pub fn new(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
    ) -> Result<Self, MalformedDescription> {
        let states = Interner::declare_states(states)?;
        let final_states = StateSet::with_capacity(states.len());
        Ok(Self {
            states,
            alphabet: Alphabet::input(alphabet)?,
            transitions: NondeterministicTable::new(),
            start_state: None,
            final_states,
        })
    }

    /// Add a transition from source to destination on the given label.
    pub fn transition(
        &mut self,
        source: Q,
        label: impl Into<Symbol<A>>,
        destination: Q,
    ) -> Result<&mut Self, MalformedDescription> {
        let label = label.into();
        let src = self.states.resolve(&source, MalformedDescription::UnknownState)?;
        let sym = self.alphabet.resolve_label(&label)?;
        let dst = self.states.resolve(&destination, MalformedDescription::UnknownState)?;

        if !self.transitions.insert(src, sym, dst) {
            return Err(MalformedDescription::DuplicateTransition(format!(
                "({source:?}, {label:?}) -> {destination:?}"
            )));
        }
        Ok(self)
    }

    /// Add an epsilon transition from source to destination.
    pub fn epsilon_transition(
        &mut self,
        source: Q,
        destination: Q,
    ) -> Result<&mut Self, MalformedDescription> {
        self.transition(source, Symbol::Epsilon, destination)
    }

    /// Add one transition per destination, all sharing a source and label.
    pub fn transitions_to(
        &mut self,
        source: Q,
        label: impl Into<Symbol<A>>,
        destinations: impl IntoIterator<Item = Q>,
    ) -> Result<&mut Self, MalformedDescription> {
        let label = label.into();
        for destination in destinations {
            self.transition(source.clone(), label.clone(), destination)?;
        }
        Ok(self)
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

    /// Validate the description and precompute per-state epsilon closures.
    pub fn build(self) -> Result<Nfa<Q, A>, MalformedDescription> {
        let start_state = self
            .start_state
            .ok_or(MalformedDescription::MissingInitialState)?;

        let num_states = self.states.len();
        let transitions = &self.transitions;
        let epsilon_closures = (0..num_states as StateId)
            .map(|state| {
                closure::resolve(
                    &StateSet::singleton(state, num_states),
                    |&s, out| {
                        if let Some(destinations) = transitions.destinations(s, Symbol::Epsilon) {
                            out.extend(destinations.iter());
                        }
                        Ok::<(), Infallible>(())
                    },
                    |_| Ok(()),
                )
                .unwrap_or_else(|never| match never {})
            })
            .collect();

        debug!(
            target: "automata::builder",
            kind = "nfa",
            states = num_states,
            symbols = self.alphabet.len(),
            "machine built"
        );
        Ok(Nfa {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start_state,
            final_states: self.final_states,
            epsilon_closures,
        })
    }
}
