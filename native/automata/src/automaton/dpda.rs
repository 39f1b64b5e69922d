//! Deterministic pushdown automaton (DPDA) implementation.
//!
//! Every step pops the top of the stack, looks up `(state, symbol, top)`
//! and pushes at most one symbol. There are no epsilon moves. A run that
//! cannot pop or finds no transition halts and is rejected.

use crate::automaton::acceptance::Verdict;
use crate::automaton::intern::{Element, Interner};
use crate::automaton::machine::Automaton;
use crate::automaton::stack::{Configuration, Stack};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, StackSymbolId, SymbolId};
use crate::automaton::table::{DeterministicPushdownTable, PushdownMove};
use crate::error::{AutomatonError, Halt, MalformedDescription, render};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Dpda<Q, A, G> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    stack_alphabet: Alphabet<G>,
    transitions: DeterministicPushdownTable,
    start_state: StateId,
    initial_stack: Stack<StackSymbolId>,
    final_states: StateSet,
}

impl<Q: Element, A: Element, G: Element> Dpda<Q, A, G> {
    pub fn builder(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
        stack_alphabet: impl IntoIterator<Item = G>,
    ) -> Result<DpdaBuilder<Q, A, G>, MalformedDescription> {
        DpdaBuilder::new(states, alphabet, stack_alphabet)
    }

    /// The configuration every run starts from. Each call returns a fresh
    /// copy of the initial stack.
    pub fn initial_configuration(&self) -> Configuration {
        Configuration::new(self.start_state, self.initial_stack.clone())
    }

    /// Consume the symbol at `position` of the input.
    pub fn step(
        &self,
        mut config: Configuration,
        symbol: SymbolId,
        position: usize,
    ) -> Result<Configuration, Halt> {
        let top = config
            .stack
            .pop()
            .ok_or(Halt::StackExhausted { position })?;
        let next = self
            .transitions
            .get(config.state, symbol, top)
            .ok_or(Halt::UndefinedTransition { position })?;

        config.state = next.destination;
        config.stack.push_optional(next.push);
        Ok(config)
    }

    pub fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        let symbols = self.alphabet.encode(input)?;
        let mut config = self.initial_configuration();

        for (position, &symbol) in symbols.iter().enumerate() {
            let state = config.state;
            config = match self.step(config, symbol, position) {
                Ok(next) => next,
                Err(halt) => {
                    debug!(target: "automata::dpda", %halt, "run halted");
                    return Ok(Verdict::halted(state, halt, &self.states));
                }
            };
            trace!(
                target: "automata::dpda",
                position,
                state = config.state,
                depth = config.stack.len(),
                "step"
            );
        }

        let reached = StateSet::singleton(config.state, self.states.len());
        let verdict = Verdict::from_states(&reached, &self.final_states, &self.states);
        debug!(
            target: "automata::dpda",
            symbols = input.len(),
            accepted = verdict.is_accepted(),
            "run finished"
        );
        Ok(verdict)
    }

    /// Translate a configuration back into caller values, stack bottom first.
    pub fn describe(&self, config: &Configuration) -> (&Q, Stack<&G>) {
        (
            &self.states[config.state],
            config.stack.map(|&symbol| &self.stack_alphabet[symbol]),
        )
    }

    pub fn start_state(&self) -> &Q {
        &self.states[self.start_state]
    }

    pub fn stack_alphabet(&self) -> &Alphabet<G> {
        &self.stack_alphabet
    }

    pub fn final_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.final_states.iter().map(|state| &self.states[state])
    }

    /// All transitions as `(source, symbol, top, destination, push)`.
    #[allow(clippy::type_complexity)]
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, &A, &G, &Q, Option<&G>)> + '_ {
        self.transitions.iter().map(|((state, symbol, top), next)| {
            (
                &self.states[state],
                &self.alphabet[symbol],
                &self.stack_alphabet[top],
                &self.states[next.destination],
                next.push.map(|push| &self.stack_alphabet[push]),
            )
        })
    }
}

impl<Q: Element, A: Element, G: Element> Automaton for Dpda<Q, A, G> {
    type State = Q;
    type Symbol = A;

    fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        Dpda::run(self, input)
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

#[derive(Debug, Clone)]
pub struct DpdaBuilder<Q, A, G> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    stack_alphabet: Alphabet<G>,
    transitions: DeterministicPushdownTable,
    start_state: Option<StateId>,
    initial_stack: Stack<StackSymbolId>,
    final_states: StateSet,
}

impl<Q: Element, A: Element, G: Element> DpdaBuilder<Q, A, G> {
    pub fn new(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
        stack_alphabet: impl IntoIterator<Item = G>,
    ) -> Result<Self, MalformedDescription> {
        let states = Interner::declare_states(states)?;
        let final_states = StateSet::with_capacity(states.len());
        Ok(Self {
            states,
            alphabet: Alphabet::input(alphabet)?,
            stack_alphabet: Alphabet::stack(stack_alphabet)?,
            transitions: DeterministicPushdownTable::new(),
            start_state: None,
            initial_stack: Stack::new(),
            final_states,
        })
    }

    /// Add `(source, symbol, top) -> (destination, push)`. A second move
    /// for the same key is rejected.
    pub fn transition(
        &mut self,
        source: Q,
        symbol: A,
        top: G,
        destination: Q,
        push: Option<G>,
    ) -> Result<&mut Self, MalformedDescription> {
        let src = self.states.resolve(&source, MalformedDescription::UnknownState)?;
        let sym = self.alphabet.resolve(&symbol)?;
        let top_id = self.stack_alphabet.resolve(&top)?;
        let next = PushdownMove {
            destination: self
                .states
                .resolve(&destination, MalformedDescription::UnknownState)?,
            push: push
                .as_ref()
                .map(|g| self.stack_alphabet.resolve(g))
                .transpose()?,
        };

        match self.transitions.insert(src, sym, top_id, next) {
            Ok(()) => Ok(self),
            Err(existing) if existing == next => Err(MalformedDescription::DuplicateTransition(
                format!("({source:?}, {symbol:?}, {top:?}) -> ({destination:?}, {push:?})"),
            )),
            Err(existing) => Err(MalformedDescription::ConflictingTransition {
                key: format!("({source:?}, {symbol:?}, {top:?})"),
                existing: format!(
                    "({}, {})",
                    render(&self.states[existing.destination]),
                    render(&existing.push.map(|push| &self.stack_alphabet[push]))
                ),
                attempted: format!("({destination:?}, {push:?})"),
            }),
        }
    }

    pub fn start_state(&mut self, state: Q) -> Result<&mut Self, MalformedDescription> {
        self.start_state = Some(self.states.resolve(&state, MalformedDescription::UnknownState)?);
        Ok(self)
    }

    /// Set the stack every run starts with, bottom symbol first.
    pub fn initial_stack(
        &mut self,
        symbols: impl IntoIterator<Item = G>,
    ) -> Result<&mut Self, MalformedDescription> {
        let ids = symbols
            .into_iter()
            .map(|symbol| self.stack_alphabet.resolve(&symbol))
            .collect::<Result<Vec<_>, _>>()?;
        self.initial_stack = Stack::from_bottom(ids);
        Ok(self)
    }

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

    pub fn build(self) -> Result<Dpda<Q, A, G>, MalformedDescription> {
        let start_state = self
            .start_state
            .ok_or(MalformedDescription::MissingInitialState)?;

        debug!(
            target: "automata::builder",
            kind = "dpda",
            states = self.states.len(),
            symbols = self.alphabet.len(),
            stack_symbols = self.stack_alphabet.len(),
            initial_stack = self.initial_stack.len(),
            "machine built"
        );
        Ok(Dpda {
            states: self.states,
            alphabet: self.alphabet,
            stack_alphabet: self.stack_alphabet,
            transitions: self.transitions,
            start_state,
            initial_stack: self.initial_stack,
            final_states: self.final_states,
        })
    }
}
