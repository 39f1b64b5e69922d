//! Nondeterministic pushdown automaton (PDA) implementation.
//!
//! The simulator tracks every reachable `(state, stack)` configuration at
//! once instead of backtracking. Each branch gets its own copy of the
//! stack, and the configuration set is deduplicated structurally.
//!
//! Stack-top matching: a transition whose top is a literal symbol fires
//! only when that symbol is on top, and pops it. A transition whose top is
//! epsilon fires in every configuration, empty stack or not, and pops
//! nothing.

use crate::automaton::acceptance::Verdict;
use crate::automaton::closure;
use crate::automaton::intern::{Element, Interner};
use crate::automaton::machine::Automaton;
use crate::automaton::stack::{Configuration, ConfigurationSet, Stack};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, StackSymbolId, Symbol, SymbolId};
use crate::automaton::table::{PushdownKey, PushdownMove, PushdownTable};
use crate::config::Limits;
use crate::error::{AutomatonError, MalformedDescription, Resource};
use tracing::{debug, trace, warn};

/// A nondeterministic pushdown automaton accepting by final state.
#[derive(Debug, Clone)]
pub struct Pda<Q, A, G> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    stack_alphabet: Alphabet<G>,
    transitions: PushdownTable,
    start_state: StateId,
    initial_stack: Stack<StackSymbolId>,
    final_states: StateSet,
    limits: Limits,
}

impl<Q: Element, A: Element, G: Element> Pda<Q, A, G> {
    /// Start describing a PDA over the given states, input and stack alphabets.
    pub fn builder(
        states: impl IntoIterator<Item = Q>,
        alphabet: impl IntoIterator<Item = A>,
        stack_alphabet: impl IntoIterator<Item = G>,
    ) -> Result<PdaBuilder<Q, A, G>, MalformedDescription> {
        PdaBuilder::new(states, alphabet, stack_alphabet)
    }

    /// The configuration every run starts from, with a fresh stack copy.
    pub fn initial_configuration(&self) -> Configuration {
        Configuration::new(self.start_state, self.initial_stack.clone())
    }

    /// Append every configuration one `input` move away from `config`.
    fn successors(
        &self,
        config: &Configuration,
        input: Symbol<SymbolId>,
        limits: &Limits,
        out: &mut Vec<Configuration>,
    ) -> Result<(), AutomatonError> {
        if let top @ Symbol::Literal(_) = config.stack.effective_top() {
            let key = PushdownKey {
                state: config.state,
                input,
                top,
            };
            for next in self.transitions.moves(&key) {
                let mut stack = config.stack.clone();
                stack.pop();
                out.push(apply(next, stack, limits)?);
            }
        }

        let key = PushdownKey {
            state: config.state,
            input,
            top: Symbol::Epsilon,
        };
        for next in self.transitions.moves(&key) {
            out.push(apply(next, config.stack.clone(), limits)?);
        }
        Ok(())
    }

    /// Close a configuration set under epsilon moves, using the machine's limits.
    pub fn epsilon_closure(
        &self,
        configurations: &ConfigurationSet,
    ) -> Result<ConfigurationSet, AutomatonError> {
        self.close(configurations, &self.limits)
    }

    fn close(
        &self,
        configurations: &ConfigurationSet,
        limits: &Limits,
    ) -> Result<ConfigurationSet, AutomatonError> {
        check_size(configurations, limits)?;
        closure::resolve(
            configurations,
            |config, out| self.successors(config, Symbol::Epsilon, limits, out),
            |closure| check_size(closure, limits),
        )
    }

    /// Consume one input symbol from every configuration, then close the
    /// result under epsilon moves.
    pub fn step(
        &self,
        configurations: &ConfigurationSet,
        symbol: SymbolId,
    ) -> Result<ConfigurationSet, AutomatonError> {
        self.step_with(configurations, symbol, &self.limits)
    }

    fn step_with(
        &self,
        configurations: &ConfigurationSet,
        symbol: SymbolId,
        limits: &Limits,
    ) -> Result<ConfigurationSet, AutomatonError> {
        let mut moved = Vec::new();
        for config in configurations {
            self.successors(config, Symbol::Literal(symbol), limits, &mut moved)?;
        }
        let moved: ConfigurationSet = moved.into_iter().collect();
        self.close(&moved, limits)
    }

    /// Run with the limits the machine was built with.
    pub fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        self.run_with_limits(input, self.limits)
    }

    /// Run with caller-supplied limits instead of the machine's own.
    pub fn run_with_limits(&self, input: &[A], limits: Limits) -> Result<Verdict<Q>, AutomatonError> {
        let symbols = self.alphabet.encode(input)?;
        check_depth(&self.initial_stack, &limits)?;
        let start = ConfigurationSet::from([self.initial_configuration()]);
        let mut current = self.close(&start, &limits)?;

        for (position, &symbol) in symbols.iter().enumerate() {
            current = self.step_with(&current, symbol, &limits)?;
            trace!(
                target: "automata::pda",
                position,
                symbol,
                configurations = current.len(),
                "step"
            );
            if current.is_empty() {
                debug!(target: "automata::pda", position, "no configurations left");
                break;
            }
        }

        let reached: StateSet = current.iter().map(|config| config.state).collect();
        let verdict = Verdict::from_states(&reached, &self.final_states, &self.states);
        debug!(
            target: "automata::pda",
            symbols = input.len(),
            configurations = current.len(),
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

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn state_id(&self, state: &Q) -> Option<StateId> {
        self.states.id(state)
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

    /// All transitions as `(source, input, top, destination, push)`.
    #[allow(clippy::type_complexity)]
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (&Q, Symbol<&A>, Symbol<&G>, &Q, Option<&G>)> + '_ {
        self.transitions.iter().map(|(key, next)| {
            (
                &self.states[key.state],
                key.input.map(|sym| &self.alphabet[sym]),
                key.top.map(|sym| &self.stack_alphabet[sym]),
                &self.states[next.destination],
                next.push.map(|sym| &self.stack_alphabet[sym]),
            )
        })
    }
}

/// Build the configuration a move leads to, taking ownership of the
/// already-copied stack.
fn apply(
    next: &PushdownMove,
    mut stack: Stack<StackSymbolId>,
    limits: &Limits,
) -> Result<Configuration, AutomatonError> {
    stack.push_optional(next.push);
    check_depth(&stack, limits)?;
    Ok(Configuration::new(next.destination, stack))
}

fn check_depth(stack: &Stack<StackSymbolId>, limits: &Limits) -> Result<(), AutomatonError> {
    if stack.len() > limits.max_stack_depth {
        warn!(
            target: "automata::pda",
            limit = limits.max_stack_depth,
            "stack depth limit exceeded"
        );
        return Err(AutomatonError::ResourceExhausted {
            resource: Resource::StackDepth,
            limit: limits.max_stack_depth,
        });
    }
    Ok(())
}

fn check_size(configurations: &ConfigurationSet, limits: &Limits) -> Result<(), AutomatonError> {
    if configurations.len() > limits.max_configurations {
        warn!(
            target: "automata::pda",
            limit = limits.max_configurations,
            "configuration limit exceeded"
        );
        return Err(AutomatonError::ResourceExhausted {
            resource: Resource::Configurations,
            limit: limits.max_configurations,
        });
    }
    Ok(())
}

impl<Q: Element, A: Element, G: Element> Automaton for Pda<Q, A, G> {
    type State = Q;
    type Symbol = A;

    fn run(&self, input: &[A]) -> Result<Verdict<Q>, AutomatonError> {
        Pda::run(self, input)
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

/// Validating builder for [`Pda`].
#[derive(Debug, Clone)]
pub struct PdaBuilder<Q, A, G> {
    states: Interner<Q>,
    alphabet: Alphabet<A>,
    stack_alphabet: Alphabet<G>,
    transitions: PushdownTable,
    start_state: Option<StateId>,
    initial_stack: Stack<StackSymbolId>,
    final_states: StateSet,
    limits: Limits,
}

impl<Q: Element, A: Element, G: Element> PdaBuilder<Q, A, G> {
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
            transitions: PushdownTable::new(),
            start_state: None,
            initial_stack: Stack::new(),
            final_states,
            limits: Limits::default(),
        })
    }

    /// Add a transition: in `source`, reading `input` (or nothing) with
    /// `top` on the stack (or regardless of it), go to `destination` and
    /// push `push` if given.
    pub fn transition(
        &mut self,
        source: Q,
        input: impl Into<Symbol<A>>,
        top: impl Into<Symbol<G>>,
        destination: Q,
        push: Option<G>,
    ) -> Result<&mut Self, MalformedDescription> {
        let (input, top) = (input.into(), top.into());
        let key = PushdownKey {
            state: self.states.resolve(&source, MalformedDescription::UnknownState)?,
            input: self.alphabet.resolve_label(&input)?,
            top: self.stack_alphabet.resolve_label(&top)?,
        };
        let next = PushdownMove {
            destination: self
                .states
                .resolve(&destination, MalformedDescription::UnknownState)?,
            push: push
                .as_ref()
                .map(|symbol| self.stack_alphabet.resolve(symbol))
                .transpose()?,
        };

        if !self.transitions.insert(key, next) {
            return Err(MalformedDescription::DuplicateTransition(format!(
                "({source:?}, {input:?}, {top:?}) -> ({destination:?}, {push:?})"
            )));
        }
        Ok(self)
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

    /// Limits used by [`Pda::run`].
    pub fn limits(&mut self, limits: Limits) -> &mut Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<Pda<Q, A, G>, MalformedDescription> {
        let start_state = self
            .start_state
            .ok_or(MalformedDescription::MissingInitialState)?;

        debug!(
            target: "automata::builder",
            kind = "pda",
            states = self.states.len(),
            symbols = self.alphabet.len(),
            stack_symbols = self.stack_alphabet.len(),
            initial_stack = self.initial_stack.len(),
            "machine built"
        );
        Ok(Pda {
            states: self.states,
            alphabet: self.alphabet,
            stack_alphabet: self.stack_alphabet,
            transitions: self.transitions,
            start_state,
            initial_stack: self.initial_stack,
            final_states: self.final_states,
            limits: self.limits,
        })
    }
}
