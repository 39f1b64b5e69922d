//! Transition tables, one type per machine kind.
//!
//! Deterministic tables refuse a second outcome for a key; nondeterministic
//! tables treat an absent key as the empty set of outcomes.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{StackSymbolId, Symbol, SymbolId};
use indexmap::IndexSet;
use std::collections::HashMap;

/// `(state, symbol) -> state`, at most one outcome per key.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTable {
    transitions: HashMap<(StateId, SymbolId), StateId>,
}

impl DeterministicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transition. An occupied key is left untouched and its
    /// current destination is returned as the error.
    pub fn insert(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) -> Result<(), StateId> {
        match self.transitions.get(&(source, symbol)) {
            Some(&existing) => Err(existing),
            None => {
                self.transitions.insert((source, symbol), destination);
                Ok(())
            }
        }
    }

    pub fn get(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// First `(state, symbol)` pair without an entry, scanning in id order.
    pub fn first_gap(
        &self,
        num_states: usize,
        symbols: impl Iterator<Item = SymbolId> + Clone,
    ) -> Option<(StateId, SymbolId)> {
        (0..num_states as StateId).find_map(|state| {
            symbols
                .clone()
                .find(|&symbol| !self.transitions.contains_key(&(state, symbol)))
                .map(|symbol| (state, symbol))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }
}

/// `(state, symbol or epsilon) -> set of states`.
#[derive(Debug, Clone, Default)]
pub struct NondeterministicTable {
    transitions: HashMap<(StateId, Symbol<SymbolId>), StateSet>,
}

impl NondeterministicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination, returning `false` if it was already present.
    pub fn insert(
        &mut self,
        source: StateId,
        label: Symbol<SymbolId>,
        destination: StateId,
    ) -> bool {
        self.transitions
            .entry((source, label))
            .or_default()
            .insert(destination)
    }

    pub fn destinations(&self, source: StateId, label: Symbol<SymbolId>) -> Option<&StateSet> {
        self.transitions.get(&(source, label))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, Symbol<SymbolId>, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }
}

/// Outcome of a pushdown transition: the next state and an optional push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PushdownMove {
    pub destination: StateId,
    pub push: Option<StackSymbolId>,
}

/// Key of a nondeterministic pushdown transition.
///
/// An epsilon `top` matches every configuration without popping; a literal
/// `top` matches only when it is the actual top, and pops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PushdownKey {
    pub state: StateId,
    pub input: Symbol<SymbolId>,
    pub top: Symbol<StackSymbolId>,
}

/// `(state, symbol or epsilon, top or epsilon) -> set of moves`.
#[derive(Debug, Clone, Default)]
pub struct PushdownTable {
    transitions: HashMap<PushdownKey, IndexSet<PushdownMove>>,
}

impl PushdownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a move, returning `false` if it was already present.
    pub fn insert(&mut self, key: PushdownKey, next: PushdownMove) -> bool {
        self.transitions.entry(key).or_default().insert(next)
    }

    /// Moves for a key in insertion order; empty when the key is absent.
    pub fn moves(&self, key: &PushdownKey) -> impl Iterator<Item = &PushdownMove> + '_ {
        self.transitions.get(key).into_iter().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PushdownKey, &PushdownMove)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(key, moves)| moves.iter().map(move |next| (key, next)))
    }
}

/// `(state, symbol, top) -> move`, partial, at most one move per key.
#[derive(Debug, Clone, Default)]
pub struct DeterministicPushdownTable {
    transitions: HashMap<(StateId, SymbolId, StackSymbolId), PushdownMove>,
}

impl DeterministicPushdownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transition. An occupied key is left untouched and its
    /// current move is returned as the error.
    pub fn insert(
        &mut self,
        state: StateId,
        symbol: SymbolId,
        top: StackSymbolId,
        next: PushdownMove,
    ) -> Result<(), PushdownMove> {
        match self.transitions.get(&(state, symbol, top)) {
            Some(&existing) => Err(existing),
            None => {
                self.transitions.insert((state, symbol, top), next);
                Ok(())
            }
        }
    }

    pub fn get(
        &self,
        state: StateId,
        symbol: SymbolId,
        top: StackSymbolId,
    ) -> Option<PushdownMove> {
        self.transitions.get(&(state, symbol, top)).copied()
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = ((StateId, SymbolId, StackSymbolId), PushdownMove)> + '_ {
        self.transitions.iter().map(|(&key, &next)| (key, next))
    }
}
