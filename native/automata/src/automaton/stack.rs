//! Pushdown stacks and configurations.

use crate::automaton::state::StateId;
use crate::automaton::symbol::{StackSymbolId, Symbol};
use indexmap::IndexSet;

/// A stack of symbols, mutated only at its top.
///
/// Stacks are plain values: branching a computation clones the stack, so no
/// two configurations ever alias the same storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stack<G> {
    items: Vec<G>,
}

impl<G> Stack<G> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a stack from symbols listed bottom first.
    pub fn from_bottom(items: impl IntoIterator<Item = G>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn push(&mut self, symbol: G) {
        self.items.push(symbol);
    }

    /// Apply a transition's push effect; `None` leaves the stack unchanged.
    pub fn push_optional(&mut self, symbol: Option<G>) {
        if let Some(symbol) = symbol {
            self.items.push(symbol);
        }
    }

    pub fn pop(&mut self) -> Option<G> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&G> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Symbols from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &G> + '_ {
        self.items.iter()
    }

    pub fn map<U>(&self, f: impl FnMut(&G) -> U) -> Stack<U> {
        Stack {
            items: self.items.iter().map(f).collect(),
        }
    }
}

impl<G: Copy> Stack<G> {
    /// The top symbol, or epsilon when the stack is empty.
    pub fn effective_top(&self) -> Symbol<G> {
        match self.peek() {
            Some(&top) => Symbol::Literal(top),
            None => Symbol::Epsilon,
        }
    }
}

impl<G> Default for Stack<G> {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantaneous description of a pushdown machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub state: StateId,
    pub stack: Stack<StackSymbolId>,
}

impl Configuration {
    pub fn new(state: StateId, stack: Stack<StackSymbolId>) -> Self {
        Self { state, stack }
    }
}

/// Configurations deduplicated by state and stack contents, in discovery order.
pub type ConfigurationSet = IndexSet<Configuration>;
