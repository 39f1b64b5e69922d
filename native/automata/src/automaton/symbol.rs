//! Symbol types for automata transitions.

use crate::automaton::intern::Interner;
use crate::error::{AutomatonError, MalformedDescription, render};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;

/// Dense index of an input symbol within its alphabet.
pub type SymbolId = u32;

/// Dense index of a stack symbol within its stack alphabet.
pub type StackSymbolId = u32;

/// A transition label: either a literal symbol or the silent epsilon move.
///
/// Epsilon is a separate variant, so no caller value can ever be mistaken
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol<T> {
    Epsilon,
    Literal(T),
}

impl<T> Symbol<T> {
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn literal(&self) -> Option<&T> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Literal(value) => Some(value),
        }
    }

    pub fn as_ref(&self) -> Symbol<&T> {
        match self {
            Symbol::Epsilon => Symbol::Epsilon,
            Symbol::Literal(value) => Symbol::Literal(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Symbol<U> {
        match self {
            Symbol::Epsilon => Symbol::Epsilon,
            Symbol::Literal(value) => Symbol::Literal(f(value)),
        }
    }
}

impl<T> From<T> for Symbol<T> {
    fn from(value: T) -> Self {
        Symbol::Literal(value)
    }
}

/// Which alphabet a set of symbols belongs to; selects the error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphabetKind {
    Input,
    Stack,
}

/// A declared, duplicate-free set of literal symbols.
///
/// Epsilon is never a member; nondeterministic machines accept it as a
/// transition label on top of the alphabet.
#[derive(Debug, Clone)]
pub struct Alphabet<A> {
    symbols: Interner<A>,
    kind: AlphabetKind,
}

impl<A: Eq + Hash + Debug> Alphabet<A> {
    /// Declare an input alphabet.
    pub fn input(symbols: impl IntoIterator<Item = A>) -> Result<Self, MalformedDescription> {
        Ok(Self {
            symbols: Interner::declare_all(symbols, MalformedDescription::DuplicateSymbol)?,
            kind: AlphabetKind::Input,
        })
    }

    /// Declare a stack alphabet.
    pub fn stack(symbols: impl IntoIterator<Item = A>) -> Result<Self, MalformedDescription> {
        Ok(Self {
            symbols: Interner::declare_all(symbols, MalformedDescription::DuplicateStackSymbol)?,
            kind: AlphabetKind::Stack,
        })
    }

    pub fn contains(&self, symbol: &A) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn id(&self, symbol: &A) -> Option<SymbolId> {
        self.symbols.id(symbol)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&A> {
        self.symbols.get(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> + '_ {
        self.symbols.iter().map(|(_, symbol)| symbol)
    }

    pub(crate) fn ids(&self) -> std::ops::Range<SymbolId> {
        0..self.symbols.len() as SymbolId
    }

    pub(crate) fn resolve(&self, symbol: &A) -> Result<SymbolId, MalformedDescription> {
        let unknown = match self.kind {
            AlphabetKind::Input => MalformedDescription::UnknownSymbol,
            AlphabetKind::Stack => MalformedDescription::UnknownStackSymbol,
        };
        self.symbols.resolve(symbol, unknown)
    }

    pub(crate) fn resolve_label(
        &self,
        label: &Symbol<A>,
    ) -> Result<Symbol<SymbolId>, MalformedDescription> {
        match label {
            Symbol::Epsilon => Ok(Symbol::Epsilon),
            Symbol::Literal(symbol) => self.resolve(symbol).map(Symbol::Literal),
        }
    }

    /// Translate run input into symbol ids before any stepping happens.
    pub(crate) fn encode(&self, input: &[A]) -> Result<Vec<SymbolId>, AutomatonError> {
        input
            .iter()
            .enumerate()
            .map(|(position, symbol)| {
                self.id(symbol)
                    .ok_or_else(|| AutomatonError::OutOfAlphabetSymbol {
                        position,
                        symbol: render(symbol),
                    })
            })
            .collect()
    }
}

impl<A> Index<SymbolId> for Alphabet<A> {
    type Output = A;

    /// Panics if `id` does not belong to this alphabet.
    fn index(&self, id: SymbolId) -> &A {
        &self.symbols[id]
    }
}
