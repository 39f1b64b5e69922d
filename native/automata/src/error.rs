//! Error types for machine construction and simulation.

use std::fmt;
use thiserror::Error;

/// Reasons a machine description is rejected at construction time.
///
/// Caller-supplied states and symbols are carried in their `Debug` form so
/// the error stays independent of the machine's type parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedDescription {
    #[error("state set is empty")]
    EmptyStateSet,
    #[error("state {0} declared more than once")]
    DuplicateState(String),
    #[error("input symbol {0} declared more than once")]
    DuplicateSymbol(String),
    #[error("stack symbol {0} declared more than once")]
    DuplicateStackSymbol(String),
    #[error("state {0} is not declared")]
    UnknownState(String),
    #[error("input symbol {0} is not in the alphabet")]
    UnknownSymbol(String),
    #[error("stack symbol {0} is not in the stack alphabet")]
    UnknownStackSymbol(String),
    #[error("no initial state was set")]
    MissingInitialState,
    #[error("transition {key} already leads to {existing}, cannot also lead to {attempted}")]
    ConflictingTransition {
        key: String,
        existing: String,
        attempted: String,
    },
    #[error("transition {0} declared more than once")]
    DuplicateTransition(String),
    #[error("transition table has no entry for {0}")]
    IncompleteTable(String),
}

/// Which bounded resource a pushdown simulation ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Configurations,
    StackDepth,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Configurations => f.write_str("configuration set size"),
            Resource::StackDepth => f.write_str("stack depth"),
        }
    }
}

/// Hard failures surfaced to the caller of a run or a builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("malformed machine description: {0}")]
    Malformed(#[from] MalformedDescription),
    #[error("input symbol {symbol} at position {position} is not in the alphabet")]
    OutOfAlphabetSymbol { position: usize, symbol: String },
    #[error("no transition from state {state} on symbol {symbol}")]
    UndefinedTransition { state: String, symbol: String },
    #[error("{resource} limit of {limit} exceeded")]
    ResourceExhausted { resource: Resource, limit: usize },
}

/// Why a deterministic pushdown run stopped before consuming its input.
///
/// A halt is a rejection, not an error: it is recorded in the verdict.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    #[error("stack exhausted before input position {position}")]
    StackExhausted { position: usize },
    #[error("no transition for input position {position}")]
    UndefinedTransition { position: usize },
}

impl Halt {
    /// Index of the input symbol that could not be consumed.
    pub fn position(&self) -> usize {
        match *self {
            Halt::StackExhausted { position } | Halt::UndefinedTransition { position } => position,
        }
    }
}

pub(crate) fn render<T: fmt::Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}
