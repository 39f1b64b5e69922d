//! Finite and pushdown automata simulation.
//!
//! This module provides four machine kinds over caller-chosen state and
//! symbol types:
//! - `Dfa`: deterministic finite automaton with a partial or total table
//! - `Nfa`: nondeterministic finite automaton with epsilon moves
//! - `Dpda`: deterministic pushdown automaton, no epsilon moves
//! - `Pda`: nondeterministic pushdown automaton over configuration sets
//!
//! Machines are built through validating builders and are immutable
//! afterwards. Runs keep all working state local, so one machine can serve
//! concurrent runs.

mod acceptance;
pub mod closure;
mod dfa;
mod dpda;
mod intern;
mod machine;
mod nfa;
mod pda;
mod stack;
mod state;
mod symbol;
mod table;

pub use acceptance::{Verdict, decide};
pub use closure::ClosureSet;
pub use dfa::{Dfa, DfaBuilder};
pub use dpda::{Dpda, DpdaBuilder};
pub use intern::{Element, Interner};
pub use machine::Automaton;
pub use nfa::{Nfa, NfaBuilder};
pub use pda::{Pda, PdaBuilder};
pub use stack::{Configuration, ConfigurationSet, Stack};
pub use state::{StateId, StateSet};
pub use symbol::{Alphabet, StackSymbolId, Symbol, SymbolId};
