//! Simulation engine for finite and pushdown automata.
//!
//! Describe a machine with one of the builders, then run it on input
//! sequences:
//!
//! ```
//! use automata::{Automaton, Dfa};
//!
//! let mut builder = Dfa::builder(["even", "odd"], ['0', '1'])?;
//! builder
//!     .transition("even", '0', "odd")?
//!     .transition("even", '1', "even")?
//!     .transition("odd", '0', "even")?
//!     .transition("odd", '1', "odd")?
//!     .start_state("even")?
//!     .final_state("even")?;
//! let dfa = builder.build()?;
//!
//! assert!(dfa.accepts(&['1', '0', '0'])?);
//! assert!(!dfa.accepts(&['0'])?);
//! # Ok::<(), automata::AutomatonError>(())
//! ```

pub mod automaton;
pub mod config;
pub mod error;

pub use automaton::{
    Automaton, Dfa, DfaBuilder, Dpda, DpdaBuilder, Nfa, NfaBuilder, Pda, PdaBuilder, Symbol,
    Verdict,
};
pub use config::Limits;
pub use error::{AutomatonError, Halt, MalformedDescription, Resource};
