//! Shared helpers for the integration tests.

#![allow(dead_code)]

use automata::{Dfa, MalformedDescription, Nfa, Symbol};
use tracing_subscriber::EnvFilter;

/// Route library logs to the test output. `RUST_LOG` overrides the
/// default `automata=debug` filter.
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("automata=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn chars(input: &str) -> Vec<char> {
    input.chars().collect()
}

/// Every string over `alphabet` of length at most `max_len`, shortest first.
pub fn all_strings(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
    let mut all = vec![Vec::new()];
    let mut layer = vec![Vec::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|prefix: &Vec<char>| {
                alphabet.iter().map(move |&symbol| {
                    let mut word = prefix.clone();
                    word.push(symbol);
                    word
                })
            })
            .collect();
        all.extend(layer.iter().cloned());
    }
    all
}

/// Binary strings ending in `01`.
pub fn ends_with_01_dfa() -> Result<Dfa<&'static str, char>, MalformedDescription> {
    let mut builder = Dfa::builder(["s", "saw0", "saw01"], ['0', '1'])?;
    builder
        .transition("s", '0', "saw0")?
        .transition("s", '1', "s")?
        .transition("saw0", '0', "saw0")?
        .transition("saw0", '1', "saw01")?
        .transition("saw01", '0', "saw0")?
        .transition("saw01", '1', "s")?
        .start_state("s")?
        .final_state("saw01")?
        .require_total();
    builder.build()
}

/// The same language, guessing where the final `01` starts.
pub fn ends_with_01_nfa() -> Result<Nfa<u8, char>, MalformedDescription> {
    let mut builder = Nfa::builder([0u8, 1, 2], ['0', '1'])?;
    builder
        .transitions_to(0, '0', [0, 1])?
        .transition(0, '1', 0)?
        .transition(1, '1', 2)?
        .start_state(0)?
        .final_state(2)?;
    builder.build()
}

/// Binary strings ending in `01`, built from epsilon moves between an
/// "anything" loop and a literal `01` tail.
pub fn ends_with_01_epsilon_nfa() -> Result<Nfa<&'static str, char>, MalformedDescription> {
    let mut builder = Nfa::builder(["start", "loop", "tail", "zero", "done"], ['0', '1'])?;
    builder
        .epsilon_transition("start", "loop")?
        .transition("loop", '0', "loop")?
        .transition("loop", '1', "loop")?
        .transition("loop", Symbol::Epsilon, "tail")?
        .transition("tail", '0', "zero")?
        .transition("zero", '1', "done")?
        .start_state("start")?
        .final_state("done")?;
    builder.build()
}
