//! One built machine serving runs from several threads.

mod common;

use automata::{Automaton, AutomatonError, Pda, Symbol};
use common::{all_strings, ends_with_01_dfa, ends_with_01_epsilon_nfa, init_test_logger};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_machines_are_shareable() {
    assert_send_sync::<automata::Dfa<String, char>>();
    assert_send_sync::<automata::Nfa<String, char>>();
    assert_send_sync::<automata::Dpda<String, char, char>>();
    assert_send_sync::<automata::Pda<String, char, char>>();
}

#[test]
fn test_concurrent_finite_runs_match_sequential() -> Result<(), AutomatonError> {
    init_test_logger();
    let dfa = ends_with_01_dfa()?;
    let nfa = ends_with_01_epsilon_nfa()?;
    let words = all_strings(&['0', '1'], 8);

    let sequential = words
        .iter()
        .map(|word| dfa.accepts(word))
        .collect::<Result<Vec<_>, _>>()?;

    let concurrent = thread::scope(|scope| {
        let handles: Vec<_> = words
            .chunks(64)
            .map(|chunk| {
                let (dfa, nfa) = (&dfa, &nfa);
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|word| -> Result<bool, AutomatonError> {
                            let verdict = dfa.accepts(word)?;
                            assert_eq!(nfa.accepts(word)?, verdict);
                            Ok(verdict)
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    assert_eq!(concurrent.concat(), sequential);
    Ok(())
}

#[test]
fn test_concurrent_pushdown_runs() -> Result<(), AutomatonError> {
    let mut builder = Pda::builder(["count", "done"], ['a', 'b'], ['A'])?;
    builder
        .transition("count", 'a', Symbol::Epsilon, "count", Some('A'))?
        .transition("count", 'b', 'A', "done", None)?
        .transition("done", 'b', 'A', "done", None)?
        .start_state("count")?
        .final_states(["count", "done"])?;
    let pda = builder.build()?;

    let results = thread::scope(|scope| {
        let handles: Vec<_> = (0..8usize)
            .map(|n| {
                let pda = &pda;
                scope.spawn(move || {
                    let mut word = vec!['a'; n];
                    word.extend(std::iter::repeat_n('b', n + 1));
                    (pda.accepts(&word[..word.len() - 1]), pda.accepts(&word))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect::<Vec<_>>()
    });

    for (balanced, one_extra) in results {
        assert_eq!(balanced, Ok(true));
        assert_eq!(one_extra, Ok(false));
    }
    Ok(())
}
