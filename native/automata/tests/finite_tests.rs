//! End-to-end runs of finite automata.

mod common;

use automata::{Automaton, AutomatonError, Dfa, Nfa, Symbol};
use common::{
    all_strings, chars, ends_with_01_dfa, ends_with_01_epsilon_nfa, ends_with_01_nfa,
    init_test_logger,
};

#[test]
fn test_dfa_ends_with_01() -> Result<(), AutomatonError> {
    init_test_logger();
    let dfa = ends_with_01_dfa()?;

    assert!(dfa.accepts(&chars("10100101"))?);
    assert!(!dfa.accepts(&chars("1000011"))?);
    assert!(!dfa.accepts(&[])?);

    let verdict = dfa.run(&chars("001"))?;
    assert_eq!(verdict.final_state(), Some(&"saw01"));
    Ok(())
}

#[test]
fn test_nfa_ends_with_01() -> Result<(), AutomatonError> {
    init_test_logger();
    let nfa = ends_with_01_nfa()?;

    assert!(nfa.accepts(&chars("10100101"))?);
    assert!(!nfa.accepts(&chars("1000011"))?);

    let verdict = nfa.run(&chars("0101"))?;
    assert_eq!(verdict.reached(), &[0, 2]);
    assert_eq!(verdict.accepting_states(), &[2]);
    Ok(())
}

#[test]
fn test_equivalent_machines_agree() -> Result<(), AutomatonError> {
    init_test_logger();
    let dfa = ends_with_01_dfa()?;
    let nfa = ends_with_01_nfa()?;
    let epsilon_nfa = ends_with_01_epsilon_nfa()?;

    for word in all_strings(&['0', '1'], 7) {
        let expected = dfa.accepts(&word)?;
        assert_eq!(nfa.accepts(&word)?, expected, "nfa disagrees on {word:?}");
        assert_eq!(
            epsilon_nfa.accepts(&word)?,
            expected,
            "epsilon nfa disagrees on {word:?}"
        );
    }
    Ok(())
}

#[test]
fn test_runs_are_pure() -> Result<(), AutomatonError> {
    let dfa = ends_with_01_dfa()?;
    let nfa = ends_with_01_epsilon_nfa()?;
    let input = chars("110101");

    let first = (dfa.run(&input)?, nfa.run(&input)?);
    for _ in 0..5 {
        assert_eq!(dfa.run(&input)?, first.0);
        assert_eq!(nfa.run(&input)?, first.1);
    }
    Ok(())
}

#[test]
fn test_empty_input_decided_by_start() -> Result<(), AutomatonError> {
    let mut builder = Nfa::builder(['a', 'b'], ['x'])?;
    builder
        .epsilon_transition('a', 'b')?
        .start_state('a')?
        .final_state('b')?;
    let nfa = builder.build()?;

    // Acceptance through the start closure alone.
    assert!(nfa.accepts(&[])?);
    assert!(!nfa.accepts(&['x'])?);
    Ok(())
}

#[test]
fn test_out_of_alphabet_input() -> Result<(), AutomatonError> {
    let dfa = ends_with_01_dfa()?;
    let nfa = ends_with_01_nfa()?;
    let expected = Err(AutomatonError::OutOfAlphabetSymbol {
        position: 2,
        symbol: "'2'".to_string(),
    });

    assert_eq!(dfa.accepts(&chars("012")), expected);
    assert_eq!(nfa.accepts(&chars("012")), expected);
    Ok(())
}

#[test]
fn test_partial_dfa_reports_missing_transition() -> Result<(), AutomatonError> {
    let mut builder = Dfa::builder([1, 2], ['a', 'b'])?;
    builder
        .transition(1, 'a', 2)?
        .start_state(1)?
        .final_state(2)?;
    let dfa = builder.build()?;

    assert!(dfa.accepts(&['a'])?);
    assert_eq!(
        dfa.accepts(&['a', 'a']),
        Err(AutomatonError::UndefinedTransition {
            state: "2".to_string(),
            symbol: "'a'".to_string(),
        })
    );
    Ok(())
}

#[test]
fn test_epsilon_label_listed_in_transitions() -> Result<(), AutomatonError> {
    let nfa = ends_with_01_epsilon_nfa()?;
    let epsilon_moves: Vec<_> = nfa
        .transitions()
        .filter(|(_, label, _)| label.is_epsilon())
        .map(|(src, _, dst)| (*src, *dst))
        .collect();

    assert_eq!(epsilon_moves.len(), 2);
    assert!(epsilon_moves.contains(&("start", "loop")));
    assert!(epsilon_moves.contains(&("loop", "tail")));
    assert!(nfa.is_accepting(&"done"));
    assert!(!nfa.is_accepting(&"loop"));
    assert_eq!(Symbol::Literal('0').literal(), Some(&'0'));
    Ok(())
}
