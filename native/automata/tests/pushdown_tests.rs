//! End-to-end runs of pushdown automata.

mod common;

use automata::{
    Automaton, AutomatonError, Dpda, Halt, Limits, MalformedDescription, Pda, Resource, Symbol,
};
use common::{all_strings, chars, init_test_logger};

/// `a^n b^n`, using `$` to mark the stack bottom.
fn an_bn() -> Result<Pda<&'static str, char, char>, MalformedDescription> {
    let mut builder = Pda::builder(["q0", "q1", "q2", "q3"], ['a', 'b'], ['A', '$'])?;
    builder
        .transition("q0", Symbol::Epsilon, Symbol::Epsilon, "q1", Some('$'))?
        .transition("q1", 'a', Symbol::Epsilon, "q1", Some('A'))?
        .transition("q1", 'b', 'A', "q2", None)?
        .transition("q2", 'b', 'A', "q2", None)?
        .transition("q1", Symbol::Epsilon, '$', "q3", None)?
        .transition("q2", Symbol::Epsilon, '$', "q3", None)?
        .start_state("q0")?
        .final_state("q3")?;
    builder.build()
}

/// Even-length palindromes over `{a, b}`, guessing the midpoint.
fn even_palindromes() -> Result<Pda<u8, char, char>, MalformedDescription> {
    let mut builder = Pda::builder([0u8, 1, 2, 3], ['a', 'b'], ['a', 'b', '$'])?;
    builder
        .transition(0, Symbol::Epsilon, Symbol::Epsilon, 1, Some('$'))?
        .transition(1, 'a', Symbol::Epsilon, 1, Some('a'))?
        .transition(1, 'b', Symbol::Epsilon, 1, Some('b'))?
        .transition(1, Symbol::Epsilon, Symbol::Epsilon, 2, None)?
        .transition(2, 'a', 'a', 2, None)?
        .transition(2, 'b', 'b', 2, None)?
        .transition(2, Symbol::Epsilon, '$', 3, None)?
        .start_state(0)?
        .final_state(3)?;
    builder.build()
}

fn is_an_bn(word: &[char]) -> bool {
    let half = word.len() / 2;
    word.len() % 2 == 0
        && word[..half].iter().all(|&c| c == 'a')
        && word[half..].iter().all(|&c| c == 'b')
}

#[test]
fn test_an_bn() -> Result<(), AutomatonError> {
    init_test_logger();
    let pda = an_bn()?;

    assert!(pda.accepts(&[])?);
    assert!(pda.accepts(&chars("aaabbb"))?);
    assert!(!pda.accepts(&chars("aabbb"))?);
    assert!(!pda.accepts(&chars("abab"))?);

    for word in all_strings(&['a', 'b'], 8) {
        assert_eq!(pda.accepts(&word)?, is_an_bn(&word), "disagrees on {word:?}");
    }
    Ok(())
}

#[test]
fn test_even_palindromes() -> Result<(), AutomatonError> {
    init_test_logger();
    let pda = even_palindromes()?;

    assert!(pda.accepts(&[])?);
    assert!(pda.accepts(&chars("abba"))?);
    assert!(pda.accepts(&chars("baaaab"))?);
    assert!(!pda.accepts(&chars("abab"))?);
    assert!(!pda.accepts(&chars("aba"))?);

    let verdict = pda.run(&chars("aa"))?;
    assert!(verdict.reached().contains(&3));
    assert_eq!(verdict.accepting_states(), &[3]);
    Ok(())
}

#[test]
fn test_pda_runs_do_not_share_stacks() -> Result<(), AutomatonError> {
    let pda = an_bn()?;
    assert!(!pda.accepts(&chars("aaa"))?);
    // Leftover `A`s from the previous run must not leak into this one.
    assert!(pda.accepts(&chars("ab"))?);
    assert_eq!(pda.initial_configuration().stack.len(), 0);
    Ok(())
}

#[test]
fn test_unbounded_epsilon_pushes_are_cut_off() -> Result<(), AutomatonError> {
    init_test_logger();
    let mut builder = Pda::builder(["grow"], ['a'], ['X'])?;
    builder
        .transition("grow", Symbol::Epsilon, Symbol::Epsilon, "grow", Some('X'))?
        .start_state("grow")?;
    let pda = builder.build()?;

    let limits = Limits::default().with_max_stack_depth(64);
    assert_eq!(
        pda.run_with_limits(&['a'], limits),
        Err(AutomatonError::ResourceExhausted {
            resource: Resource::StackDepth,
            limit: 64,
        })
    );
    assert!(matches!(
        pda.run(&[]),
        Err(AutomatonError::ResourceExhausted { .. })
    ));
    Ok(())
}

#[test]
fn test_wide_branching_hits_configuration_limit() -> Result<(), AutomatonError> {
    let mut builder = Pda::builder(["q"], ['a'], ['X', 'Y'])?;
    builder
        .transition("q", 'a', Symbol::Epsilon, "q", Some('X'))?
        .transition("q", 'a', Symbol::Epsilon, "q", Some('Y'))?
        .start_state("q")?
        .final_state("q")?
        .limits(Limits::default().with_max_configurations(100));
    let pda = builder.build()?;

    // 2^6 distinct stacks fit, 2^7 do not.
    assert!(pda.accepts(&['a'; 6])?);
    assert_eq!(
        pda.run(&['a'; 7]),
        Err(AutomatonError::ResourceExhausted {
            resource: Resource::Configurations,
            limit: 100,
        })
    );
    assert!(pda.run_with_limits(&['a'; 7], Limits::unbounded())?.is_accepted());
    Ok(())
}

/// Accepts `()` repeated any number of times. The stack holds one slot
/// above the `$` bottom: `F` while free, `U` while a bracket is open.
fn bracket_pairs() -> Result<Dpda<&'static str, char, char>, MalformedDescription> {
    let mut builder = Dpda::builder(["open", "closed"], ['(', ')'], ['$', 'F', 'U'])?;
    builder
        .transition("closed", '(', 'F', "open", Some('U'))?
        .transition("open", ')', 'U', "closed", Some('F'))?
        .start_state("closed")?
        .initial_stack(['$', 'F'])?
        .final_state("closed")?;
    builder.build()
}

#[test]
fn test_dpda_halts_are_rejections() -> Result<(), AutomatonError> {
    init_test_logger();
    let dpda = bracket_pairs()?;

    assert!(dpda.accepts(&chars("()()()"))?);
    assert!(!dpda.accepts(&chars("("))?);
    assert!(!dpda.accepts(&chars("(("))?);

    let closing_first = dpda.run(&chars(")"))?;
    assert!(!closing_first.is_accepted());
    assert_eq!(
        closing_first.halt(),
        Some(Halt::UndefinedTransition { position: 0 })
    );
    assert_eq!(closing_first.reached(), &["closed"]);
    Ok(())
}

#[test]
fn test_dpda_stack_exhaustion() -> Result<(), AutomatonError> {
    let mut builder = Dpda::builder(["q"], ['t'], ['T'])?;
    builder
        .transition("q", 't', 'T', "q", None)?
        .start_state("q")?
        .initial_stack(['T', 'T'])?
        .final_state("q")?;
    let dpda = builder.build()?;

    assert!(dpda.accepts(&['t', 't'])?);
    let verdict = dpda.run(&['t', 't', 't'])?;
    assert_eq!(verdict.halt(), Some(Halt::StackExhausted { position: 2 }));
    assert_eq!(verdict.halt().map(|halt| halt.position()), Some(2));
    Ok(())
}

#[test]
fn test_pda_describes_its_transitions() -> Result<(), AutomatonError> {
    let pda = an_bn()?;
    let pops_to_accept = pda
        .transitions()
        .filter(|(_, input, top, destination, _)| {
            input.is_epsilon() && *top == Symbol::Literal(&'$') && **destination == "q3"
        })
        .count();
    assert_eq!(pops_to_accept, 2);
    assert_eq!(pda.transitions().count(), 6);
    assert!(pda.is_accepting(&"q3"));
    Ok(())
}
