//! Prover configuration and pluggable tautology oracles.

use hilbert::{
    Formula, Proposition, Prover, ProverConfig, ProverError, Schema, Substitution,
    TautologyOracle, Term, TruthTable,
};
use std::cell::Cell;
use std::rc::Rc;

fn formula(s: &str) -> Formula {
    Formula::parse(s).unwrap()
}

#[test]
fn test_fresh_prefix_is_used() {
    let config = ProverConfig {
        fresh_variable_prefix: "w".to_string(),
        ..ProverConfig::default()
    };
    let mut prover = Prover::with_config(
        [Schema::fixed(formula("R(x)"))],
        config,
        Box::new(TruthTable),
    )
    .unwrap();
    let line = prover.add_assumption(formula("R(x)")).unwrap();
    let map = Substitution::single("x", Term::constant("c"));
    prover.add_free_instantiation(formula("R(c)"), line, &map).unwrap();

    assert!(prover
        .lines()
        .iter()
        .any(|line| line.formula() == &formula("Aw1[R(w1)]")));
    assert!(prover.qed().unwrap().is_valid(&TruthTable));
}

#[test]
fn test_closure_oracle() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let counting = move |p: &Proposition| {
        counter.set(counter.get() + 1);
        TruthTable.is_tautology(p)
    };
    let mut prover = Prover::with_config(
        Vec::new(),
        ProverConfig::default(),
        Box::new(counting),
    )
    .unwrap();
    prover.add_tautology(formula("(R(c)|~R(c))")).unwrap();
    // once up front, once when the line is checked on append
    assert_eq!(calls.get(), 2);

    let proof = prover.qed().unwrap();
    let replay = {
        let counter = Rc::clone(&calls);
        move |p: &Proposition| {
            counter.set(counter.get() + 1);
            TruthTable.is_tautology(p)
        }
    };
    assert!(proof.is_valid(&replay));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_rejecting_oracle() {
    let mut prover = Prover::with_config(
        Vec::new(),
        ProverConfig::default(),
        Box::new(|_: &Proposition| false),
    )
    .unwrap();
    assert!(matches!(
        prover.add_tautology(formula("(R(c)|~R(c))")),
        Err(ProverError::NotTautology(_))
    ));
    assert!(prover.is_empty());
}

#[test]
fn test_announced_lines_are_unchanged() {
    let config = ProverConfig {
        announce_lines: true,
        ..ProverConfig::default()
    };
    let mut announced =
        Prover::with_config([Schema::fixed(formula("a=b"))], config, Box::new(TruthTable)).unwrap();
    let mut quiet = Prover::new([Schema::fixed(formula("a=b"))]);
    for prover in [&mut announced, &mut quiet] {
        let line = prover.add_assumption(formula("a=b")).unwrap();
        prover.add_flipped_equality(formula("b=a"), line).unwrap();
    }
    assert_eq!(announced.lines(), quiet.lines());
}
