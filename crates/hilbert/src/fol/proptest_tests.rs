//! Property-based tests for the textual form and for substitution.

use super::{Connective, Formula, Quantifier, Substitution, Term, Variable};
use proptest::prelude::*;
use std::collections::HashSet;

const VARIABLES: [&str; 4] = ["x", "y", "z", "w"];
const CONSTANTS: [&str; 4] = ["a", "b", "c", "0"];
const FUNCTIONS: [&str; 2] = ["f", "g"];
const RELATIONS: [&str; 2] = ["R", "S"];

fn arb_term(max_depth: u32) -> BoxedStrategy<Term> {
    let leaf = prop_oneof![
        (0..4usize).prop_map(|i| Term::variable(VARIABLES[i])),
        (0..4usize).prop_map(|i| Term::constant(CONSTANTS[i])),
    ];
    if max_depth == 0 {
        leaf.boxed()
    } else {
        prop_oneof![
            3 => leaf,
            2 => (0..2usize, proptest::collection::vec(arb_term(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| Term::function(FUNCTIONS[f], args)),
        ]
        .boxed()
    }
}

fn arb_ground_term(max_depth: u32) -> BoxedStrategy<Term> {
    let leaf = (0..4usize).prop_map(|i| Term::constant(CONSTANTS[i]));
    if max_depth == 0 {
        leaf.boxed()
    } else {
        prop_oneof![
            3 => leaf,
            1 => (0..2usize, proptest::collection::vec(arb_ground_term(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| Term::function(FUNCTIONS[f], args)),
        ]
        .boxed()
    }
}

fn arb_connective() -> impl Strategy<Value = Connective> {
    prop_oneof![
        Just(Connective::And),
        Just(Connective::Or),
        Just(Connective::Implies),
    ]
}

fn arb_quantifier() -> impl Strategy<Value = Quantifier> {
    prop_oneof![Just(Quantifier::Forall), Just(Quantifier::Exists)]
}

fn arb_formula(max_depth: u32) -> BoxedStrategy<Formula> {
    let atom = prop_oneof![
        (arb_term(2), arb_term(2)).prop_map(|(l, r)| Formula::equality(l, r)),
        (0..2usize, proptest::collection::vec(arb_term(2), 0..=2))
            .prop_map(|(r, args)| Formula::relation(RELATIONS[r], args)),
    ];
    if max_depth == 0 {
        atom.boxed()
    } else {
        let sub = arb_formula(max_depth - 1);
        prop_oneof![
            2 => atom,
            1 => sub.clone().prop_map(Formula::not),
            2 => (arb_connective(), sub.clone(), sub.clone())
                .prop_map(|(op, l, r)| Formula::binary(op, l, r)),
            2 => (arb_quantifier(), 0..4usize, sub)
                .prop_map(|(q, v, p)| Formula::quantified(q, Variable::new(VARIABLES[v]), p)),
        ]
        .boxed()
    }
}

// =========================================================================
// Textual form
// =========================================================================

proptest! {
    /// Printing then parsing a term gives back the same tree
    #[test]
    fn term_round_trip(t in arb_term(3)) {
        let printed = t.to_string();
        let parsed = Term::parse(&printed).unwrap();
        prop_assert_eq!(parsed.to_string(), printed);
        prop_assert_eq!(parsed, t);
    }

    /// Printing then parsing a formula gives back the same tree
    #[test]
    fn formula_round_trip(f in arb_formula(3)) {
        let printed = f.to_string();
        let parsed = Formula::parse(&printed).unwrap();
        prop_assert_eq!(parsed.to_string(), printed);
        prop_assert_eq!(parsed, f);
    }
}

// =========================================================================
// Substitution
// =========================================================================

proptest! {
    /// The empty substitution never changes a formula
    #[test]
    fn empty_substitution_is_identity(f in arb_formula(3)) {
        let result = f.substitute(&Substitution::new(), &HashSet::new()).unwrap();
        prop_assert_eq!(result, f);
    }

    /// A replacement mentioning the bound variable at the site faults
    #[test]
    fn capture_is_reported(
        p in arb_formula(2),
        q in arb_quantifier(),
        v in 0..4usize,
    ) {
        let bound = VARIABLES[v];
        // Qv[(p&T(c9))] reaches c9 under the binder of v
        let site = Formula::relation("T", vec![Term::constant("c9")]);
        let f = Formula::quantified(q, Variable::new(bound), Formula::and(p, site));
        let subst = Substitution::single("c9", Term::function("h", vec![Term::variable(bound)]));
        let err = f.substitute(&subst, &HashSet::new()).unwrap_err();
        prop_assert_eq!(err.variable, bound.to_string());
    }

    /// Substituting a ground term for a variable removes it from the free variables
    #[test]
    fn ground_substitution_eliminates_variable(
        f in arb_formula(3),
        v in 0..4usize,
        t in arb_ground_term(2),
    ) {
        let name = VARIABLES[v];
        let result = f.substitute(&Substitution::single(name, t), &HashSet::new()).unwrap();
        let mut expected = f.free_variables();
        expected.remove(name);
        prop_assert_eq!(result.free_variables(), expected);
    }

    /// Renaming a free variable to a fresh one and back restores the formula
    #[test]
    fn fresh_renaming_is_reversible(f in arb_formula(3), v in 0..4usize) {
        let name = VARIABLES[v];
        let there = Substitution::single(name, Term::variable("u1"));
        let back = Substitution::single("u1", Term::variable(name));
        let renamed = f.substitute(&there, &HashSet::new()).unwrap();
        prop_assert!(!renamed.free_variables().contains(name));
        // Renaming back can only fail where `name` is bound at an occurrence of u1,
        // which the forward pass never creates.
        let restored = renamed.substitute(&back, &HashSet::new()).unwrap();
        prop_assert_eq!(restored, f);
    }
}
