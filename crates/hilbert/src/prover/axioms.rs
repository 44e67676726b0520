//! The six axiom schemas every prover starts from

use crate::fol::{Formula, Term, Variable};
use crate::proof::Schema;

/// Axiom schemas of the first-order Hilbert system
///
/// | axiom | template |
/// |---|---|
/// | `UI` | `(Ax[R(x)]->R(c))` |
/// | `EI` | `(R(c)->Ex[R(x)])` |
/// | `US` | `(Ax[(Q()->R(x))]->(Q()->Ax[R(x)]))` |
/// | `ES` | `((Ax[(R(x)->Q())]&Ex[R(x)])->Q())` |
/// | `RX` | `c=c` |
/// | `ME` | `(c=d->(R(c)->R(d)))` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axiom {
    UniversalInstantiation,
    ExistentialIntroduction,
    UniversalSimplification,
    ExistentialSimplification,
    Reflexivity,
    MeaningOfEquality,
}

fn r(arg: Term) -> Formula {
    Formula::relation("R", vec![arg])
}

fn q() -> Formula {
    Formula::relation("Q", vec![])
}

fn x() -> Variable {
    Variable::new("x")
}

impl Axiom {
    pub const ALL: [Axiom; 6] = [
        Axiom::UniversalInstantiation,
        Axiom::ExistentialIntroduction,
        Axiom::UniversalSimplification,
        Axiom::ExistentialSimplification,
        Axiom::Reflexivity,
        Axiom::MeaningOfEquality,
    ];

    /// Conventional short name
    pub fn name(self) -> &'static str {
        match self {
            Axiom::UniversalInstantiation => "UI",
            Axiom::ExistentialIntroduction => "EI",
            Axiom::UniversalSimplification => "US",
            Axiom::ExistentialSimplification => "ES",
            Axiom::Reflexivity => "RX",
            Axiom::MeaningOfEquality => "ME",
        }
    }

    pub fn schema(self) -> Schema {
        let rx = || r(Term::variable("x"));
        let c = || Term::constant("c");
        match self {
            Axiom::UniversalInstantiation => Schema::new(
                Formula::implies(Formula::forall(x(), rx()), r(c())),
                ["R", "x", "c"],
            ),
            Axiom::ExistentialIntroduction => Schema::new(
                Formula::implies(r(c()), Formula::exists(x(), rx())),
                ["R", "x", "c"],
            ),
            Axiom::UniversalSimplification => Schema::new(
                Formula::implies(
                    Formula::forall(x(), Formula::implies(q(), rx())),
                    Formula::implies(q(), Formula::forall(x(), rx())),
                ),
                ["Q", "R", "x"],
            ),
            Axiom::ExistentialSimplification => Schema::new(
                Formula::implies(
                    Formula::and(
                        Formula::forall(x(), Formula::implies(rx(), q())),
                        Formula::exists(x(), rx()),
                    ),
                    q(),
                ),
                ["Q", "R", "x"],
            ),
            Axiom::Reflexivity => Schema::new(Formula::equality(c(), c()), ["c"]),
            Axiom::MeaningOfEquality => {
                let d = Term::constant("d");
                Schema::new(
                    Formula::implies(
                        Formula::equality(c(), d.clone()),
                        Formula::implies(r(c()), r(d)),
                    ),
                    ["R", "c", "d"],
                )
            }
        }
    }

    /// Schemas of all six axioms
    pub fn schemas() -> impl Iterator<Item = Schema> {
        Axiom::ALL.into_iter().map(Axiom::schema)
    }
}
