//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! Clauses are not retained by the library.
//! Any slice of [literals](crate::structures::literal::Literal) is a clause, and is consumed when added to a solver.
//!
//! When added, a clause is tagged with a [Redundancy], which tells the solver how the clause may be treated afterwards.

use std::ffi::c_int;

/// How aggressively a solver may discard a clause.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum Redundancy {
    /// The clause is irredundant, and must be kept.
    #[default]
    None = 0,

    /// The clause is entailed by the formula, and may be forgotten.
    Forgettable = 1,

    /// The clause may be removed, so long as satisfiability is preserved.
    Equisatisfiable = 2,

    /// The clause may be removed, so long as the set of models is preserved.
    Equivalent = 3,
}

impl Redundancy {
    /// The redundancy for a raw value, if the value is in range.
    pub fn from_raw(value: c_int) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Forgettable),
            2 => Some(Self::Equisatisfiable),
            3 => Some(Self::Equivalent),
            _ => None,
        }
    }

    pub fn as_raw(self) -> c_int {
        self as c_int
    }
}

impl std::fmt::Display for Redundancy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Forgettable => write!(f, "forgettable"),
            Self::Equisatisfiable => write!(f, "equisatisfiable"),
            Self::Equivalent => write!(f, "equivalent"),
        }
    }
}
