//! Key structures, such as literals and clauses.
//!
//! ## Literals
//!
//! A literal is a signed reference to an atom, and may be of any type implementing [Literal](literal::Literal).
//!
//! ## Clauses
//!
//! A clause is a slice (or iterator) of literals, together with a [Redundancy](clause::Redundancy) tag.
//!
//! ## (Boolean) values
//!
//! Results reported by a solver are [OptionalBool](optional_bool::OptionalBool)s, as a solver may report that it has no result.

pub mod clause;
pub mod literal;
pub mod optional_bool;
