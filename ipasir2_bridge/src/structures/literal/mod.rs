//! Literals, and the adapter between client literal types and the IPASIR-2 representation.
//!
//! On the wire, a literal is a non-zero [i32] whose sign is the polarity and whose magnitude is the (1-based) index of an atom.
//! Zero is a terminator, and is never a literal.
//!
//! Anything may be used as a literal so long as it implements [Literal], which requires a pair of conversions to and from the wire representation.
//! [i32] is the native literal type, and [ABLiteral] is provided as an example of a literal type built from an atom and a polarity.
//!
//! ```rust
//! # use ipasir2_bridge::structures::literal::{ABLiteral, Literal};
//! let literal = ABLiteral::new(79, false);
//!
//! assert_eq!(literal.to_wire(), -79);
//! assert_eq!(ABLiteral::from_wire(-79), literal);
//! ```
//!
//! There are no implementations for other integer types.
//! So, passing, e.g., a clause of [i16] or [i64] literals fails to compile, rather than being silently widened or truncated.
//!
//! # Zero-copy hooks
//!
//! The trait has two provided methods, [as_wire_slice](Literal::as_wire_slice) and [from_wire_slice](Literal::from_wire_slice), which default to [None].
//! These are overridden for [i32], and allow a slice of literals to be handed to the solver (or a clause from the solver to be handed to a callback) without a copy.

mod ab_literal;
pub use ab_literal::ABLiteral;

/// An atom, i.e. the index of a variable.
pub type Atom = u32;

/// The native representation of a literal.
pub type IntLiteral = i32;

/// Something which may be converted to and from the wire representation of a literal.
///
/// Implementations should satisfy `L::from_wire(l.to_wire()) == l` for every representable `l`.
pub trait Literal: Copy {
    /// The literal as a non-zero [i32].
    fn to_wire(self) -> i32;

    /// The literal corresponding to a non-zero [i32].
    fn from_wire(wire: i32) -> Self;

    /// The literals as a slice of wire literals, if this is possible without a copy.
    fn as_wire_slice(_literals: &[Self]) -> Option<&[i32]> {
        None
    }

    /// The wire literals as a slice of literals, if this is possible without a copy.
    fn from_wire_slice(_wire: &[i32]) -> Option<&[Self]> {
        None
    }
}

impl Literal for IntLiteral {
    fn to_wire(self) -> i32 {
        self
    }

    fn from_wire(wire: i32) -> Self {
        wire
    }

    fn as_wire_slice(literals: &[Self]) -> Option<&[i32]> {
        Some(literals)
    }

    fn from_wire_slice(wire: &[i32]) -> Option<&[Self]> {
        Some(wire)
    }
}
