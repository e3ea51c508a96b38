//! Marshalling of literals to the IPASIR-2 representation.
//!
//! Each [Solver](crate::solver::Solver) owns a [LiteralBuffer], and every clause or set of assumptions passes through the buffer on the way to the solver.
//! The buffer returns a [WireView] of the literals, i.e. a pointer and length which may be handed to the solver.
//!
//! - A non-empty slice of [i32] literals is viewed in place, with no copy.
//! - Any other slice of literals, and every iterator of literals, is converted into the scratch storage of the buffer.
//! - Empty input is viewed as zero literals of the scratch storage.
//!   As the scratch storage always has space for at least one literal, the pointer of an empty view is valid (though never read).
//!
//! A view mutably borrows the buffer, and so the scratch storage can't be overwritten while the view is in use.

use crate::{
    misc::log::targets,
    structures::literal::Literal,
    types::err::{ErrorCode, Ipasir2Error},
};

/// A view of wire literals, ready to be passed to the solver.
#[derive(Clone, Copy, Debug)]
pub struct WireView<'a> {
    literals: &'a [i32],
    len: i32,
}

impl<'a> WireView<'a> {
    fn new(literals: &'a [i32]) -> Result<Self, Ipasir2Error> {
        match i32::try_from(literals.len()) {
            Ok(len) => Ok(Self { literals, len }),
            Err(_) => {
                log::error!(target: targets::MARSHAL, "{} literals exceed the range of a length", literals.len());
                Err(Ipasir2Error::from_code(
                    ErrorCode::InvalidArgument,
                    "literal marshalling",
                ))
            }
        }
    }

    pub fn as_ptr(&self) -> *const i32 {
        self.literals.as_ptr()
    }

    /// The count of literals, as expected by the solver.
    pub fn len(&self) -> i32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &'a [i32] {
        self.literals
    }
}

/// Scratch storage for literals which can't be passed to the solver in place.
#[derive(Debug)]
pub struct LiteralBuffer {
    scratch: Vec<i32>,
}

impl Default for LiteralBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralBuffer {
    pub fn new() -> Self {
        LiteralBuffer {
            scratch: Vec::with_capacity(1),
        }
    }

    /// A view of a slice of literals.
    ///
    /// The view is of the slice itself, if the slice is non-empty and of wire literals.
    /// Otherwise, the view is of the buffer.
    pub fn slice<'a, L: Literal>(
        &'a mut self,
        literals: &'a [L],
    ) -> Result<WireView<'a>, Ipasir2Error> {
        if let Some(wire) = L::as_wire_slice(literals) {
            if !wire.is_empty() {
                log::trace!(target: targets::MARSHAL, "In place: {} literals", wire.len());
                return WireView::new(wire);
            }
        }

        self.collect(literals.iter().copied())
    }

    /// A view of the buffer, after the buffer has been filled with the literals of the iterator.
    pub fn collect<L: Literal>(
        &mut self,
        literals: impl IntoIterator<Item = L>,
    ) -> Result<WireView<'_>, Ipasir2Error> {
        self.scratch.clear();
        self.scratch
            .extend(literals.into_iter().map(|literal| literal.to_wire()));

        log::trace!(target: targets::MARSHAL, "Buffered: {} literals", self.scratch.len());
        WireView::new(&self.scratch)
    }

    /// A view of the buffer, after the buffer has been filled with the single literal.
    pub fn single<L: Literal>(&mut self, literal: L) -> Result<WireView<'_>, Ipasir2Error> {
        self.collect(std::iter::once(literal))
    }
}
