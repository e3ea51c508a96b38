//! A boolean which may be missing.
//!
//! Results such as the outcome of a solve, or the value of a literal, are one of true, false, or none.
//! An [OptionalBool] has no conversion to [bool], so the missing case can't be silently treated as one of the others.
//!
//! ```rust
//! # use ipasir2_bridge::structures::optional_bool::OptionalBool;
//! let result = OptionalBool::new(true);
//!
//! assert!(result.has_value());
//! assert_eq!(result.map("sat", "unsat", "unknown"), "sat");
//! assert_eq!(OptionalBool::none().to_string(), "none");
//! ```

use std::ffi::c_int;

use crate::ipasir::ipasir_two::{IPASIR2_SATISFIABLE, IPASIR2_UNSATISFIABLE};

/// True, false, or none.
#[must_use]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct OptionalBool(Option<bool>);

impl OptionalBool {
    pub fn new(value: bool) -> Self {
        Self(Some(value))
    }

    pub fn none() -> Self {
        Self(None)
    }

    /// The result of a solve, from the result code written by the solver.
    pub fn from_solve_result(code: c_int) -> Self {
        match code {
            IPASIR2_SATISFIABLE => Self(Some(true)),
            IPASIR2_UNSATISFIABLE => Self(Some(false)),
            _ => Self(None),
        }
    }

    /// The value.
    ///
    /// # Panics
    /// If there is no value.
    pub fn unwrap(self) -> bool {
        match self.0 {
            Some(value) => value,
            None => panic!("called `OptionalBool::unwrap()` on a none value"),
        }
    }

    pub fn has_value(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_option(&self) -> Option<bool> {
        self.0
    }

    /// One of the given values, depending on whether self is true, false, or none.
    pub fn map<T>(self, if_true: T, if_false: T, if_none: T) -> T {
        match self.0 {
            Some(true) => if_true,
            Some(false) => if_false,
            None => if_none,
        }
    }
}

impl From<Option<bool>> for OptionalBool {
    fn from(value: Option<bool>) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for OptionalBool {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.map("true", "false", "none"))
    }
}
