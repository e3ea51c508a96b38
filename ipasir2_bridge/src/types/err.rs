//! Error types used in the library.
//!
//! Every fallible operation reports failure through a single type, [Ipasir2Error].
//! An error optionally carries the [ErrorCode] returned by the solver, and the name of the entry point which returned it.
//!
//! Failures fall into a few groups:
//! - A call returned a status other than success.
//!   The error has a code and the name of the entry point.
//! - The solver returned a value outside the documented encoding, e.g. a truth value other than `lit`, `-lit`, or `0`.
//!   The error has no code, as none applies.
//! - A library could not be opened, or some required symbol was missing.
//!
//! Panics raised by client callbacks are not errors in this sense.
//! These are resumed from the next solve, see [callbacks](crate::ipasir::callbacks).

use std::ffi::c_int;

use crate::{ipasir::ipasir_two::IPASIR2_E_OK, misc::log::targets};

/// Codes used by a solver to indicate the failure of a function call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum ErrorCode {
    Unknown = 1,
    Unsupported = 2,
    UnsupportedArgument = 3,
    UnsupportedOption = 4,
    InvalidState = 5,
    InvalidArgument = 6,
    InvalidOptionValue = 7,
}

impl ErrorCode {
    /// The code for a raw status, if the status is some recognised failure.
    ///
    /// Success (zero) and unrecognised values have no code.
    pub fn from_raw(status: c_int) -> Option<Self> {
        match status {
            1 => Some(Self::Unknown),
            2 => Some(Self::Unsupported),
            3 => Some(Self::UnsupportedArgument),
            4 => Some(Self::UnsupportedOption),
            5 => Some(Self::InvalidState),
            6 => Some(Self::InvalidArgument),
            7 => Some(Self::InvalidOptionValue),
            _ => None,
        }
    }

    /// The raw value of the code.
    pub fn as_raw(self) -> c_int {
        self as c_int
    }

    /// A human-readable description of the code.
    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "an unknown error occurred",
            Self::Unsupported => "the function is not supported by the solver",
            Self::UnsupportedArgument => "an argument is not supported by the solver",
            Self::UnsupportedOption => "the option is not supported by the solver",
            Self::InvalidState => "the solver is not in a state which permits the call",
            Self::InvalidArgument => "an argument is invalid",
            Self::InvalidOptionValue => "the value is invalid for the option",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The error type of the library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ipasir2Error {
    /// The code returned by the solver, if any.
    code: Option<ErrorCode>,

    /// The entry point which failed, if any.
    function: Option<&'static str>,

    message: String,
}

impl Ipasir2Error {
    /// An error without a code or an entry point.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            function: None,
            message: message.into(),
        }
    }

    /// An error for a failing call to `function`, with the given code.
    pub fn from_code(code: ErrorCode, function: &'static str) -> Self {
        Self {
            code: Some(code),
            function: Some(function),
            message: format!("{function} failed: {}", code.description()),
        }
    }

    /// An error for a value returned by `function` outside of the documented encoding.
    pub fn protocol(function: &'static str, message: impl Into<String>) -> Self {
        Self {
            code: None,
            function: Some(function),
            message: message.into(),
        }
    }

    /// The code returned by the solver, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// The name of the entry point which failed, if any.
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Ipasir2Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Ipasir2Error {}

/// Ok, if `status` is success, and otherwise an error naming `function`.
pub fn check_status(status: c_int, function: &'static str) -> Result<(), Ipasir2Error> {
    if status == IPASIR2_E_OK {
        return Ok(());
    }

    log::debug!(target: targets::FFI, "{function} returned status {status}");

    match ErrorCode::from_raw(status) {
        Some(code) => Err(Ipasir2Error::from_code(code, function)),
        None => Err(Ipasir2Error::protocol(
            function,
            format!("{function} returned an unrecognised status: {status}"),
        )),
    }
}
