//! Calls a mock solver instance may be told to expect.
//!
//! Each call gives the arguments the instance should receive, and what the instance should return.
//! Fields not of interest to a test may be left as [Default], in which case the call succeeds.
//!
//! ```rust
//! # use ipasir2_mock::{AddCall, Call};
//! # use ipasir2_bridge::structures::clause::Redundancy;
//! let call: Call = AddCall {
//!     clause: vec![1, -2],
//!     redundancy: Redundancy::Forgettable,
//!     ..Default::default()
//! }
//! .into();
//! ```

use std::ffi::c_int;

use ipasir2_bridge::structures::clause::Redundancy;

/// A call to `ipasir2_add`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddCall {
    pub clause: Vec<i32>,
    pub redundancy: Redundancy,
    pub status: c_int,
}

/// A call to `ipasir2_solve`.
///
/// Before returning, the instance passes each of `exports` to the export callback (if any), and then polls the terminate callback (if any) up to `terminate_polls` times.
/// If the terminate callback requests a stop, the result written is 0 rather than `result`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveCall {
    pub assumptions: Vec<i32>,
    pub result: c_int,
    pub status: c_int,
    pub exports: Vec<Vec<i32>>,
    pub terminate_polls: usize,
}

/// A call to `ipasir2_val`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValCall {
    pub literal: i32,
    pub result: i32,
    pub status: c_int,
}

/// A call to `ipasir2_failed`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FailedCall {
    pub literal: i32,
    pub result: i32,
    pub status: c_int,
}

/// A call to `ipasir2_set_terminate`, either setting (`set`) or clearing the callback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetTerminateCall {
    pub set: bool,
    pub status: c_int,
}

/// A call to `ipasir2_set_export`, either setting (`set`) or clearing the callback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetExportCall {
    pub set: bool,
    pub max_length: i32,
    pub status: c_int,
}

/// A call to `ipasir2_options`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsCall {
    pub status: c_int,
}

/// A call to `ipasir2_set_option`, for the option named `name`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetOptionCall {
    pub name: String,
    pub value: i64,
    pub index: i64,
    pub status: c_int,
}

/// Any call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Add(AddCall),
    Solve(SolveCall),
    Val(ValCall),
    Failed(FailedCall),
    SetTerminate(SetTerminateCall),
    SetExport(SetExportCall),
    Options(OptionsCall),
    SetOption(SetOptionCall),
}

impl From<AddCall> for Call {
    fn from(call: AddCall) -> Self {
        Call::Add(call)
    }
}

impl From<SolveCall> for Call {
    fn from(call: SolveCall) -> Self {
        Call::Solve(call)
    }
}

impl From<ValCall> for Call {
    fn from(call: ValCall) -> Self {
        Call::Val(call)
    }
}

impl From<FailedCall> for Call {
    fn from(call: FailedCall) -> Self {
        Call::Failed(call)
    }
}

impl From<SetTerminateCall> for Call {
    fn from(call: SetTerminateCall) -> Self {
        Call::SetTerminate(call)
    }
}

impl From<SetExportCall> for Call {
    fn from(call: SetExportCall) -> Self {
        Call::SetExport(call)
    }
}

impl From<OptionsCall> for Call {
    fn from(call: OptionsCall) -> Self {
        Call::Options(call)
    }
}

impl From<SetOptionCall> for Call {
    fn from(call: SetOptionCall) -> Self {
        Call::SetOption(call)
    }
}
