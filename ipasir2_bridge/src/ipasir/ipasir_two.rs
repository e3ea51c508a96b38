//! Raw items of the IPASIR-2 C interface.
//!
//! Values which cross the boundary as C enumerations (error codes, states, redundancy levels) are kept as [c_int] here.
//! Reading a foreign value directly into a Rust enum is undefined behaviour when the value is out of range, and so the conversion to the typed counterparts ([ErrorCode](crate::types::err::ErrorCode), [State](crate::config::State), [Redundancy](crate::structures::clause::Redundancy)) is always checked.

use std::ffi::{c_char, c_int, c_void};

/// The status code of a successful call.
pub const IPASIR2_E_OK: c_int = 0;

/// The result code of `ipasir2_solve` for a satisfiable formula.
pub const IPASIR2_SATISFIABLE: c_int = 10;

/// The result code of `ipasir2_solve` for an unsatisfiable formula.
pub const IPASIR2_UNSATISFIABLE: c_int = 20;

/// IPASIR-2 option metadata, as written by `ipasir2_options`.
///
/// A list of options is terminated by a record whose name is null.
#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Debug)]
pub struct ipasir2_option {
    /// Unique option identifier, or null to mark the end of a list.
    pub name: *const c_char,

    /// Minimum allowed value for the option.
    pub min: i64,

    /// Maximum allowed value for the option.
    pub max: i64,

    /// Maximal state in which the option may be set.
    pub max_state: c_int,

    /// Specifies if the option is eligible for use by automatic tuners.
    pub tunable: c_int,

    /// Specifies if the option may be set per variable.
    pub indexed: c_int,

    /// An opaque pointer for internal use in the setter function.
    pub handle: *const c_void,
}

/// The signature of a terminate callback.
///
/// A non-zero return value requests the solver to stop.
pub type TerminateCallback = extern "C" fn(data: *mut c_void) -> c_int;

/// The signature of an export callback.
///
/// The clause is terminated by a zero.
pub type ExportCallback = extern "C" fn(data: *mut c_void, clause: *const i32);

/// The table of IPASIR-2 entry points used by a [Solver](crate::solver::Solver).
///
/// A table may be built from link-time symbols ([linked](Ipasir2Functions::linked), with the `linked` feature), from a loaded library (see [Ipasir2::load](crate::Ipasir2::load)), or by hand.
/// Building a table by hand is the seam for mocking a solver.
#[derive(Clone, Copy, Debug)]
pub struct Ipasir2Functions {
    pub signature: unsafe extern "C" fn(signature: *mut *const c_char) -> c_int,

    pub init: unsafe extern "C" fn(solver: *mut *mut c_void) -> c_int,

    pub release: unsafe extern "C" fn(solver: *mut c_void) -> c_int,

    pub options:
        unsafe extern "C" fn(solver: *mut c_void, options: *mut *const ipasir2_option) -> c_int,

    pub set_option: unsafe extern "C" fn(
        solver: *mut c_void,
        handle: *const ipasir2_option,
        value: i64,
        index: i64,
    ) -> c_int,

    pub add: unsafe extern "C" fn(
        solver: *mut c_void,
        clause: *const i32,
        len: i32,
        redundancy: c_int,
    ) -> c_int,

    pub solve: unsafe extern "C" fn(
        solver: *mut c_void,
        result: *mut c_int,
        assumptions: *const i32,
        len: i32,
    ) -> c_int,

    pub val: unsafe extern "C" fn(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int,

    pub failed: unsafe extern "C" fn(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int,

    pub set_terminate: unsafe extern "C" fn(
        solver: *mut c_void,
        data: *mut c_void,
        callback: Option<TerminateCallback>,
    ) -> c_int,

    pub set_export: unsafe extern "C" fn(
        solver: *mut c_void,
        data: *mut c_void,
        max_length: i32,
        callback: Option<ExportCallback>,
    ) -> c_int,
}

#[cfg(feature = "linked")]
mod linked {
    use super::{ipasir2_option, ExportCallback, TerminateCallback};
    use std::ffi::{c_char, c_int, c_void};

    extern "C" {
        pub fn ipasir2_signature(signature: *mut *const c_char) -> c_int;
        pub fn ipasir2_init(solver: *mut *mut c_void) -> c_int;
        pub fn ipasir2_release(solver: *mut c_void) -> c_int;
        pub fn ipasir2_options(solver: *mut c_void, options: *mut *const ipasir2_option) -> c_int;
        pub fn ipasir2_set_option(
            solver: *mut c_void,
            handle: *const ipasir2_option,
            value: i64,
            index: i64,
        ) -> c_int;
        pub fn ipasir2_add(
            solver: *mut c_void,
            clause: *const i32,
            len: i32,
            redundancy: c_int,
        ) -> c_int;
        pub fn ipasir2_solve(
            solver: *mut c_void,
            result: *mut c_int,
            assumptions: *const i32,
            len: i32,
        ) -> c_int;
        pub fn ipasir2_val(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int;
        pub fn ipasir2_failed(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int;
        pub fn ipasir2_set_terminate(
            solver: *mut c_void,
            data: *mut c_void,
            callback: Option<TerminateCallback>,
        ) -> c_int;
        pub fn ipasir2_set_export(
            solver: *mut c_void,
            data: *mut c_void,
            max_length: i32,
            callback: Option<ExportCallback>,
        ) -> c_int;
    }
}

#[cfg(feature = "linked")]
impl Ipasir2Functions {
    /// The table of entry points resolved at link time.
    pub fn linked() -> Self {
        Self {
            signature: linked::ipasir2_signature,
            init: linked::ipasir2_init,
            release: linked::ipasir2_release,
            options: linked::ipasir2_options,
            set_option: linked::ipasir2_set_option,
            add: linked::ipasir2_add,
            solve: linked::ipasir2_solve,
            val: linked::ipasir2_val,
            failed: linked::ipasir2_failed,
            set_terminate: linked::ipasir2_set_terminate,
            set_export: linked::ipasir2_set_export,
        }
    }
}
