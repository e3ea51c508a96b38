//! A shared library with every IPASIR-2 entry point except `ipasir2_set_export`, and so not a library from which an IPASIR-2 solver may be loaded.
//!
//! Each entry point present reports the call as unsupported.

use std::ffi::{c_char, c_int, c_void};

const UNSUPPORTED: c_int = 2;

#[no_mangle]
pub extern "C" fn ipasir2_signature(_signature: *mut *const c_char) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_init(_solver: *mut *mut c_void) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_release(_solver: *mut c_void) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_options(_solver: *mut c_void, _options: *mut *const c_void) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_set_option(
    _solver: *mut c_void,
    _handle: *const c_void,
    _value: i64,
    _index: i64,
) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_add(
    _solver: *mut c_void,
    _clause: *const i32,
    _len: i32,
    _redundancy: c_int,
) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_solve(
    _solver: *mut c_void,
    _result: *mut c_int,
    _assumptions: *const i32,
    _len: i32,
) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_val(_solver: *mut c_void, _lit: i32, _result: *mut i32) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_failed(_solver: *mut c_void, _lit: i32, _result: *mut i32) -> c_int {
    UNSUPPORTED
}

#[no_mangle]
pub extern "C" fn ipasir2_set_terminate(
    _solver: *mut c_void,
    _data: *mut c_void,
    _callback: Option<extern "C" fn(*mut c_void) -> c_int>,
) -> c_int {
    UNSUPPORTED
}
