//! The bridge between callbacks made by a solver and closures registered by a client.
//!
//! A solver is given one fixed `extern "C"` function for each kind of callback, together with a cookie.
//! The cookie is the address of a [CallbackBridge], and the bridge holds the closure (if any) registered for each kind of callback.
//!
//! # Panics in callbacks
//!
//! Unwinding across an `extern "C"` function is undefined behaviour, and so a closure is always called within [catch_unwind](std::panic::catch_unwind).
//! If the closure panics, the payload of the panic is stored as *pending* on the bridge, and:
//! - A terminate callback requests the solver to stop.
//! - While a panic is pending, no closure is called.
//!   Instead, terminate callbacks request the solver to stop, and export callbacks return immediately.
//!
//! The pending payload is taken by the [solve](crate::solver::Solver::solve) which (transitively) made the callback, and the panic is resumed with the original payload.
//! So, a panic in a callback surfaces exactly once, from the solve during which it happened.
//!
//! # Implementation details
//!
//! The bridge is boxed separately from the [Solver](crate::solver::Solver), so moving the solver leaves the cookie valid.
//! As the solver is mutably borrowed for the duration of any native call, the only access to the bridge during a callback is through the cookie, and slots of the bridge are [RefCell]s.
//!
//! The trampolines trust the cookie they are given, and so are private to the crate.
//! Only a [Solver](crate::solver::Solver) registers them, and always with the cookie of its own bridge.
//!
//! ```compile_fail
//! use ipasir2_bridge::ipasir::callbacks::terminate_trampoline;
//! ```
//!
//! ```compile_fail
//! use ipasir2_bridge::ipasir::callbacks::export_trampoline;
//! ```

use std::{
    any::Any,
    cell::RefCell,
    ffi::{c_int, c_void},
    panic::{catch_unwind, AssertUnwindSafe},
};

use crate::{misc::log::targets, structures::literal::Literal};

/// A closure for terminate callbacks, which returns true to request the solver stop.
pub type TerminateFn<'cb> = Box<dyn FnMut() -> bool + 'cb>;

/// A closure for export callbacks, given the clause exported as wire literals.
pub type ExportFn<'cb> = Box<dyn FnMut(&[i32]) + 'cb>;

/// The payload of a panic.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// Closures registered for callbacks, and any panic pending from a callback.
#[derive(Default)]
pub struct CallbackBridge<'cb> {
    terminate: RefCell<Option<TerminateFn<'cb>>>,

    export: RefCell<Option<ExportFn<'cb>>>,

    pending: RefCell<Option<PanicPayload>>,
}

impl<'cb> CallbackBridge<'cb> {
    /// The cookie to pass to the solver alongside a trampoline.
    pub fn cookie(&self) -> *mut c_void {
        self as *const Self as *mut c_void
    }

    /// Replaces the terminate closure, returning the previous closure.
    pub fn replace_terminate(&self, callback: Option<TerminateFn<'cb>>) -> Option<TerminateFn<'cb>> {
        self.terminate.replace(callback)
    }

    /// Replaces the export closure, returning the previous closure.
    pub fn replace_export(&self, callback: Option<ExportFn<'cb>>) -> Option<ExportFn<'cb>> {
        self.export.replace(callback)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Takes the pending panic payload, if any.
    pub fn take_pending(&self) -> Option<PanicPayload> {
        self.pending.borrow_mut().take()
    }

    fn store_pending(&self, payload: PanicPayload) {
        log::warn!(target: targets::CALLBACK, "Callback panicked, deferring the panic to solve");
        let mut pending = self.pending.borrow_mut();
        if pending.is_none() {
            *pending = Some(payload);
        }
    }

    /// Calls the terminate closure, if any, and returns whether the solver should stop.
    pub fn call_terminate(&self) -> bool {
        if self.has_pending() {
            return true;
        }

        let Ok(mut slot) = self.terminate.try_borrow_mut() else {
            log::error!(target: targets::CALLBACK, "Re-entrant terminate callback");
            return false;
        };

        let Some(callback) = slot.as_mut() else {
            return false;
        };

        match catch_unwind(AssertUnwindSafe(|| callback())) {
            Ok(stop) => stop,
            Err(payload) => {
                drop(slot);
                self.store_pending(payload);
                true
            }
        }
    }

    /// Calls the export closure, if any, with the clause.
    pub fn call_export(&self, clause: &[i32]) {
        if self.has_pending() {
            return;
        }

        let Ok(mut slot) = self.export.try_borrow_mut() else {
            log::error!(target: targets::CALLBACK, "Re-entrant export callback");
            return;
        };

        let Some(callback) = slot.as_mut() else {
            return;
        };

        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(clause))) {
            drop(slot);
            self.store_pending(payload);
        }
    }
}

/// Recovers a bridge from a cookie.
///
/// # Safety
/// The cookie must be null, or the address of a live bridge.
unsafe fn bridge_from_cookie<'a>(data: *mut c_void) -> Option<&'a CallbackBridge<'a>> {
    (data as *const CallbackBridge<'a>).as_ref()
}

/// The terminate callback given to a solver.
pub(crate) extern "C" fn terminate_trampoline(data: *mut c_void) -> c_int {
    // Safety: the cookie registered alongside the trampoline is the address of a bridge which outlives the solver.
    match unsafe { bridge_from_cookie(data) } {
        Some(bridge) => bridge.call_terminate() as c_int,
        None => 0,
    }
}

/// The export callback given to a solver.
pub(crate) extern "C" fn export_trampoline(data: *mut c_void, clause: *const i32) {
    if clause.is_null() {
        return;
    }

    // Safety: as in terminate_trampoline.
    let Some(bridge) = (unsafe { bridge_from_cookie(data) }) else {
        return;
    };

    // Safety: a clause given to the export callback is terminated by a zero.
    let literals = unsafe {
        let mut len = 0;
        while *clause.add(len) != 0 {
            len += 1;
        }
        std::slice::from_raw_parts(clause, len)
    };

    bridge.call_export(literals);
}

/// Wraps a closure over literals of some type as a closure over wire literals.
///
/// Wire literals are passed through when the literal type permits, and otherwise converted through a buffer kept by the closure.
pub fn export_adapter<'cb, L: Literal + 'cb>(mut callback: impl FnMut(&[L]) + 'cb) -> ExportFn<'cb> {
    let mut converted: Vec<L> = Vec::new();
    Box::new(move |wire: &[i32]| match L::from_wire_slice(wire) {
        Some(literals) => callback(literals),
        None => {
            converted.clear();
            converted.extend(wire.iter().map(|&literal| L::from_wire(literal)));
            callback(converted.as_slice())
        }
    })
}
