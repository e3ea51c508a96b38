//! An instance of a solver.
//!
//! A [Solver] owns the native handle of one solver instance, from the call to `ipasir2_init` which creates the instance, to the call to `ipasir2_release` when the solver is dropped.
//!
//! ```rust,ignore
//! let mut solver = ipasir2.create_solver()?;
//!
//! solver.add(&[1, 2, 3])?;
//! solver.add(&[-1])?;
//! solver.add(&[-2])?;
//!
//! assert_eq!(solver.solve()?, OptionalBool::new(true));
//! assert_eq!(solver.lit_value(3)?, OptionalBool::new(true));
//! ```
//!
//! # Literals
//!
//! Clauses and assumptions are given as slices of any type of [Literal], as an iterator of literals, or as a single literal.
//! Slices of [i32] are passed to the solver as they are, and everything else is converted through a buffer owned by the solver.
//! See [marshal](crate::marshal) for details.
//!
//! # Callbacks
//!
//! Closures registered for callbacks may borrow from their environment for the lifetime `'cb` of the solver.
//! A panic inside a closure is resumed from the [solve](Solver::solve) during which the closure was called.
//! See [callbacks](crate::ipasir::callbacks) for details.
//!
//! # Threads
//!
//! A solver is neither [Send] nor [Sync].
//! To use solvers on multiple threads, share (a clone of) the [Ipasir2](crate::Ipasir2) and create a solver on each thread.

use std::{
    ffi::{c_int, c_void},
    ptr::NonNull,
    sync::Arc,
};

use crate::{
    api::Entrypoints,
    config::{read_options, SolverOption},
    ipasir::{
        callbacks::{export_adapter, export_trampoline, terminate_trampoline, CallbackBridge},
        ipasir_two::{ipasir2_option, ExportCallback, Ipasir2Functions, TerminateCallback},
    },
    marshal::{LiteralBuffer, WireView},
    misc::log::targets,
    structures::{
        clause::Redundancy,
        literal::{IntLiteral, Literal},
        optional_bool::OptionalBool,
    },
    types::err::{check_status, Ipasir2Error},
};

/// An instance of a solver.
pub struct Solver<'cb> {
    handle: *mut c_void,

    entrypoints: Arc<Entrypoints>,

    buffer: LiteralBuffer,

    /// Options, fetched on first use.
    options: Option<Vec<SolverOption>>,

    /// Leaked from a box on creation, and reclaimed on drop.
    bridge: NonNull<CallbackBridge<'cb>>,
}

impl<'cb> Solver<'cb> {
    pub(crate) fn new(entrypoints: Arc<Entrypoints>) -> Result<Self, Ipasir2Error> {
        let mut handle: *mut c_void = std::ptr::null_mut();
        let status = unsafe { (entrypoints.functions.init)(&mut handle) };
        check_status(status, "ipasir2_init")?;
        log::debug!(target: targets::FFI, "Initialised solver {handle:?}");

        let bridge = NonNull::from(Box::leak(Box::<CallbackBridge<'cb>>::default()));

        Ok(Solver {
            handle,
            entrypoints,
            buffer: LiteralBuffer::new(),
            options: None,
            bridge,
        })
    }

    fn functions(&self) -> &Ipasir2Functions {
        &self.entrypoints.functions
    }

    fn bridge(&self) -> &CallbackBridge<'cb> {
        // Safety: the bridge is live until the solver is dropped.
        unsafe { self.bridge.as_ref() }
    }

    /// The native handle of the solver.
    ///
    /// The handle remains owned by the solver, and is released when the solver is dropped.
    pub fn native_handle(&self) -> *mut c_void {
        self.handle
    }
}

// Clauses

impl Solver<'_> {
    fn add_view(
        functions: &Ipasir2Functions,
        handle: *mut c_void,
        clause: WireView,
        redundancy: Redundancy,
    ) -> Result<(), Ipasir2Error> {
        log::trace!(target: targets::FFI, "Add {:?} ({redundancy})", clause.as_slice());
        let status =
            unsafe { (functions.add)(handle, clause.as_ptr(), clause.len(), redundancy.as_raw()) };
        check_status(status, "ipasir2_add")
    }

    /// Adds an irredundant clause.
    pub fn add<L: Literal>(&mut self, clause: &[L]) -> Result<(), Ipasir2Error> {
        self.add_clause(clause, Redundancy::None)
    }

    /// Adds a clause, with the given redundancy.
    pub fn add_clause<L: Literal>(
        &mut self,
        clause: &[L],
        redundancy: Redundancy,
    ) -> Result<(), Ipasir2Error> {
        let view = self.buffer.slice(clause)?;
        Self::add_view(&self.entrypoints.functions, self.handle, view, redundancy)
    }

    /// Adds the clause of literals from an iterator, with the given redundancy.
    pub fn add_iter<L: Literal>(
        &mut self,
        clause: impl IntoIterator<Item = L>,
        redundancy: Redundancy,
    ) -> Result<(), Ipasir2Error> {
        let view = self.buffer.collect(clause)?;
        Self::add_view(&self.entrypoints.functions, self.handle, view, redundancy)
    }

    /// Adds the unit clause of a literal, with the given redundancy.
    pub fn add_unit<L: Literal>(
        &mut self,
        literal: L,
        redundancy: Redundancy,
    ) -> Result<(), Ipasir2Error> {
        let view = self.buffer.single(literal)?;
        Self::add_view(&self.entrypoints.functions, self.handle, view, redundancy)
    }
}

// Solving

impl<'cb> Solver<'cb> {
    fn solve_view(
        functions: &Ipasir2Functions,
        handle: *mut c_void,
        bridge: &CallbackBridge<'cb>,
        assumptions: WireView,
    ) -> Result<OptionalBool, Ipasir2Error> {
        log::trace!(target: targets::FFI, "Solve assuming {:?}", assumptions.as_slice());

        let mut result: c_int = 0;
        let status = unsafe {
            (functions.solve)(handle, &mut result, assumptions.as_ptr(), assumptions.len())
        };

        if let Some(payload) = bridge.take_pending() {
            log::warn!(target: targets::CALLBACK, "Resuming a panic from a callback");
            std::panic::resume_unwind(payload);
        }

        check_status(status, "ipasir2_solve")?;
        let result = OptionalBool::from_solve_result(result);
        log::debug!(target: targets::FFI, "Solve result: {result}");
        Ok(result)
    }

    /// Solves the formula, without assumptions.
    ///
    /// # Panics
    /// If a callback closure panicked during the solve, the panic is resumed.
    pub fn solve(&mut self) -> Result<OptionalBool, Ipasir2Error> {
        self.solve_assuming::<IntLiteral>(&[])
    }

    /// Solves the formula, under the given assumptions.
    ///
    /// # Panics
    /// As [solve](Solver::solve).
    pub fn solve_assuming<L: Literal>(
        &mut self,
        assumptions: &[L],
    ) -> Result<OptionalBool, Ipasir2Error> {
        // Safety: the bridge is live until the solver is dropped.
        let bridge = unsafe { self.bridge.as_ref() };
        let view = self.buffer.slice(assumptions)?;
        Self::solve_view(&self.entrypoints.functions, self.handle, bridge, view)
    }

    /// Solves the formula, under the assumptions from an iterator.
    ///
    /// # Panics
    /// As [solve](Solver::solve).
    pub fn solve_assuming_iter<L: Literal>(
        &mut self,
        assumptions: impl IntoIterator<Item = L>,
    ) -> Result<OptionalBool, Ipasir2Error> {
        // Safety: the bridge is live until the solver is dropped.
        let bridge = unsafe { self.bridge.as_ref() };
        let view = self.buffer.collect(assumptions)?;
        Self::solve_view(&self.entrypoints.functions, self.handle, bridge, view)
    }

    /// The value of a literal on the model found by the last solve.
    ///
    /// True if the literal is true, false if the literal is false, and none if the literal may be either.
    pub fn lit_value<L: Literal>(&self, literal: L) -> Result<OptionalBool, Ipasir2Error> {
        let literal = literal.to_wire();
        let mut result: i32 = 0;
        let status = unsafe { (self.functions().val)(self.handle, literal, &mut result) };
        check_status(status, "ipasir2_val")?;

        match result {
            0 => Ok(OptionalBool::none()),
            _ if result == literal => Ok(OptionalBool::new(true)),
            _ if result == literal.wrapping_neg() => Ok(OptionalBool::new(false)),
            _ => {
                log::error!(target: targets::FFI, "ipasir2_val wrote {result} for {literal}");
                Err(Ipasir2Error::protocol(
                    "ipasir2_val",
                    "Unknown truth value received from solver",
                ))
            }
        }
    }

    /// Whether the assumption was used to derive the unsatisfiability found by the last solve.
    pub fn assumption_failed<L: Literal>(&self, literal: L) -> Result<bool, Ipasir2Error> {
        let literal = literal.to_wire();
        let mut result: i32 = 0;
        let status = unsafe { (self.functions().failed)(self.handle, literal, &mut result) };
        check_status(status, "ipasir2_failed")?;

        match result {
            0 => Ok(false),
            1 => Ok(true),
            _ => {
                log::error!(target: targets::FFI, "ipasir2_failed wrote {result} for {literal}");
                Err(Ipasir2Error::protocol(
                    "ipasir2_failed",
                    "Unknown failed-assumption value received from solver",
                ))
            }
        }
    }
}

// Callbacks

impl<'cb> Solver<'cb> {
    /// Sets the terminate callback, replacing any existing callback.
    ///
    /// The closure is polled during a solve, and the solve stops when the closure returns true.
    /// Whether or not the call succeeds, any previous closure is never called again.
    pub fn set_terminate_callback(
        &mut self,
        callback: impl FnMut() -> bool + 'cb,
    ) -> Result<(), Ipasir2Error> {
        let bridge = self.bridge();
        bridge.replace_terminate(None);

        let status = unsafe {
            (self.functions().set_terminate)(
                self.handle,
                bridge.cookie(),
                Some(terminate_trampoline as TerminateCallback),
            )
        };
        check_status(status, "ipasir2_set_terminate")?;

        bridge.replace_terminate(Some(Box::new(callback)));
        log::debug!(target: targets::CALLBACK, "Terminate callback set");
        Ok(())
    }

    /// Clears the terminate callback.
    pub fn clear_terminate_callback(&mut self) -> Result<(), Ipasir2Error> {
        self.bridge().replace_terminate(None);

        let status = unsafe {
            (self.functions().set_terminate)(self.handle, std::ptr::null_mut(), None)
        };
        check_status(status, "ipasir2_set_terminate")?;

        log::debug!(target: targets::CALLBACK, "Terminate callback cleared");
        Ok(())
    }

    /// Sets the export callback, replacing any existing callback.
    ///
    /// The closure is given each clause learnt by the solver with at most `max_length` literals, as literals of type `L`.
    /// Whether or not the call succeeds, any previous closure is never called again.
    pub fn set_export_callback<L: Literal + 'cb>(
        &mut self,
        callback: impl FnMut(&[L]) + 'cb,
        max_length: i32,
    ) -> Result<(), Ipasir2Error> {
        let bridge = self.bridge();
        bridge.replace_export(None);

        let status = unsafe {
            (self.functions().set_export)(
                self.handle,
                bridge.cookie(),
                max_length,
                Some(export_trampoline as ExportCallback),
            )
        };
        check_status(status, "ipasir2_set_export")?;

        bridge.replace_export(Some(export_adapter(callback)));
        log::debug!(target: targets::CALLBACK, "Export callback set, up to length {max_length}");
        Ok(())
    }

    /// Clears the export callback.
    pub fn clear_export_callback(&mut self) -> Result<(), Ipasir2Error> {
        self.bridge().replace_export(None);

        let status = unsafe {
            (self.functions().set_export)(self.handle, std::ptr::null_mut(), 0, None)
        };
        check_status(status, "ipasir2_set_export")?;

        log::debug!(target: targets::CALLBACK, "Export callback cleared");
        Ok(())
    }
}

// Options

impl Solver<'_> {
    /// The options of the solver.
    pub fn options(&mut self) -> Result<&[SolverOption], Ipasir2Error> {
        if self.options.is_none() {
            let mut list: *const ipasir2_option = std::ptr::null();
            let status = unsafe { (self.functions().options)(self.handle, &mut list) };
            check_status(status, "ipasir2_options")?;

            // Safety: the list is owned by the solver, and so outlives the options.
            self.options = Some(unsafe { read_options(list) }?);
        }

        Ok(self.options.as_deref().unwrap_or_default())
    }

    /// The option with the given name.
    pub fn get_option(&mut self, name: &str) -> Result<SolverOption, Ipasir2Error> {
        match self.options()?.iter().find(|option| option.name == name) {
            Some(option) => Ok(option.clone()),
            None => {
                log::debug!(target: targets::OPTIONS, "Unknown option: {name}");
                Err(Ipasir2Error::new(format!(
                    "Option {name} is not supported by the solver"
                )))
            }
        }
    }

    /// Whether the solver has an option with the given name.
    pub fn has_option(&mut self, name: &str) -> Result<bool, Ipasir2Error> {
        Ok(self.options()?.iter().any(|option| option.name == name))
    }

    /// Sets the option to `value`, for the variable `index` if the option is indexed.
    ///
    /// The option must have been obtained from this solver.
    /// An option of some other solver is an error, and is never passed to the solver.
    pub fn set_option(
        &mut self,
        option: &SolverOption,
        value: i64,
        index: i64,
    ) -> Result<(), Ipasir2Error> {
        let handle = option.handle();
        if !self.options()?.iter().any(|known| known.handle() == handle) {
            log::warn!(target: targets::OPTIONS, "Option {} is not an option of the solver", option.name);
            return Err(Ipasir2Error::new(format!(
                "Option {} was not obtained from the solver",
                option.name
            )));
        }

        log::debug!(target: targets::OPTIONS, "Set {} to {value} at {index}", option.name);
        let status =
            unsafe { (self.functions().set_option)(self.handle, handle, value, index) };
        check_status(status, "ipasir2_set_option")
    }

    /// Sets the option with the given name, as [set_option](Solver::set_option).
    pub fn set_option_by_name(
        &mut self,
        name: &str,
        value: i64,
        index: i64,
    ) -> Result<(), Ipasir2Error> {
        let option = self.get_option(name)?;
        self.set_option(&option, value, index)
    }
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("handle", &self.handle)
            .field("options", &self.options.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl Drop for Solver<'_> {
    fn drop(&mut self) {
        let status = unsafe { (self.entrypoints.functions.release)(self.handle) };
        match check_status(status, "ipasir2_release") {
            Ok(()) => log::debug!(target: targets::FFI, "Released solver {:?}", self.handle),
            Err(e) => log::warn!(target: targets::FFI, "{e}"),
        }

        // Safety: the bridge was leaked on creation, and the released solver makes no further callbacks.
        drop(unsafe { Box::from_raw(self.bridge.as_ptr()) });
    }
}
