//! The entry point of the library: a table of IPASIR-2 functions, from which solvers are created.
//!
//! An [Ipasir2] is obtained in one of three ways:
//! - [linked](Ipasir2::linked), using symbols resolved at link time (requires the `linked` feature).
//! - [load](Ipasir2::load), resolving symbols from a library at runtime.
//! - [from_functions](Ipasir2::from_functions), from a table built by hand (e.g. a mock).
//!
//! Whichever is used, solvers are created in the same way, through [create_solver](Ipasir2::create_solver).
//!
//! An [Ipasir2] is cheap to clone and may be sent between threads.
//! If loaded from a library, the library is kept open until every clone, and every solver created from a clone, has been dropped.

use std::{
    ffi::{c_char, CStr},
    path::Path,
    sync::Arc,
};

use libloading::Library;

use crate::{
    ipasir::{ipasir_two::Ipasir2Functions, loader::load_library},
    misc::log::targets,
    solver::Solver,
    types::err::{check_status, Ipasir2Error},
};

/// A table of entry points, together with the library the entry points were resolved from (if any).
#[derive(Debug)]
pub struct Entrypoints {
    pub functions: Ipasir2Functions,

    /// Dropped after every solver using `functions` has been released.
    _library: Option<Library>,
}

/// A source of solvers.
#[derive(Clone, Debug)]
pub struct Ipasir2 {
    entrypoints: Arc<Entrypoints>,
}

impl Ipasir2 {
    /// Solvers using the IPASIR-2 symbols the binary was linked with.
    #[cfg(feature = "linked")]
    pub fn linked() -> Self {
        Self::from_functions(Ipasir2Functions::linked())
    }

    /// Solvers using the IPASIR-2 symbols of the library at `path`.
    ///
    /// Fails if the library can't be opened, or if any entry point is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Ipasir2Error> {
        let (functions, library) = load_library(path.as_ref())?;
        Ok(Ipasir2 {
            entrypoints: Arc::new(Entrypoints {
                functions,
                _library: Some(library),
            }),
        })
    }

    /// Solvers using the given table of entry points.
    pub fn from_functions(functions: Ipasir2Functions) -> Self {
        Ipasir2 {
            entrypoints: Arc::new(Entrypoints {
                functions,
                _library: None,
            }),
        }
    }

    /// The name and version of the solver.
    pub fn signature(&self) -> Result<String, Ipasir2Error> {
        let mut signature: *const c_char = std::ptr::null();
        let status = unsafe { (self.entrypoints.functions.signature)(&mut signature) };
        check_status(status, "ipasir2_signature")?;

        if signature.is_null() {
            return Err(Ipasir2Error::protocol(
                "ipasir2_signature",
                "Null signature received from solver",
            ));
        }

        // Safety: a non-null signature is a C string owned by the solver library.
        let signature = unsafe { CStr::from_ptr(signature) }.to_string_lossy().into_owned();
        log::info!(target: targets::FFI, "Signature: {signature}");
        Ok(signature)
    }

    /// A fresh solver.
    pub fn create_solver<'cb>(&self) -> Result<Solver<'cb>, Ipasir2Error> {
        Solver::new(self.entrypoints.clone())
    }
}
