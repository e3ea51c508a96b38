//! Loading of IPASIR-2 entry points from a library at runtime.
//!
//! Either every entry point is resolved, or loading fails.
//! The loaded [Library] must outlive every use of the entry points resolved from it, and is owned by the [Entrypoints](crate::api::Entrypoints) of an [Ipasir2](crate::Ipasir2).

use std::path::Path;

use libloading::Library;

use crate::{
    ipasir::ipasir_two::Ipasir2Functions, misc::log::targets, types::err::Ipasir2Error,
};

/// Opens the library at `path` and resolves every IPASIR-2 entry point.
pub fn load_library(path: &Path) -> Result<(Ipasir2Functions, Library), Ipasir2Error> {
    log::info!(target: targets::LOADER, "Loading {}", path.display());

    // Safety: loading a library runs its initialisation routines, which are trusted to be those of a solver.
    let library = match unsafe { Library::new(path) } {
        Ok(library) => library,
        Err(e) => {
            log::error!(target: targets::LOADER, "{e}");
            return Err(Ipasir2Error::new(format!("Could not open {}", path.display())));
        }
    };

    // Safety: each symbol is given the signature of the IPASIR-2 entry point of the same name.
    let functions = unsafe {
        Ipasir2Functions {
            signature: resolve(&library, path, "ipasir2_signature")?,
            init: resolve(&library, path, "ipasir2_init")?,
            release: resolve(&library, path, "ipasir2_release")?,
            options: resolve(&library, path, "ipasir2_options")?,
            set_option: resolve(&library, path, "ipasir2_set_option")?,
            add: resolve(&library, path, "ipasir2_add")?,
            solve: resolve(&library, path, "ipasir2_solve")?,
            val: resolve(&library, path, "ipasir2_val")?,
            failed: resolve(&library, path, "ipasir2_failed")?,
            set_terminate: resolve(&library, path, "ipasir2_set_terminate")?,
            set_export: resolve(&library, path, "ipasir2_set_export")?,
        }
    };

    Ok((functions, library))
}

/// The function pointer for `name`.
///
/// # Safety
/// `T` must be the type of the symbol, and the pointer must not be used after the library is dropped.
unsafe fn resolve<T: Copy>(library: &Library, path: &Path, name: &str) -> Result<T, Ipasir2Error> {
    match library.get::<T>(name.as_bytes()) {
        Ok(symbol) => Ok(*symbol),
        Err(e) => {
            log::error!(target: targets::LOADER, "{e}");
            Err(Ipasir2Error::new(format!(
                "Symbol {name} not found in {}",
                path.display()
            )))
        }
    }
}
