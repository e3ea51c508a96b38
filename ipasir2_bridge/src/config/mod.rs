/*!
Configuration of a solver, through the options a solver exposes.

Each option is described by a [SolverOption], which gives the name of the option, the bounds on its value, and the latest [State] of the solver in which it may be set.

Options are fetched from the solver on first use, and the list is kept for the lifetime of the solver.
The list is assumed fixed, and so is never fetched again.

```rust,ignore
let option = solver.get_option("seed")?;
assert!(option.permits(7));
solver.set_option(&option, 7, 0)?;
```

# Implementation details

The list written by `ipasir2_options` is terminated by a record with a null name.
The records are owned by the solver, and a [SolverOption] keeps the address of its record, as this is the handle passed back to `ipasir2_set_option`.
So, an option is only set on a solver whose list contains the record of the option.
*/

use std::ffi::{c_int, CStr};

use crate::{
    ipasir::ipasir_two::ipasir2_option,
    misc::log::targets,
    types::err::Ipasir2Error,
};

/// The state of a solver.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i32)]
pub enum State {
    /// Options may be set, and no clauses have been added.
    Config = 0,

    /// Clauses may be added.
    Input = 1,

    /// The last solve found the formula satisfiable.
    Sat = 2,

    /// The last solve found the formula unsatisfiable.
    Unsat = 3,

    /// A solve is in progress.
    Solving = 4,
}

impl State {
    pub fn from_raw(value: c_int) -> Option<Self> {
        match value {
            0 => Some(Self::Config),
            1 => Some(Self::Input),
            2 => Some(Self::Sat),
            3 => Some(Self::Unsat),
            4 => Some(Self::Solving),
            _ => None,
        }
    }

    pub fn as_raw(self) -> c_int {
        self as c_int
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Input => write!(f, "input"),
            Self::Sat => write!(f, "sat"),
            Self::Unsat => write!(f, "unsat"),
            Self::Solving => write!(f, "solving"),
        }
    }
}

/// An option of a solver.
#[derive(Clone, Debug)]
pub struct SolverOption {
    pub name: String,

    pub min: i64,

    pub max: i64,

    /// The latest state in which the option may be set.
    pub max_state: State,

    /// Whether the option may be used by automatic tuners.
    pub tunable: bool,

    /// Whether the option may be set per variable.
    pub indexed: bool,

    handle: *const ipasir2_option,
}

impl SolverOption {
    /// The option described by a record from the solver.
    ///
    /// # Safety
    /// The name of the record must be a valid C string.
    unsafe fn from_record(record: &ipasir2_option) -> Result<Self, Ipasir2Error> {
        let name = CStr::from_ptr(record.name).to_string_lossy().into_owned();

        let Some(max_state) = State::from_raw(record.max_state) else {
            return Err(Ipasir2Error::protocol(
                "ipasir2_options",
                format!("Unknown state {} for option {name}", record.max_state),
            ));
        };

        Ok(SolverOption {
            name,
            min: record.min,
            max: record.max,
            max_state,
            tunable: record.tunable != 0,
            indexed: record.indexed != 0,
            handle: record as *const ipasir2_option,
        })
    }

    /// The handle to pass when setting the option.
    pub fn handle(&self) -> *const ipasir2_option {
        self.handle
    }

    /// Whether `value` is within the bounds of the option.
    pub fn permits(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl std::fmt::Display for SolverOption {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} [{}, {}] until {}",
            self.name, self.min, self.max, self.max_state
        )?;
        if self.tunable {
            write!(f, ", tunable")?;
        }
        if self.indexed {
            write!(f, ", indexed")?;
        }
        Ok(())
    }
}

/// The options of a list terminated by a record with a null name.
///
/// # Safety
/// `list` must be null, or point to a terminated list of records which outlives the options.
pub(crate) unsafe fn read_options(
    list: *const ipasir2_option,
) -> Result<Vec<SolverOption>, Ipasir2Error> {
    let mut options = Vec::default();
    if list.is_null() {
        log::warn!(target: targets::OPTIONS, "Null option list");
        return Ok(options);
    }

    let mut record = list;
    while !(*record).name.is_null() {
        options.push(SolverOption::from_record(&*record)?);
        record = record.add(1);
    }

    log::debug!(target: targets::OPTIONS, "Read {} options", options.len());
    Ok(options)
}
