//! A small IPASIR-2 solver, built as a shared library.
//!
//! Satisfiability is decided by enumerating every assignment to the atoms of the formula, and so only formulas over at most [MAX_ATOMS] atoms are supported.
//! Before each assignment is checked the terminate callback (if any) is polled.
//!
//! The solver has no options, and never exports a clause.
//! After an unsatisfiable solve every assumption of the solve is reported as failed.
//!
//! Nothing here is meant to be fast. The library exists so the loading of a solver library may be tested against a solver which actually solves.

use std::ffi::{c_char, c_int, c_void, CStr};

use ipasir2_bridge::{
    ipasir::ipasir_two::{
        ipasir2_option, ExportCallback, TerminateCallback, IPASIR2_E_OK, IPASIR2_SATISFIABLE,
        IPASIR2_UNSATISFIABLE,
    },
    types::err::ErrorCode,
};

/// The most atoms of a formula.
pub const MAX_ATOMS: u32 = 20;

pub const SIGNATURE: &CStr = c"ipasir2_fixture 0.1.0";

/// The result of a solve which was stopped, or of no solve.
const UNKNOWN: c_int = 0;

struct Fixture {
    clauses: Vec<Vec<i32>>,

    /// The assumptions of the last solve.
    assumptions: Vec<i32>,

    /// The value of each atom on the model found by the last solve, indexed from atom 1.
    model: Vec<bool>,

    result: c_int,

    /// An empty list of options.
    options: [ipasir2_option; 1],

    terminate: Option<(TerminateCallback, *mut c_void)>,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            clauses: Vec::default(),
            assumptions: Vec::default(),
            model: Vec::default(),
            result: UNKNOWN,
            options: [ipasir2_option {
                name: std::ptr::null(),
                min: 0,
                max: 0,
                max_state: 0,
                tunable: 0,
                indexed: 0,
                handle: std::ptr::null(),
            }],
            terminate: None,
        }
    }

    fn solve(&mut self, assumptions: Vec<i32>) -> Result<c_int, ErrorCode> {
        let atoms = self
            .clauses
            .iter()
            .flatten()
            .chain(&assumptions)
            .map(|literal| literal.unsigned_abs())
            .max()
            .unwrap_or(0);
        if atoms > MAX_ATOMS {
            return Err(ErrorCode::Unsupported);
        }

        self.model.clear();
        self.assumptions = assumptions;
        self.result = UNKNOWN;

        for assignment in 0..(1_u32 << atoms) {
            if let Some((callback, data)) = self.terminate {
                if callback(data) != 0 {
                    return Ok(UNKNOWN);
                }
            }

            let value = |literal: &i32| {
                let atom_value = (assignment >> (literal.unsigned_abs() - 1)) & 1 == 1;
                atom_value == (*literal > 0)
            };

            if self.assumptions.iter().all(value)
                && self.clauses.iter().all(|clause| clause.iter().any(value))
            {
                self.model = (0..atoms).map(|atom| (assignment >> atom) & 1 == 1).collect();
                self.result = IPASIR2_SATISFIABLE;
                return Ok(self.result);
            }
        }

        self.result = IPASIR2_UNSATISFIABLE;
        Ok(self.result)
    }

    fn val(&self, literal: i32) -> Result<i32, ErrorCode> {
        if self.result != IPASIR2_SATISFIABLE {
            return Err(ErrorCode::InvalidState);
        }
        if literal == 0 {
            return Err(ErrorCode::InvalidArgument);
        }
        let index = literal.unsigned_abs() as usize - 1;
        match self.model.get(index) {
            Some(&value) if value == (literal > 0) => Ok(literal),
            Some(_) => Ok(-literal),
            None => Ok(0),
        }
    }

    fn failed(&self, literal: i32) -> Result<i32, ErrorCode> {
        if self.result != IPASIR2_UNSATISFIABLE {
            return Err(ErrorCode::InvalidState);
        }
        Ok(self.assumptions.contains(&literal) as i32)
    }
}

fn status(result: Result<(), ErrorCode>) -> c_int {
    match result {
        Ok(()) => IPASIR2_E_OK,
        Err(code) => code.as_raw(),
    }
}

/// # Safety
/// `solver` must be null, or a solver from `ipasir2_init` which has not been released.
unsafe fn fixture<'a>(solver: *mut c_void) -> Result<&'a mut Fixture, ErrorCode> {
    (solver as *mut Fixture)
        .as_mut()
        .ok_or(ErrorCode::InvalidArgument)
}

/// # Safety
/// `data` must point to `len` literals, unless `len` is zero.
unsafe fn literals(data: *const i32, len: i32) -> Result<Vec<i32>, ErrorCode> {
    let Ok(len) = usize::try_from(len) else {
        return Err(ErrorCode::InvalidArgument);
    };
    if len == 0 {
        return Ok(Vec::default());
    }
    if data.is_null() {
        return Err(ErrorCode::InvalidArgument);
    }
    let literals = std::slice::from_raw_parts(data, len);
    match literals.contains(&0) || literals.contains(&i32::MIN) {
        true => Err(ErrorCode::InvalidArgument),
        false => Ok(literals.to_vec()),
    }
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_signature(signature: *mut *const c_char) -> c_int {
    if signature.is_null() {
        return ErrorCode::InvalidArgument.as_raw();
    }
    *signature = SIGNATURE.as_ptr();
    IPASIR2_E_OK
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_init(solver: *mut *mut c_void) -> c_int {
    if solver.is_null() {
        return ErrorCode::InvalidArgument.as_raw();
    }
    *solver = Box::into_raw(Box::new(Fixture::new())) as *mut c_void;
    IPASIR2_E_OK
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_release(solver: *mut c_void) -> c_int {
    if solver.is_null() {
        return ErrorCode::InvalidArgument.as_raw();
    }
    drop(Box::from_raw(solver as *mut Fixture));
    IPASIR2_E_OK
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_options(
    solver: *mut c_void,
    options: *mut *const ipasir2_option,
) -> c_int {
    status(fixture(solver).map(|fixture| *options = fixture.options.as_ptr()))
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_option(
    _solver: *mut c_void,
    _handle: *const ipasir2_option,
    _value: i64,
    _index: i64,
) -> c_int {
    ErrorCode::UnsupportedOption.as_raw()
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_add(
    solver: *mut c_void,
    clause: *const i32,
    len: i32,
    _redundancy: c_int,
) -> c_int {
    status(fixture(solver).and_then(|fixture| {
        fixture.clauses.push(literals(clause, len)?);
        fixture.result = UNKNOWN;
        Ok(())
    }))
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_solve(
    solver: *mut c_void,
    result: *mut c_int,
    assumptions: *const i32,
    len: i32,
) -> c_int {
    status(fixture(solver).and_then(|fixture| {
        *result = fixture.solve(literals(assumptions, len)?)?;
        Ok(())
    }))
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_val(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int {
    status(fixture(solver).and_then(|fixture| {
        *result = fixture.val(lit)?;
        Ok(())
    }))
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_failed(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int {
    status(fixture(solver).and_then(|fixture| {
        *result = fixture.failed(lit)?;
        Ok(())
    }))
}

#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_terminate(
    solver: *mut c_void,
    data: *mut c_void,
    callback: Option<TerminateCallback>,
) -> c_int {
    status(fixture(solver).map(|fixture| {
        fixture.terminate = callback.map(|callback| (callback, data));
    }))
}

/// As no clause is ever exported, the callback is not kept.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_export(
    solver: *mut c_void,
    _data: *mut c_void,
    _max_length: i32,
    _callback: Option<ExportCallback>,
) -> c_int {
    status(fixture(solver).map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(clauses: &[&[i32]], assumptions: &[i32]) -> Fixture {
        let mut fixture = Fixture::new();
        fixture.clauses = clauses.iter().map(|clause| clause.to_vec()).collect();
        fixture.solve(assumptions.to_vec()).unwrap();
        fixture
    }

    #[test]
    fn satisfiable() {
        let fixture = solve(&[&[1, 2, 3], &[-1], &[-2]], &[]);

        assert_eq!(fixture.result, IPASIR2_SATISFIABLE);
        assert_eq!(fixture.val(1), Ok(-1));
        assert_eq!(fixture.val(-2), Ok(-2));
        assert_eq!(fixture.val(3), Ok(3));
        assert_eq!(fixture.val(4), Ok(0));
        assert_eq!(fixture.failed(1), Err(ErrorCode::InvalidState));
    }

    #[test]
    fn unsatisfiable_under_assumptions() {
        let fixture = solve(&[&[1, 2], &[-1]], &[-2, 3]);

        assert_eq!(fixture.result, IPASIR2_UNSATISFIABLE);
        assert_eq!(fixture.failed(-2), Ok(1));
        assert_eq!(fixture.failed(2), Ok(0));
        assert_eq!(fixture.val(1), Err(ErrorCode::InvalidState));
    }

    #[test]
    fn empty_clause() {
        let fixture = solve(&[&[]], &[]);
        assert_eq!(fixture.result, IPASIR2_UNSATISFIABLE);
    }

    #[test]
    fn too_many_atoms() {
        let mut fixture = Fixture::new();
        fixture.clauses.push(vec![MAX_ATOMS as i32 + 1]);
        assert_eq!(fixture.solve(Vec::default()), Err(ErrorCode::Unsupported));
    }
}
