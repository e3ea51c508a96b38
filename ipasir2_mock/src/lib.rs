//! A scriptable mock of an IPASIR-2 solver.
//!
//! A test creates an [Ipasir2Mock], states the calls it expects each solver instance to receive, and then drives an [Ipasir2] built from [functions].
//!
//! ```rust
//! # use ipasir2_mock::{Ipasir2Mock, AddCall, SolveCall};
//! # use ipasir2_bridge::structures::optional_bool::OptionalBool;
//! let mock = Ipasir2Mock::new();
//! let ipasir2 = mock.ipasir2();
//!
//! mock.expect_init_call(1);
//! mock.expect_call(1, AddCall { clause: vec![1, 2], ..Default::default() });
//! mock.expect_call(1, SolveCall { result: 10, ..Default::default() });
//!
//! let mut solver = ipasir2.create_solver().unwrap();
//! solver.add(&[1, 2]).unwrap();
//! assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
//! drop(solver);
//!
//! assert!(mock.failures().is_empty());
//! assert!(!mock.has_outstanding_expects());
//! ```
//!
//! # Implementation details
//!
//! The state of the mock is thread local, so tests running in parallel each see their own mock.
//!
//! Unwinding out of an IPASIR-2 function is not permitted, and so the mock never panics when called through an entry point.
//! Instead, an unexpected call is recorded as a failure, the entry point returns [IPASIR2_E_UNKNOWN], and the test inspects [failures](Ipasir2Mock::failures).
//! By contrast, the methods of [Ipasir2Mock] are called directly by a test, and panic on misuse.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    ffi::{c_char, c_int, c_void, CStr, CString},
    panic::{catch_unwind, AssertUnwindSafe},
};

use ipasir2_bridge::{
    config::State,
    ipasir::ipasir_two::{ipasir2_option, ExportCallback, Ipasir2Functions, TerminateCallback},
    structures::clause::Redundancy,
    Ipasir2,
};

mod calls;
pub use calls::*;

/// The status of a call which failed for an unknown reason.
pub const IPASIR2_E_UNKNOWN: c_int = 1;

/// The log target of the mock.
const MOCK: &str = "mock";

/// The identifier of a mock solver instance, which doubles as its handle.
pub type InstanceId = usize;

/// An option of a mock solver.
#[derive(Clone, Debug)]
pub struct MockOption {
    pub name: String,
    pub min: i64,
    pub max: i64,
    pub max_state: State,
    pub tunable: bool,
    pub indexed: bool,
}

/// The option records of an instance, terminated by a record with a null name.
struct OptionRecords {
    /// Owners of the names pointed to by `records`.
    _names: Vec<CString>,
    records: Vec<ipasir2_option>,
}

impl OptionRecords {
    fn new(options: &[MockOption]) -> Self {
        let names: Vec<CString> = options
            .iter()
            .map(|option| CString::new(option.name.replace('\0', "")).unwrap_or_default())
            .collect();

        let mut records: Vec<ipasir2_option> = options
            .iter()
            .zip(&names)
            .map(|(option, name)| ipasir2_option {
                name: name.as_ptr(),
                min: option.min,
                max: option.max,
                max_state: option.max_state.as_raw(),
                tunable: option.tunable as c_int,
                indexed: option.indexed as c_int,
                handle: std::ptr::null(),
            })
            .collect();

        records.push(ipasir2_option {
            name: std::ptr::null(),
            min: 0,
            max: 0,
            max_state: 0,
            tunable: 0,
            indexed: 0,
            handle: std::ptr::null(),
        });

        OptionRecords {
            _names: names,
            records,
        }
    }
}

#[derive(Default)]
struct Instance {
    initialised: bool,
    released: bool,
    expected: VecDeque<Call>,
    options: Option<OptionRecords>,
    terminate: Option<(TerminateCallback, *mut c_void)>,
    export: Option<(ExportCallback, *mut c_void)>,
}

impl Instance {
    fn alive(&self) -> bool {
        self.initialised && !self.released
    }
}

/// How the next call to `ipasir2_init` should behave.
struct NextInit {
    id: Option<InstanceId>,
    status: c_int,
}

#[derive(Default)]
struct MockState {
    instances: HashMap<InstanceId, Instance>,
    next_init: Option<NextInit>,
    signature: Option<(CString, c_int)>,
    failures: Vec<String>,
}

impl MockState {
    fn instance(&mut self, solver: *mut c_void) -> Result<&mut Instance, String> {
        match self.instances.get_mut(&(solver as InstanceId)) {
            Some(instance) => Ok(instance),
            None => Err("IPASIR2 function called for unknown solver object".to_string()),
        }
    }

    fn pop_expected(&mut self, solver: *mut c_void, function: &str) -> Result<Call, String> {
        let instance = self.instance(solver)?;
        if !instance.alive() {
            return Err(format!(
                "{function} called for released or not-yet-initialized solver object"
            ));
        }
        match instance.expected.pop_front() {
            Some(call) => Ok(call),
            None => Err(format!("{function} called, but no further calls expected")),
        }
    }
}

thread_local! {
    static STATE: RefCell<Option<MockState>> = const { RefCell::new(None) };
}

/// Applies `f` to the state of the mock, recording any error as a failure.
///
/// On failure, or if `f` panics, returns `fallback`.
fn with_state<R>(
    function: &'static str,
    fallback: R,
    f: impl FnOnce(&mut MockState) -> Result<R, String>,
) -> R {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        STATE.with(|state| match state.borrow_mut().as_mut() {
            None => Err(format!("{function} called, but no mock exists")),
            Some(state) => f(state).map_err(|message| {
                state.failures.push(message.clone());
                message
            }),
        })
    }));

    match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(message)) => {
            log::error!(target: MOCK, "{message}");
            fallback
        }
        Err(_) => {
            log::error!(target: MOCK, "{function} panicked inside the mock");
            fallback
        }
    }
}

/// Runs `f` on the state of the mock, for use from test code.
///
/// # Panics
/// If no mock exists.
fn state_mut<R>(f: impl FnOnce(&mut MockState) -> R) -> R {
    STATE.with(|state| match state.borrow_mut().as_mut() {
        Some(state) => f(state),
        None => panic!("Test setup failed: no ipasir2 mock exists"),
    })
}

/// A handle to the mock on the current thread.
///
/// The mock exists until the handle is dropped.
pub struct Ipasir2Mock {
    /// Ties the handle to the thread of its state.
    _not_send: std::marker::PhantomData<*const ()>,
}

impl Ipasir2Mock {
    /// A fresh mock for the current thread.
    ///
    /// # Panics
    /// If a mock already exists on the current thread.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        STATE.with(|state| {
            let mut state = state.borrow_mut();
            if state.is_some() {
                panic!("Test setup failed: an ipasir2 mock already exists");
            }
            *state = Some(MockState::default());
        });

        Ipasir2Mock {
            _not_send: std::marker::PhantomData,
        }
    }

    /// An [Ipasir2] whose solvers are instances of the mock.
    pub fn ipasir2(&self) -> Ipasir2 {
        Ipasir2::from_functions(functions())
    }

    /// Expects a call to `ipasir2_init`, creating the instance `id`.
    ///
    /// # Panics
    /// If an expected init call is outstanding, or `id` has been used.
    pub fn expect_init_call(&self, id: InstanceId) {
        state_mut(|state| {
            if state.next_init.is_some() {
                panic!("A new instance ID has been set, but ipasir2_init() has not been called since setting the previous ID");
            }
            if state.instances.get(&id).is_some_and(|instance| instance.initialised) {
                panic!("Test setup failed: the instance ID {id} has already been used");
            }
            state.next_init = Some(NextInit {
                id: Some(id),
                status: 0,
            });
        })
    }

    /// Expects a call to `ipasir2_init`, which fails with `status`.
    pub fn expect_init_call_and_fail(&self, status: c_int) {
        state_mut(|state| state.next_init = Some(NextInit { id: None, status }))
    }

    /// Expects a call, after every call previously expected for the instance.
    pub fn expect_call(&self, id: InstanceId, call: impl Into<Call>) {
        let call = call.into();
        state_mut(|state| {
            state
                .instances
                .entry(id)
                .or_default()
                .expected
                .push_back(call)
        })
    }

    /// The signature, and the status of calls to `ipasir2_signature`.
    pub fn set_signature(&self, signature: &str, status: c_int) {
        let signature = CString::new(signature.replace('\0', "")).unwrap_or_default();
        state_mut(|state| state.signature = Some((signature, status)))
    }

    /// The options of the instance `id`.
    pub fn set_options(&self, id: InstanceId, options: &[MockOption]) {
        let records = OptionRecords::new(options);
        state_mut(|state| state.instances.entry(id).or_default().options = Some(records))
    }

    /// The handle of the instance `id`.
    pub fn handle(&self, id: InstanceId) -> *mut c_void {
        id as *mut c_void
    }

    /// Calls the terminate callback registered for the instance, as the solver would.
    ///
    /// # Panics
    /// If no callback is registered, or the callback does not return `expected`.
    pub fn simulate_terminate_callback_call(&self, id: InstanceId, expected: c_int) {
        let registered = state_mut(|state| {
            state
                .instances
                .get(&id)
                .and_then(|instance| instance.terminate)
        });

        let Some((callback, data)) = registered else {
            panic!("Currently no terminate callback registered for instance {id}");
        };

        let result = callback(data);
        assert_eq!(result, expected, "Terminate callback returned unexpected result");
    }

    /// Calls the export callback registered for the instance, as the solver would.
    ///
    /// The clause must be terminated by a zero.
    ///
    /// # Panics
    /// If no callback is registered, or the clause is not terminated.
    pub fn simulate_export_callback_call(&self, id: InstanceId, clause: &[i32]) {
        assert_eq!(clause.last(), Some(&0), "Exported clauses are zero terminated");

        let registered = state_mut(|state| {
            state
                .instances
                .get(&id)
                .and_then(|instance| instance.export)
        });

        let Some((callback, data)) = registered else {
            panic!("Currently no export callback registered for instance {id}");
        };

        callback(data, clause.as_ptr());
    }

    /// Whether an init call, a call to some instance, or the release of some instance, is outstanding.
    pub fn has_outstanding_expects(&self) -> bool {
        state_mut(|state| {
            state.next_init.is_some()
                || state.instances.values().any(|instance| {
                    !instance.expected.is_empty() || (instance.initialised && !instance.released)
                })
        })
    }

    /// Messages for each unexpected call to the mock.
    pub fn failures(&self) -> Vec<String> {
        state_mut(|state| state.failures.clone())
    }
}

impl Drop for Ipasir2Mock {
    fn drop(&mut self) {
        let _ = STATE.try_with(|state| state.borrow_mut().take());
    }
}

/// The table of mock entry points.
pub fn functions() -> Ipasir2Functions {
    Ipasir2Functions {
        signature: mock_signature,
        init: mock_init,
        release: mock_release,
        options: mock_options,
        set_option: mock_set_option,
        add: mock_add,
        solve: mock_solve,
        val: mock_val,
        failed: mock_failed,
        set_terminate: mock_set_terminate,
        set_export: mock_set_export,
    }
}

/// # Safety
/// `data` must point to `len` literals, or `len` must be zero.
unsafe fn literals(data: *const i32, len: i32) -> Result<Vec<i32>, String> {
    if data.is_null() {
        return Err("Null pointer received for literals".to_string());
    }
    match usize::try_from(len) {
        Ok(len) => Ok(std::slice::from_raw_parts(data, len).to_vec()),
        Err(_) => Err(format!("Negative length received for literals: {len}")),
    }
}

unsafe extern "C" fn mock_signature(signature: *mut *const c_char) -> c_int {
    with_state("ipasir2_signature", IPASIR2_E_UNKNOWN, |state| {
        match &state.signature {
            Some((name, status)) => {
                *signature = name.as_ptr();
                Ok(*status)
            }
            None => Err("Unexpected call of ipasir2_signature()".to_string()),
        }
    })
}

unsafe extern "C" fn mock_init(solver: *mut *mut c_void) -> c_int {
    with_state("ipasir2_init", IPASIR2_E_UNKNOWN, |state| {
        let Some(next) = state.next_init.take() else {
            return Err("ipasir2_init() has been called unexpectedly".to_string());
        };

        if let Some(id) = next.id {
            let instance = state.instances.entry(id).or_default();
            if instance.initialised {
                return Err("IPASIR2 solver initialized twice".to_string());
            }
            instance.initialised = true;
            *solver = id as *mut c_void;
        }

        Ok(next.status)
    })
}

unsafe extern "C" fn mock_release(solver: *mut c_void) -> c_int {
    with_state("ipasir2_release", IPASIR2_E_UNKNOWN, |state| {
        let instance = state.instance(solver)?;
        if !instance.alive() {
            return Err("IPASIR2 solver released twice, or released before initialized".to_string());
        }
        instance.released = true;
        instance.terminate = None;
        instance.export = None;

        if !instance.expected.is_empty() {
            return Err(
                "ipasir2_release() has been called, but the instance has outstanding expected calls"
                    .to_string(),
            );
        }
        Ok(0)
    })
}

unsafe extern "C" fn mock_add(
    solver: *mut c_void,
    clause: *const i32,
    len: i32,
    redundancy: c_int,
) -> c_int {
    with_state("ipasir2_add", IPASIR2_E_UNKNOWN, |state| {
        let Call::Add(expected) = state.pop_expected(solver, "ipasir2_add")? else {
            return Err("ipasir2_add called, but a different call was expected".to_string());
        };

        let actual = literals(clause, len)?;
        if expected.clause != actual {
            return Err(format!(
                "ipasir2_add(): unexpected clause {actual:?}, expected {:?}",
                expected.clause
            ));
        }
        if Redundancy::from_raw(redundancy) != Some(expected.redundancy) {
            return Err(format!("ipasir2_add(): unexpected redundancy {redundancy}"));
        }
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_solve(
    solver: *mut c_void,
    result: *mut c_int,
    assumptions: *const i32,
    len: i32,
) -> c_int {
    let checked = with_state("ipasir2_solve", None, |state| {
        let Call::Solve(expected) = state.pop_expected(solver, "ipasir2_solve")? else {
            return Err("ipasir2_solve called, but a different call was expected".to_string());
        };

        let actual = literals(assumptions, len)?;
        if expected.assumptions != actual {
            return Err(format!(
                "ipasir2_solve(): unexpected assumptions {actual:?}, expected {:?}",
                expected.assumptions
            ));
        }

        let instance = state.instance(solver)?;
        Ok(Some((expected, instance.terminate, instance.export)))
    });

    let Some((expected, terminate, export)) = checked else {
        return IPASIR2_E_UNKNOWN;
    };

    // Callbacks are made without a borrow of the state, as a callback may call back into the mock.
    if let Some((callback, data)) = export {
        for clause in &expected.exports {
            let mut terminated = clause.clone();
            terminated.push(0);
            callback(data, terminated.as_ptr());
        }
    }

    let mut stopped = false;
    if let Some((callback, data)) = terminate {
        for _ in 0..expected.terminate_polls {
            if callback(data) != 0 {
                stopped = true;
                break;
            }
        }
    }

    *result = if stopped { 0 } else { expected.result };
    expected.status
}

unsafe extern "C" fn mock_val(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int {
    with_state("ipasir2_val", IPASIR2_E_UNKNOWN, |state| {
        let Call::Val(expected) = state.pop_expected(solver, "ipasir2_val")? else {
            return Err("ipasir2_val called, but a different call was expected".to_string());
        };
        if expected.literal != lit {
            return Err(format!("ipasir2_val(): unexpected literal {lit}"));
        }
        *result = expected.result;
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_failed(solver: *mut c_void, lit: i32, result: *mut i32) -> c_int {
    with_state("ipasir2_failed", IPASIR2_E_UNKNOWN, |state| {
        let Call::Failed(expected) = state.pop_expected(solver, "ipasir2_failed")? else {
            return Err("ipasir2_failed called, but a different call was expected".to_string());
        };
        if expected.literal != lit {
            return Err(format!("ipasir2_failed(): unexpected literal {lit}"));
        }
        *result = expected.result;
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_set_terminate(
    solver: *mut c_void,
    data: *mut c_void,
    callback: Option<TerminateCallback>,
) -> c_int {
    with_state("ipasir2_set_terminate", IPASIR2_E_UNKNOWN, |state| {
        let Call::SetTerminate(expected) = state.pop_expected(solver, "ipasir2_set_terminate")? else {
            return Err("ipasir2_set_terminate called, but a different call was expected".to_string());
        };

        let instance = state.instance(solver)?;
        match (expected.set, callback) {
            (true, Some(callback)) if !data.is_null() => {
                instance.terminate = Some((callback, data));
            }
            (true, _) => {
                return Err(
                    "ipasir2_set_terminate(): expected to get a callback, but it was cleared"
                        .to_string(),
                )
            }
            (false, None) if data.is_null() => {
                if expected.status == 0 {
                    instance.terminate = None;
                }
            }
            (false, _) => {
                return Err(
                    "ipasir2_set_terminate(): expected the callback to be cleared, but it was set"
                        .to_string(),
                )
            }
        }
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_set_export(
    solver: *mut c_void,
    data: *mut c_void,
    max_length: i32,
    callback: Option<ExportCallback>,
) -> c_int {
    with_state("ipasir2_set_export", IPASIR2_E_UNKNOWN, |state| {
        let Call::SetExport(expected) = state.pop_expected(solver, "ipasir2_set_export")? else {
            return Err("ipasir2_set_export called, but a different call was expected".to_string());
        };

        if expected.max_length != max_length {
            return Err(format!(
                "ipasir2_set_export(): unexpected max clause length {max_length}"
            ));
        }

        let instance = state.instance(solver)?;
        match (expected.set, callback) {
            (true, Some(callback)) if !data.is_null() => {
                instance.export = Some((callback, data));
            }
            (true, _) => {
                return Err(
                    "ipasir2_set_export(): expected to get a callback, but it was cleared"
                        .to_string(),
                )
            }
            (false, None) if data.is_null() => {
                if expected.status == 0 {
                    instance.export = None;
                }
            }
            (false, _) => {
                return Err(
                    "ipasir2_set_export(): expected the callback to be cleared, but it was set"
                        .to_string(),
                )
            }
        }
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_options(solver: *mut c_void, options: *mut *const ipasir2_option) -> c_int {
    with_state("ipasir2_options", IPASIR2_E_UNKNOWN, |state| {
        let Call::Options(expected) = state.pop_expected(solver, "ipasir2_options")? else {
            return Err("ipasir2_options called, but a different call was expected".to_string());
        };

        let instance = state.instance(solver)?;
        let Some(records) = &instance.options else {
            return Err("ipasir2_options(): no options set for the instance".to_string());
        };
        *options = records.records.as_ptr();
        Ok(expected.status)
    })
}

unsafe extern "C" fn mock_set_option(
    solver: *mut c_void,
    handle: *const ipasir2_option,
    value: i64,
    index: i64,
) -> c_int {
    with_state("ipasir2_set_option", IPASIR2_E_UNKNOWN, |state| {
        let Call::SetOption(expected) = state.pop_expected(solver, "ipasir2_set_option")? else {
            return Err("ipasir2_set_option called, but a different call was expected".to_string());
        };

        if handle.is_null() || (*handle).name.is_null() {
            return Err("ipasir2_set_option(): null option handle".to_string());
        }
        let name = CStr::from_ptr((*handle).name).to_string_lossy();
        if name != expected.name {
            return Err(format!("ipasir2_set_option(): unexpected name {name}"));
        }
        if value != expected.value {
            return Err(format!("ipasir2_set_option(): unexpected value {value}"));
        }
        if index != expected.index {
            return Err(format!("ipasir2_set_option(): unexpected index {index}"));
        }
        Ok(expected.status)
    })
}
