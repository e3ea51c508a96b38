//! Helpers for tests of ipasir2_bridge against ipasir2_mock, and against the fixture libraries.

use std::{
    env::consts::{DLL_PREFIX, DLL_SUFFIX},
    path::PathBuf,
};

use ipasir2_bridge::{
    config::State,
    structures::literal::{Atom, Literal},
};
use ipasir2_mock::{Ipasir2Mock, MockOption};

/// Installs a logger, if the `log` feature is enabled.
pub fn init_logs() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Asserts the mock saw no unexpected calls, and that every expected call was made.
///
/// Solvers should be dropped before the check, as release is expected.
pub fn assert_mock_finished(mock: &Ipasir2Mock) {
    let failures = mock.failures();
    assert!(failures.is_empty(), "Mock failures: {failures:?}");
    assert!(!mock.has_outstanding_expects());
}

/// The path to a fixture library, built by cargo as a dependency of the tests.
///
/// Libraries are looked for alongside the test binary, with or without the hash cargo may add to the name.
///
/// # Panics
/// If the library can't be found.
pub fn fixture_library(name: &str) -> PathBuf {
    let exact = format!("{DLL_PREFIX}{name}{DLL_SUFFIX}");
    let hashed = format!("{DLL_PREFIX}{name}-");

    let exe = std::env::current_exe().expect("Path to the test binary");
    for dir in exe.ancestors().skip(1).take(2) {
        let path = dir.join(&exact);
        if path.exists() {
            return path;
        }

        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with(&hashed) && file_name.ends_with(DLL_SUFFIX) {
                return entry.path();
            }
        }
    }

    panic!("Test setup failed: no {exact} near {}", exe.display())
}

/// A pair of options, one per-variable.
pub fn test_options() -> Vec<MockOption> {
    vec![
        MockOption {
            name: "test_option_1".to_string(),
            min: -1000,
            max: 1000,
            max_state: State::Config,
            tunable: true,
            indexed: false,
        },
        MockOption {
            name: "test_option_2".to_string(),
            min: 0,
            max: 100,
            max_state: State::Solving,
            tunable: false,
            indexed: true,
        },
    ]
}

/// A literal in the style of MiniSAT, as twice the (zero-based) variable plus one if negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MiniLit(pub u32);

impl MiniLit {
    pub fn new(variable: Atom, negative: bool) -> Self {
        MiniLit(2 * variable + negative as u32)
    }
}

impl Literal for MiniLit {
    fn to_wire(self) -> i32 {
        let atom = (self.0 >> 1) as i32 + 1;
        match self.0 & 1 {
            0 => atom,
            _ => -atom,
        }
    }

    fn from_wire(wire: i32) -> Self {
        MiniLit::new(wire.unsigned_abs() - 1, wire < 0)
    }
}
