use std::{path::PathBuf, time::Duration};

pub const DETAILS: u8 = 0;

pub const THREADS: usize = 1;

/// What to do with the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Determine whether the formula is satisfiable.
    Solve,

    /// Find the literals true in every model.
    Backbones,

    /// Count the models of the formula.
    Count,

    /// List the options of the solver, without reading any formula.
    ListOptions,
}

/// A value for a solver option, given as `name=value[@index]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionAssignment {
    pub name: String,
    pub value: i64,
    pub index: i64,
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub library: PathBuf,
    pub files: Vec<PathBuf>,
    pub detail: u8,
    pub mode: Mode,
    pub options: Vec<OptionAssignment>,
    pub show_model: bool,
    pub threads: usize,
    pub time_limit: Option<Duration>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            library: PathBuf::default(),
            files: Vec::default(),
            detail: DETAILS,
            mode: Mode::Solve,
            options: Vec::default(),
            show_model: false,
            threads: THREADS,
            time_limit: None,
        }
    }
}
