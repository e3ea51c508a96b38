//! Errors of the CLI.

use std::path::PathBuf;

use ipasir2_bridge::types::err::Ipasir2Error;

/// Failures while reading a DIMACS formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parse {
    /// The problem line is missing or malformed, noticed on the given line.
    ProblemSpecification(usize),

    /// The line could not be read.
    Line(usize),

    /// A token on the given line is not a literal.
    Literal { line: usize, token: String },

    /// The input ended within a clause.
    UnterminatedClause,
}

impl std::fmt::Display for Parse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ProblemSpecification(line) => {
                write!(f, "invalid header at line {line}")
            }
            Self::Line(line) => write!(f, "unable to read line {line}"),
            Self::Literal { line, token } => write!(f, "invalid literal '{token}' at line {line}"),
            Self::UnterminatedClause => write!(f, "unterminated clause"),
        }
    }
}

#[derive(Debug)]
pub enum Cli {
    /// A formula file could not be opened.
    Open(PathBuf),

    Parse(PathBuf, Parse),

    Solver(Ipasir2Error),

    /// A value outside the bounds of an option.
    OptionValue { name: String, value: i64 },

    /// A thread of the portfolio panicked.
    Portfolio,
}

impl From<Ipasir2Error> for Cli {
    fn from(e: Ipasir2Error) -> Self {
        Cli::Solver(e)
    }
}

impl std::fmt::Display for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Open(path) => write!(f, "Could not open {}", path.display()),
            Self::Parse(path, e) => write!(f, "Failed parsing {}: {e}", path.display()),
            Self::Solver(e) => write!(f, "Solver failure: {e}"),
            Self::OptionValue { name, value } => {
                write!(f, "The value {value} is out of bounds for the option {name}")
            }
            Self::Portfolio => write!(f, "A portfolio thread failed"),
        }
    }
}

impl std::error::Error for Cli {}
