//! The things the CLI may do with a formula.

use ipasir2_bridge::{
    structures::optional_bool::OptionalBool, types::err::Ipasir2Error, Ipasir2, Solver,
};

use crate::{config_io::CliConfig, dimacs::Formula, err};

pub mod backbones;
pub mod count;
pub mod solve;

/// The outcome of a mode, as reported on exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl From<OptionalBool> for Report {
    fn from(result: OptionalBool) -> Self {
        result.map(Report::Satisfiable, Report::Unsatisfiable, Report::Unknown)
    }
}

impl Report {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Unknown => 30,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Sets the configured options on a fresh solver, and then adds the formula.
pub fn build_solver<'cb>(
    api: &Ipasir2,
    formula: &Formula,
    config: &CliConfig,
) -> Result<Solver<'cb>, err::Cli> {
    let mut solver = api.create_solver()?;

    for assignment in &config.options {
        let option = solver.get_option(&assignment.name)?;
        if !option.permits(assignment.value) {
            return Err(err::Cli::OptionValue {
                name: assignment.name.clone(),
                value: assignment.value,
            });
        }
        solver.set_option(&option, assignment.value, assignment.index)?;
    }

    for clause in &formula.clauses {
        solver.add(clause)?;
    }

    Ok(solver)
}

/// The literals assigned by the last solve, for atoms up to `atoms`.
pub fn assignment(solver: &Solver, atoms: i32) -> Result<Vec<i32>, Ipasir2Error> {
    let mut literals = Vec::default();
    for atom in 1..=atoms {
        match solver.lit_value(atom)?.as_option() {
            Some(true) => literals.push(atom),
            Some(false) => literals.push(-atom),
            None => {}
        }
    }
    Ok(literals)
}

pub fn literals_string(literals: &[i32]) -> String {
    literals
        .iter()
        .map(|literal| format!("{literal} "))
        .collect::<String>()
}

/// Lists the options of a fresh solver.
pub fn list_options(api: &Ipasir2) -> Result<(), err::Cli> {
    let mut solver = api.create_solver()?;
    let options = solver.options()?;

    println!("c {} options", options.len());
    for option in options {
        println!("c {option}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ipasir2_mock::{Ipasir2Mock, ValCall};

    use super::*;

    #[test]
    fn assignment_skips_unassigned_atoms() {
        let mock = Ipasir2Mock::new();
        let api = mock.ipasir2();

        mock.expect_init_call(1);
        for (literal, result) in [(1, 1), (2, 0), (3, -3)] {
            mock.expect_call(
                1,
                ValCall {
                    literal,
                    result,
                    ..Default::default()
                },
            );
        }

        let solver = api.create_solver().unwrap();
        assert_eq!(assignment(&solver, 3).unwrap(), vec![1, -3]);
        assert_eq!(literals_string(&[1, -3]), "1 -3 ");

        drop(solver);
        assert!(mock.failures().is_empty());
        assert!(!mock.has_outstanding_expects());
    }

    #[test]
    fn reports() {
        assert_eq!(Report::from(OptionalBool::new(true)), Report::Satisfiable);
        assert_eq!(Report::from(OptionalBool::none()).exit_code(), 30);
        assert_eq!(Report::Unsatisfiable.to_string(), "UNSATISFIABLE");
    }
}
