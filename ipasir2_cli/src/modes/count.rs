//! Model counting, by excluding each model found until the formula is unsatisfiable.
//!
//! An atom without a value in a model is free, and so a model with `k` free atoms stands for `2^k` models.

use ipasir2_bridge::{
    structures::optional_bool::OptionalBool, types::err::Ipasir2Error, Ipasir2, Solver,
};

use crate::{
    config_io::CliConfig,
    dimacs::Formula,
    err,
    misc::Deadline,
    modes::{build_solver, Report},
};

#[derive(Debug, PartialEq, Eq)]
pub struct Count {
    /// The count of models found.
    pub models: u128,

    /// Whether every model was found.
    pub complete: bool,
}

pub fn count_models(solver: &mut Solver, atoms: i32) -> Result<Count, Ipasir2Error> {
    let mut models: u128 = 0;
    let mut exclusion_clause = Vec::default();

    let mut result = solver.solve()?;
    while result == OptionalBool::new(true) {
        exclusion_clause.clear();
        let mut size: u128 = 1;

        for atom in 1..=atoms {
            match solver.lit_value(atom)?.as_option() {
                Some(true) => exclusion_clause.push(-atom),
                Some(false) => exclusion_clause.push(atom),
                None => size = size.saturating_mul(2),
            }
        }

        solver.add(&exclusion_clause)?;
        models = models.saturating_add(size);
        result = solver.solve()?;
    }

    Ok(Count {
        models,
        complete: result.has_value(),
    })
}

pub fn count(api: &Ipasir2, formula: &Formula, config: &CliConfig) -> Result<Report, err::Cli> {
    let deadline = Deadline::new(config.time_limit);
    let mut solver = build_solver(api, formula, config)?;
    if config.time_limit.is_some() {
        solver.set_terminate_callback(move || deadline.passed())?;
    }

    let count = count_models(&mut solver, formula.atoms)?;
    match count.complete {
        true => {
            println!("c Number of models found: {}", count.models);
            match count.models {
                0 => Ok(Report::Unsatisfiable),
                _ => Ok(Report::Satisfiable),
            }
        }
        false => {
            println!("c Aborted after finding {} models", count.models);
            Ok(Report::Unknown)
        }
    }
}
