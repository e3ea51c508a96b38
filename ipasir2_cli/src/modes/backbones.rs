//! Backbones, i.e. literals true in every model of a formula.
//!
//! Candidates are the literals of some model.
//! A candidate is a backbone if the formula is unsatisfiable when the candidate is assumed false, and in this case the candidate is added as a unit clause to help later solves.
//! Otherwise, the model found rules out the candidate, and every later candidate it falsifies (or leaves unassigned).

use ipasir2_bridge::{
    structures::clause::Redundancy,
    types::err::Ipasir2Error,
    Ipasir2, Solver,
};

use crate::{
    config_io::CliConfig,
    dimacs::Formula,
    err,
    misc::Deadline,
    modes::{assignment, build_solver, literals_string, Report},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Backbones {
    /// Every backbone.
    Found(Vec<i32>),

    Unsatisfiable,

    /// Some solve was stopped, after finding the given backbones.
    Stopped(Vec<i32>),
}

pub fn find_backbones(solver: &mut Solver, atoms: i32) -> Result<Backbones, Ipasir2Error> {
    match solver.solve()?.as_option() {
        Some(true) => {}
        Some(false) => return Ok(Backbones::Unsatisfiable),
        None => return Ok(Backbones::Stopped(Vec::default())),
    }

    // Candidates ruled out are replaced by 0.
    let mut candidates = assignment(solver, atoms)?;
    let mut backbones = Vec::default();

    for index in 0..candidates.len() {
        let candidate = candidates[index];
        if candidate == 0 {
            continue;
        }

        match solver.solve_assuming(&[-candidate])?.as_option() {
            None => return Ok(Backbones::Stopped(backbones)),

            Some(true) => {
                for later in candidates[index..].iter_mut() {
                    if *later != 0 {
                        *later = solver.lit_value(*later)?.map(*later, 0, 0);
                    }
                }
            }

            Some(false) => {
                solver.add_unit(candidate, Redundancy::None)?;
                backbones.push(candidate);
            }
        }
    }

    Ok(Backbones::Found(backbones))
}

pub fn backbones(api: &Ipasir2, formula: &Formula, config: &CliConfig) -> Result<Report, err::Cli> {
    let deadline = Deadline::new(config.time_limit);
    let mut solver = build_solver(api, formula, config)?;
    if config.time_limit.is_some() {
        solver.set_terminate_callback(move || deadline.passed())?;
    }

    match find_backbones(&mut solver, formula.atoms)? {
        Backbones::Found(backbones) => {
            println!(
                "c {} of {} atoms are backbones",
                backbones.len(),
                formula.atoms
            );
            println!("v {}0", literals_string(&backbones));
            Ok(Report::Satisfiable)
        }

        Backbones::Unsatisfiable => Ok(Report::Unsatisfiable),

        Backbones::Stopped(backbones) => {
            println!(
                "c Stopped after finding {} backbone literals",
                backbones.len()
            );
            Ok(Report::Unknown)
        }
    }
}
