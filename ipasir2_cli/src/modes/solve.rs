//! Solving, by a single solver or by a portfolio of solvers.
//!
//! In a portfolio each thread creates, fills, and solves its own solver, as a solver is tied to the thread which created it.
//! Threads share a stop flag, which is polled by the terminate callback of each solver.
//! The first thread to find a result raises the flag, and so stops every other solver.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::unbounded;
use ipasir2_bridge::{structures::optional_bool::OptionalBool, Ipasir2};

use crate::{
    config_io::CliConfig,
    dimacs::Formula,
    err,
    misc::Deadline,
    modes::{assignment, build_solver, literals_string, Report},
};

/// The result of a solver, with the model if one was found and requested.
struct Outcome {
    result: OptionalBool,
    model: Option<Vec<i32>>,
}

pub fn solve(api: &Ipasir2, formula: &Formula, config: &CliConfig) -> Result<Report, err::Cli> {
    if config.threads > 1 {
        return portfolio(api, formula, config);
    }

    let deadline = Deadline::new(config.time_limit);
    let mut solver = build_solver(api, formula, config)?;
    if config.time_limit.is_some() {
        solver.set_terminate_callback(move || deadline.passed())?;
    }

    let result = solver.solve()?;
    if result == OptionalBool::new(true) && config.show_model {
        println!("v {}0", literals_string(&assignment(&solver, formula.atoms)?));
    }

    Ok(Report::from(result))
}

fn solve_in_thread(
    api: &Ipasir2,
    formula: &Formula,
    config: &CliConfig,
    stop: &AtomicBool,
    deadline: Deadline,
) -> Result<Outcome, err::Cli> {
    let mut solver = build_solver(api, formula, config)?;
    solver.set_terminate_callback(|| stop.load(Ordering::Relaxed) || deadline.passed())?;

    let result = solver.solve()?;
    let model = match result == OptionalBool::new(true) && config.show_model {
        true => Some(assignment(&solver, formula.atoms)?),
        false => None,
    };

    Ok(Outcome { result, model })
}

pub fn portfolio(
    api: &Ipasir2,
    formula: &Formula,
    config: &CliConfig,
) -> Result<Report, err::Cli> {
    let deadline = Deadline::new(config.time_limit);
    let stop = AtomicBool::new(false);
    let (tx, rx) = unbounded::<(usize, Result<Outcome, err::Cli>)>();

    let scope_result = crossbeam::scope(|scope| {
        for index in 0..config.threads {
            let tx = tx.clone();
            let stop = &stop;
            scope.spawn(move |_| {
                let outcome = solve_in_thread(api, formula, config, stop, deadline);
                if let Ok(Outcome { result, .. }) = &outcome {
                    if result.has_value() {
                        stop.store(true, Ordering::Relaxed);
                    }
                }
                let _ = tx.send((index, outcome));
            });
        }
    });
    drop(tx);

    if scope_result.is_err() {
        return Err(err::Cli::Portfolio);
    }

    // Outcomes arrive in the order threads finished, so the first result found is first.
    let mut failure = None;
    for (index, outcome) in rx.iter() {
        match outcome {
            Ok(Outcome { result, model }) if result.has_value() => {
                if config.detail > 0 {
                    println!("c Result from solver {index}");
                }
                if let Some(model) = model {
                    println!("v {}0", literals_string(&model));
                }
                return Ok(Report::from(result));
            }

            Ok(_) => {}

            Err(e) => {
                if config.detail > 0 {
                    println!("c Solver {index} failed: {e}");
                }
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(Report::Unknown),
    }
}
