#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use ipasir2_bridge::Ipasir2;

mod config_io;
mod dimacs;
mod err;
mod misc;
mod modes;
mod parse;

use config_io::{CliConfig, Mode};
use dimacs::Formula;
use misc::load_dimacs;
use modes::Report;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli::cli().get_matches();
    let config = parse::config::config_from_args(&matches);

    match run(&config) {
        Ok(Some(report)) => {
            println!("s {report}");
            std::process::exit(report.exit_code())
        }
        Ok(None) => {}
        Err(e) => {
            println!("c Error: {e}");
            std::process::exit(1)
        }
    }
}

/// Runs the configured mode, returning a report for any mode which solves.
fn run(config: &CliConfig) -> Result<Option<Report>, err::Cli> {
    let api = Ipasir2::load(&config.library)?;

    if config.detail > 0 {
        match api.signature() {
            Ok(signature) => println!("c Solver: {signature}"),
            Err(e) => println!("c No signature: {e}"),
        }
    }

    if config.mode == Mode::ListOptions {
        modes::list_options(&api)?;
        return Ok(None);
    }

    if config.detail > 0 {
        println!("c Parsing {} files", config.files.len());
    }

    let mut formula = Formula::default();
    for path in &config.files {
        formula.extend(load_dimacs(path)?);
    }

    if config.detail > 0 {
        println!(
            "c Read {} clauses over {} atoms",
            formula.clauses.len(),
            formula.atoms
        );
    }

    if config.threads > 1 && config.mode != Mode::Solve && config.detail > 0 {
        println!("c Only a single solver is used outside of solving");
    }

    let report = match config.mode {
        Mode::Solve => modes::solve::solve(&api, &formula, config)?,
        Mode::Backbones => modes::backbones::backbones(&api, &formula, config)?,
        Mode::Count => modes::count::count(&api, &formula, config)?,
        Mode::ListOptions => return Ok(None),
    };

    Ok(Some(report))
}
