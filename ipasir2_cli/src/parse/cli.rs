use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::config_io::{OptionAssignment, DETAILS, THREADS};

pub fn cli() -> Command {
    Command::new("ipasir2_cli")
        .about("Determines whether a formula is satisfiable or unsatisfiable, using an IPASIR-2 solver library")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("paths")
            .required_unless_present("list_options")
            .num_args(1..)
            .value_parser(value_parser!(PathBuf))
            .help("The DIMACS form CNF files to parse (as a single formula).")
            .long_help("The DIMACS form CNF files to parse (as a single formula).
Files with the extension 'xz' are decompressed while read."))

        .arg(Arg::new("library")
            .long("library")
            .short('L')
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .required(true)
            .num_args(1)
            .help("The solver library, exporting the IPASIR-2 functions."))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Time limit for the solve in seconds.
Default: No limit")
            .long_help("Time limit for the solve in seconds.
Default: No limit

The limit is checked by the solver through the terminate callback.
So, a solver without support for the callback runs to completion."))

        .arg(Arg::new("threads")
            .long("threads")
            .short('j')
            .value_name("COUNT")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The count of solvers to run in parallel on the formula.
Default: {THREADS}"))
            .long_help(format!("The count of solvers to run in parallel on the formula.
Default: {THREADS}

Each solver is given the same formula and options, and the first result found stops every other solver.
Only applies when solving.")))

        .arg(Arg::new("option")
            .long("option")
            .short('o')
            .value_name("NAME=VALUE[@INDEX]")
            .value_parser(clap::builder::ValueParser::new(option_parser))
            .required(false)
            .action(ArgAction::Append)
            .help("Set a solver option before the formula is added.")
            .long_help("Set a solver option before the formula is added.
May be given any number of times.

The index is only used by indexed options, and defaults to 0.
For example, '-o seed=7' or '-o phase=0@12'."))

        .arg(Arg::new("valuation")
            .long("valuation")
            .short('v')
            .action(ArgAction::SetTrue)
            .help("Display valuation on completion."))

        .arg(Arg::new("backbones")
            .long("backbones")
            .short('b')
            .action(ArgAction::SetTrue)
            .conflicts_with_all(["count", "list_options"])
            .help("Find the backbone literals of the formula.")
            .long_help("Find the backbone literals of the formula.

That is, the literals which are true in every model of the formula."))

        .arg(Arg::new("count")
            .long("count-models")
            .short('n')
            .action(ArgAction::SetTrue)
            .conflicts_with("list_options")
            .help("Count the models of the formula.")
            .long_help("Count the models of the formula.

Each model found is excluded by a fresh clause, until the formula is unsatisfiable.
Atoms left unassigned in a model are counted as free."))

        .arg(Arg::new("list_options")
            .long("list-options")
            .action(ArgAction::SetTrue)
            .help("List the options of the solver."))

        // CLI specific arguments

        .arg(Arg::new("detail")
            .long("detail")
            .short('d')
            .value_name("LEVEL")
            .value_parser(value_parser!(u8))
            .required(false)
            .num_args(1)
            .help(format!("The level to which details are communicated during a solve.
Default: {DETAILS}")))
}

/// Parses an option assignment of the form `name=value[@index]`.
pub fn option_parser(arg: &str) -> Result<OptionAssignment, std::io::Error> {
    let invalid = |message: &str| std::io::Error::new(std::io::ErrorKind::InvalidInput, message.to_string());

    let Some((name, rest)) = arg.split_once('=') else {
        return Err(invalid("Expected an option of the form name=value[@index]"));
    };
    if name.is_empty() {
        return Err(invalid("Missing option name"));
    }

    let (value, index) = match rest.split_once('@') {
        Some((value, index)) => (value, Some(index)),
        None => (rest, None),
    };

    let value = match value.parse::<i64>() {
        Ok(value) => value,
        Err(_) => return Err(invalid("Invalid option value")),
    };

    let index = match index.map(str::parse::<i64>) {
        None => 0,
        Some(Ok(index)) => index,
        Some(Err(_)) => return Err(invalid("Invalid option index")),
    };

    Ok(OptionAssignment {
        name: name.to_string(),
        value,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_assignments() {
        assert_eq!(
            option_parser("seed=7").unwrap(),
            OptionAssignment {
                name: "seed".to_string(),
                value: 7,
                index: 0
            }
        );

        assert_eq!(
            option_parser("ipasir.phase.initial=-1@12").unwrap(),
            OptionAssignment {
                name: "ipasir.phase.initial".to_string(),
                value: -1,
                index: 12
            }
        );
    }

    #[test]
    fn malformed_option_assignments() {
        assert!(option_parser("seed").is_err());
        assert!(option_parser("=7").is_err());
        assert!(option_parser("seed=").is_err());
        assert!(option_parser("seed=seven").is_err());
        assert!(option_parser("seed=7@").is_err());
        assert!(option_parser("seed=7@x").is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }
}
