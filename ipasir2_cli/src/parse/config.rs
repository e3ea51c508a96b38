use std::path::PathBuf;

use clap::ArgMatches;

use crate::config_io::{CliConfig, Mode, OptionAssignment};

pub fn config_from_args(args: &ArgMatches) -> CliConfig {
    let mut the_config = CliConfig::default();

    if let Ok(Some(library)) = args.try_get_one::<PathBuf>("library") {
        the_config.library = library.clone()
    };

    if let Ok(Some(paths)) = args.try_get_many::<PathBuf>("paths") {
        the_config.files = paths.cloned().collect()
    };

    if let Ok(Some(level)) = args.try_get_one::<u8>("detail") {
        the_config.detail = *level
    };

    if let Ok(Some(secs)) = args.try_get_one::<u64>("time_limit") {
        the_config.time_limit = Some(std::time::Duration::from_secs(*secs))
    };

    if let Ok(Some(threads)) = args.try_get_one::<usize>("threads") {
        the_config.threads = (*threads).max(1)
    };

    if let Ok(Some(options)) = args.try_get_many::<OptionAssignment>("option") {
        the_config.options = options.cloned().collect()
    };

    the_config.show_model = args.get_flag("valuation");

    if args.get_flag("backbones") {
        the_config.mode = Mode::Backbones
    } else if args.get_flag("count") {
        the_config.mode = Mode::Count
    } else if args.get_flag("list_options") {
        the_config.mode = Mode::ListOptions
    }

    the_config
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::parse::cli::cli;

    fn config_from(args: &[&str]) -> CliConfig {
        let matches = cli()
            .try_get_matches_from(std::iter::once("ipasir2_cli").chain(args.iter().copied()))
            .unwrap();
        config_from_args(&matches)
    }

    #[test]
    fn defaults() {
        let config = config_from(&["--library", "libsolver.so", "formula.cnf"]);

        assert_eq!(config.library, PathBuf::from("libsolver.so"));
        assert_eq!(config.files, vec![PathBuf::from("formula.cnf")]);
        assert_eq!(config.mode, Mode::Solve);
        assert_eq!(config.threads, 1);
        assert_eq!(config.time_limit, None);
        assert!(config.options.is_empty());
        assert!(!config.show_model);
    }

    #[test]
    fn portfolio_with_options() {
        let config = config_from(&[
            "-L", "libsolver.so", "-j", "4", "-t", "10", "-o", "seed=7", "-o", "phase=0@3", "-v",
            "first.cnf", "second.cnf.xz",
        ]);

        assert_eq!(config.threads, 4);
        assert_eq!(config.time_limit, Some(Duration::from_secs(10)));
        assert!(config.show_model);
        assert_eq!(config.files.len(), 2);
        assert_eq!(
            config.options,
            vec![
                OptionAssignment {
                    name: "seed".to_string(),
                    value: 7,
                    index: 0
                },
                OptionAssignment {
                    name: "phase".to_string(),
                    value: 0,
                    index: 3
                }
            ]
        );
    }

    #[test]
    fn modes() {
        assert_eq!(
            config_from(&["-L", "lib.so", "--backbones", "f.cnf"]).mode,
            Mode::Backbones
        );
        assert_eq!(
            config_from(&["-L", "lib.so", "--count-models", "f.cnf"]).mode,
            Mode::Count
        );
        assert_eq!(
            config_from(&["-L", "lib.so", "--list-options"]).mode,
            Mode::ListOptions
        );
    }

    #[test]
    fn conflicting_modes() {
        let matches = cli().try_get_matches_from([
            "ipasir2_cli",
            "-L",
            "lib.so",
            "--backbones",
            "--count-models",
            "f.cnf",
        ]);
        assert!(matches.is_err());
    }

    #[test]
    fn formula_required_to_solve() {
        let matches = cli().try_get_matches_from(["ipasir2_cli", "-L", "lib.so"]);
        assert!(matches.is_err());
    }
}
