use crate::cli::{Command, Verbosity};
use crate::Cli;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn plot_arguments() {
    let input = ["orthoks", "-v", "debug", "plot", "-c", "config.json", "--trios", "trios.tsv", "--strict"];
    let args = Cli::parse_from(input);
    assert_eq!(args.verbosity, Verbosity::Debug);
    match args.command {
        Command::Plot(args) => {
            assert_eq!(args.config, PathBuf::from("config.json"));
            assert_eq!(args.trios, Some(PathBuf::from("trios.tsv")));
            assert_eq!(args.output_dir, None);
            assert_eq!(args.seed, None);
            assert!(args.strict);
        }
        Command::Check(_) => panic!("expected the plot command"),
    }
}

#[test]
fn check_requires_config() {
    assert!(Cli::try_parse_from(["orthoks", "check"]).is_err());
    let args = Cli::try_parse_from(["orthoks", "check", "--config", "config.json"]);
    assert!(matches!(args.map(|a| a.command), Ok(Command::Check(_))));
}

#[test]
fn verbosity_for_rust_log() {
    assert_eq!(Verbosity::default().to_string(), "info");
    assert_eq!(Verbosity::Warn.to_string(), "warn");
}
