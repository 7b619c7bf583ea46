//! Terminal demo app.
//!
//! A root command with `--version` and six independent leaf
//! subcommands: prompted input, hidden input, a tag-collection loop,
//! spinners, a progress bar and a range-validated sum.  Numeric ranges
//! are enforced by the parser, so out-of-range input never reaches a
//! command body and exits non-zero.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser, Debug)]
#[command(name = "deskpull")]
#[command(author, version, about = "deskpull terminal toybox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Share your name and get a fun fact back.
    WhatAmI {
        /// Name to greet; prompted for when absent.
        name: Option<String>,
    },
    /// Prompt for a hidden, confirmation-checked password.
    Pword {
        #[arg(long, default_value = "user")]
        name: String,
    },
    /// Collect free-text tags until `q` is entered.
    AddingTags,
    /// Animate spinners for a fixed number of seconds.
    Spin {
        #[arg(default_value_t = 5, value_parser = clap::value_parser!(u64).range(0..=36))]
        seconds: u64,
    },
    /// Animate a progress bar for a fixed number of seconds.
    Progbar {
        #[arg(default_value_t = 5, value_parser = clap::value_parser!(u64).range(0..=16))]
        seconds: u64,

        /// Render an unstyled bar instead.
        #[arg(long)]
        plain_bar: bool,
    },
    /// Add two range-checked integers.
    #[command(allow_negative_numbers = true)]
    NumericIntake {
        #[arg(value_parser = clap::value_parser!(i64).range(0..=20))]
        x: i64,
        #[arg(value_parser = clap::value_parser!(i64).range(-10..=10))]
        y: i64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::WhatAmI { name } => commands::what_am_i(name)?,
        Commands::Pword { name } => commands::pword(&name)?,
        Commands::AddingTags => commands::adding_tags()?,
        Commands::Spin { seconds } => commands::spin(seconds),
        Commands::Progbar { seconds, plain_bar } => commands::progbar(seconds, plain_bar),
        Commands::NumericIntake { x, y } => {
            let total = commands::numeric_intake(x, y);
            println!("{}: {x}, {}: {y}", "X".blue(), "Y".green());
            println!("Sum: {total}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_is_handled_by_the_parser() {
        let err = Cli::try_parse_from(["deskpull", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn numeric_intake_accepts_in_range_arguments() {
        let cli = Cli::try_parse_from(["deskpull", "numeric-intake", "20", "-10"]).unwrap();
        match cli.command {
            Commands::NumericIntake { x, y } => {
                assert_eq!((x, y), (20, -10));
            }
            other => panic!("expected numeric-intake, got {other:?}"),
        }
    }

    #[rstest]
    #[case::x_too_large(&["deskpull", "numeric-intake", "21", "0"])]
    #[case::x_negative(&["deskpull", "numeric-intake", "-1", "0"])]
    #[case::y_too_small(&["deskpull", "numeric-intake", "5", "-11"])]
    #[case::y_too_large(&["deskpull", "numeric-intake", "5", "11"])]
    #[case::spin_too_long(&["deskpull", "spin", "37"])]
    #[case::progbar_too_long(&["deskpull", "progbar", "17"])]
    fn out_of_range_input_is_rejected_by_the_parser(#[case] argv: &[&str]) {
        let err = Cli::try_parse_from(argv).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[rstest]
    #[case::spin(&["deskpull", "spin"], 5)]
    #[case::progbar(&["deskpull", "progbar"], 5)]
    fn visual_commands_default_to_five_seconds(#[case] argv: &[&str], #[case] expected: u64) {
        let cli = Cli::try_parse_from(argv).unwrap();
        let seconds = match cli.command {
            Commands::Spin { seconds } | Commands::Progbar { seconds, .. } => seconds,
            other => panic!("expected a visual command, got {other:?}"),
        };
        assert_eq!(seconds, expected);
    }
}
