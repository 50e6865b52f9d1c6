use crate::io::output::OutputFormat;
use crate::services::ServiceTier;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// History file used when `--store` is not given.
pub const DEFAULT_STORE: &str = ".certigrade-history.json";

#[derive(Parser, Debug)]
#[command(name = "certigrade")]
#[command(about = "Trading card pre-grading from condition scores", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pre-grade one card from its four condition scores
    Grade {
        /// Card identifier
        #[arg(long = "card-id")]
        card_id: String,

        /// Centering score (0.0-10.0)
        #[arg(long, allow_negative_numbers = true)]
        centering: f64,

        /// Corners score (0.0-10.0)
        #[arg(long, allow_negative_numbers = true)]
        corners: f64,

        /// Edges score (0.0-10.0)
        #[arg(long, allow_negative_numbers = true)]
        edges: f64,

        /// Surface score (0.0-10.0)
        #[arg(long, allow_negative_numbers = true)]
        surface: f64,

        /// Raw (ungraded) market value in US dollars
        #[arg(long = "base-value", allow_negative_numbers = true)]
        base_value: f64,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for a reproducible position within the confidence band
        #[arg(long)]
        seed: Option<u64>,

        /// Save the result to the user's grading history
        #[arg(long, requires = "user")]
        save: bool,

        /// User whose history receives the result
        #[arg(long)]
        user: Option<String>,

        /// Grading history file
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,

        /// Configuration file (skips discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Grade every request in a JSON file in parallel
    Batch {
        /// JSON array of {cardId, axisScores, baseValue} requests
        input: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for a reproducible position within the confidence band
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration file (skips discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show a user's saved gradings, newest first
    History {
        /// User whose history to show
        #[arg(long)]
        user: String,

        /// Grading history file
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,

        /// Only show gradings of this card
        #[arg(long = "card-id")]
        card_id: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Compare the professional grading companies
    Services {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Cost of a professional submission tier
    Cost {
        /// Submission tier
        #[arg(long, value_enum)]
        tier: ServiceTier,

        /// Raw card value, to judge whether grading pays off
        #[arg(
            long = "base-value",
            requires = "estimated_value",
            allow_negative_numbers = true
        )]
        base_value: Option<f64>,

        /// Estimated graded value, to judge whether grading pays off
        #[arg(
            long = "estimated-value",
            requires = "base_value",
            allow_negative_numbers = true
        )]
        estimated_value: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_grade_with_negative_score() {
        let cli = Cli::try_parse_from([
            "certigrade",
            "grade",
            "--card-id",
            "base1-4",
            "--centering",
            "-1",
            "--corners",
            "9",
            "--edges",
            "9",
            "--surface",
            "9",
            "--base-value",
            "100",
        ])
        .unwrap();

        match cli.command {
            Commands::Grade {
                centering, store, ..
            } => {
                assert_eq!(centering, -1.0);
                assert_eq!(store, PathBuf::from(DEFAULT_STORE));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn save_requires_user() {
        let result = Cli::try_parse_from([
            "certigrade",
            "grade",
            "--card-id",
            "x",
            "--centering",
            "9",
            "--corners",
            "9",
            "--edges",
            "9",
            "--surface",
            "9",
            "--base-value",
            "1",
            "--save",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cost_takes_tier_names() {
        let cli = Cli::try_parse_from(["certigrade", "cost", "--tier", "express"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cost {
                tier: ServiceTier::Express,
                ..
            }
        ));
    }

    #[test]
    fn cost_values_accept_negatives_and_come_in_pairs() {
        let cli = Cli::try_parse_from([
            "certigrade",
            "cost",
            "--tier",
            "economy",
            "--base-value",
            "-1000",
            "--estimated-value",
            "0",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cost {
                base_value: Some(base),
                ..
            } if base == -1000.0
        ));

        let lone_base =
            Cli::try_parse_from(["certigrade", "cost", "--tier", "economy", "--base-value", "5"]);
        assert!(lone_base.is_err());
    }
}
