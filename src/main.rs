use anyhow::Result;
use certigrade::cli::{Cli, Commands};
use certigrade::commands;
use certigrade::core::RawAxisScores;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    certigrade::observability::init_tracing(cli.verbosity);

    match cli.command {
        Commands::Grade {
            card_id,
            centering,
            corners,
            edges,
            surface,
            base_value,
            format,
            output,
            seed,
            save,
            user,
            store,
            config,
        } => commands::grade::grade_card(commands::grade::GradeConfig {
            card_id,
            scores: RawAxisScores {
                centering,
                corners,
                edges,
                surface,
            },
            base_value,
            format,
            output,
            seed,
            save,
            user,
            store,
            config,
        }),
        Commands::Batch {
            input,
            format,
            output,
            seed,
            config,
        } => commands::batch::grade_batch(commands::batch::BatchConfig {
            input,
            format,
            output,
            seed,
            config,
        }),
        Commands::History {
            user,
            store,
            card_id,
            format,
        } => commands::history::show_history(&user, &store, card_id.as_deref(), format),
        Commands::Services { format } => commands::catalog::show_services(format),
        Commands::Cost {
            tier,
            base_value,
            estimated_value,
            format,
        } => commands::catalog::show_cost(tier, base_value, estimated_value, format),
        Commands::Init { force } => commands::init::init_config(force),
    }
}
