//! creditrisk: credit default risk pipeline
//!
//! Prepares the raw dataset, trains a logistic regression model, scores
//! individual customers and renders attribution plots.

use anyhow::Result;
use clap::Parser;

use creditrisk::cli::{run_all, run_explain, run_predict, run_prepare, run_train, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = cli.paths();

    match &cli.command {
        Commands::Prepare(args) => run_prepare(args, &paths),
        Commands::Train(args) => run_train(args, &paths),
        Commands::Predict(args) => run_predict(args, &paths),
        Commands::Explain => run_explain(&paths),
        Commands::Run { prepare, train } => run_all(prepare, train, &paths),
    }
}
