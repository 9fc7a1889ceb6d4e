//! Tumor classifier - Main Entry Point
//!
//! Trains the classifier offline or serves it over HTTP.

use clap::Parser;
use tumor_classifier::cli::{cmd_predict, cmd_serve, cmd_train, init_tracing, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.log_file())?;

    match cli.command {
        Commands::Train { data, output, test_size, seed, max_iter, .. } => {
            cmd_train(&data, &output, test_size, seed, max_iter)?;
        }
        Commands::Serve { port, host, model, strict_feature_names, .. } => {
            cmd_serve(&host, port, &model, strict_feature_names).await?;
        }
        Commands::Predict { model, input, strict_feature_names } => {
            cmd_predict(&model, &input, strict_feature_names)?;
        }
    }

    Ok(())
}
