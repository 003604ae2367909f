mod cli;
mod logger;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logging(cli.log_json);

    match cli.command {
        Commands::Profile { file, format } => cli::profile_command(file, format).await,
        Commands::Analyze(args) => cli::analyze_command(args).await,
        Commands::Demo { dataset, format } => cli::demo_command(dataset, format).await,
    }
}
