use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod json;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "QuickBite crisis-recovery analytics CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full recovery dashboard report
    Report(commands::report::ReportArgs),
    /// List the cities available for filtering
    Cities(commands::cities::CitiesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => commands::report::run(args),
        Command::Cities(args) => commands::cities::run(args),
    }
}
