//! This is a command-line tool to check a location dataset via [libphotomap]
//! before it is published to the map.
use crate::cli::*;
use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();

    match args.command {
        Commands::Markers {
            source,
            output,
            skipped,
            timeout,
        } => commands::markers::handle_command(source, output, skipped, timeout).await,
    }
}
