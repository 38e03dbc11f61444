use crate::output::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Load a dataset and list the markers it produces")]
    Markers {
        #[arg(help = "URL or path of the dataset, or '-' to read it from stdin")]
        source: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
        #[arg(short, long, help = "Also list the rows that produced no marker")]
        skipped: bool,
        #[arg(short, long, help = "Seconds to wait for a remote dataset")]
        timeout: Option<u64>,
    },
}
