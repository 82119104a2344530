//! plex-metadata: manage Plex TV show labels and genres from CSV.
//!
//! Imports labels/genres from a CSV file into a Plex library (additive
//! only) and exports the library's current metadata to CSV.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
