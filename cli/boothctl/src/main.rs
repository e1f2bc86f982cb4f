//! boothctl (booth) - CLI for the booth reservation backend
//!
//! Public capacity dashboard plus the admin board for assigning
//! participants to slots of a (date, booth, round).

use anyhow::Result;
use clap::Parser;

mod client;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbosity(), cli.log_json());

    // Run the command
    if let Err(e) = cli.run().await {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
