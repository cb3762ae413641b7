//! scorta-cli: headless client for the Scorta console API.
//! Drives the same query/cache layer the console UI uses.

mod args;
mod context;
mod handlers;
mod print;

use clap::Parser;

use args::{Cli, Commands};
use context::{CliError, build_console};
use handlers::{categories, inventories, products, units};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let console = build_console(&cli)?;

    match cli.command {
        Commands::Inventories(cmd) => inventories::handle(&console, cmd.action).await?,
        Commands::Products(cmd) => products::handle(&console, cmd.action).await?,
        Commands::Categories(cmd) => categories::handle(&console, cmd.action).await?,
        Commands::Units(cmd) => units::handle(&console, cmd.action).await?,
    }

    Ok(())
}
