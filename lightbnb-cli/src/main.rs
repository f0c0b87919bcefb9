//! lightbnb CLI - command-line access to the LightBnB data layer
//!
//! Every data-layer operation is reachable from here:
//! - `user get` / `user create`
//! - `reservations --guest`
//! - `properties search` / `properties create`
//!
//! Connection settings come from `lightbnb.toml`, `~/.lightbnb/config.toml`
//! and `DATABASE_URL` (including `.env` files).

use anyhow::Result;
use clap::{Parser, Subcommand};
use lightbnb_core::LightbnbConfig;
use tracing::debug;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and update LightBnB users, properties and reservations"
)]
struct Cli {
    /// Log generated SQL and bound parameters to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or create users
    User(commands::user::UserArgs),
    /// List a guest's reservations
    Reservations(commands::reservations::ReservationsArgs),
    /// Search or create property listings
    Properties(commands::properties::PropertiesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    lightbnb_core::load_dotenv();
    let config = LightbnbConfig::load();
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::User(args) => commands::user::run(args, &config).await,
        Commands::Reservations(args) => commands::reservations::run(args, &config).await,
        Commands::Properties(args) => commands::properties::run(args, &config).await,
    }
}
