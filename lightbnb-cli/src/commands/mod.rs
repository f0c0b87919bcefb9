//! Subcommand implementations

pub mod properties;
pub mod reservations;
pub mod user;

use anyhow::{Context, Result};
use lightbnb_core::LightbnbConfig;
use lightbnb_db::PgPool;
use serde::Serialize;

/// Open the process-wide pool from configuration
pub async fn connect(config: &LightbnbConfig) -> Result<PgPool> {
    lightbnb_db::create_pool(&config.database)
        .await
        .context("Failed to connect to database")
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
