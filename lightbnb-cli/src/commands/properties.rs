//! Properties command - search listings and add new ones

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use lightbnb_core::{build_property_search, LightbnbConfig, NewProperty, SearchOptions};
use lightbnb_db::PropertyRepo;
use serde_json::Value;

#[derive(Args, Debug)]
#[command(about = "Search or create property listings")]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// Search listings, cheapest first
    Search(SearchArgs),
    /// Create a listing from a JSON object of column values
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Partial city name
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly price in dollars
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Maximum nightly price in dollars
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Minimum average review rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum results (defaults to [search] default_limit)
    #[arg(long)]
    pub limit: Option<i64>,

    /// Print the generated SQL and parameters without connecting
    #[arg(long)]
    pub explain: bool,
}

impl SearchArgs {
    fn options(&self) -> SearchOptions {
        SearchOptions {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Inline JSON object, e.g. '{"city": "Paris", "cost_per_night": 10000}'
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,

    /// Path to a JSON file holding the object
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the generated SQL and parameters without connecting
    #[arg(long)]
    pub explain: bool,
}

impl CreateArgs {
    fn property(&self) -> Result<NewProperty> {
        let raw = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => bail!("pass --json or --file"),
        };
        let value: Value = serde_json::from_str(&raw).context("Property JSON is malformed")?;
        Ok(NewProperty::from_json(&value)?)
    }
}

pub async fn run(args: PropertiesArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        PropertiesCommand::Search(search) => {
            let options = search.options();
            let limit = search.limit.unwrap_or(config.search.default_limit);

            if search.explain {
                return super::print_json(&build_property_search(&options, limit)?);
            }

            let pool = super::connect(config).await?;
            let rows = PropertyRepo::new(&pool).search(&options, limit).await?;
            super::print_json(&rows)
        }
        PropertiesCommand::Create(create) => {
            let property = create.property()?;

            if create.explain {
                return super::print_json(&property.insert_statement()?);
            }

            let pool = super::connect(config).await?;
            let row = PropertyRepo::new(&pool).create(&property).await?;
            super::print_json(&row)
        }
    }
}
