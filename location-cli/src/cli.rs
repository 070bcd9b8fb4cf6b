use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use location_core::{Config, ProviderId, Reader};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "location",
    version,
    about = "Country, weather, currency and news for a place"
)]
pub struct Cli {
    /// Log provider requests and decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider: apilayer, openweather or newsapi.
    Configure {
        /// Provider short name, e.g. "openweather".
        provider: String,
    },

    /// Show information about a country and/or city.
    Show {
        /// Country and/or city; prompted for when omitted.
        #[arg(short, long)]
        location: Option<String>,

        /// Print the report as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { location, json } => show(location, json).await,
        }
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut cfg = Config::load_file()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    cfg.upsert_provider_api_key(id, api_key.trim().to_string());
    cfg.save()?;

    println!(
        "Saved {id} API key to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(location: Option<String>, json: bool) -> Result<()> {
    let location = match location {
        Some(location) => location,
        None => Text::new("Country and/or city:")
            .prompt()
            .context("Failed to read location")?,
    };

    let cfg = Config::load()?;
    let reader = Reader::from_config(&cfg)?;

    debug!(%location, "Looking up location");
    let Some(info) = reader.find(&location).await? else {
        println!("No information found.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_table("Country:", &render::country_table(&info));
    print_table("Weather:", &render::weather_table(&info));
    print_table("News:", &render::news_table(&info));

    Ok(())
}

fn print_table(title: &str, table: &str) {
    println!("{title}");
    println!("{table}");
}
