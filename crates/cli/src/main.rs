//! FoodDelivery CLI - Catalog listing and saved settings tools.
//!
//! # Usage
//!
//! ```bash
//! # List the resolved catalog
//! fd-cli catalog list
//!
//! # List one category as JSON
//! fd-cli catalog list --category 2 --json
//!
//! # Show what the admin has saved
//! fd-cli settings show
//!
//! # Remove every saved settings document
//! fd-cli settings clear --yes
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Products with their effective checkout and image links
//! - `settings show` - Saved overlay and custom products
//! - `settings clear` - Forget saved overlay and custom products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use food_delivery_core::{FileStore, SettingsRepository};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "FoodDelivery CLI tools")]
struct Cli {
    /// Directory holding the saved settings documents
    #[arg(long, global = true, env = "FOOD_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products with saved links applied
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<i32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the saved overlay and custom products
    Show,
    /// Remove every saved settings document
    Clear {
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    tracing::debug!(data_dir = %cli.data_dir.display(), "Using settings store");
    let repository = SettingsRepository::new(FileStore::new(cli.data_dir));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, json } => {
                commands::catalog::list(&repository, category, json, &mut out).await?;
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&repository, &mut out).await?,
            SettingsAction::Clear { yes } => {
                commands::settings::clear(&repository, yes, &mut out).await?;
            }
        },
    }

    out.flush()?;
    Ok(())
}
