//! ElectroShop CLI - database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! es-cli migrate
//!
//! # Insert or update products from a YAML file
//! es-cli seed products crates/cli/seeds/products.yaml
//!
//! # Drop and recreate the schema (ELECTROSHOP_ENV=development only)
//! es-cli reset --confirm
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ELECTROSHOP_ENV` - must be `development` for `reset`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "es-cli")]
#[command(author, version, about = "ElectroShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Load data into the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Drop every table and re-apply migrations (development only)
    Reset {
        /// Required; the reset destroys all products, users, orders and sessions
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert or update catalog products from a YAML file
    Products {
        /// Path to the YAML file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { target } => match target {
            SeedTarget::Products { file } => commands::seed::products(&file).await,
        },
        Commands::Reset { confirm } => commands::reset::run(confirm).await,
    }
}
