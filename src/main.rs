//! `county-health load <database> <csv_file>` loads a CSV into a table named after the file.
//! `county-health serve` exposes the lookup and conversion endpoints over HTTP.

use clap::{Parser, Subcommand};
use county_health::config::validate;
use county_health::{app, load_file, open_existing_store, open_store, AppState, Settings};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "county-health", version, about = "CSV-to-SQLite loader and county health lookup API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV file into a SQLite database, replacing the table of the same name.
    Load {
        /// SQLite database file to create or update.
        database: PathBuf,
        /// CSV file to load; the table is named after its file stem.
        csv_file: PathBuf,
    },
    /// Serve the HTTP API.
    Serve {
        /// SQLite database file with the lookup tables.
        #[arg(long, env = "DATABASE_PATH")]
        database: Option<PathBuf>,
        /// Listen address.
        #[arg(long, env = "BIND_ADDR")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("county_health=info")),
        )
        .init();
    run(Cli::parse()).await
}

/// Server settings are read only for `serve`; `load` needs nothing beyond its arguments.
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Load { database, csv_file } => {
            let pool = open_store(&database, 1).await?;
            let loaded = load_file(&pool, &csv_file).await;
            pool.close().await;
            let loaded = loaded?;
            println!(
                "Loaded {} rows into table {} ({} columns) in {}",
                loaded.rows,
                loaded.table,
                loaded.columns.len(),
                database.display()
            );
        }
        Command::Serve { database, bind } => {
            let mut settings = Settings::from_env()?;
            if let Some(path) = database {
                settings.database_path = path;
            }
            if let Some(addr) = bind {
                settings.bind_addr = addr;
            }
            validate(&settings)?;
            serve(settings).await?;
        }
    }
    Ok(())
}

async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let pool = open_existing_store(&settings.database_path, settings.max_connections)
        .await
        .map_err(|e| format!("{e}; run `county-health load` first"))?;
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    let state = AppState::new(pool.clone(), settings);

    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
