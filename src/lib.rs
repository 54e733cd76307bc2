//! County health: load CSV files into SQLite tables and answer ZIP/measure lookups over them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod loader;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{LookupTables, Settings};
pub use error::{AppError, ConfigError, LoadError, LookupError, StoreError};
pub use loader::{convert_to_database, convert_to_dump, load_csv, load_file, LoadedTable};
pub use routes::app;
pub use service::{LookupOutcome, LookupRequest, LookupService, Measure, MeasureRecord};
pub use state::AppState;
pub use store::{dump_sql, export_database, open_existing_store, open_memory_store, open_store};
