//! Runtime settings for the store, the lookup tables, and the HTTP listener.

use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "data.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_ZIP_TABLE: &str = "zip_county";
pub const DEFAULT_MEASURE_TABLE: &str = "county_health_rankings";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Names of the two tables joined by the lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTables {
    /// ZIP-to-county mapping: `zip`, `county`, `county_state`.
    pub zip_table: String,
    /// County health measures keyed by `State` and `County`.
    pub measure_table: String,
}

impl Default for LookupTables {
    fn default() -> Self {
        LookupTables {
            zip_table: DEFAULT_ZIP_TABLE.into(),
            measure_table: DEFAULT_MEASURE_TABLE.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub tables: LookupTables,
    pub max_upload_bytes: usize,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            tables: LookupTables::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
