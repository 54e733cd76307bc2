//! Load settings from environment variables (after `.env`), falling back to defaults.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_ZIP_TABLE: &str = "ZIP_TABLE";
pub const ENV_MEASURE_TABLE: &str = "MEASURE_TABLE";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";
pub const ENV_MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";

impl Settings {
    /// Read settings from the process environment. Loads `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; empty values count as unset. Validates the result.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();

        let settings = Settings {
            database_path: get(ENV_DATABASE_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            bind_addr: get(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            tables: LookupTables {
                zip_table: get(ENV_ZIP_TABLE).unwrap_or(defaults.tables.zip_table),
                measure_table: get(ENV_MEASURE_TABLE).unwrap_or(defaults.tables.measure_table),
            },
            max_upload_bytes: parse_or(ENV_MAX_UPLOAD_BYTES, get(ENV_MAX_UPLOAD_BYTES), defaults.max_upload_bytes)?,
            max_connections: parse_or(ENV_MAX_CONNECTIONS, get(ENV_MAX_CONNECTIONS), defaults.max_connections)?,
        };
        validate(&settings)?;
        Ok(settings)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Env {
            key,
            message: format!("{:?}: {}", s, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.database_path, PathBuf::from("data.db"));
        assert_eq!(settings.bind_addr, "0.0.0.0:5000");
        assert_eq!(settings.tables, LookupTables::default());
        assert_eq!(settings.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(settings.max_connections, 5);
    }

    #[test]
    fn overrides_and_blank_values() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_DATABASE_PATH, "/tmp/health.db"),
            (ENV_ZIP_TABLE, "zips"),
            (ENV_MEASURE_TABLE, "  "),
            (ENV_MAX_CONNECTIONS, "2"),
        ]))
        .unwrap();
        assert_eq!(settings.database_path, PathBuf::from("/tmp/health.db"));
        assert_eq!(settings.tables.zip_table, "zips");
        assert_eq!(settings.tables.measure_table, DEFAULT_MEASURE_TABLE);
        assert_eq!(settings.max_connections, 2);
    }

    #[test]
    fn unparseable_number_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_MAX_UPLOAD_BYTES, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: ENV_MAX_UPLOAD_BYTES, .. }));
    }

    #[test]
    fn invalid_table_name_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_ZIP_TABLE, "zip-county")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
