//! Settings validation: table names are interpolated into SQL, so they must be identifiers.

use crate::config::Settings;
use crate::error::ConfigError;
use crate::sql::is_identifier;

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    for (key, name) in [
        ("zip table", &settings.tables.zip_table),
        ("measure table", &settings.tables.measure_table),
    ] {
        if !is_identifier(name) {
            return Err(ConfigError::Validation(format!("{} name is not a valid identifier: {}", key, name)));
        }
    }
    if settings.max_upload_bytes == 0 {
        return Err(ConfigError::Validation("max upload bytes must be greater than 0".into()));
    }
    if settings.max_connections == 0 {
        return Err(ConfigError::Validation("max connections must be greater than 0".into()));
    }
    if settings.bind_addr.is_empty() {
        return Err(ConfigError::Validation("bind address is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(validate(&Settings::default()).is_ok());
    }

    #[test]
    fn zero_connections_rejected() {
        let settings = Settings {
            max_connections: 0,
            ..Settings::default()
        };
        assert!(validate(&settings).is_err());
    }
}
