//! Identifier validation for table and column names that end up interpolated into SQL.

use crate::error::LoadError;
use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"))
}

pub fn is_identifier(name: &str) -> bool {
    identifier_re().is_match(name)
}

/// Returns `name` unchanged if it is a valid identifier; otherwise a naming error for `kind` ("table" or "column").
pub fn ensure_identifier<'a>(name: &'a str, kind: &'static str) -> Result<&'a str, LoadError> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(LoadError::Naming {
            kind,
            name: name.to_string(),
        })
    }
}

/// Quote identifier for SQLite (safe: only validated names reach here).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
