//! Lookup request validation. Checks run in a fixed order and the first failure wins.

use crate::error::LookupError;
use crate::service::Measure;
use crate::sql::{json_type_name, sanitize_literal};
use serde_json::{Map, Value};

pub const ZIP_FIELD: &str = "zip";
pub const MEASURE_FIELD: &str = "measure_name";
pub const COFFEE_FIELD: &str = "coffee";
const TEAPOT: &str = "teapot";
const ZIP_LEN: usize = 5;

/// Untrusted request fields, decoded from a JSON object body.
#[derive(Clone, Debug, Default)]
pub struct LookupRequest {
    fields: Map<String, Value>,
}

/// Validated parameters for the join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupQuery {
    pub zip: String,
    pub measure: Measure,
    /// Measure label as bound into the query.
    pub measure_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validated {
    /// `coffee` was `"teapot"`; answer 418 without looking at anything else.
    Teapot,
    Query(LookupQuery),
}

impl LookupRequest {
    /// Decode raw body bytes. An empty body or anything but a JSON object is malformed.
    pub fn from_body(body: &[u8]) -> Result<Self, LookupError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(LookupError::MalformedBody("Request body is required".into()));
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| LookupError::MalformedBody("Invalid JSON in request body".into()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, LookupError> {
        match value {
            Value::Object(fields) => Ok(LookupRequest { fields }),
            other => Err(LookupError::MalformedBody(format!(
                "Request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        LookupRequest { fields }
    }

    fn is_teapot(&self) -> bool {
        self.fields.get(COFFEE_FIELD).and_then(Value::as_str) == Some(TEAPOT)
    }

    fn is_missing(&self, key: &str) -> bool {
        match self.fields.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// Teapot, then presence, then ZIP format, then measure membership.
    pub fn validate(&self) -> Result<Validated, LookupError> {
        if self.is_teapot() {
            return Ok(Validated::Teapot);
        }

        let missing: Vec<&'static str> = [ZIP_FIELD, MEASURE_FIELD]
            .into_iter()
            .filter(|k| self.is_missing(k))
            .collect();
        if !missing.is_empty() {
            return Err(LookupError::MissingField(missing));
        }

        let zip = self
            .fields
            .get(ZIP_FIELD)
            .and_then(Value::as_str)
            .filter(|z| is_zip(z))
            .ok_or(LookupError::InvalidZip)?;

        let measure: Measure = self
            .fields
            .get(MEASURE_FIELD)
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
            .ok_or(LookupError::InvalidMeasure)?;

        Ok(Validated::Query(LookupQuery {
            zip: sanitize_literal(zip),
            measure,
            measure_name: sanitize_literal(measure.as_str()),
        }))
    }
}

fn is_zip(s: &str) -> bool {
    s.len() == ZIP_LEN && s.bytes().all(|b| b.is_ascii_digit())
}
