//! Lookup pipeline: request validation, then the ZIP/measure join.

mod lookup;
mod measure;
mod validation;
pub use lookup::{LookupOutcome, LookupService, MeasureRecord};
pub use measure::Measure;
pub use validation::{LookupQuery, LookupRequest, Validated};
