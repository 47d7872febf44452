//! Criteria catalog parsing and validation.
//!
//! The rubric is structured data validated against JSON Schema. This
//! module handles parsing YAML/JSON catalogs, validating them, and
//! filtering the active criteria subset for a run.

mod parser;
mod schema;

pub use parser::{CatalogError, CriteriaCatalog, Criterion, DeductionRange};
pub use schema::validate_catalog_schema;
