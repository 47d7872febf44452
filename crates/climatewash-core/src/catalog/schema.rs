//! JSON Schema validation for catalogs.
//!
//! The parser's structural checks cover what the engine needs; this
//! module is for tooling (`climatewash validate`) that wants every
//! schema violation reported at once, with instance paths, against
//! spec/catalog.schema.json.

use std::sync::OnceLock;
use thiserror::Error;

const CATALOG_SCHEMA_JSON: &str = include_str!("../../../../spec/catalog.schema.json");

/// The schema ships inside the binary, so a failure here is a build
/// defect, not a user error.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("embedded catalog schema is unusable: {0}")]
    LoadError(String),
}

/// Compile the embedded schema on first use and reuse it afterwards.
fn compiled_schema() -> Result<&'static jsonschema::Validator, SchemaError> {
    static COMPILED: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

    COMPILED
        .get_or_init(|| {
            let schema: serde_json::Value = serde_json::from_str(CATALOG_SCHEMA_JSON)
                .map_err(|e| format!("not valid JSON: {e}"))?;
            jsonschema::options()
                .build(&schema)
                .map_err(|e| format!("does not compile: {e}"))
        })
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Check a catalog JSON value against the schema, collecting every
/// violation rather than stopping at the first.
pub fn validate_catalog_schema(catalog_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = compiled_schema().map_err(|e| vec![e.to_string()])?;

    let violations: Vec<String> = validator
        .iter_errors(catalog_json)
        .map(|e| format!("{} (at '{}')", e, e.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
