//! Catalog parsing from YAML/JSON.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::{DirectiveScope, DirectiveSource, RubricVersion};

/// Built-in rubric catalog (loaded at compile time).
const BUILTIN_CATALOG_YAML: &str = include_str!("../../../../rubric/climatewash.yaml");

lazy_static! {
    /// Criterion identifiers are dotted numerals, e.g. "1.2" or "3.1.4".
    static ref CRITERION_ID_PATTERN: Regex = Regex::new(r"^\d+(\.\d+)*$").unwrap();
}

/// Errors that can occur when loading a catalog.
///
/// All of these are fatal: a process with a malformed catalog cannot
/// serve any diagnosis.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Catalog validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// The severity band a criterion may deduct within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRange {
    pub min: u32,
    pub max: u32,
}

impl DeductionRange {
    /// Clamp a model-reported deduction to this range and round to the
    /// nearest whole point.
    ///
    /// A NaN deduction has no nearest bound and resolves to `min`, the
    /// mildest penalty the criterion allows.
    pub fn clamp(&self, raw: f64) -> u32 {
        if raw.is_nan() {
            return self.min;
        }
        let clamped = raw.clamp(self.min as f64, self.max as f64);
        clamped.round() as u32
    }
}

/// One named, weighted rule in the rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable dotted identifier (e.g. "1.2"), unique within the catalog.
    pub id: String,

    /// Short human label (e.g. "Offset-based carbon neutrality claim").
    pub name: String,

    /// Grouping label (e.g. "offset-claims", "vague-claims").
    pub category: String,

    /// Which regulatory instrument this criterion is grounded in.
    pub directive_source: DirectiveSource,

    /// Severity band for this criterion.
    pub deduction_range: DeductionRange,

    /// Rubric versions in which this criterion is active.
    pub version_tags: Vec<RubricVersion>,
}

impl Criterion {
    /// Whether this criterion is active for the given run settings.
    pub fn active_for(&self, scope: DirectiveScope, version: RubricVersion) -> bool {
        self.directive_source.active_under(scope) && self.version_tags.contains(&version)
    }
}

/// The versioned rubric: every criterion the tool knows about.
///
/// Loaded once per process and read-only thereafter. Safe to share by
/// reference across concurrent diagnosis runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaCatalog {
    /// Version of this catalog's content (semver).
    pub catalog_version: String,

    /// Human-readable name.
    pub name: String,

    /// Detailed description.
    #[serde(default)]
    pub description: Option<String>,

    /// All criteria, in rubric order.
    pub criteria: Vec<Criterion>,
}

impl CriteriaCatalog {
    /// The catalog compiled into the binary from `rubric/climatewash.yaml`.
    pub fn builtin() -> Self {
        // The embedded rubric is validated by tests; a parse failure
        // here means the shipped binary is unusable.
        Self::from_yaml(BUILTIN_CATALOG_YAML)
            .unwrap_or_else(|e| panic!("built-in catalog is malformed: {e}"))
    }

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: CriteriaCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: CriteriaCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Look up a criterion by id.
    pub fn get(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// The criteria active under the given directive scope and rubric
    /// version, in catalog order.
    ///
    /// Pure function of its inputs: the same catalog, scope, and
    /// version always produce the same subset.
    pub fn active_criteria(
        &self,
        scope: DirectiveScope,
        version: RubricVersion,
    ) -> Vec<&Criterion> {
        let active: Vec<&Criterion> = self
            .criteria
            .iter()
            .filter(|c| c.active_for(scope, version))
            .collect();

        tracing::debug!(
            scope = ?scope,
            version = version.as_str(),
            active = active.len(),
            total = self.criteria.len(),
            "filtered active criteria"
        );

        active
    }

    /// Validate the catalog structure.
    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::MissingField("name".to_string()));
        }

        if self.catalog_version.is_empty() {
            return Err(CatalogError::MissingField("catalog_version".to_string()));
        }

        if self.criteria.is_empty() {
            return Err(CatalogError::ValidationError(
                "catalog contains no criteria".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            if !CRITERION_ID_PATTERN.is_match(&criterion.id) {
                return Err(CatalogError::ValidationError(format!(
                    "Criterion id '{}' is not a dotted identifier",
                    criterion.id
                )));
            }

            if !seen.insert(&criterion.id) {
                return Err(CatalogError::ValidationError(format!(
                    "Duplicate criterion id: {}",
                    criterion.id
                )));
            }

            if criterion.name.is_empty() {
                return Err(CatalogError::MissingField(format!(
                    "criteria[{}].name",
                    criterion.id
                )));
            }

            if criterion.category.is_empty() {
                return Err(CatalogError::MissingField(format!(
                    "criteria[{}].category",
                    criterion.id
                )));
            }

            let range = criterion.deduction_range;
            if range.min > range.max || range.max > 100 {
                return Err(CatalogError::ValidationError(format!(
                    "Criterion '{}' has invalid deduction range {}..{}",
                    criterion.id, range.min, range.max
                )));
            }

            if criterion.version_tags.is_empty() {
                return Err(CatalogError::ValidationError(format!(
                    "Criterion '{}' has no version tags",
                    criterion.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CATALOG: &str = r#"
catalog_version: "1.0"
name: "Test Catalog"
criteria:
  - id: "1.1"
    name: "Offset-based neutrality claim"
    category: "offset-claims"
    directive_source: empowerment-only
    deduction_range: { min: 10, max: 30 }
    version_tags: [v1-full, v3-climate-focus]
  - id: "2.1"
    name: "Unverifiable green label"
    category: "labels"
    directive_source: green-claims-proposal
    deduction_range: { min: 5, max: 20 }
    version_tags: [v1-full, v2-key-items]
"#;

    #[test]
    fn test_parse_valid_catalog() {
        let catalog = CriteriaCatalog::from_yaml(VALID_CATALOG).unwrap();
        assert_eq!(catalog.name, "Test Catalog");
        assert_eq!(catalog.criteria.len(), 2);
        assert_eq!(catalog.get("1.1").unwrap().category, "offset-claims");
        assert!(catalog.get("9.9").is_none());
    }

    #[test]
    fn test_duplicate_criterion_ids() {
        let yaml = r#"
catalog_version: "1.0"
name: "Test"
criteria:
  - id: "1.1"
    name: "A"
    category: "c"
    directive_source: empowerment-only
    deduction_range: { min: 1, max: 2 }
    version_tags: [v1-full]
  - id: "1.1"
    name: "B"
    category: "c"
    directive_source: empowerment-only
    deduction_range: { min: 1, max: 2 }
    version_tags: [v1-full]
"#;
        let result = CriteriaCatalog::from_yaml(yaml);
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_non_dotted_id() {
        let yaml = r#"
catalog_version: "1.0"
name: "Test"
criteria:
  - id: "A1"
    name: "A"
    category: "c"
    directive_source: empowerment-only
    deduction_range: { min: 1, max: 2 }
    version_tags: [v1-full]
"#;
        let result = CriteriaCatalog::from_yaml(yaml);
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let yaml = r#"
catalog_version: "1.0"
name: "Test"
criteria:
  - id: "1.1"
    name: "A"
    category: "c"
    directive_source: empowerment-only
    deduction_range: { min: 30, max: 10 }
    version_tags: [v1-full]
"#;
        let result = CriteriaCatalog::from_yaml(yaml);
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_empty_version_tags() {
        let yaml = r#"
catalog_version: "1.0"
name: "Test"
criteria:
  - id: "1.1"
    name: "A"
    category: "c"
    directive_source: empowerment-only
    deduction_range: { min: 1, max: 2 }
    version_tags: []
"#;
        let result = CriteriaCatalog::from_yaml(yaml);
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    #[test]
    fn test_directive_filtering() {
        let catalog = CriteriaCatalog::from_yaml(VALID_CATALOG).unwrap();

        // Green Claims criteria disappear under EmpowermentOnly scope.
        let active =
            catalog.active_criteria(DirectiveScope::EmpowermentOnly, RubricVersion::V1Full);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "1.1");

        let active = catalog.active_criteria(DirectiveScope::Both, RubricVersion::V1Full);
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_version_filtering() {
        let catalog = CriteriaCatalog::from_yaml(VALID_CATALOG).unwrap();

        // "2.1" is not tagged v3-climate-focus, so it is simply absent.
        let active =
            catalog.active_criteria(DirectiveScope::Both, RubricVersion::V3ClimateFocus);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "1.1");
    }

    #[test]
    fn test_clamp_to_range() {
        let range = DeductionRange { min: 10, max: 15 };
        assert_eq!(range.clamp(40.0), 15);
        assert_eq!(range.clamp(3.0), 10);
        assert_eq!(range.clamp(12.4), 12);
        assert_eq!(range.clamp(12.6), 13);
    }

    #[test]
    fn test_clamp_nan_resolves_to_minimum() {
        let range = DeductionRange { min: 10, max: 15 };
        assert_eq!(range.clamp(f64::NAN), 10);
        assert_eq!(range.clamp(f64::INFINITY), 15);
        assert_eq!(range.clamp(f64::NEG_INFINITY), 10);
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = CriteriaCatalog::builtin();
        assert!(!catalog.criteria.is_empty());

        // Every version keeps at least one criterion active in the
        // widest scope.
        for version in [
            RubricVersion::V1Full,
            RubricVersion::V2KeyItems,
            RubricVersion::V3ClimateFocus,
        ] {
            assert!(
                !catalog
                    .active_criteria(DirectiveScope::Both, version)
                    .is_empty(),
                "no active criteria for {}",
                version.as_str()
            );
        }
    }
}
