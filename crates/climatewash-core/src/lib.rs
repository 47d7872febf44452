//! # climatewash-core
//!
//! Deterministic greenwashing-risk evaluation engine.
//!
//! The engine takes structured findings produced by an upstream AI
//! model, validates them against a versioned criteria catalog, and
//! produces a reproducible 0-100 compliance score with a risk band.
//!
//! ## Key guarantees
//!
//! 1. **Deterministic**: the same catalog, config, and findings always
//!    produce the same score, band, and ordering
//! 2. **No NLP**: the engine never inspects claim text itself; it only
//!    validates, filters, aggregates, and classifies model findings
//! 3. **Auditable**: every point lost cites one named criterion, and
//!    every filtered finding is retained with a reason code
//! 4. **Parallel-safe**: every operation is a pure function over its
//!    inputs; the catalog is read-only after load
//!
//! ## Example
//!
//! ```rust,ignore
//! use climatewash_core::{diagnose, CriteriaCatalog, DiagnosisConfig};
//! use climatewash_core::{DirectiveScope, Modality, RubricVersion};
//!
//! let catalog = CriteriaCatalog::builtin();
//! let config = DiagnosisConfig {
//!     directive_scope: DirectiveScope::Both,
//!     rubric_version: RubricVersion::V3ClimateFocus,
//!     modality: Modality::Text,
//! };
//! let findings = serde_json::from_str(payload)?;
//! let result = diagnose(&catalog, config, findings);
//! println!("{} ({})", result.final_score, result.risk_band.label());
//! ```

pub mod catalog;
pub mod findings;
pub mod risk;
pub mod scorer;
pub mod types;

// Re-export main types at crate root
pub use catalog::{CatalogError, CriteriaCatalog, Criterion, DeductionRange};
pub use findings::{normalize, NormalizedFindings};
pub use risk::classify;
pub use types::{
    AppliedFinding, DiagnosisConfig, DiagnosisResult, DirectiveScope, DirectiveSource,
    ExcludedFinding, ExclusionReason, Modality, RawFinding, RiskBand, RubricVersion,
};

/// Run one complete diagnosis.
///
/// This is the main entry point: it filters the catalog by the run's
/// directive scope and rubric version, normalizes the raw findings
/// payload, scores, classifies, and assembles the result.
///
/// A run always produces a `DiagnosisResult`, even when every raw
/// finding is malformed; zero valid findings is a fully compliant
/// score of 100. Only a catalog-load failure (handled before this
/// call) prevents a result.
pub fn diagnose(
    catalog: &CriteriaCatalog,
    config: DiagnosisConfig,
    raw: Vec<RawFinding>,
) -> DiagnosisResult {
    let normalized = findings::normalize(
        catalog,
        config.directive_scope,
        config.rubric_version,
        raw,
    );

    scorer::build(config, normalized.applied, normalized.excluded)
}
