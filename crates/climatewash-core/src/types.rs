//! Shared types for ClimateWash diagnosis.
//!
//! Everything here is plain data: serializable, cloneable, and free of
//! behavior beyond small helpers. The evaluation logic lives in
//! `findings`, `scorer`, and `risk`.

use serde::{Deserialize, Serialize};

/// Which regulatory instrument a criterion is grounded in.
///
/// Criteria sourced from the Green Claims proposal are only evaluated
/// when the run's scope includes that proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveSource {
    /// Grounded in the Empowering Consumers directive alone.
    EmpowermentOnly,
    /// Grounded in the Green Claims proposal.
    GreenClaimsProposal,
}

/// Which regulatory instrument(s) a diagnosis run is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveScope {
    /// Empowering Consumers directive only.
    EmpowermentOnly,
    /// Empowering Consumers directive plus the Green Claims proposal.
    Both,
}

impl DirectiveSource {
    /// Whether a criterion with this source is evaluated under `scope`.
    pub fn active_under(&self, scope: DirectiveScope) -> bool {
        match self {
            DirectiveSource::EmpowermentOnly => true,
            DirectiveSource::GreenClaimsProposal => scope == DirectiveScope::Both,
        }
    }
}

/// Which subset of the rubric is active for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RubricVersion {
    /// The full rubric.
    V1Full,
    /// Key items only.
    V2KeyItems,
    /// Climate-focused criteria only.
    V3ClimateFocus,
}

impl RubricVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            RubricVersion::V1Full => "v1-full",
            RubricVersion::V2KeyItems => "v2-key-items",
            RubricVersion::V3ClimateFocus => "v3-climate-focus",
        }
    }
}

/// Where the evidence under diagnosis came from.
///
/// Informational provenance only: modality never affects score math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    Text,
    Image,
    Pdf,
    Video,
    Web,
}

/// Per-run configuration, chosen once and immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    pub directive_scope: DirectiveScope,
    pub rubric_version: RubricVersion,
    pub modality: Modality,
}

/// One record of the raw findings payload produced by the AI boundary.
///
/// Untrusted input: `normalize` decides whether it becomes an applied
/// finding or an excluded one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinding {
    /// Dotted criterion identifier the model believes was triggered.
    pub criterion_id: String,

    /// Points the model proposes to deduct. Clamped to the criterion's
    /// deduction range during normalization.
    pub deduction: f64,

    /// Quoted or observed text justifying the finding.
    pub evidence_snippet: String,

    /// Advisory model confidence in [0, 1]. Never affects score math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A finding that survived normalization and counts toward the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFinding {
    pub criterion_id: String,

    /// Short human label of the criterion, copied from the catalog.
    pub criterion_name: String,

    /// Grouping label of the criterion, copied from the catalog.
    pub category: String,

    /// Points actually deducted, after clamping to the criterion's range.
    pub effective_deduction: u32,

    /// The deduction as reported by the model, retained for audit.
    pub raw_deduction: f64,

    pub evidence_snippet: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Why a raw finding was excluded from scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// The criterion id does not exist in the catalog.
    UnknownCriterion,
    /// The criterion exists but is not active under the run's
    /// directive scope and rubric version.
    InactiveCriterion,
    /// The evidence snippet was empty or whitespace.
    MissingEvidence,
    /// A second finding for the same criterion carried a larger
    /// deduction; this one was discarded.
    DuplicateSuperseded,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::UnknownCriterion => "unknown-criterion",
            ExclusionReason::InactiveCriterion => "inactive-criterion",
            ExclusionReason::MissingEvidence => "missing-evidence",
            ExclusionReason::DuplicateSuperseded => "duplicate-superseded",
        }
    }
}

/// A raw finding that was filtered out, retained for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedFinding {
    pub finding: RawFinding,
    pub reason: ExclusionReason,
}

/// Score-derived severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Compliant,
    LowRisk,
    MediumRisk,
    HighRisk,
}

/// The immutable output record of one diagnosis run.
///
/// Created once by `scorer::build` and never mutated afterwards. This
/// is the artifact handed to reporting and export collaborators; it is
/// a pure function of its inputs, so rebuilding from the same inputs
/// yields an identical record. Provenance that is not an input to the
/// run (wall-clock time, history ids) belongs to those collaborators,
/// not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Final compliance score in [0, 100].
    pub final_score: u32,

    pub risk_band: RiskBand,

    /// Standard description of the risk band.
    pub risk_description: String,

    /// Findings counted toward the score, ordered by descending
    /// effective deduction (ties by ascending criterion id).
    pub applied_findings: Vec<AppliedFinding>,

    /// Findings present in the input but filtered out.
    pub excluded_findings: Vec<ExcludedFinding>,

    pub config: DiagnosisConfig,
}
