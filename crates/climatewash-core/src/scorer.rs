//! Score aggregation and result assembly.
//!
//! The scoring model is deliberately simple: start at 100, subtract
//! every applied finding's effective deduction, floor at 0. Every
//! point lost is traceable to exactly one named criterion, which is
//! what the audit and legal-review use case requires. There are no
//! category-level caps beyond the global floor.

use crate::risk::classify;
use crate::types::{AppliedFinding, DiagnosisConfig, DiagnosisResult, ExcludedFinding};

/// Compute the final compliance score for a set of applied findings.
///
/// `100 - sum(effective_deduction)`, floored at 0. Deduplication per
/// criterion is enforced upstream by `findings::normalize`.
pub fn score(applied: &[AppliedFinding]) -> u32 {
    let total_deduction: u32 = applied.iter().map(|f| f.effective_deduction).sum();
    100u32.saturating_sub(total_deduction)
}

/// Assemble the immutable diagnosis result.
///
/// A pure function: rebuilding from the same config and finding lists
/// yields an identical result. Applied findings are ordered by
/// descending effective deduction so the most impactful violations
/// surface first; ties break by ascending criterion id to keep the
/// output deterministic.
pub fn build(
    config: DiagnosisConfig,
    mut applied: Vec<AppliedFinding>,
    excluded: Vec<ExcludedFinding>,
) -> DiagnosisResult {
    let final_score = score(&applied);
    let risk_band = classify(final_score);

    applied.sort_by(|a, b| {
        b.effective_deduction
            .cmp(&a.effective_deduction)
            .then_with(|| a.criterion_id.cmp(&b.criterion_id))
    });

    tracing::debug!(
        final_score,
        band = risk_band.label(),
        applied = applied.len(),
        excluded = excluded.len(),
        "assembled diagnosis result"
    );

    DiagnosisResult {
        final_score,
        risk_band,
        risk_description: risk_band.description().to_string(),
        applied_findings: applied,
        excluded_findings: excluded,
        config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DirectiveScope, Modality, RiskBand, RubricVersion};
    use proptest::prelude::*;

    fn test_config() -> DiagnosisConfig {
        DiagnosisConfig {
            directive_scope: DirectiveScope::Both,
            rubric_version: RubricVersion::V3ClimateFocus,
            modality: Modality::Text,
        }
    }

    fn applied(id: &str, deduction: u32) -> AppliedFinding {
        AppliedFinding {
            criterion_id: id.to_string(),
            criterion_name: format!("Criterion {id}"),
            category: "test".to_string(),
            effective_deduction: deduction,
            raw_deduction: deduction as f64,
            evidence_snippet: "evidence".to_string(),
            confidence: None,
        }
    }

    #[test]
    fn test_no_findings_scores_100() {
        assert_eq!(score(&[]), 100);
        let result = build(test_config(), vec![], vec![]);
        assert_eq!(result.final_score, 100);
        assert_eq!(result.risk_band, RiskBand::Compliant);
    }

    #[test]
    fn test_additive_scoring() {
        let findings = vec![applied("1.2", 28), applied("2.4", 25)];
        assert_eq!(score(&findings), 47);

        let result = build(test_config(), findings, vec![]);
        assert_eq!(result.final_score, 47);
        assert_eq!(result.risk_band, RiskBand::MediumRisk);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let findings = vec![applied("1.1", 35), applied("1.2", 30), applied("2.4", 25), applied("5.1", 25)];
        assert_eq!(score(&findings), 0);

        let result = build(test_config(), findings, vec![]);
        assert_eq!(result.final_score, 0);
        assert_eq!(result.risk_band, RiskBand::HighRisk);
    }

    #[test]
    fn test_result_ordering_by_impact() {
        let findings = vec![applied("3.1", 10), applied("1.2", 28), applied("2.4", 28)];
        let result = build(test_config(), findings, vec![]);

        let ids: Vec<&str> = result
            .applied_findings
            .iter()
            .map(|f| f.criterion_id.as_str())
            .collect();
        // 28-point tie breaks by ascending id.
        assert_eq!(ids, vec!["1.2", "2.4", "3.1"]);
    }

    #[test]
    fn test_rebuild_yields_identical_result() {
        let findings = vec![applied("1.2", 28), applied("2.4", 25)];
        let excluded = vec![];

        let first = build(test_config(), findings.clone(), excluded.clone());
        let second = build(test_config(), findings, excluded);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_result_serializes_with_exact_integers() {
        let result = build(test_config(), vec![applied("1.2", 28)], vec![]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["final_score"], 72);
        assert_eq!(json["applied_findings"][0]["effective_deduction"], 28);

        let back: DiagnosisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(deductions in proptest::collection::vec(0u32..=100, 0..10)) {
            let findings: Vec<AppliedFinding> = deductions
                .iter()
                .enumerate()
                .map(|(i, d)| applied(&format!("{}.1", i + 1), *d))
                .collect();

            let s = score(&findings);
            prop_assert!(s <= 100);
        }

        #[test]
        fn prop_additive_law(deductions in proptest::collection::vec(0u32..=40, 0..8)) {
            let findings: Vec<AppliedFinding> = deductions
                .iter()
                .enumerate()
                .map(|(i, d)| applied(&format!("{}.1", i + 1), *d))
                .collect();

            let total: u32 = deductions.iter().sum();
            let expected = 100u32.saturating_sub(total);
            prop_assert_eq!(score(&findings), expected);
        }

        #[test]
        fn prop_build_is_deterministic(deductions in proptest::collection::vec(0u32..=40, 0..8)) {
            let findings: Vec<AppliedFinding> = deductions
                .iter()
                .enumerate()
                .map(|(i, d)| applied(&format!("{}.1", i + 1), *d))
                .collect();

            let a = build(test_config(), findings.clone(), vec![]);
            let b = build(test_config(), findings, vec![]);

            prop_assert_eq!(a, b);
        }
    }
}
