//! Validation and normalization of raw AI findings.
//!
//! The AI boundary returns untrusted structure. This module classifies
//! every raw finding as either applied (counts toward the score) or
//! excluded with a named reason. Nothing is silently dropped: the
//! excluded list keeps the run auditable.

use std::collections::HashMap;

use crate::catalog::{CriteriaCatalog, Criterion};
use crate::types::{
    AppliedFinding, DirectiveScope, ExcludedFinding, ExclusionReason, RawFinding, RubricVersion,
};

/// The outcome of normalizing one raw findings payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFindings {
    /// Findings that count toward the score, in input order,
    /// deduplicated per criterion.
    pub applied: Vec<AppliedFinding>,

    /// Findings filtered out, each with its reason.
    pub excluded: Vec<ExcludedFinding>,
}

/// Classify each raw finding against the active criteria subset.
///
/// Rules, applied per finding in input order:
/// - unknown criterion id → excluded `unknown-criterion`
/// - criterion exists but is filtered out by the run's scope/version →
///   excluded `inactive-criterion`
/// - empty or whitespace evidence snippet → excluded `missing-evidence`
/// - deduction outside the criterion's range → clamped to the nearest
///   bound; the raw value is retained on the applied finding
/// - second finding for a criterion already applied → the one with the
///   smaller effective deduction is excluded `duplicate-superseded`
///   (on a tie the first occurrence wins)
pub fn normalize(
    catalog: &CriteriaCatalog,
    scope: DirectiveScope,
    version: RubricVersion,
    raw: Vec<RawFinding>,
) -> NormalizedFindings {
    let active: HashMap<&str, &Criterion> = catalog
        .active_criteria(scope, version)
        .into_iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let mut applied: Vec<AppliedFinding> = Vec::new();
    let mut excluded: Vec<ExcludedFinding> = Vec::new();
    // criterion id -> position in `applied`, for duplicate resolution
    let mut by_criterion: HashMap<String, usize> = HashMap::new();

    for finding in raw {
        let criterion = match active.get(finding.criterion_id.as_str()) {
            Some(c) => *c,
            None => {
                let reason = if catalog.get(&finding.criterion_id).is_some() {
                    ExclusionReason::InactiveCriterion
                } else {
                    ExclusionReason::UnknownCriterion
                };
                tracing::debug!(
                    criterion_id = %finding.criterion_id,
                    reason = reason.as_str(),
                    "excluding finding"
                );
                excluded.push(ExcludedFinding { finding, reason });
                continue;
            }
        };

        if finding.evidence_snippet.trim().is_empty() {
            excluded.push(ExcludedFinding {
                finding,
                reason: ExclusionReason::MissingEvidence,
            });
            continue;
        }

        let effective = criterion.deduction_range.clamp(finding.deduction);
        if (finding.deduction - effective as f64).abs() > f64::EPSILON {
            tracing::debug!(
                criterion_id = %criterion.id,
                raw = finding.deduction,
                effective,
                "clamped out-of-range deduction"
            );
        }

        let candidate = AppliedFinding {
            criterion_id: criterion.id.clone(),
            criterion_name: criterion.name.clone(),
            category: criterion.category.clone(),
            effective_deduction: effective,
            raw_deduction: finding.deduction,
            evidence_snippet: finding.evidence_snippet.clone(),
            confidence: finding.confidence,
        };

        match by_criterion.get(&criterion.id) {
            None => {
                by_criterion.insert(criterion.id.clone(), applied.len());
                applied.push(candidate);
            }
            Some(&idx) => {
                // Keep the larger deduction; demote the other.
                if candidate.effective_deduction > applied[idx].effective_deduction {
                    let superseded = std::mem::replace(&mut applied[idx], candidate);
                    excluded.push(ExcludedFinding {
                        finding: RawFinding {
                            criterion_id: superseded.criterion_id,
                            deduction: superseded.raw_deduction,
                            evidence_snippet: superseded.evidence_snippet,
                            confidence: superseded.confidence,
                        },
                        reason: ExclusionReason::DuplicateSuperseded,
                    });
                } else {
                    excluded.push(ExcludedFinding {
                        finding,
                        reason: ExclusionReason::DuplicateSuperseded,
                    });
                }
            }
        }
    }

    NormalizedFindings { applied, excluded }
}
