//! Human-readable rendering of diagnosis output.

use std::fmt::Write;

use chrono::Utc;
use climatewash_core::{CriteriaCatalog, Criterion, DiagnosisResult};

/// Render a diagnosis result as a plain-text report.
///
/// The report is stamped with the rendering time; the result itself
/// carries no timestamp, so identical runs stay identical.
pub fn render_result(result: &DiagnosisResult) -> String {
    let mut out = String::new();

    writeln!(out, "Overall: {}", result.risk_band.label()).unwrap();
    writeln!(out, "Score:   {}/100", result.final_score).unwrap();
    writeln!(
        out,
        "Run at:  {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{}", result.risk_description).unwrap();
    writeln!(out).unwrap();

    if result.applied_findings.is_empty() {
        writeln!(out, "No violations detected.").unwrap();
    } else {
        writeln!(
            out,
            "Detected violations ({}):",
            result.applied_findings.len()
        )
        .unwrap();
        for (i, finding) in result.applied_findings.iter().enumerate() {
            writeln!(
                out,
                "  {}. [{}] {} (-{} pts)",
                i + 1,
                finding.criterion_id,
                finding.criterion_name,
                finding.effective_deduction
            )
            .unwrap();
            writeln!(out, "     evidence: \"{}\"", finding.evidence_snippet).unwrap();
        }
    }

    if !result.excluded_findings.is_empty() {
        writeln!(out).unwrap();
        writeln!(
            out,
            "Excluded findings ({}):",
            result.excluded_findings.len()
        )
        .unwrap();
        for excluded in &result.excluded_findings {
            writeln!(
                out,
                "  - {} ({})",
                excluded.finding.criterion_id,
                excluded.reason.as_str()
            )
            .unwrap();
        }
    }

    out
}

/// Render the active criteria subset as a table.
pub fn render_criteria(catalog: &CriteriaCatalog, active: &[&Criterion]) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{} (catalog {}): {} of {} criteria active",
        catalog.name,
        catalog.catalog_version,
        active.len(),
        catalog.criteria.len()
    )
    .unwrap();

    for criterion in active {
        writeln!(
            out,
            "  {:<6} {:<22} {:>2}-{:<3} {}",
            criterion.id,
            criterion.category,
            criterion.deduction_range.min,
            criterion.deduction_range.max,
            criterion.name
        )
        .unwrap();
    }

    out
}
