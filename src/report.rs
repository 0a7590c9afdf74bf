//! Plain-text rendering of identification and verification outcomes

use std::fmt::Write;

use crate::identify::IdentifiedDrug;
use crate::verify::VerificationResult;

/// Shown on the confirm screen when recognition found nothing
pub const NOTHING_IDENTIFIED: &str =
    "No medication could be identified. Please rescan the image.";

/// Shown with every mismatching comparison entry
pub const MISMATCH_PREFIX: &str = "WARNING: mismatch detected!";

/// Identified drugs as `name (quantity)` lines, or the rescan hint
pub fn render_identified(drugs: &[IdentifiedDrug]) -> String {
    if drugs.is_empty() {
        return NOTHING_IDENTIFIED.to_string();
    }
    drugs
        .iter()
        .map(|drug| format!("- {} ({})", drug.name, drug.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full verification report
pub fn render_result(result: &VerificationResult) -> String {
    let mut out = String::new();

    // writing to a String cannot fail
    if !result.overall_status.is_empty() {
        if result.overall_status_color.is_empty() {
            let _ = writeln!(out, "Overall: {}", result.overall_status);
        } else {
            let _ = writeln!(
                out,
                "Overall: {} [{}]",
                result.overall_status, result.overall_status_color
            );
        }
    }
    if !result.summary.is_empty() {
        let _ = writeln!(out, "{}", result.summary);
    }

    let _ = writeln!(out, "\nIdentified drugs:");
    for drug in &result.identified_drugs {
        let _ = writeln!(out, "- {} ({})", drug.name, drug.quantity);
    }

    let _ = writeln!(out, "\nPrescription drugs:");
    for drug in &result.prescription_drugs {
        let _ = writeln!(out, "- {} ({}) - {}", drug.name, drug.quantity, drug.timing);
    }

    let _ = writeln!(out, "\nComparison:");
    for entry in &result.comparison {
        let _ = writeln!(out, "- identified:   {}", entry.identified_name);
        let _ = writeln!(out, "  prescription: {}", entry.prescription_name);
        if let Some(warning) = entry.warning() {
            let _ = writeln!(out, "  {} {}", MISMATCH_PREFIX, warning);
        }
    }

    out
}
