//! Types for the verify endpoint

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identify::IdentifiedDrug;

/// Dosing period the verification is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timing {
    #[default]
    Morning,
    Midday,
    Evening,
    BeforeSleep,
    Unspecified,
}

impl Timing {
    pub const ALL: [Timing; 5] = [
        Timing::Morning,
        Timing::Midday,
        Timing::Evening,
        Timing::BeforeSleep,
        Timing::Unspecified,
    ];

    /// Canonical label sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Timing::Morning => "Morning",
            Timing::Midday => "Midday",
            Timing::Evening => "Evening",
            Timing::BeforeSleep => "BeforeSleep",
            Timing::Unspecified => "Unspecified",
        }
    }

    /// Localized label shown in the timing picker
    pub fn display_label(self) -> &'static str {
        match self {
            Timing::Morning => "朝",
            Timing::Midday => "昼",
            Timing::Evening => "夕",
            Timing::BeforeSleep => "眠前",
            Timing::Unspecified => "タイミング指定なし",
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = Error;

    /// Accepts canonical and localized labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Timing::ALL
            .into_iter()
            .find(|timing| timing.as_str() == s || timing.display_label() == s)
            .ok_or_else(|| Error::precondition(format!("unknown timing: {}", s)))
    }
}

/// Request body sent to the verify endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest<'a> {
    pub identified_drugs: &'a [IdentifiedDrug],
    pub prescription_image_data: &'a str,
    pub prescription_mime_type: &'a str,
    pub timing: Timing,
}

/// A drug read from the prescription
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrescriptionDrug {
    pub name: String,
    pub quantity: String,
    pub timing: String,
}

/// One paired judgment between an identified and a prescribed drug
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub identified_name: String,
    pub prescription_name: String,
    #[serde(rename = "match")]
    pub is_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ComparisonEntry {
    /// Warning to show, only for mismatches
    pub fn warning(&self) -> Option<&str> {
        if self.is_match {
            None
        } else {
            Some(self.warning.as_deref().unwrap_or(""))
        }
    }

    fn normalize(&mut self) {
        if self.is_match {
            self.warning = None;
        } else if self.warning.is_none() {
            self.warning = Some(String::new());
        }
    }
}

/// Outcome of a prescription verification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerificationResult {
    /// Overall judgment, displayed verbatim
    pub overall_status: String,
    /// Colour token for the overall judgment, e.g. "green" or "red"
    pub overall_status_color: String,
    pub summary: String,
    pub identified_drugs: Vec<IdentifiedDrug>,
    pub prescription_drugs: Vec<PrescriptionDrug>,
    pub comparison: Vec<ComparisonEntry>,
}

impl VerificationResult {
    /// Make `warning` present exactly for mismatching entries
    pub fn normalized(mut self) -> Self {
        self.comparison.iter_mut().for_each(ComparisonEntry::normalize);
        self
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.comparison.iter().filter(|entry| !entry.is_match)
    }

    pub fn has_mismatch(&self) -> bool {
        self.mismatches().next().is_some()
    }
}
