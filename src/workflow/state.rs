//! Workflow state record

use crate::encoder::ImageAsset;
use crate::identify::IdentifiedDrug;
use crate::verify::{Timing, VerificationResult};

/// Which screen of the workflow is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    /// Photograph the medication
    #[default]
    Capture,
    /// Review what was identified
    Confirm,
    /// Photograph the prescription and verify
    Verify,
}

/// The class of in-flight operation holding the busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyKind {
    Identifying,
    Verifying,
}

/// Identifies one started operation so its completion can be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy {
    pub kind: BusyKind,
    pub ticket: Ticket,
}

/// Everything the workflow knows about the current session.
///
/// Only [`reduce`](super::reduce) produces new states.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub step: Step,
    pub drug_image: Option<ImageAsset>,
    pub prescription_image: Option<ImageAsset>,
    pub identified_drugs: Vec<IdentifiedDrug>,
    /// Raw recognition output from the last identify call
    pub raw_response: Option<String>,
    pub timing: Timing,
    pub busy: Option<Busy>,
    /// User-visible message of the last failure
    pub error: Option<String>,
    pub result: Option<VerificationResult>,
    pub(crate) next_ticket: u64,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// The image the current step works on
    pub fn active_image(&self) -> Option<&ImageAsset> {
        match self.step {
            Step::Capture | Step::Confirm => self.drug_image.as_ref(),
            Step::Verify => self.prescription_image.as_ref(),
        }
    }

    /// Whether an Identify may be started
    pub fn can_identify(&self) -> bool {
        self.step == Step::Capture && self.drug_image.is_some() && !self.is_busy()
    }

    /// Whether a Verify may be started
    pub fn can_verify(&self) -> bool {
        self.step == Step::Verify
            && self.prescription_image.is_some()
            && !self.identified_drugs.is_empty()
            && !self.is_busy()
    }

    /// True when nothing has been captured, identified or verified yet
    pub fn is_initial(&self) -> bool {
        self.step == Step::Capture
            && self.drug_image.is_none()
            && self.prescription_image.is_none()
            && self.identified_drugs.is_empty()
            && self.raw_response.is_none()
            && self.timing == Timing::Morning
            && self.busy.is_none()
            && self.error.is_none()
            && self.result.is_none()
    }

    pub(crate) fn awaits(&self, kind: BusyKind, ticket: Ticket) -> bool {
        self.busy == Some(Busy { kind, ticket })
    }
}
