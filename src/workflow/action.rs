use crate::encoder::ImageAsset;
use crate::identify::IdentifyResponse;
use crate::verify::{Timing, VerificationResult};

use super::state::Ticket;

/// Every transition the workflow accepts
#[derive(Debug, Clone)]
pub enum Action {
    SelectDrugImage(ImageAsset),
    IdentifyStarted,
    IdentifySucceeded {
        ticket: Ticket,
        response: IdentifyResponse,
    },
    IdentifyFailed {
        ticket: Ticket,
        message: String,
    },
    ConfirmAndProceed,
    Rescan,
    SelectPrescriptionImage(ImageAsset),
    SelectTiming(Timing),
    VerifyStarted,
    VerifySucceeded {
        ticket: Ticket,
        result: VerificationResult,
    },
    VerifyFailed {
        ticket: Ticket,
        message: String,
    },
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectDrugImage(_) => "SelectDrugImage",
            Action::IdentifyStarted => "IdentifyStarted",
            Action::IdentifySucceeded { .. } => "IdentifySucceeded",
            Action::IdentifyFailed { .. } => "IdentifyFailed",
            Action::ConfirmAndProceed => "ConfirmAndProceed",
            Action::Rescan => "Rescan",
            Action::SelectPrescriptionImage(_) => "SelectPrescriptionImage",
            Action::SelectTiming(_) => "SelectTiming",
            Action::VerifyStarted => "VerifyStarted",
            Action::VerifySucceeded { .. } => "VerifySucceeded",
            Action::VerifyFailed { .. } => "VerifyFailed",
            Action::Reset => "Reset",
        }
    }
}
