//! Drives the workflow: owns the state, the preview registry and the
//! backend, and turns service outcomes into actions.

use log::{debug, info, warn};

use crate::backend::Backend;
use crate::drug_info::DrugDetails;
use crate::encoder::{ImageAsset, ImageEncoder, ImageFile};
use crate::error::{Error, Operation, Result};
use crate::identify::{IdentifiedDrug, IdentifyResponse};
use crate::preview::PreviewRegistry;
use crate::verify::{Timing, VerificationResult};

use super::action::Action;
use super::detail::{DetailLookups, DetailTicket};
use super::reducer::reduce;
use super::state::{Ticket, WorkflowState};

/// A started identify call
#[derive(Debug, Clone)]
pub struct IdentifyJob {
    ticket: Ticket,
    image: ImageFile,
}

impl IdentifyJob {
    /// Encode the drug photo and submit it
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<IdentifyResponse> {
        let encoded = ImageEncoder::encode(&self.image).await?;
        backend.identify_drugs(&encoded).await
    }
}

/// A started verify call
#[derive(Debug, Clone)]
pub struct VerifyJob {
    ticket: Ticket,
    image: ImageFile,
    identified_drugs: Vec<IdentifiedDrug>,
    timing: Timing,
}

impl VerifyJob {
    /// Encode the prescription photo and submit it with the identified drugs
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<VerificationResult> {
        let encoded = ImageEncoder::encode(&self.image).await?;
        backend
            .verify_prescription(&self.identified_drugs, &encoded, self.timing)
            .await
    }
}

/// The workflow controller for one session
pub struct WorkflowController<B> {
    backend: B,
    state: WorkflowState,
    previews: PreviewRegistry,
    details: DetailLookups,
}

impl<B: Backend> WorkflowController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_previews(backend, PreviewRegistry::new())
    }

    /// Use a shared preview registry
    pub fn with_previews(backend: B, previews: PreviewRegistry) -> Self {
        Self {
            backend,
            state: WorkflowState::new(),
            previews,
            details: DetailLookups::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn details(&self) -> &DetailLookups {
        &self.details
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        match reduce(&self.state, action) {
            Ok(transition) => {
                for handle in transition.released {
                    self.previews.revoke(handle);
                }
                if transition.applied {
                    debug!("{} applied, step {:?}", name, transition.state.step);
                } else {
                    debug!("{} was stale, ignored", name);
                }
                self.state = transition.state;
                Ok(())
            }
            Err(e) => {
                warn!("{} refused in step {:?}: {}", name, self.state.step, e);
                Err(e)
            }
        }
    }

    fn select_image(&mut self, file: ImageFile, action: fn(ImageAsset) -> Action) -> Result<()> {
        let preview = self.previews.create(file.path());
        let result = self.dispatch(action(ImageAsset { file, preview }));
        if result.is_err() {
            self.previews.revoke(preview);
        }
        result
    }

    /// Replace the drug photo (Capture only)
    pub fn select_drug_image(&mut self, file: ImageFile) -> Result<()> {
        self.select_image(file, Action::SelectDrugImage)
    }

    /// Mark the workflow busy and hand out the identify call to run
    pub fn begin_identify(&mut self) -> Result<IdentifyJob> {
        self.dispatch(Action::IdentifyStarted)?;
        match (&self.state.busy, &self.state.drug_image) {
            (Some(busy), Some(image)) => Ok(IdentifyJob {
                ticket: busy.ticket,
                image: image.file.clone(),
            }),
            _ => Err(Error::precondition("identify did not start")),
        }
    }

    /// Apply the outcome of an identify call
    pub fn finish_identify(&mut self, job: IdentifyJob, outcome: Result<IdentifyResponse>) {
        let action = match outcome {
            Ok(response) => {
                info!("Identify returned {} drug(s)", response.identified_drugs.len());
                Action::IdentifySucceeded {
                    ticket: job.ticket,
                    response,
                }
            }
            Err(e) => {
                warn!("Identify failed: {}", e);
                Action::IdentifyFailed {
                    ticket: job.ticket,
                    message: e.user_message(Operation::Identify),
                }
            }
        };
        // completions are never refused, stale ones are ignored
        let _ = self.dispatch(action);
    }

    /// Encode the drug photo, identify it and apply the result.
    ///
    /// Returns `Err` only when identify may not start; service and
    /// encoding failures end up in [`WorkflowState::error`].
    pub async fn identify(&mut self) -> Result<()> {
        let job = self.begin_identify()?;
        let outcome = job.run(&self.backend).await;
        self.finish_identify(job, outcome);
        Ok(())
    }

    /// Accept the identified drugs and move on to verification
    pub fn confirm_and_proceed(&mut self) -> Result<()> {
        if self.state.identified_drugs.is_empty() {
            warn!("Proceeding to verification with no identified drugs");
        }
        self.dispatch(Action::ConfirmAndProceed)
    }

    /// Discard the identification and start over
    pub fn rescan(&mut self) -> Result<()> {
        self.dispatch(Action::Rescan)
    }

    /// Replace the prescription photo (Verify only)
    pub fn select_prescription_image(&mut self, file: ImageFile) -> Result<()> {
        self.select_image(file, Action::SelectPrescriptionImage)
    }

    pub fn select_timing(&mut self, timing: Timing) -> Result<()> {
        self.dispatch(Action::SelectTiming(timing))
    }

    /// Mark the workflow busy and hand out the verify call to run
    pub fn begin_verify(&mut self) -> Result<VerifyJob> {
        self.dispatch(Action::VerifyStarted)?;
        match (&self.state.busy, &self.state.prescription_image) {
            (Some(busy), Some(image)) => Ok(VerifyJob {
                ticket: busy.ticket,
                image: image.file.clone(),
                identified_drugs: self.state.identified_drugs.clone(),
                timing: self.state.timing,
            }),
            _ => Err(Error::precondition("verify did not start")),
        }
    }

    /// Apply the outcome of a verify call
    pub fn finish_verify(&mut self, job: VerifyJob, outcome: Result<VerificationResult>) {
        let action = match outcome {
            Ok(result) => Action::VerifySucceeded {
                ticket: job.ticket,
                result,
            },
            Err(e) => {
                warn!("Verify failed: {}", e);
                Action::VerifyFailed {
                    ticket: job.ticket,
                    message: e.user_message(Operation::Verify),
                }
            }
        };
        let _ = self.dispatch(action);
    }

    /// Encode the prescription photo, verify it and apply the result
    pub async fn verify(&mut self) -> Result<()> {
        let job = self.begin_verify()?;
        let outcome = job.run(&self.backend).await;
        self.finish_verify(job, outcome);
        Ok(())
    }

    /// Return to Capture, dropping every image, drug and result
    pub fn reset(&mut self) {
        info!("Resetting workflow");
        let _ = self.dispatch(Action::Reset);
    }

    /// Open the detail panel for `drug_name`; independent of the busy flag
    pub fn begin_detail_lookup(&mut self, drug_name: &str) -> DetailTicket {
        self.details.begin(drug_name)
    }

    /// Returns false when a newer lookup superseded this one
    pub fn finish_detail_lookup(
        &mut self,
        ticket: &DetailTicket,
        outcome: Result<DrugDetails>,
    ) -> bool {
        self.details.complete(ticket, outcome)
    }

    /// Fetch and show details for `drug_name`
    pub async fn view_drug_details(&mut self, drug_name: &str) -> bool {
        let ticket = self.begin_detail_lookup(drug_name);
        let outcome = ticket.run(&self.backend).await;
        self.finish_detail_lookup(&ticket, outcome)
    }

    pub fn close_details(&mut self) {
        self.details.close();
    }
}
