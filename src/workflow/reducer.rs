//! Pure transition function of the workflow state machine

use crate::error::{Error, Result};
use crate::preview::PreviewHandle;

use super::action::Action;
use super::state::{Busy, BusyKind, Step, Ticket, WorkflowState};

/// Outcome of a successfully reduced action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    /// Preview handles the new state no longer references
    pub released: Vec<PreviewHandle>,
    /// False when a stale completion was ignored
    pub applied: bool,
}

impl Transition {
    fn unchanged(state: &WorkflowState) -> Self {
        Self {
            state: state.clone(),
            released: Vec::new(),
            applied: false,
        }
    }
}

/// Apply `action` to `state`.
///
/// Invalid transitions return [`Error::Precondition`]; the caller keeps
/// the old state. Completions whose ticket does not match the in-flight
/// operation are ignored.
pub fn reduce(state: &WorkflowState, action: Action) -> Result<Transition> {
    let mut next = state.clone();
    let mut released = Vec::new();

    match action {
        Action::SelectDrugImage(asset) => {
            expect_step(state, Step::Capture, "select a drug image")?;
            expect_idle(state, "select a drug image")?;
            released.extend(next.drug_image.replace(asset).map(|old| old.preview));
            next.result = None;
            next.error = None;
        }
        Action::IdentifyStarted => {
            expect_step(state, Step::Capture, "identify")?;
            expect_idle(state, "identify")?;
            if state.drug_image.is_none() {
                return Err(Error::precondition("identify requires a selected drug image"));
            }
            next.busy = Some(start(&mut next, BusyKind::Identifying));
            next.error = None;
            next.result = None;
        }
        Action::IdentifySucceeded { ticket, response } => {
            if !state.awaits(BusyKind::Identifying, ticket) {
                return Ok(Transition::unchanged(state));
            }
            next.busy = None;
            next.identified_drugs = response.identified_drugs;
            next.raw_response = Some(response.raw_response);
            next.step = Step::Confirm;
        }
        Action::IdentifyFailed { ticket, message } => {
            if !state.awaits(BusyKind::Identifying, ticket) {
                return Ok(Transition::unchanged(state));
            }
            next.busy = None;
            next.error = Some(message);
        }
        Action::ConfirmAndProceed => {
            expect_step(state, Step::Confirm, "confirm")?;
            expect_idle(state, "confirm")?;
            // the drug photo is no longer the active asset
            released.extend(next.drug_image.take().map(|old| old.preview));
            next.step = Step::Verify;
        }
        Action::Rescan => {
            expect_step(state, Step::Confirm, "rescan")?;
            return Ok(reset(state));
        }
        Action::SelectPrescriptionImage(asset) => {
            expect_step(state, Step::Verify, "select a prescription image")?;
            expect_idle(state, "select a prescription image")?;
            released.extend(next.prescription_image.replace(asset).map(|old| old.preview));
            next.result = None;
            next.error = None;
        }
        Action::SelectTiming(timing) => {
            expect_step(state, Step::Verify, "select a timing")?;
            // the in-flight request already carries the old timing
            expect_idle(state, "select a timing")?;
            next.timing = timing;
        }
        Action::VerifyStarted => {
            expect_step(state, Step::Verify, "verify")?;
            expect_idle(state, "verify")?;
            if state.prescription_image.is_none() {
                return Err(Error::precondition("verify requires a selected prescription image"));
            }
            if state.identified_drugs.is_empty() {
                return Err(Error::precondition("verify requires at least one identified drug"));
            }
            next.busy = Some(start(&mut next, BusyKind::Verifying));
            next.error = None;
            next.result = None;
        }
        Action::VerifySucceeded { ticket, result } => {
            if !state.awaits(BusyKind::Verifying, ticket) {
                return Ok(Transition::unchanged(state));
            }
            next.busy = None;
            next.result = Some(result);
        }
        Action::VerifyFailed { ticket, message } => {
            if !state.awaits(BusyKind::Verifying, ticket) {
                return Ok(Transition::unchanged(state));
            }
            next.busy = None;
            next.error = Some(message);
        }
        Action::Reset => return Ok(reset(state)),
    }

    Ok(Transition {
        state: next,
        released,
        applied: true,
    })
}

fn reset(state: &WorkflowState) -> Transition {
    let released = state
        .drug_image
        .iter()
        .chain(state.prescription_image.iter())
        .map(|asset| asset.preview)
        .collect();

    Transition {
        state: WorkflowState {
            // tickets keep counting so late completions never match
            next_ticket: state.next_ticket,
            ..WorkflowState::default()
        },
        released,
        applied: true,
    }
}

fn start(state: &mut WorkflowState, kind: BusyKind) -> Busy {
    let ticket = Ticket(state.next_ticket);
    state.next_ticket += 1;
    Busy { kind, ticket }
}

fn expect_step(state: &WorkflowState, step: Step, what: &str) -> Result<()> {
    if state.step == step {
        Ok(())
    } else {
        Err(Error::precondition(format!(
            "cannot {} in step {:?}, only in {:?}",
            what, state.step, step
        )))
    }
}

fn expect_idle(state: &WorkflowState, what: &str) -> Result<()> {
    match state.busy {
        None => Ok(()),
        Some(busy) => Err(Error::precondition(format!(
            "cannot {} while {:?}",
            what, busy.kind
        ))),
    }
}
