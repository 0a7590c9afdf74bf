//! The capture → confirm → verify workflow
//!
//! State lives in an immutable [`WorkflowState`] record. [`reduce`] is the
//! only way to derive the next state, and [`WorkflowController`] performs
//! the side effects around it (encoding, service calls, preview release).

mod action;
mod controller;
mod detail;
mod reducer;
mod state;

pub use action::Action;
pub use controller::{IdentifyJob, VerifyJob, WorkflowController};
pub use detail::{DetailContent, DetailLookups, DetailPanel, DetailTicket};
pub use reducer::{reduce, Transition};
pub use state::{Busy, BusyKind, Step, Ticket, WorkflowState};
