//! Drug detail panel with stale-response suppression
//!
//! Lookups run independently of the main workflow. Each lookup gets a
//! sequence number and only the most recent one may update the panel.

use log::debug;

use crate::backend::Backend;
use crate::drug_info::DrugDetails;
use crate::error::{Error, Operation, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailContent {
    Loading,
    Loaded(DrugDetails),
    Failed(String),
}

impl DetailContent {
    /// Plain text for the panel body
    pub fn text(&self) -> &str {
        match self {
            DetailContent::Loading => "Fetching information...",
            DetailContent::Loaded(details) => details.details.as_str(),
            DetailContent::Failed(message) => message.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub drug_name: String,
    pub title: String,
    pub content: DetailContent,
}

/// Handed out by [`DetailLookups::begin`], returned with the outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    drug_name: String,
}

impl DetailTicket {
    pub fn drug_name(&self) -> &str {
        &self.drug_name
    }

    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<DrugDetails> {
        backend.fetch_drug_details(&self.drug_name).await
    }
}

#[derive(Debug, Default)]
pub struct DetailLookups {
    latest: u64,
    panel: Option<DetailPanel>,
}

impl DetailLookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel for `drug_name` in the loading state
    pub fn begin(&mut self, drug_name: &str) -> DetailTicket {
        self.latest += 1;
        self.panel = Some(DetailPanel {
            drug_name: drug_name.to_string(),
            title: format!("{} details", drug_name),
            content: DetailContent::Loading,
        });
        DetailTicket {
            seq: self.latest,
            drug_name: drug_name.to_string(),
        }
    }

    /// Apply a finished lookup. Returns false when it was superseded.
    pub fn complete(&mut self, ticket: &DetailTicket, outcome: Result<DrugDetails>) -> bool {
        if ticket.seq != self.latest {
            debug!(
                "Discarding stale details for {} (#{}, latest #{})",
                ticket.drug_name, ticket.seq, self.latest
            );
            return false;
        }

        let panel = match self.panel.as_mut() {
            Some(panel) => panel,
            None => return false,
        };

        panel.content = match outcome {
            Ok(details) => DetailContent::Loaded(details),
            Err(Error::Service { message, .. }) => {
                DetailContent::Failed(format!("Failed to fetch information: {}", message))
            }
            Err(e) if e.is_network() || matches!(e, Error::Json(_)) => {
                DetailContent::Failed(e.user_message(Operation::DrugInfo))
            }
            Err(e) => DetailContent::Failed(format!("Failed to fetch information: {}", e)),
        };
        true
    }

    pub fn close(&mut self) {
        self.panel = None;
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.panel,
            Some(DetailPanel {
                content: DetailContent::Loading,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_earlier_lookup_does_not_overwrite_newer_one() {
        let mut lookups = DetailLookups::new();
        let slow = lookups.begin("Aspirin");
        let fast = lookups.begin("Loxonin");

        assert!(lookups.complete(&fast, Ok(DrugDetails::new("painkiller"))));
        assert!(!lookups.complete(&slow, Ok(DrugDetails::new("old"))));

        let panel = lookups.panel().unwrap();
        assert_eq!(panel.title, "Loxonin details");
        assert_eq!(panel.content, DetailContent::Loaded(DrugDetails::new("painkiller")));
    }

    #[test]
    fn failure_never_leaves_panel_loading() {
        let mut lookups = DetailLookups::new();
        let ticket = lookups.begin("Aspirin");
        assert!(lookups.is_loading());
        assert_eq!(lookups.panel().unwrap().content.text(), "Fetching information...");

        lookups.complete(&ticket, Err(Error::service(404, "not found")));
        assert!(!lookups.is_loading());
        assert_eq!(
            lookups.panel().unwrap().content.text(),
            "Failed to fetch information: not found"
        );
    }

    #[test]
    fn completion_after_close_is_dropped() {
        let mut lookups = DetailLookups::new();
        let ticket = lookups.begin("Aspirin");
        lookups.close();
        assert!(!lookups.complete(&ticket, Ok(DrugDetails::new("x"))));
        assert!(lookups.panel().is_none());
    }
}
