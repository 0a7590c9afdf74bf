//! medcheck client library
//!
//! Client-side workflow for a medication check: identify medication on a
//! photo, confirm the result, then verify it against a photographed
//! prescription for a chosen dosing timing. Recognition and comparison run
//! on a remote service; this crate encodes images, talks to the service and
//! drives the step state machine.

pub mod backend;
pub mod config;
pub mod drug_info;
pub mod encoder;
pub mod error;
pub mod fetch;
pub mod identify;
pub mod preview;
pub mod report;
pub mod verify;
pub mod workflow;

use reqwest::Client;
use url::Url;

use crate::config::{ClientOptions, ENV_API_URL};
use crate::drug_info::DrugInfoClient;
use crate::error::{Error, Result};
use crate::identify::IdentifyClient;
use crate::verify::VerifyClient;
use crate::workflow::WorkflowController;

/// The main entry point for the medcheck client
#[derive(Debug, Clone)]
pub struct MedCheck {
    /// The base URL of the recognition service
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl MedCheck {
    /// Address the service listens on in a local setup
    pub const DEFAULT_URL: &'static str = "http://localhost:5001";

    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use medcheck::MedCheck;
    ///
    /// let medcheck = MedCheck::new("http://localhost:5001");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use medcheck::{MedCheck, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_request_timeout(Some(Duration::from_secs(10)));
    /// let medcheck = MedCheck::new_with_options("http://localhost:5001", options);
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
            options,
        }
    }

    /// Create a client from `MEDCHECK_API_URL` and `MEDCHECK_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(ENV_API_URL)
            .map_err(|_| Error::config(format!("{} environment variable not found", ENV_API_URL)))?;
        Self::from_api_url(Some(url))
    }

    /// Like [`MedCheck::from_env`], but an unset `MEDCHECK_API_URL` means
    /// [`MedCheck::DEFAULT_URL`]. Invalid values are still errors.
    pub fn from_env_or_default() -> Result<Self> {
        Self::from_api_url(std::env::var(ENV_API_URL).ok())
    }

    fn from_api_url(url: Option<String>) -> Result<Self> {
        let options = ClientOptions::default().merge_env()?;
        match url {
            Some(url) => {
                Url::parse(&url)?;
                Ok(Self::new_with_options(&url, options))
            }
            None => Ok(Self::new_with_options(Self::DEFAULT_URL, options)),
        }
    }

    /// Client for the recognition endpoint
    pub fn identify(&self) -> IdentifyClient {
        IdentifyClient::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// Client for the verification endpoint
    pub fn verify(&self) -> VerifyClient {
        VerifyClient::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// Client for the drug information endpoint
    pub fn drug_info(&self) -> DrugInfoClient {
        DrugInfoClient::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// Start a new workflow session backed by this client
    pub fn workflow(&self) -> WorkflowController<MedCheck> {
        WorkflowController::new(self.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::backend::Backend;
    pub use crate::config::ClientOptions;
    pub use crate::encoder::{EncodedImage, ImageEncoder, ImageFile};
    pub use crate::error::{Error, Result};
    pub use crate::identify::IdentifiedDrug;
    pub use crate::verify::{Timing, VerificationResult};
    pub use crate::workflow::{Step, WorkflowController, WorkflowState};
    pub use crate::MedCheck;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_falls_back_only_when_unset() {
        let client = MedCheck::from_api_url(None).unwrap();
        assert_eq!(client.url, MedCheck::DEFAULT_URL);

        let client = MedCheck::from_api_url(Some("http://10.0.0.2:5001/".to_string())).unwrap();
        assert_eq!(client.url, "http://10.0.0.2:5001");

        let err = MedCheck::from_api_url(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
