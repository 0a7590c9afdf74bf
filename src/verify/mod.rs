//! Prescription verification

mod types;

use log::info;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::encoder::EncodedImage;
use crate::error::{Error, Operation};
use crate::fetch::Fetch;
use crate::identify::IdentifiedDrug;

pub use types::*;

/// Client for the verification endpoint
pub struct VerifyClient {
    /// The base URL of the service
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl VerifyClient {
    /// Create a new VerifyClient
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
        }
    }

    fn get_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.options.verify_path)
    }

    /// Cross-check `identified_drugs` against a prescription photo for `timing`.
    ///
    /// An empty drug list or an empty payload is a caller bug and fails with
    /// [`Error::Precondition`] before anything is sent.
    pub async fn verify(
        &self,
        identified_drugs: &[IdentifiedDrug],
        prescription: &EncodedImage,
        timing: Timing,
    ) -> Result<VerificationResult, Error> {
        if identified_drugs.is_empty() {
            return Err(Error::precondition("no identified drugs to verify"));
        }
        if prescription.is_empty() {
            return Err(Error::precondition("prescription image payload is empty"));
        }

        let body = VerifyRequest {
            identified_drugs,
            prescription_image_data: &prescription.data,
            prescription_mime_type: &prescription.mime_type,
            timing,
        };

        let result = Fetch::post(&self.client, &self.get_url())
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .fallback_message(Operation::Verify.failure_message())
            .json(&body)?
            .execute::<VerificationResult>()
            .await?
            .normalized();

        info!(
            "Verification finished: {} ({} comparison entries, {} mismatched)",
            result.overall_status,
            result.comparison.len(),
            result.mismatches().count()
        );
        Ok(result)
    }
}
