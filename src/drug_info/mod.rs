//! On-demand drug information lookups

mod types;

use log::debug;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::{Error, Operation};
use crate::fetch::Fetch;

pub use types::*;

/// Client for the drug information endpoint
pub struct DrugInfoClient {
    /// The base URL of the service
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl DrugInfoClient {
    /// Create a new DrugInfoClient
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
        }
    }

    fn get_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.options.drug_info_path)
    }

    /// Fetch descriptive text for a single drug
    pub async fn details(&self, drug_name: &str) -> Result<DrugDetails, Error> {
        if drug_name.trim().is_empty() {
            return Err(Error::precondition("drug name is empty"));
        }

        let body = DrugInfoRequest { drug_name };
        debug!("Looking up details for {}", drug_name);

        Fetch::post(&self.client, &self.get_url())
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .fallback_message(Operation::DrugInfo.failure_message())
            .json(&body)?
            .execute::<DrugDetails>()
            .await
    }
}
