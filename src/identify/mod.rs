//! Drug photo recognition

mod types;

use log::info;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::encoder::EncodedImage;
use crate::error::{Error, Operation};
use crate::fetch::Fetch;

pub use types::*;

/// Client for the recognition endpoint
pub struct IdentifyClient {
    /// The base URL of the service
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl IdentifyClient {
    /// Create a new IdentifyClient
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
        }
    }

    fn get_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.options.identify_path)
    }

    /// Submit an encoded drug photo and return what was recognized on it
    pub async fn identify(&self, image: &EncodedImage) -> Result<IdentifyResponse, Error> {
        if image.is_empty() {
            return Err(Error::precondition("drug image payload is empty"));
        }

        let body = IdentifyRequest {
            image_data: &image.data,
            mime_type: &image.mime_type,
        };

        let response = Fetch::post(&self.client, &self.get_url())
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .fallback_message(Operation::Identify.failure_message())
            .json(&body)?
            .execute::<IdentifyResponse>()
            .await?;

        info!("Identified {} drug(s)", response.identified_drugs.len());
        Ok(response)
    }
}
