//! Configuration options for the medcheck client

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the service base URL
pub const ENV_API_URL: &str = "MEDCHECK_API_URL";

/// Environment variable holding the request timeout in seconds (`0` disables it)
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MEDCHECK_REQUEST_TIMEOUT_SECS";

/// Configuration options for the medcheck client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Path of the recognition endpoint
    pub identify_path: String,

    /// Path of the verification endpoint
    pub verify_path: String,

    /// Path of the drug information endpoint
    pub drug_info_path: String,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            identify_path: "/api/identify".to_string(),
            verify_path: "/api/verify".to_string(),
            drug_info_path: "/api/drug-info".to_string(),
            client_info: format!("medcheck-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the identify endpoint path
    pub fn with_identify_path(mut self, value: &str) -> Self {
        self.identify_path = value.to_string();
        self
    }

    /// Set the verify endpoint path
    pub fn with_verify_path(mut self, value: &str) -> Self {
        self.verify_path = value.to_string();
        self
    }

    /// Set the drug information endpoint path
    pub fn with_drug_info_path(mut self, value: &str) -> Self {
        self.drug_info_path = value.to_string();
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Overlay options found in the environment on top of `self`.
    pub fn merge_env(self) -> Result<Self> {
        let raw = std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok();
        self.merge_timeout_secs(raw.as_deref())
    }

    /// `0` disables the timeout
    fn merge_timeout_secs(self, raw: Option<&str>) -> Result<Self> {
        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(self),
        };
        let secs: u64 = raw.trim().parse().map_err(|_| {
            Error::config(format!(
                "{} must be a whole number of seconds",
                ENV_REQUEST_TIMEOUT_SECS
            ))
        })?;
        let timeout = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        Ok(self.with_request_timeout(timeout))
    }
}
