//! Error handling for the medcheck client

use std::fmt;
use thiserror::Error;

/// Unified error type for the medcheck client
#[derive(Error, Debug)]
pub enum Error {
    /// The image file could not be read or decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Network or transport failure, no usable response received
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// An operation was invoked without its input constraints satisfied
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A success response did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The remote operation an error was raised from.
///
/// Only used to pick the user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Identify,
    Verify,
    DrugInfo,
}

impl Operation {
    /// Generic failure text, used when the service gives no message
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Identify => "An error occurred while identifying the medication.",
            Operation::Verify => "An error occurred while verifying the prescription.",
            Operation::DrugInfo => "the service returned no details",
        }
    }

    fn network_message(self) -> &'static str {
        match self {
            Operation::Identify => {
                "An error occurred while identifying the medication. Check your network connection."
            }
            Operation::Verify => {
                "An error occurred while verifying the prescription. Check your network connection."
            }
            Operation::DrugInfo => {
                "An error occurred while fetching information. Check your network connection."
            }
        }
    }

    fn input_message(self) -> &'static str {
        match self {
            Operation::Identify => "Please select an image of the medication.",
            Operation::Verify => {
                "A prescription image and identified medication are required."
            }
            Operation::DrugInfo => "A drug name is required.",
        }
    }
}

impl Error {
    /// Create a new encoding error
    pub fn encoding<T: fmt::Display>(msg: T) -> Self {
        Error::Encoding(msg.to_string())
    }

    /// Create a new precondition error
    pub fn precondition<T: fmt::Display>(msg: T) -> Self {
        Error::Precondition(msg.to_string())
    }

    /// Create a new service error
    pub fn service<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Service {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Whether the error came from the transport rather than the service
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Request(_))
    }

    /// The single string shown to the user for a failed operation.
    ///
    /// Service messages are passed through verbatim.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            Error::Service { message, .. } => message.clone(),
            Error::Request(_) | Error::Json(_) => operation.network_message().to_string(),
            Error::Encoding(_) => {
                "The selected image could not be read. Please select it again.".to_string()
            }
            Error::Precondition(_) => operation.input_message().to_string(),
            Error::Url(_) | Error::Config(_) => operation.failure_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_verbatim() {
        let err = Error::service(422, "unrecognizable image");
        assert_eq!(err.user_message(Operation::Identify), "unrecognizable image");
        assert_eq!(err.to_string(), "Service error (422): unrecognizable image");
    }

    #[test]
    fn encoding_and_precondition_messages() {
        let err = Error::encoding("file vanished");
        assert_eq!(
            err.user_message(Operation::Identify),
            "The selected image could not be read. Please select it again."
        );
        let err = Error::precondition("no drugs");
        assert_eq!(
            err.user_message(Operation::Verify),
            "A prescription image and identified medication are required."
        );
        assert!(!err.is_network());
    }

    #[test]
    fn json_error_reads_as_network_problem() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.user_message(Operation::DrugInfo).contains("network connection"));
    }
}
