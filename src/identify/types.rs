//! Types for the identify endpoint

use serde::{Deserialize, Serialize};

/// A medication recognized on the drug photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedDrug {
    pub name: String,
    pub quantity: String,
}

impl IdentifiedDrug {
    pub fn new(name: &str, quantity: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
        }
    }
}

/// Request body sent to the identify endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyRequest<'a> {
    pub image_data: &'a str,
    pub mime_type: &'a str,
}

/// Successful identify response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    /// Recognized drugs, empty when nothing was recognized
    #[serde(default)]
    pub identified_drugs: Vec<IdentifiedDrug>,

    /// Raw model output, kept for audit display
    #[serde(default)]
    pub raw_response: String,
}
