//! The seam between the workflow and the remote recognition service

use async_trait::async_trait;

use crate::drug_info::DrugDetails;
use crate::encoder::EncodedImage;
use crate::error::Result;
use crate::identify::{IdentifiedDrug, IdentifyResponse};
use crate::verify::{Timing, VerificationResult};
use crate::MedCheck;

/// Remote operations the workflow depends on
#[async_trait]
pub trait Backend: Send + Sync {
    /// Recognize the drugs on an encoded photo
    async fn identify_drugs(&self, image: &EncodedImage) -> Result<IdentifyResponse>;

    /// Cross-check identified drugs against an encoded prescription photo
    async fn verify_prescription(
        &self,
        identified_drugs: &[IdentifiedDrug],
        prescription: &EncodedImage,
        timing: Timing,
    ) -> Result<VerificationResult>;

    /// Descriptive text for one drug
    async fn fetch_drug_details(&self, drug_name: &str) -> Result<DrugDetails>;
}

#[async_trait]
impl Backend for MedCheck {
    async fn identify_drugs(&self, image: &EncodedImage) -> Result<IdentifyResponse> {
        self.identify().identify(image).await
    }

    async fn verify_prescription(
        &self,
        identified_drugs: &[IdentifiedDrug],
        prescription: &EncodedImage,
        timing: Timing,
    ) -> Result<VerificationResult> {
        self.verify()
            .verify(identified_drugs, prescription, timing)
            .await
    }

    async fn fetch_drug_details(&self, drug_name: &str) -> Result<DrugDetails> {
        self.drug_info().details(drug_name).await
    }
}
