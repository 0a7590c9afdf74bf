use std::time::Duration;

use medcheck::config::ClientOptions;
use medcheck::encoder::EncodedImage;
use medcheck::error::Error;
use medcheck::identify::IdentifiedDrug;
use medcheck::verify::Timing;
use medcheck::MedCheck;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn image() -> EncodedImage {
    EncodedImage::from_bytes(b"fake image bytes", "image/jpeg")
}

#[tokio::test]
async fn identify_sends_payload_and_parses_drugs() {
    let server = MockServer::start().await;
    let image = image();

    Mock::given(method("POST"))
        .and(path("/api/identify"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "imageData": image.data,
            "mimeType": "image/jpeg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identifiedDrugs": [{"name": "Aspirin", "quantity": "10 tablets"}],
            "rawResponse": "Aspirin x10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let response = client.identify().identify(&image).await.unwrap();

    assert_eq!(
        response.identified_drugs,
        vec![IdentifiedDrug::new("Aspirin", "10 tablets")]
    );
    assert_eq!(response.raw_response, "Aspirin x10");
}

#[tokio::test]
async fn identify_accepts_empty_recognition() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/identify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identifiedDrugs": [],
            "rawResponse": ""
        })))
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let response = client.identify().identify(&image()).await.unwrap();
    assert!(response.identified_drugs.is_empty());
}

#[tokio::test]
async fn identify_service_error_uses_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/identify"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "unrecognizable image"})),
        )
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    match client.identify().identify(&image()).await {
        Err(Error::Service { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "unrecognizable image");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn identify_service_error_without_message_gets_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/identify"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    match client.identify().identify(&image()).await {
        Err(Error::Service { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "An error occurred while identifying the medication.");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn identify_with_empty_payload_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let empty = EncodedImage::from_bytes(b"", "image/jpeg");
    let result = client.identify().identify(&empty).await;
    assert!(matches!(result, Err(Error::Precondition(_))));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // nothing listens on the discard port
    let client = MedCheck::new("http://127.0.0.1:9");
    let err = client.identify().identify(&image()).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn hung_request_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/identify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"identifiedDrugs": [], "rawResponse": ""})),
        )
        .mount(&server)
        .await;

    let options = ClientOptions::default().with_request_timeout(Some(Duration::from_millis(200)));
    let client = MedCheck::new_with_options(&server.uri(), options);
    match client.identify().identify(&image()).await {
        Err(Error::Request(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn verify_sends_drugs_image_and_timing() {
    let server = MockServer::start().await;
    let image = image();

    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .and(body_json(json!({
            "identifiedDrugs": [{"name": "Aspirin", "quantity": "10"}],
            "prescriptionImageData": image.data,
            "prescriptionMimeType": "image/jpeg",
            "timing": "Evening"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "overallStatus": "不一致あり",
            "overallStatusColor": "red",
            "summary": "Quantity differs.",
            "identifiedDrugs": [{"name": "Aspirin", "quantity": "10"}],
            "prescriptionDrugs": [{"name": "Aspirin", "quantity": "14", "timing": "Evening"}],
            "comparison": [{
                "identifiedName": "Aspirin",
                "prescriptionName": "Aspirin",
                "match": false,
                "warning": "quantity 10 vs 14"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let drugs = vec![IdentifiedDrug::new("Aspirin", "10")];
    let result = client
        .verify()
        .verify(&drugs, &image, Timing::Evening)
        .await
        .unwrap();

    assert_eq!(result.overall_status, "不一致あり");
    assert_eq!(result.overall_status_color, "red");
    assert_eq!(result.prescription_drugs[0].quantity, "14");
    assert_eq!(result.comparison[0].warning(), Some("quantity 10 vs 14"));
}

#[tokio::test]
async fn verify_without_drugs_fails_before_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let result = client.verify().verify(&[], &image(), Timing::Morning).await;
    assert!(matches!(result, Err(Error::Precondition(_))));
}

#[tokio::test]
async fn verify_with_empty_prescription_fails_before_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let drugs = vec![IdentifiedDrug::new("Aspirin", "10")];
    let empty = EncodedImage::from_bytes(b"", "image/jpeg");
    let result = client.verify().verify(&drugs, &empty, Timing::Morning).await;
    assert!(matches!(result, Err(Error::Precondition(_))));
}

#[tokio::test]
async fn verify_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "prescription unreadable"})),
        )
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let drugs = vec![IdentifiedDrug::new("Aspirin", "10")];
    let err = client
        .verify()
        .verify(&drugs, &image(), Timing::Morning)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Service error (422): prescription unreadable");
}

#[tokio::test]
async fn drug_info_returns_multiline_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/drug-info"))
        .and(body_json(json!({"drugName": "Aspirin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "details": "Pain reliever.\nTake after meals."
        })))
        .mount(&server)
        .await;

    let client = MedCheck::new(&server.uri());
    let details = client.drug_info().details("Aspirin").await.unwrap();
    assert_eq!(details.lines().collect::<Vec<_>>(), vec!["Pain reliever.", "Take after meals."]);
    assert_eq!(details.to_html(), "Pain reliever.<br />Take after meals.");
}

#[tokio::test]
async fn custom_paths_and_client_info_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/info"))
        .and(header("X-Client-Info", "kiosk/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"details": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let options = ClientOptions::default()
        .with_drug_info_path("/v2/info")
        .with_client_info("kiosk/1");
    let client = MedCheck::new_with_options(&format!("{}/", server.uri()), options);
    let details = client.drug_info().details("Aspirin").await.unwrap();
    assert_eq!(details.details, "ok");
}
