// HTTP handler tests: the router driven in-process with a stub model.
//
// No network: the generator records every call and returns a canned reply,
// and the demo profile directory stands in for the policy database.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use claimsense::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use claimsense::extraction::profiles::StaticProfiles;
use claimsense::gemini::{ContentGenerator, Part};
use claimsense::web::{build_router, AppState};

const BOUNDARY: &str = "claimsense-test-boundary";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

struct StubGenerator {
    reply: Option<String>,
    calls: Mutex<Vec<Vec<Part>>>,
}

impl StubGenerator {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<Part>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, parts: Vec<Part>) -> Result<String> {
        self.calls.lock().unwrap().push(parts);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => anyhow::bail!("model unavailable"),
        }
    }
}

fn test_config() -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        gemini_model: "test-model".to_string(),
        gemini_api_url: "http://127.0.0.1:1".to_string(),
        port: 0,
        bind_addr: "127.0.0.1".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        keepalive_urls: Vec::new(),
    }
}

fn router(generator: Arc<StubGenerator>) -> Router {
    build_router(AppState {
        config: Arc::new(test_config()),
        generator,
        profiles: Arc::new(StaticProfiles::demo()),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn chat_request(body: &str) -> Request<Body> {
    Request::post("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(file: Option<&[u8]>, mobile: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(mobile) = mobile {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"mobile\"\r\n\r\n{mobile}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"bill.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

const CLEAN_BILL: &str = r#"{"name": "Vandan Dalvi", "amount": "45000", "hospital": "City General", "date": "2024-01-05"}"#;

// ============================================================
// Health
// ============================================================

#[tokio::test]
async fn health_endpoints() {
    let app = router(StubGenerator::replying(""));
    let (status, json) = send(app.clone(), Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (status, _) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================
// POST /chat
// ============================================================

#[tokio::test]
async fn chat_without_data_is_rejected() {
    for body in ["", "null", "{}"] {
        let generator = StubGenerator::replying("unused");
        let (status, json) = send(router(generator.clone()), chat_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json["error"], "No data provided");
        assert!(generator.calls().is_empty());
    }
}

#[tokio::test]
async fn chat_with_invalid_json_is_rejected() {
    let (status, json) = send(
        router(StubGenerator::replying("unused")),
        chat_request("{not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid JSON body");
}

#[tokio::test]
async fn chat_replies_in_detected_language() {
    let generator = StubGenerator::replying("Aapka claim approve ho gaya hai.");
    let (status, json) = send(
        router(generator.clone()),
        chat_request(r#"{"message": "kya haal hai", "extracted": {"amount": "45000"}}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "Aapka claim approve ho gaya hai.");
    assert_eq!(json["language"], "hindi");

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    match calls[0].as_slice() {
        [Part::Text(prompt)] => {
            assert!(prompt.contains("HINDI"));
            assert!(prompt.contains("User asked: \"kya haal hai\""));
        }
        other => panic!("unexpected parts: {other:?}"),
    }
}

#[tokio::test]
async fn chat_model_failure_is_500() {
    let (status, json) = send(
        router(StubGenerator::failing()),
        chat_request(r#"{"message": "hello"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to generate a reply");
}

// ============================================================
// POST /upload
// ============================================================

#[tokio::test]
async fn upload_scores_against_default_profile() {
    let generator = StubGenerator::replying(CLEAN_BILL);
    let (status, json) = send(router(generator.clone()), multipart_request(Some(PNG), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Vandan Dalvi");
    assert_eq!(json["amount"], "45000");
    // demo profile has prior claims
    assert_eq!(json["fraud_detection"]["fraud_score"], 10);
    assert_eq!(json["fraud_detection"]["risk_level"], "Low");
    assert_eq!(json["fraud_detection"]["is_suspicious"], false);

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    match calls[0].as_slice() {
        [Part::Text(_), Part::InlineData { mime_type, data }] => {
            assert_eq!(mime_type, "image/png");
            assert_eq!(data.as_slice(), PNG);
        }
        other => panic!("unexpected parts: {other:?}"),
    }
}

#[tokio::test]
async fn upload_with_other_mobile_flags_name_mismatch() {
    let (status, json) = send(
        router(StubGenerator::replying(CLEAN_BILL)),
        multipart_request(Some(PNG), Some("9123456780")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["fraud_detection"]["fraud_score"], 35);
    assert_eq!(json["fraud_detection"]["risk_level"], "Medium");
    assert_eq!(
        json["fraud_detection"]["fraud_reasons"],
        serde_json::json!(["Previous claims detected", "Name mismatch with user profile"])
    );
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let generator = StubGenerator::replying(CLEAN_BILL);
    let (status, json) = send(
        router(generator.clone()),
        multipart_request(None, Some("9028833979")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file uploaded");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn upload_that_is_not_multipart_is_rejected() {
    let request = Request::post("/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, json) = send(router(StubGenerator::replying(CLEAN_BILL)), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Expected a multipart form upload");
}

#[tokio::test]
async fn declared_image_type_is_used_for_unrecognized_bytes() {
    let generator = StubGenerator::replying(CLEAN_BILL);
    let request = multipart_request(Some(b"just some text"), None);
    let (status, _) = send(router(generator.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    match generator.calls()[0].as_slice() {
        [_, Part::InlineData { mime_type, .. }] => assert_eq!(mime_type, "image/png"),
        other => panic!("unexpected parts: {other:?}"),
    }
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let generator = StubGenerator::replying(CLEAN_BILL);
    let (status, json) = send(router(generator.clone()), multipart_request(Some(b""), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Uploaded file is empty");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn upload_with_malformed_model_json_is_500() {
    let (status, json) = send(
        router(StubGenerator::replying(r#"{"name": "Vandan", "amount": }"#)),
        multipart_request(Some(PNG), None),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to process document");
}

#[tokio::test]
async fn upload_with_prose_reply_returns_raw_text() {
    let reply = "The document is too blurry to read.";
    let (status, json) = send(
        router(StubGenerator::replying(reply)),
        multipart_request(Some(PNG), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["raw"], reply);
    assert_eq!(json["fraud_detection"]["fraud_score"], 10);
}

#[tokio::test]
async fn upload_model_failure_is_500() {
    let (status, json) = send(
        router(StubGenerator::failing()),
        multipart_request(Some(PNG), None),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to process document");
}
