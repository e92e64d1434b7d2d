//! Integration tests for the HireSense analysis service

use std::env;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hiresense::{config::Config, handlers::router, state::AppState};

const BOUNDARY: &str = "hiresense-test-boundary";

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        max_file_size_mb: 10,
        request_timeout_seconds: 30,
        openrouter_api_key: None,
        llm_model: "mistralai/mistral-7b-instruct".to_string(),
    }))
}

fn text_part(name: &str, value: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
}

fn file_part(name: &str, filename: &str, content_type: &str, data: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
    )
}

fn multipart_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!("{body}--{BOUNDARY}--\r\n")))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_config_loading() {
    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("MAX_FILE_SIZE_MB");
    env::remove_var("REQUEST_TIMEOUT_SECONDS");
    env::remove_var("OPENROUTER_API_KEY");
    env::remove_var("LLM_MODEL");

    env::set_var("SERVER_HOST", "127.0.0.1");
    env::set_var("SERVER_PORT", "9090");
    env::set_var("MAX_FILE_SIZE_MB", "5");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "127.0.0.1");
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.max_file_size_mb, 5);
    assert_eq!(config.request_timeout_seconds, 30);
    assert_eq!(config.llm_model, "mistralai/mistral-7b-instruct");
    assert!(!config.delegate_configured());

    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("MAX_FILE_SIZE_MB");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["pdf_extractor"], true);
    assert_eq!(body["services"]["analysis_delegate"], false);
}

#[tokio::test]
async fn test_analyze_get_points_to_post() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Use POST /analyze");
}

#[tokio::test]
async fn test_analyze_preflight() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/analyze")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_with_resume_text() {
    let app = router(test_state());

    let body = text_part("job_text", "We need a Python and Docker backend engineer.")
        + &text_part(
            "resume_text",
            "I have 5 years of Python, Docker, and Kubernetes experience.",
        );

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["analysis"]["match_score"], 100);
    assert!(body["resume"]
        .as_str()
        .unwrap()
        .starts_with("I have 5 years"));
    assert!(body["job"].as_str().unwrap().starts_with("We need"));
    assert!(!body["analysis"]["strengths"].as_array().unwrap().is_empty());
    assert!(!body["analysis"]["gaps"].as_array().unwrap().is_empty());
    assert!(!body["analysis"]["improvement_suggestions"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_analyze_mismatched_resume() {
    let app = router(test_state());

    let body = text_part("job_text", "Looking for a Java developer.")
        + &text_part("resume_text", "I know Python only.");

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["analysis"]["match_score"], 0);
}

#[tokio::test]
async fn test_analyze_without_resume_returns_error_object() {
    let app = router(test_state());

    let body = text_part("job_text", "We need a Python engineer.");

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "MISSING_RESUME");
}

#[tokio::test]
async fn test_analyze_without_job_text_returns_error_object() {
    let app = router(test_state());

    let body = text_part("resume_text", "Python developer.");

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_analyze_rejects_non_pdf_upload() {
    let app = router(test_state());

    let body = text_part("job_text", "We need a Python engineer.")
        + &file_part("resume_file", "resume.txt", "text/plain", "I know Python.");

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_RESUME_FORMAT");
    assert!(body["error"]["message"].as_str().unwrap().contains("PDF"));
}

#[tokio::test]
async fn test_analyze_corrupt_pdf_degrades_to_fallback() {
    let app = router(test_state());

    // Claims to be a PDF but the content is garbage: extraction fails and the
    // endpoint must still answer 200 with the full response shape.
    let body = text_part("job_text", "We need a Python engineer.")
        + &file_part(
            "resume_file",
            "resume.pdf",
            "application/pdf",
            "this is not a real pdf",
        );

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["analysis"]["match_score"], 50);
    assert!(!body["analysis"]["strengths"].as_array().unwrap().is_empty());
    assert!(!body["analysis"]["gaps"].as_array().unwrap().is_empty());
    assert!(!body["analysis"]["improvement_suggestions"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_analyze_prefers_file_over_text() {
    let app = router(test_state());

    // A broken file upload wins over pasted text, so the request degrades
    // instead of silently using resume_text.
    let body = text_part("job_text", "We need a Python engineer.")
        + &text_part("resume_text", "I know Python.")
        + &file_part(
            "resume_file",
            "resume.pdf",
            "application/pdf",
            "not a real pdf",
        );

    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["analysis"]["match_score"], 50);
    assert_eq!(body["resume"], "");
}
