use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let pdf_available = state.extractor.is_available();
    let delegate_configured = state.analyzer.delegate_configured();

    let response = json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "pdf_extractor": pdf_available,
            "analysis_delegate": delegate_configured
        }
    });

    info!(
        pdf_available = pdf_available,
        delegate_configured = delegate_configured,
        "Health check completed"
    );

    Ok(Json(response))
}

/// Readiness check endpoint (for Kubernetes/Railway)
pub async fn ready_handler(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, StatusCode> {
    if state.extractor.is_available() {
        Ok(StatusCode::OK)
    } else {
        info!("Readiness check failed - PDF extractor unavailable");
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
