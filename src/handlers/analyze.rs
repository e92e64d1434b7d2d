use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AnalyzeForm, AnalyzeResponse, UploadedFile};
use crate::state::AppState;

/// CORS preflight for the analyze endpoint.
pub async fn analyze_preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Informational response for callers that GET the analyze endpoint.
pub async fn analyze_info_handler() -> Json<Value> {
    Json(json!({ "message": "Use POST /analyze" }))
}

/// The main analysis endpoint.
///
/// Input errors (missing job text, missing resume, non-PDF upload) come back
/// as structured error objects. Everything after input validation is
/// guaranteed to produce a well-formed 200 response: extraction failures fold
/// into the fixed fallback payload, delegate failures are absorbed inside the
/// analyzer.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<AnalyzeResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Analyze request received");

    let form = read_analyze_form(&mut multipart).await?;

    let job_text = form
        .job_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::validation("job_text is required"))?;

    let resume_content = match (form.resume_file, form.resume_text) {
        (Some(file), _) => {
            if !file.is_pdf() {
                warn!(
                    request_id = %request_id,
                    file_name = %file.name,
                    "Rejected non-PDF resume upload"
                );
                return Err(AppError::UnsupportedResumeFormat);
            }

            let max_size_bytes = state.config.max_file_size_mb * 1024 * 1024;
            if file.size > max_size_bytes {
                return Err(AppError::FileTooLarge {
                    size: file.size / (1024 * 1024),
                    limit: state.config.max_file_size_mb,
                });
            }

            match state.extractor.extract_text(&file).await {
                Ok(text) => text,
                Err(e) => {
                    error!(request_id = %request_id, error = %e, "Resume extraction failed");
                    // Guaranteed fallback: the caller always gets the full shape
                    return Ok(Json(AnalyzeResponse::fallback()));
                }
            }
        }
        (None, Some(text)) if !text.trim().is_empty() => text,
        _ => {
            warn!(request_id = %request_id, "No usable resume source supplied");
            return Err(AppError::MissingResume);
        }
    };

    let analysis = state.analyzer.analyze(&resume_content, &job_text).await;

    info!(
        request_id = %request_id,
        match_score = analysis.match_score,
        duration_ms = start.elapsed().as_millis() as u64,
        "Analysis completed"
    );

    Ok(Json(AnalyzeResponse::new(&resume_content, &job_text, analysis)))
}

async fn read_analyze_form(multipart: &mut Multipart) -> AppResult<AnalyzeForm> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::InvalidFile {
        message: format!("Failed to read multipart field: {}", e),
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "job_text" => {
                form.job_text = Some(field.text().await.map_err(|e| AppError::InvalidFile {
                    message: format!("Failed to read job_text: {}", e),
                })?);
            }
            "resume_text" => {
                form.resume_text = Some(field.text().await.map_err(|e| AppError::InvalidFile {
                    message: format!("Failed to read resume_text: {}", e),
                })?);
            }
            "resume_file" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());

                let data = field.bytes().await.map_err(|e| AppError::InvalidFile {
                    message: format!("Failed to read file data: {}", e),
                })?;

                // Browsers send an empty part when no file was chosen
                if data.is_empty() {
                    continue;
                }

                let mut file = UploadedFile::new(file_name, data.to_vec());
                if let Some(mime_type) = content_type {
                    file = file.with_mime_type(mime_type);
                }

                debug!(
                    "Received resume file: {} ({} bytes, type: {:?})",
                    file.name, file.size, file.mime_type
                );

                form.resume_file = Some(file);
            }
            other => {
                debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}
