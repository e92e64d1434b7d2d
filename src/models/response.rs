use serde::{Deserialize, Serialize};

/// Number of characters of resume/job text echoed back to the caller.
pub const ECHO_CHAR_LIMIT: usize = 500;

/// Neutral score used when the job text contains no known skills or when
/// analysis degrades before a score could be computed.
pub const NEUTRAL_SCORE: u32 = 50;

/// The compatibility report. Every field is always populated; the frontend
/// relies on this shape being identical on the happy and degraded paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: u32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Fixed-shape report returned when analysis could not be performed.
    pub fn fallback() -> Self {
        Self {
            match_score: NEUTRAL_SCORE,
            strengths: vec!["Resume was processed successfully.".to_string()],
            gaps: vec!["Unable to fully analyze resume content.".to_string()],
            improvement_suggestions: vec![
                "Try simplifying the resume text or uploading a clearer PDF.".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub resume: String,
    pub job: String,
    pub analysis: AnalysisResult,
}

impl AnalyzeResponse {
    pub fn new(resume: &str, job: &str, analysis: AnalysisResult) -> Self {
        Self {
            resume: truncate_chars(resume, ECHO_CHAR_LIMIT),
            job: truncate_chars(job, ECHO_CHAR_LIMIT),
            analysis,
        }
    }

    /// Degraded-path payload: empty echoes plus the fallback report.
    pub fn fallback() -> Self {
        Self {
            resume: String::new(),
            job: String::new(),
            analysis: AnalysisResult::fallback(),
        }
    }
}

/// Truncates on a character boundary, never mid-codepoint.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
