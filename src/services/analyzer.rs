//! Analysis composer: merges the deterministic score with the delegate's
//! qualitative output into one fixed response shape.
//!
//! The delegate chain is three sequential calls (structure the resume,
//! structure the job, assess the match). Any failure anywhere in the chain
//! drops the request to the keyword-derived assessment; the numeric score
//! never depends on the delegate at all.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::AnalysisResult;
use crate::services::llm::{LlmClient, LlmError};
use crate::services::scoring::calculate_score;
use crate::services::skills::extract_skills;

const RESUME_SYSTEM_PROMPT: &str = "You are a professional hiring AI. \
Extract structured resume information from text. \
Respond ONLY with valid JSON matching this schema: \
{\"name\": string, \"years_experience\": number, \"skills\": string[], \
\"education\": string, \"projects\": string[]}";

const JOB_SYSTEM_PROMPT: &str = "You are an expert recruiter. \
Extract structured job description information from text. \
Respond ONLY with valid JSON matching this schema: \
{\"role\": string, \"required_skills\": string[], \
\"experience_required\": number, \"responsibilities\": string[]}";

const MATCH_SYSTEM_PROMPT: &str = "You are a hiring decision AI.\n\n\
STRICT RULES:\n\
- Respond ONLY with valid JSON\n\
- No markdown\n\
- No explanations\n\
- No extra text\n\n\
Follow this exact schema:\n\n\
{\n\
  \"match_score\": number (0-100),\n\
  \"strengths\": string[],\n\
  \"gaps\": string[],\n\
  \"improvement_suggestions\": string[]\n\
}";

const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "Add specific project examples",
    "Highlight measurable achievements",
    "Include tools, frameworks, or deployments used",
];

/// Resume fields the delegate is asked to extract.
#[derive(Debug, Serialize, Deserialize)]
pub struct StructuredResume {
    pub name: String,
    pub years_experience: i64,
    pub skills: Vec<String>,
    pub education: String,
    pub projects: Vec<String>,
}

/// Job description fields the delegate is asked to extract.
#[derive(Debug, Serialize, Deserialize)]
pub struct StructuredJob {
    pub role: String,
    pub required_skills: Vec<String>,
    pub experience_required: i64,
    pub responsibilities: Vec<String>,
}

/// The delegate's match verdict. Its `match_score` is advisory only and is
/// never used for the numeric score.
#[derive(Debug, Deserialize)]
struct DelegateAssessment {
    match_score: i64,
    strengths: Vec<String>,
    gaps: Vec<String>,
    improvement_suggestions: Vec<String>,
}

/// Qualitative half of the report, before merging with the score.
#[derive(Debug, Clone)]
struct QualitativeAssessment {
    strengths: Vec<String>,
    gaps: Vec<String>,
    improvement_suggestions: Vec<String>,
}

impl QualitativeAssessment {
    /// Replaces any empty list with its counterpart from `baseline`, so the
    /// response fields are never empty regardless of what the model sent.
    fn filled_from(mut self, baseline: QualitativeAssessment) -> Self {
        if self.strengths.is_empty() {
            self.strengths = baseline.strengths;
        }
        if self.gaps.is_empty() {
            self.gaps = baseline.gaps;
        }
        if self.improvement_suggestions.is_empty() {
            self.improvement_suggestions = baseline.improvement_suggestions;
        }
        self
    }
}

/// Orchestrates scoring and delegate calls for one analysis request.
pub struct MatchAnalyzer {
    llm: Option<LlmClient>,
}

impl MatchAnalyzer {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    pub fn delegate_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Produces the full report. Infallible: every delegate failure degrades
    /// to the keyword assessment, and the score is deterministic.
    pub async fn analyze(&self, resume: &str, job: &str) -> AnalysisResult {
        let match_score = calculate_score(resume, job);
        let baseline = self.keyword_assessment(resume, job);

        let qualitative = match self.delegate_assessment(resume, job).await {
            Ok(delegate) => delegate.filled_from(baseline),
            Err(LlmError::Disabled) => {
                debug!("Analysis delegate disabled, using keyword assessment");
                baseline
            }
            Err(e) => {
                warn!(error = %e, "Analysis delegate failed, using keyword assessment");
                baseline
            }
        };

        AnalysisResult {
            match_score,
            strengths: qualitative.strengths,
            gaps: qualitative.gaps,
            improvement_suggestions: qualitative.improvement_suggestions,
        }
    }

    /// Deterministic strengths and gaps derived from skill overlap.
    fn keyword_assessment(&self, resume: &str, job: &str) -> QualitativeAssessment {
        let resume_skills = extract_skills(resume);
        let job_skills = extract_skills(job);

        let strengths: Vec<String> = job_skills
            .intersection(&resume_skills)
            .map(|s| format!("Matched skill: {}", s))
            .collect();

        let gaps: Vec<String> = job_skills
            .difference(&resume_skills)
            .map(|s| format!("Missing skill: {}", s))
            .collect();

        QualitativeAssessment {
            strengths: if strengths.is_empty() {
                vec!["Relevant experience detected".to_string()]
            } else {
                strengths
            },
            gaps: if gaps.is_empty() {
                vec!["No major skill gaps identified".to_string()]
            } else {
                gaps
            },
            improvement_suggestions: DEFAULT_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// The three-call delegate chain. Each call may fail or return text that
    /// does not decode into the expected shape; both surface as `LlmError`.
    async fn delegate_assessment(
        &self,
        resume: &str,
        job: &str,
    ) -> Result<QualitativeAssessment, LlmError> {
        let llm = self.llm.as_ref().ok_or(LlmError::Disabled)?;

        let structured_resume: StructuredResume = llm
            .call_json(
                &format!("Extract structured information from this resume:\n\n{}", resume),
                RESUME_SYSTEM_PROMPT,
            )
            .await?;

        let structured_job: StructuredJob = llm
            .call_json(
                &format!("Extract structured information from this job description:\n\n{}", job),
                JOB_SYSTEM_PROMPT,
            )
            .await?;

        let prompt = format!(
            "Candidate resume:\n{}\n\nJob description:\n{}\n\nAssess the match.",
            serde_json::to_string_pretty(&structured_resume)?,
            serde_json::to_string_pretty(&structured_job)?,
        );

        let assessment: DelegateAssessment = llm.call_json(&prompt, MATCH_SYSTEM_PROMPT).await?;

        debug!(
            delegate_score = assessment.match_score,
            "Delegate assessment parsed; deterministic score remains authoritative"
        );

        Ok(QualitativeAssessment {
            strengths: assessment.strengths,
            gaps: assessment.gaps,
            improvement_suggestions: assessment.improvement_suggestions,
        })
    }
}
