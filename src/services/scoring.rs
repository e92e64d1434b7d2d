use crate::models::NEUTRAL_SCORE;
use crate::services::skills::extract_skills;

/// Deterministic match score in [0, 100], always a multiple of 5.
///
/// The score is the fraction of the job's recognized skills also present in
/// the resume, rounded to the nearest multiple of 5. A job description with
/// no recognized skills scores the neutral constant. This function is the
/// sole source of truth for `match_score`; the LLM delegate's opinion of the
/// score is never used.
pub fn calculate_score(resume: &str, job: &str) -> u32 {
    let resume_skills = extract_skills(resume);
    let job_skills = extract_skills(job);

    if job_skills.is_empty() {
        return NEUTRAL_SCORE;
    }

    let matched = resume_skills.intersection(&job_skills).count();
    let raw = (matched * 100 / job_skills.len()) as u32;

    round_to_five(raw)
}

fn round_to_five(score: u32) -> u32 {
    ((score + 2) / 5) * 5
}
