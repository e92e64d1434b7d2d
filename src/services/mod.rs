pub mod analyzer;
pub mod llm;
pub mod pdf_extractor;
pub mod scoring;
pub mod skills;

pub use analyzer::MatchAnalyzer;
pub use llm::{LlmClient, LlmError};
pub use pdf_extractor::PdfExtractor;
pub use scoring::calculate_score;
pub use skills::extract_skills;
