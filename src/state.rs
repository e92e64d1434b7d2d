use crate::config::Config;
use crate::services::{LlmClient, MatchAnalyzer, PdfExtractor};

/// Shared application state. All services are constructed once at startup and
/// passed in explicitly; there is no hidden global state.
pub struct AppState {
    pub config: Config,
    pub extractor: PdfExtractor,
    pub analyzer: MatchAnalyzer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = config.openrouter_api_key.clone().map(|key| {
            LlmClient::new(key, config.llm_model.clone(), config.request_timeout_seconds)
        });

        Self {
            extractor: PdfExtractor::new(),
            analyzer: MatchAnalyzer::new(llm),
            config,
        }
    }
}
