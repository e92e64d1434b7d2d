use anyhow::{Context, Result};
use std::env;
use tracing::{info, warn};

pub const DEFAULT_LLM_MODEL: &str = "mistralai/mistral-7b-instruct";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub request_timeout_seconds: u64,
    pub openrouter_api_key: Option<String>,
    pub llm_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 10)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            request_timeout_seconds: Self::parse_env_var("REQUEST_TIMEOUT_SECONDS", 30)
                .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?,
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| {
                info!("LLM_MODEL not set, using default: {}", DEFAULT_LLM_MODEL);
                DEFAULT_LLM_MODEL.to_string()
            }),
        };

        // Validate configuration values
        config.validate()?;

        if config.openrouter_api_key.is_none() {
            warn!("No OpenRouter API key configured. Set OPENROUTER_API_KEY to enable the analysis delegate.");
        } else {
            info!("OpenRouter API key loaded, delegate model: {}", config.llm_model);
        }

        info!(
            "Configuration loaded successfully: host={} port={} max_file_size_mb={} timeout={}s",
            config.server_host,
            config.server_port,
            config.max_file_size_mb,
            config.request_timeout_seconds
        );
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using default: {:?})",
                        var_name, e, default
                    );
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECONDS must be greater than 0"
            ));
        }
        if self.llm_model.trim().is_empty() {
            return Err(anyhow::anyhow!("LLM_MODEL must not be empty"));
        }
        Ok(())
    }

    /// True when the external analysis delegate can be called at all.
    pub fn delegate_configured(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}
