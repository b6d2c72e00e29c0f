//! Environment configuration
//!
//! Everything is read once at process start. The API credential is
//! required: its absence is a startup error, not a failure surfaced on
//! the first submission.

use thiserror::Error;

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const PORT_VAR: &str = "TUTORDESK_PORT";
const MODEL_VAR: &str = "TUTORDESK_MODEL";

const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; the inference path cannot start without it")]
    MissingApiKey(&'static str),
    #[error("{0} is not a valid port: {1}")]
    InvalidPort(&'static str, String),
}

/// Startup configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Split out so tests don't
    /// have to mutate the process environment.
    fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(PORT_VAR, raw))?,
            None => DEFAULT_PORT,
        };

        let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            port,
            model,
        })
    }
}
