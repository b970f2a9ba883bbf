use std::fmt;

use serde::Deserialize;

use crate::error::{KeyPointsError, Result};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const OLLAMA_DEFAULT_HOST: &str = "http://localhost";
pub const OLLAMA_DEFAULT_PORT: u16 = 11434;
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.2:3b";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "FORMCUE_MODEL";
pub const ENV_TEMPERATURE: &str = "FORMCUE_TEMPERATURE";
pub const ENV_MAX_TOKENS: &str = "FORMCUE_MAX_TOKENS";

/// Sampling knobs sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sampling {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default)]
    pub sampling: Sampling,
}

fn default_base_url() -> String {
    OPENAI_DEFAULT_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    OPENAI_DEFAULT_MODEL.to_string()
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            model: default_openai_model(),
            sampling: Sampling::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// URL the chat-completion request is posted to.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY)
            .ok_or_else(|| KeyPointsError::Config(format!("{} is not set", ENV_API_KEY)))?;
        let mut config = Self::new(api_key.trim());

        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = get(ENV_TEMPERATURE) {
            config.sampling.temperature = raw.trim().parse().map_err(|_| {
                KeyPointsError::Config(format!("{} is not a number: {}", ENV_TEMPERATURE, raw))
            })?;
        }
        if let Some(raw) = get(ENV_MAX_TOKENS) {
            config.sampling.max_tokens = raw.trim().parse().map_err(|_| {
                KeyPointsError::Config(format!(
                    "{} is not a positive integer: {}",
                    ENV_MAX_TOKENS, raw
                ))
            })?;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub sampling: Sampling,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: OLLAMA_DEFAULT_HOST.to_string(),
            port: OLLAMA_DEFAULT_PORT,
            model: OLLAMA_DEFAULT_MODEL.to_string(),
            sampling: Sampling::default(),
        }
    }
}

impl OllamaConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
