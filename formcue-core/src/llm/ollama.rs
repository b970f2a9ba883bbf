use log::{debug, error};
use ollama_rs::Ollama;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::parameters::{KeepAlive, TimeUnit};
use ollama_rs::models::ModelOptions;
use reqwest::Url;

use super::CompletionProvider;
use crate::config::{OllamaConfig, Sampling};
use crate::error::{KeyPointsError, Result};

/// Local Ollama server. SDK failures surface as transport errors.
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

fn server_url(config: &OllamaConfig) -> Result<Url> {
    let mut url = Url::parse(&config.host).map_err(|e| {
        KeyPointsError::Config(format!("invalid ollama host '{}': {}", config.host, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.set_port(Some(config.port)).is_err() {
        return Err(KeyPointsError::Config(format!(
            "ollama host must be an http(s) URL, got '{}'",
            config.host
        )));
    }
    Ok(url)
}

fn model_options(sampling: &Sampling) -> ModelOptions {
    ModelOptions::default()
        .temperature(sampling.temperature as f32)
        .num_predict(i32::try_from(sampling.max_tokens).unwrap_or(i32::MAX))
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Ollama::from_url(server_url(&config)?);
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl CompletionProvider for OllamaProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!(
            "Ollama call using model={} url={}",
            self.config.model,
            self.client.url()
        );
        let request = GenerationRequest::new(self.config.model.clone(), user.to_string())
            .options(model_options(&self.config.sampling))
            .system(system.to_string())
            .keep_alive(KeepAlive::Until {
                time: 10,
                unit: TimeUnit::Minutes,
            });
        let res = self.client.generate(request).await.map_err(|e| {
            error!("Ollama generate failed: {}", e);
            KeyPointsError::transport(e)
        })?;
        debug!("Ollama response length={}", res.response.len());
        Ok(res.response)
    }
}
