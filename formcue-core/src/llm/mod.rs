mod ollama;
mod openai;

use std::sync::Arc;

use log::{debug, info};

use crate::config::{OllamaConfig, OpenAiConfig};
use crate::error::Result;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Something that turns a system + user prompt pair into completion text.
#[allow(async_fn_in_trait)]
pub trait CompletionProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

type MockFn = Arc<dyn Fn(&str, &str) -> Result<String> + Send + Sync>;

enum LlmBackend {
    OpenAi(OpenAiProvider),
    Ollama(OllamaProvider),
    Mock { responder: MockFn },
}

/// Runtime-selected completion backend.
pub struct LlmInterface {
    backend: LlmBackend,
}

impl LlmInterface {
    pub fn new_openai(config: OpenAiConfig) -> Result<Self> {
        info!("LlmInterface::new_openai selected model={}", config.model);
        Ok(Self {
            backend: LlmBackend::OpenAi(OpenAiProvider::new(config)?),
        })
    }

    pub fn new_ollama(config: OllamaConfig) -> Result<Self> {
        info!("LlmInterface::new_ollama selected model={}", config.model);
        Ok(Self {
            backend: LlmBackend::Ollama(OllamaProvider::new(config)?),
        })
    }

    pub fn new_mock_fn(
        f: impl Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        debug!("LlmInterface::new_mock_fn creating mock backend");
        Self {
            backend: LlmBackend::Mock {
                responder: Arc::new(f),
            },
        }
    }

    /// Mock backend that answers every prompt with the same text.
    pub fn new_mock_reply(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new_mock_fn(move |_system, _user| Ok(reply.clone()))
    }

    pub fn describe(&self) -> String {
        match &self.backend {
            LlmBackend::OpenAi(p) => format!("openai({})", p.model()),
            LlmBackend::Ollama(p) => format!("ollama({})", p.model()),
            LlmBackend::Mock { .. } => "mock".to_string(),
        }
    }
}

impl CompletionProvider for LlmInterface {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!("LlmInterface::complete invoked backend={}", self.describe());
        match &self.backend {
            LlmBackend::OpenAi(p) => p.complete(system, user).await,
            LlmBackend::Ollama(p) => p.complete(system, user).await,
            LlmBackend::Mock { responder } => {
                let r = responder(system, user)?;
                debug!("Mock response length={}", r.len());
                Ok(r)
            }
        }
    }
}
