use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::CompletionProvider;
use crate::config::OpenAiConfig;
use crate::error::{KeyPointsError, Result};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Any endpoint speaking the OpenAI chat-completions protocol.
pub struct OpenAiProvider {
    client: reqwest::Client,
    url: String,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Self::with_client(client, config)
    }

    pub fn with_client(client: reqwest::Client, config: OpenAiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(KeyPointsError::Config("api key is empty".into()));
        }
        Ok(Self {
            client,
            url: config.completions_url(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.sampling.temperature,
            max_tokens: self.config.sampling.max_tokens,
        };
        debug!(
            "OpenAI call using model={} url={} prompt_len={}",
            self.config.model,
            self.url,
            user.len()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| error!("OpenAI request to {} failed: {}", self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI returned status {}: {}", status, body);
            return Err(KeyPointsError::GenerationFailed {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .inspect_err(|e| error!("Cannot decode OpenAI response: {}", e))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!("OpenAI response length={}", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(OpenAiConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn sends_the_documented_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "be a coach"},
                    {"role": "user", "content": "tips please"}
                ],
                "temperature": 0.7,
                "max_tokens": 300
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "1. Brace your core hard"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider_for(&server)
            .complete("be a coach", "tips please")
            .await
            .unwrap();
        assert_eq!(text, "1. Brace your core hard");
    }

    #[tokio::test]
    async fn no_choices_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let text = provider_for(&server).complete("s", "u").await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn null_content_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let text = provider_for(&server).complete("s", "u").await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_generation_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete("s", "u").await.unwrap_err();
        match err {
            KeyPointsError::GenerationFailed { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete("s", "u").await.unwrap_err();
        assert!(matches!(err, KeyPointsError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let provider =
            OpenAiProvider::new(OpenAiConfig::new("test-key").with_base_url("http://127.0.0.1:1"))
                .unwrap();
        let err = provider.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, KeyPointsError::Transport(_)));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            OpenAiProvider::new(OpenAiConfig::new(" ")),
            Err(KeyPointsError::Config(_))
        ));
    }
}
