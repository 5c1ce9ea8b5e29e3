//! OpenAI LLM provider using the Chat Completions API.
//!
//! Sends the image via data URL in the user message content array. Works with
//! any Chat Completions compatible server through the configured endpoint.

use super::provider::{LlmProvider, LlmRequest, LlmResponse};
use crate::error::InvocationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const PROVIDER: &str = "OpenAI";

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiProvider {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ChatContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, InvocationError> {
        let start = Instant::now();

        let mut content = Vec::with_capacity(2);
        if let Some(image) = &request.image {
            content.push(ChatContent::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url(),
                },
            });
        }
        content.push(ChatContent::Text {
            text: request.prompt.clone(),
        });

        let body = ChatRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InvocationError::Request {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(InvocationError::Http {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| InvocationError::Parse {
            provider: PROVIDER.to_string(),
            message: e.to_string(),
        })?;

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| InvocationError::EmptyResponse {
                provider: PROVIDER.to_string(),
            })?;

        Ok(LlmResponse {
            text,
            model: chat_resp.model,
            tokens_used: chat_resp.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::ImageInput;
    use crate::types::ImageFormat;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_sends_data_url_and_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{"message": {"role": "assistant", "content": "  {\"fish_type\":\"Tilapia\"}\n"}}],
                "usage": {"total_tokens": 77}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&format!("{}/v1", server.uri()), "sk-test", "gpt-4o-mini");
        let request =
            LlmRequest::classify_fish(ImageInput::from_bytes(&[1, 2, 3], ImageFormat::Png));
        let response = provider.generate(&request).await.unwrap();

        assert_eq!(response.text, "{\"fish_type\":\"Tilapia\"}");
        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.tokens_used, Some(77));

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image_url");
        assert_eq!(content[0]["image_url"]["url"], "data:image/png;base64,AQID");
        assert_eq!(content[1]["type"], "text");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&server.uri(), "sk-test", "gpt-4o-mini");
        let err = provider
            .generate(&LlmRequest::species_facts("Cod"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(429));
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "choices": []
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&server.uri(), "sk-test", "gpt-4o-mini");
        let err = provider
            .generate(&LlmRequest::species_facts("Cod"))
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::EmptyResponse { .. }));
    }
}
