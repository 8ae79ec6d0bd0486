//! CompletionClient implementation using the chat completions API.

use async_trait::async_trait;
use coach_core::{hash_prompt, Completion, CompletionRequest, GenerationError, TextGenerator};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    ResponseFormat,
};
use crate::config::CompletionClientConfig;

/// A text generator backed by an OpenAI-compatible chat completions API.
///
/// Each call is independent: the prompt already carries whatever history
/// the caller wants the model to see.
pub struct CompletionClient {
    client: Client,
    config: CompletionClientConfig,
}

impl CompletionClient {
    /// Create a new CompletionClient with the given configuration.
    pub fn new(config: CompletionClientConfig) -> Result<Self, GenerationError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder().build().map_err(|e| {
            GenerationError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "CompletionClient initialized with model: {}, api: {}",
            config.model, config.api_url
        );

        Ok(Self { client, config })
    }

    /// Create a CompletionClient from environment variables.
    ///
    /// See [`CompletionClientConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(CompletionClientConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionClientConfig {
        &self.config
    }

    /// Build the API request body for a completion request.
    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let message = if request.file_urls.is_empty() {
            ChatMessage::user(request.prompt.clone())
        } else {
            let mut parts = vec![ContentPart::Text {
                text: request.prompt.clone(),
            }];
            parts.extend(request.file_urls.iter().map(|url| ContentPart::ImageUrl {
                image_url: ImageUrl { url: url.clone() },
            }));
            ChatMessage::user_parts(parts)
        };

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![message],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: request.response_schema.clone().map(ResponseFormat::json_schema),
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GenerationError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(api_failure(status.as_u16(), &error_text));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            GenerationError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            "Completion {} from {}: finish_reason={:?}",
            completion.id,
            completion.model,
            completion.choices.first().and_then(|c| c.finish_reason.as_deref())
        );
        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }
}

/// Map a non-2xx response onto a generation error.
fn api_failure(status: u16, body: &str) -> GenerationError {
    let detail = serde_json::from_str::<ApiError>(body)
        .map(|api_error| match api_error.error.error_type {
            Some(kind) => format!("{} ({})", api_error.error.message, kind),
            None => api_error.error.message,
        })
        .unwrap_or_else(|_| body.to_string());
    GenerationError::ProcessingFailed(format!("API error ({}): {}", status, detail))
}

/// Turn the first choice of a response into a completion.
fn extract_completion(
    response: ChatCompletionResponse,
    structured: bool,
) -> Result<Completion, GenerationError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyReply)?;

    if structured {
        serde_json::from_str(&content)
            .map(Completion::Structured)
            .map_err(|e| {
                GenerationError::ProcessingFailed(format!("Reply is not valid JSON: {}", e))
            })
    } else {
        Ok(Completion::Text(content))
    }
}

#[async_trait]
impl TextGenerator for CompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GenerationError> {
        debug!(
            "Requesting completion for prompt {} ({} files, structured: {})",
            hash_prompt(&request.prompt),
            request.file_urls.len(),
            request.wants_structured()
        );

        let body = self.build_request(&request);
        let response = self.chat_completion(&body).await?;
        extract_completion(response, request.wants_structured())
    }

    fn name(&self) -> &str {
        "CompletionClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> CompletionClient {
        let config = CompletionClientConfig::builder()
            .api_key("test-key")
            .model("test-model")
            .build();
        CompletionClient::new(config).unwrap()
    }

    fn response(content: Option<&str>) -> ChatCompletionResponse {
        serde_json::from_value(json!({
            "id": "cmpl-1",
            "model": "test-model",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = CompletionClient::new(CompletionClientConfig::default());
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }

    #[test]
    fn test_plain_prompt_request() {
        let body = client().build_request(&CompletionRequest::text("Hello coach"));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Hello coach");
        assert_eq!(value["max_tokens"], 1024);
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_files_and_schema_request() {
        let schema = json!({
            "type": "object",
            "properties": { "calories": { "type": "number" } }
        });
        let request = CompletionRequest::text("Estimate this meal")
            .with_file("https://files.example.com/meal.jpg")
            .with_schema(schema.clone());

        let value = serde_json::to_value(client().build_request(&request)).unwrap();
        let parts = &value["messages"][0]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "Estimate this meal");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "https://files.example.com/meal.jpg");
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["schema"], schema);
    }

    #[test]
    fn test_extract_text_and_structured() {
        let text = extract_completion(response(Some("Try a 20 minute walk.")), false).unwrap();
        assert_eq!(text, Completion::text("Try a 20 minute walk."));

        let structured = extract_completion(response(Some(r#"{"calories": 540}"#)), true).unwrap();
        assert_eq!(structured, Completion::Structured(json!({ "calories": 540 })));

        let invalid = extract_completion(response(Some("not json")), true);
        assert!(matches!(invalid, Err(GenerationError::ProcessingFailed(_))));
    }

    #[test]
    fn test_extract_empty_reply() {
        assert!(matches!(
            extract_completion(response(None), false),
            Err(GenerationError::EmptyReply)
        ));
        assert!(matches!(
            extract_completion(response(Some("  ")), false),
            Err(GenerationError::EmptyReply)
        ));
    }

    #[test]
    fn test_api_failure_messages() {
        let body = r#"{"error": {"message": "Rate limit", "type": "rate_limit"}}"#;
        let parsed = api_failure(429, body);
        assert_eq!(
            parsed.to_string(),
            "processing failed: API error (429): Rate limit (rate_limit)"
        );

        let untyped = api_failure(500, r#"{"error": {"message": "Upstream down"}}"#);
        assert_eq!(untyped.to_string(), "processing failed: API error (500): Upstream down");

        let raw = api_failure(502, "Bad gateway");
        assert_eq!(raw.to_string(), "processing failed: API error (502): Bad gateway");
    }

    #[test]
    fn test_client_name() {
        assert_eq!(client().name(), "CompletionClient");
    }
}
