//! Configuration for CompletionClient.

use coach_core::GenerationError;
use std::env;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for CompletionClient.
#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    /// API base URL (without `/v1/...`).
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for CompletionClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

impl CompletionClientConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `COACH_LLM_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `COACH_LLM_API_URL` - API URL (default: https://api.openai.com)
    /// - `COACH_LLM_MODEL` - Model name (default: gpt-4o-mini)
    /// - `COACH_LLM_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `COACH_LLM_TEMPERATURE` - Temperature (default: 0.7)
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var("COACH_LLM_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::Configuration("COACH_LLM_API_KEY not set".to_string())
            })?;

        let api_url = env::var("COACH_LLM_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("COACH_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("COACH_LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("COACH_LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CompletionClientConfigBuilder {
        CompletionClientConfigBuilder::default()
    }
}

/// Builder for CompletionClientConfig.
#[derive(Debug, Default)]
pub struct CompletionClientConfigBuilder {
    config: CompletionClientConfig,
}

impl CompletionClientConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CompletionClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompletionClientConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));
    }

    #[test]
    fn test_builder_all_options() {
        let config = CompletionClientConfig::builder()
            .api_key("my-key")
            .api_url("https://llm.internal")
            .model("coach-large")
            .max_tokens(512)
            .temperature(0.2)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://llm.internal");
        assert_eq!(config.model, "coach-large");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_llm_vars() {
            std::env::remove_var("COACH_LLM_API_KEY");
            std::env::remove_var("COACH_LLM_API_URL");
            std::env::remove_var("COACH_LLM_MODEL");
            std::env::remove_var("COACH_LLM_MAX_TOKENS");
            std::env::remove_var("COACH_LLM_TEMPERATURE");
        }

        // Missing API key should error
        clear_all_llm_vars();
        match CompletionClientConfig::from_env() {
            Err(GenerationError::Configuration(msg)) => assert!(msg.contains("COACH_LLM_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        std::env::set_var("COACH_LLM_API_KEY", "test-env-key");
        let config = CompletionClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));

        // All vars set
        std::env::set_var("COACH_LLM_API_URL", "http://localhost:8080/");
        std::env::set_var("COACH_LLM_MODEL", "local-model");
        std::env::set_var("COACH_LLM_MAX_TOKENS", "256");
        std::env::set_var("COACH_LLM_TEMPERATURE", "0.1");
        let config = CompletionClientConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.1));

        // Cleanup
        clear_all_llm_vars();
    }
}
