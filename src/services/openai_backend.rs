use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::generator::CompletionBackend,
};

/// Chat-completion backend. The client is built on first use; concurrent
/// first callers wait on the same initialisation.
pub struct OpenAiBackend {
    api_key: Option<SecretString>,
    api_base: Option<String>,
    model: String,
    max_tokens: u32,
    client: OnceCell<Client<OpenAIConfig>>,
}

impl OpenAiBackend {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.generator_api_key.clone(),
            api_base: config.generator_api_base.clone(),
            model: config.generator_model.clone(),
            max_tokens: config.generator_max_tokens,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> AppResult<&Client<OpenAIConfig>> {
        self.client
            .get_or_try_init(|| async { self.build_client() })
            .await
    }

    fn build_client(&self) -> AppResult<Client<OpenAIConfig>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::ConfigurationError("GENERATOR_API_KEY is not set".to_string())
        })?;

        let mut config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base);
        }

        log::info!("Initialised generator client for model {}", self.model);
        Ok(Client::with_config(config))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let client = self.client().await?;

        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
        });

        let response: Value = client.chat().create_byot(request).await?;
        extract_content(&response)
    }
}

/// Pulls the text of the first choice out of a chat-completion response.
/// Content may be a plain string or a list of text parts.
pub fn extract_content(response: &Value) -> AppResult<String> {
    let content = response
        .pointer("/choices/0/message/content")
        .ok_or_else(|| {
            AppError::GenerationFailure("completion carried no message content".to_string())
        })?;

    let text = match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    };

    if text.trim().is_empty() {
        return Err(AppError::GenerationFailure(
            "completion returned empty content".to_string(),
        ));
    }

    Ok(text.trim().to_string())
}
