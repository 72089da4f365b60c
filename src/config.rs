use std::{env, time::Duration};
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub generator_api_key: Option<SecretString>,
    pub generator_api_base: Option<String>,
    pub generator_model: String,
    pub generator_max_tokens: u32,
    pub generation_timeout_secs: u64,
    pub static_dir: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            generator_api_key: env::var("GENERATOR_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            generator_api_base: env::var("GENERATOR_API_BASE")
                .ok()
                .filter(|b| !b.trim().is_empty()),
            generator_model: env::var("GENERATOR_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            generator_max_tokens: env::var("GENERATOR_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(2500),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(120),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Checks that the generator can be initialised. The server still starts
    /// when this fails; generation requests then report the same error.
    pub fn validate(&self) -> AppResult<()> {
        if self.generator_api_key.is_none() {
            return Err(AppError::ConfigurationError(
                "GENERATOR_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            generator_api_key: Some(SecretString::from("test_generator_key".to_string())),
            generator_api_base: None,
            generator_model: "gpt-4o".to_string(),
            generator_max_tokens: 2500,
            generation_timeout_secs: 5,
            static_dir: "static".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
