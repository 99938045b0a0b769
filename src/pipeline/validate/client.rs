use serde::{Deserialize, Serialize};

use super::types::ChatClient;
use super::ValidateError;

/// Environment variable holding the classifier API key.
pub const API_KEY_ENV: &str = "SCRUB_AI_API_KEY";

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAiChatClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiChatClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Build a client reading the API key from `SCRUB_AI_API_KEY`.
    ///
    /// A missing or empty key is `ValidateError::MissingApiKey` — callers
    /// degrade to the AI-skipped mode rather than aborting.
    pub fn from_env(base_url: &str, timeout_secs: u64) -> Result<Self, ValidateError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(base_url, &key, timeout_secs)),
            _ => Err(ValidateError::MissingApiKey),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatClient for OpenAiChatClient {
    fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ValidateError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ValidateError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ValidateError::Timeout(self.timeout_secs)
                } else {
                    ValidateError::ResponseParsing(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ValidateError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ValidateError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ValidateError::ResponseParsing("empty choices array".into()))
    }
}

/// Mock chat client for testing — returns a configurable response.
pub struct MockChatClient {
    response: String,
}

impl MockChatClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl ChatClient for MockChatClient {
    fn complete(
        &self,
        _model: &str,
        _system: &str,
        _user: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ValidateError> {
        Ok(self.response.clone())
    }
}

/// Mock chat client that always fails, for fail-open tests.
pub struct FailingChatClient;

impl ChatClient for FailingChatClient {
    fn complete(
        &self,
        _model: &str,
        _system: &str,
        _user: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ValidateError> {
        Err(ValidateError::Connection("https://api.example".into()))
    }
}
