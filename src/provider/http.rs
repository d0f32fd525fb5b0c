//! `HttpProvider` — capabilities backed by an OpenAI-compatible endpoint.
//!
//! Calls `/v1/chat/completions` on any provider that speaks the OpenAI wire
//! format (Ollama in OpenAI mode, OpenAI, Groq, LM Studio, vLLM …).  All
//! connection details come from [`ProviderConfig`]; nothing is hardcoded.

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::language;
use crate::provider::capability::{Availability, CapabilityProvider, ProviderError};
use crate::provider::prompt::PromptBuilder;

const DETECT_MAX_TOKENS: u32 = 8;
const TRANSLATE_MAX_TOKENS: u32 = 1024;
const SUMMARIZE_MAX_TOKENS: u32 = 256;

// ---------------------------------------------------------------------------
// HttpProvider
// ---------------------------------------------------------------------------

/// Remote detect / translate / summarize over HTTP.
///
/// The `Authorization: Bearer …` header is attached only when
/// `config.api_key` is a non-empty string, so local endpoints that need no
/// authentication work unchanged.
pub struct HttpProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    prompts: PromptBuilder,
}

impl HttpProvider {
    /// Build an `HttpProvider` from configuration.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; if the builder fails a default client is used.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompts: PromptBuilder::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Send one chat exchange and return the trimmed reply.
    async fn complete(
        &self,
        (system_msg, user_msg): (String, String),
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
            "max_tokens":  max_tokens
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?.error_for_status()?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        extract_content(&json)
    }
}

/// Pull `choices[0].message.content` out of a chat-completions response.
fn extract_content(json: &serde_json::Value) -> Result<String, ProviderError> {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(ProviderError::EmptyResponse)?
        .trim()
        .to_string();

    if content.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(content)
}

/// Interpret a detect reply: the first word, if it is a known ISO-639-1 code.
fn parse_detected_code(reply: &str) -> Option<String> {
    let word = reply
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '_');
    language::normalize(word).filter(|code| language::is_known(code))
}

#[async_trait]
impl CapabilityProvider for HttpProvider {
    async fn detect(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let reply = self
            .complete(self.prompts.detect(text), DETECT_MAX_TOKENS)
            .await?;
        Ok(parse_detected_code(&reply))
    }

    /// A chat model can attempt any pair whose target is a real language code.
    async fn capabilities_for(
        &self,
        _source: &str,
        target: &str,
    ) -> Result<Availability, ProviderError> {
        let known = language::normalize(target).is_some_and(|code| language::is_known(&code));
        Ok(if known {
            Availability::Readily
        } else {
            Availability::No
        })
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        self.complete(
            self.prompts.translate(text, source, target),
            TRANSLATE_MAX_TOKENS,
        )
        .await
    }

    async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        self.complete(self.prompts.summarize(text), SUMMARIZE_MAX_TOKENS)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
