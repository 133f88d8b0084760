use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use crate::providers::utils::non_empty_text;

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: Option<String>,
    system_message: String,
    client: Client,
    api_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(config: &ProviderConfig, system_message: String, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            system_message,
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not configured"))?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": self.system_message
                    },
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
                "max_tokens": self.max_tokens,
                "temperature": self.temperature
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("API request failed: Status {}, Body: {}", status, error_text));
        }

        let response_json: Value = response.json().await?;

        let text = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|s| s.to_string());

        non_empty_text(&response_json, text)
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
