use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use crate::providers::utils::non_empty_text;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: Option<String>,
    system_message: String,
    client: Client,
    api_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig, system_message: String, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            system_message,
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not configured"))?;

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&json!({
                "systemInstruction": {
                    "parts": [{ "text": self.system_message }]
                },
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "maxOutputTokens": self.max_tokens,
                    "temperature": self.temperature
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("API request failed: Status {}, Body: {}", status, error_text));
        }

        let response_json: Value = response.json().await?;

        // A candidate may split its answer over several parts.
        let text = response_json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            });

        non_empty_text(&response_json, text)
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
