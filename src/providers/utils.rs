use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Shared outbound client; `timeout` bounds every request it sends.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turns a completion response into its text, failing on API errors and blank replies.
pub fn non_empty_text(response_json: &Value, text: Option<String>) -> Result<String> {
    if let Some(error) = response_json.get("error") {
        return Err(anyhow!("API returned error: {}", error));
    }

    match text.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => {
            let debug_json = serde_json::to_string(response_json).unwrap_or_default();
            Err(anyhow!("Invalid response format. Response JSON: {}", debug_json))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_is_trimmed() {
        let text = non_empty_text(&json!({}), Some("  Shakshuka \n".to_string())).unwrap();
        assert_eq!(text, "Shakshuka");
    }

    #[test]
    fn test_blank_text_is_an_error() {
        assert!(non_empty_text(&json!({}), Some("   ".to_string())).is_err());
        assert!(non_empty_text(&json!({}), None).is_err());
    }

    #[test]
    fn test_api_error_wins() {
        let err = non_empty_text(
            &json!({"error": {"message": "quota exceeded"}}),
            Some("ignored".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_client_builds() {
        assert!(build_http_client(Duration::from_secs(1)).is_ok());
    }
}
