use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::food::config::FoodConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown AI provider '{0}' (expected 'openai' or 'gemini')")]
    UnknownProvider(String),
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    OpenAI,
    Gemini,
}

impl AiProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            AiProviderKind::OpenAI => "openai",
            AiProviderKind::Gemini => "gemini",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            AiProviderKind::OpenAI => "gpt-3.5-turbo",
            AiProviderKind::Gemini => "gemini-1.5-flash",
        }
    }

    fn default_api_url(&self) -> &'static str {
        match self {
            AiProviderKind::OpenAI => "https://api.openai.com/v1/chat/completions",
            AiProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
        }
    }
}

impl fmt::Display for AiProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AiProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(AiProviderKind::OpenAI),
            "gemini" => Ok(AiProviderKind::Gemini),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: AiProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ProviderConfig {
    pub fn from_env(kind: AiProviderKind) -> Result<Self, ConfigError> {
        Self::from_lookup(kind, |name| env::var(name).ok())
    }

    /// Reads `<PREFIX>_API_KEY`, `<PREFIX>_MODEL`, `<PREFIX>_API_URL`,
    /// `<PREFIX>_TEMPERATURE` and `<PREFIX>_MAX_TOKENS` through `lookup`.
    pub fn from_lookup<F>(kind: AiProviderKind, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = kind.name().to_uppercase();
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let model = var("MODEL").unwrap_or_else(|| kind.default_model().to_string());
        let api_url = var("API_URL").unwrap_or_else(|| kind.default_api_url().to_string());

        let temperature = match var("TEMPERATURE") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|t| (0.7..=0.8).contains(t))
                .ok_or(ConfigError::InvalidValue {
                    name: format!("{}_TEMPERATURE", prefix),
                    value: raw,
                })?,
            None => 0.7,
        };

        let max_tokens = match var("MAX_TOKENS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: format!("{}_MAX_TOKENS", prefix),
                    value: raw,
                })?,
            None => 300,
        };

        Ok(Self {
            kind,
            api_key: var("API_KEY"),
            model,
            api_url,
            temperature,
            max_tokens,
        })
    }
}

/// Everything the server needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub provider: ProviderConfig,
    pub food: FoodConfig,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env(
        port: u16,
        provider: AiProviderKind,
        upstream_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if upstream_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "UPSTREAM_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            port,
            provider: ProviderConfig::from_env(provider)?,
            food: FoodConfig::from_env(),
            upstream_timeout,
        })
    }

    /// Names of the API keys that are not set. Calls needing them will degrade.
    pub fn missing_keys(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.provider.api_key.is_none() {
            missing.push(format!("{}_API_KEY", self.provider.kind.name().to_uppercase()));
        }
        if self.food.spoonacular_api_key.is_none() {
            missing.push("SPOONACULAR_API_KEY".to_string());
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_provider_defaults() {
        let config = ProviderConfig::from_lookup(AiProviderKind::OpenAI, lookup(&[])).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.api_url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 300);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_provider_overrides_use_prefix() {
        let config = ProviderConfig::from_lookup(
            AiProviderKind::Gemini,
            lookup(&[
                ("GEMINI_API_KEY", "g-key"),
                ("GEMINI_MODEL", "gemini-2.0-flash"),
                ("GEMINI_TEMPERATURE", "0.8"),
                ("OPENAI_API_KEY", "ignored"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, 0.8);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = ProviderConfig::from_lookup(
            AiProviderKind::OpenAI,
            lookup(&[("OPENAI_API_KEY", "   ")]),
        )
        .unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_temperature_rejected() {
        let err = ProviderConfig::from_lookup(
            AiProviderKind::OpenAI,
            lookup(&[("OPENAI_TEMPERATURE", "hot")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        for raw in ["3.5", "1.0", "0.2"] {
            let err = ProviderConfig::from_lookup(
                AiProviderKind::OpenAI,
                lookup(&[("OPENAI_TEMPERATURE", raw)]),
            )
            .unwrap_err();
            assert!(err.to_string().contains("OPENAI_TEMPERATURE"), "{}", raw);
        }
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("OpenAI".parse::<AiProviderKind>().unwrap(), AiProviderKind::OpenAI);
        assert_eq!(" gemini ".parse::<AiProviderKind>().unwrap(), AiProviderKind::Gemini);
        assert!("mistral".parse::<AiProviderKind>().is_err());
    }

    #[test]
    fn test_missing_keys_listed() {
        let config = AppConfig {
            port: 3000,
            provider: ProviderConfig::from_lookup(AiProviderKind::Gemini, lookup(&[])).unwrap(),
            food: FoodConfig::from_lookup(lookup(&[("SPOONACULAR_API_KEY", "s-key")])),
            upstream_timeout: Duration::from_secs(8),
        };
        assert_eq!(config.missing_keys(), vec!["GEMINI_API_KEY".to_string()]);
    }
}
