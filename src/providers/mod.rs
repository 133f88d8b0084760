pub mod gemini;
pub mod openai;
pub mod traits;
pub mod utils;

use reqwest::Client;
use std::sync::Arc;

use crate::config::{AiProviderKind, ProviderConfig};
use gemini::GeminiProvider;
use openai::OpenAIProvider;
use traits::CompletionProvider;

pub fn build_provider(
    config: &ProviderConfig,
    system_message: String,
    client: Client,
) -> Arc<dyn CompletionProvider> {
    match config.kind {
        AiProviderKind::OpenAI => Arc::new(OpenAIProvider::new(config, system_message, client)),
        AiProviderKind::Gemini => Arc::new(GeminiProvider::new(config, system_message, client)),
    }
}
