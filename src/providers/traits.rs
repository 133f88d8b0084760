use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` with the provider's system message and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    async fn get_model_info(&self) -> Result<String>;

    fn name(&self) -> &'static str;
}
