use crate::common::*;

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    #[doc = r#"
        Submit one prompt to the text-completion endpoint.

        # Arguments
        * `prompt` - the full prompt text
        * `max_tokens` - output-length bound forwarded to the service

        # Returns
        * `anyhow::Result<String>` - the raw completion text
    "#]
    async fn complete_text(&self, prompt: &str, max_tokens: u32) -> anyhow::Result<String>;
}
