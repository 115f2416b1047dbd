use crate::common::*;

use crate::traits::repository_traits::completion_repository::*;

use crate::model::configs::caption_config::*;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[doc = r#"
    HTTP client for the text-completion endpoint.

    The API credential is passed in at construction time rather than read
    from ambient process state, and every request is bounded by the
    configured timeout.
"#]
#[derive(Debug, Clone)]
pub struct CompletionRepositoryImpl {
    client: Client,
    endpoint_url: String,
    model: String,
    api_key: String,
}

impl CompletionRepositoryImpl {
    pub fn new(caption_config: &CaptionConfig, api_key: String) -> Result<Self, anyhow::Error> {
        let client: Client = Client::builder()
            .timeout(Duration::from_secs(*caption_config.timeout_sec()))
            .build()?;

        Ok(CompletionRepositoryImpl {
            client,
            endpoint_url: caption_config.endpoint_url().clone(),
            model: caption_config.model().clone(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionRepository for CompletionRepositoryImpl {
    async fn complete_text(&self, prompt: &str, max_tokens: u32) -> anyhow::Result<String> {
        let request_body: CompletionRequest = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_body: String = response.text().await?;
            return Err(anyhow!(
                "[CompletionRepositoryImpl->complete_text] response status is failed: {:?}",
                error_body
            ));
        }

        let response_body: CompletionResponse = response.json().await?;

        let completion_text: String = response_body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                anyhow!("[CompletionRepositoryImpl->complete_text] response contains no choices")
            })?;

        Ok(completion_text)
    }
}
