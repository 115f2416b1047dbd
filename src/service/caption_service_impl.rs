use crate::common::*;

use crate::traits::repository_traits::completion_repository::*;
use crate::traits::service_traits::caption_service::*;

use crate::model::table::data_table::*;
use crate::utils_modules::errors::*;

#[derive(Debug, new)]
pub struct CaptionServiceImpl<R: CompletionRepository> {
    completion_repo: R,
    preview_row_count: usize,
    max_tokens: u32,
}

impl<R: CompletionRepository> CaptionServiceImpl<R> {
    #[doc = "Fixed prompt: instruction line plus a bounded head preview of the table"]
    fn build_prompt(&self, table: &DataTable) -> String {
        let mut prompt: String =
            String::from("Generate a plot description for the following data:\n");

        prompt.push_str(&table.column_names().join("\t"));
        prompt.push('\n');

        for row in table.head(self.preview_row_count) {
            prompt.push_str(&row.join("\t"));
            prompt.push('\n');
        }

        prompt
    }
}

#[async_trait]
impl<R: CompletionRepository> CaptionService for CaptionServiceImpl<R> {
    async fn generate_caption(&self, table: &DataTable) -> anyhow::Result<String> {
        let prompt: String = self.build_prompt(table);

        match self
            .completion_repo
            .complete_text(&prompt, self.max_tokens)
            .await
        {
            Ok(completion_text) => Ok(completion_text.trim().to_string()),
            Err(e) => {
                /* the underlying cause is logged here and only here */
                error!("[CaptionServiceImpl->generate_caption] {:?}", e);
                Err(anyhow::Error::new(AgentError::CaptionUnavailable(
                    e.to_string(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{cell_value::*, column::*};
    use std::sync::Mutex;

    struct RecordingRepo {
        prompts: Mutex<Vec<String>>,
        response: Result<String, String>,
    }

    #[async_trait]
    impl CompletionRepository for RecordingRepo {
        async fn complete_text(&self, prompt: &str, _max_tokens: u32) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(reason) => Err(anyhow!("{}", reason)),
            }
        }
    }

    fn table() -> DataTable {
        let x = Column::from_cells(
            "x".to_string(),
            ["1", "2", "3"].iter().map(|r| CellValue::from_raw(r)).collect(),
        );
        let y = Column::from_cells(
            "y".to_string(),
            ["2", "4", "6"].iter().map(|r| CellValue::from_raw(r)).collect(),
        );
        DataTable::new(vec![x, y]).unwrap()
    }

    #[tokio::test]
    async fn prompt_carries_the_instruction_and_the_preview() {
        let repo = RecordingRepo {
            prompts: Mutex::new(Vec::new()),
            response: Ok("  A steadily rising series.  ".to_string()),
        };
        let service = CaptionServiceImpl::new(repo, 5, 100);

        let caption = service.generate_caption(&table()).await.unwrap();
        assert_eq!(caption, "A steadily rising series.");

        let prompts = service.completion_repo.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Generate a plot description for the following data:\n"));
        assert!(prompts[0].contains("x\ty"));
        assert!(prompts[0].contains("1\t2"));
    }

    #[tokio::test]
    async fn repository_failures_become_caption_unavailable() {
        let repo = RecordingRepo {
            prompts: Mutex::new(Vec::new()),
            response: Err("connection refused".to_string()),
        };
        let service = CaptionServiceImpl::new(repo, 5, 100);

        let err = service
            .generate_caption(&table())
            .await
            .expect_err("transport failure must surface as CaptionUnavailable");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::CaptionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn preview_respects_the_configured_row_bound() {
        let repo = RecordingRepo {
            prompts: Mutex::new(Vec::new()),
            response: Ok("ok".to_string()),
        };
        let service = CaptionServiceImpl::new(repo, 1, 100);

        service.generate_caption(&table()).await.unwrap();

        let prompts = service.completion_repo.prompts.lock().unwrap();
        assert!(prompts[0].contains("1\t2"));
        assert!(!prompts[0].contains("2\t4"));
    }
}
