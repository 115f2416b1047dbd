use crate::common::*;

use crate::model::table::data_table::*;

#[async_trait]
pub trait CaptionService: Send + Sync {
    #[doc = r#"
        Ask the completion endpoint for a short description of the table.

        Failure here is never fatal to the rest of the pipeline: callers log
        the cause and fall back to a placeholder message.
    "#]
    async fn generate_caption(&self, table: &DataTable) -> anyhow::Result<String>;
}
