use crate::common::*;

use crate::model::table::data_table::*;

#[async_trait]
pub trait LoaderService: Send + Sync {
    #[doc = r#"
        Parse an uploaded file into a table.

        The container format is inferred from the file name suffix; a header
        row is required in either format.

        # Arguments
        * `input_path` - path of the uploaded `.csv`, `.xlsx`, or `.xls` file

        # Returns
        * `anyhow::Result<DataTable>` - the loaded table, or a Parse failure
    "#]
    async fn load_table(&self, input_path: &Path) -> anyhow::Result<DataTable>;
}
