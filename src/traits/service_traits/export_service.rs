use crate::common::*;

use crate::dto::rendered_chart::*;
use crate::model::table::data_table::*;

#[async_trait]
pub trait ExportService: Send + Sync {
    #[doc = r#"
        Serialize the table and the rendered chart into one workbook.

        The sheet carries a header row plus every data row, no index column;
        the chart image is embedded at the configured anchor cell. The table
        itself is not touched.

        # Returns
        * `anyhow::Result<Vec<u8>>` - the finished workbook bytes, or an
          Export failure (no partial workbook)
    "#]
    async fn export_workbook(
        &self,
        table: &DataTable,
        chart: &RenderedChart,
    ) -> anyhow::Result<Vec<u8>>;
}
