use crate::common::*;

use crate::dto::{column_selection::*, rendered_chart::*};
use crate::enums::chart_type::*;
use crate::model::table::data_table::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = r#"
        Render one chart of the selected columns.

        # Arguments
        * `table` - the loaded table
        * `selection` - x/y column names; x is ignored by Histogram/BoxPlot
        * `chart_type` - which rendering rule to apply

        # Returns
        * `anyhow::Result<RenderedChart>` - PNG bytes plus title/axis labels
    "#]
    async fn render_chart(
        &self,
        table: &DataTable,
        selection: &ColumnSelection,
        chart_type: ChartType,
    ) -> anyhow::Result<RenderedChart>;

    #[doc = r#"
        Render the fixed overview chart: first column as x, one line series
        per remaining numeric column.
    "#]
    async fn render_overview_chart(&self, table: &DataTable) -> anyhow::Result<RenderedChart>;
}
