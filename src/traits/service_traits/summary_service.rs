use crate::common::*;

use crate::dto::{column_stats::*, table_summary::*};
use crate::model::table::data_table::*;

pub trait SummaryService: Send + Sync {
    #[doc = "Dimensions, column listing, and head preview of a loaded table; never fails"]
    fn summarize(&self, table: &DataTable) -> TableSummary;

    #[doc = "Descriptive statistics of one column for the post-plot report"]
    fn describe_column(&self, table: &DataTable, column_name: &str) -> anyhow::Result<ColumnStats>;
}
