use crate::common::*;

use crate::traits::service_traits::summary_service::*;

use crate::dto::{column_stats::*, table_summary::*};
use crate::model::table::{cell_value::*, column::*, data_table::*};
use crate::utils_modules::{errors::*, stats_utils::*};

#[derive(Debug, Clone, new)]
pub struct SummaryServiceImpl {
    preview_row_count: usize,
}

impl SummaryService for SummaryServiceImpl {
    fn summarize(&self, table: &DataTable) -> TableSummary {
        TableSummary::new(
            table.row_count(),
            table.column_count(),
            table.column_names(),
            table.head(self.preview_row_count),
        )
    }

    fn describe_column(&self, table: &DataTable, column_name: &str) -> anyhow::Result<ColumnStats> {
        let column: &Column = table.column(column_name).ok_or_else(|| {
            anyhow::Error::new(AgentError::ColumnSelection(column_name.to_string()))
        })?;

        if column.is_numeric() {
            let mut values: Vec<f64> = column.numeric_values();
            values.sort_by(f64::total_cmp);

            let count: usize = values.len();
            let mean: f64 = if count == 0 {
                0.0
            } else {
                values.iter().sum::<f64>() / count as f64
            };
            let std_dev: f64 = sample_std(&values, mean);
            let (min_v, q1, median, q3, max_v) = five_number_summary(&values);

            Ok(ColumnStats::new(
                column_name.to_string(),
                count,
                Some(NumericStats::new(mean, std_dev, min_v, q1, median, q3, max_v)),
                None,
            ))
        } else {
            let non_empty: Vec<String> = column
                .values()
                .iter()
                .filter(|v| !matches!(v, CellValue::Empty))
                .map(|v| v.display())
                .collect();

            let unique_count: usize = non_empty
                .iter()
                .collect::<std::collections::HashSet<_>>()
                .len();

            Ok(ColumnStats::new(
                column_name.to_string(),
                non_empty.len(),
                None,
                Some(unique_count),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::cell_value::*;

    fn table() -> DataTable {
        let x = Column::from_cells(
            "x".to_string(),
            ["1", "2", "3"].iter().map(|r| CellValue::from_raw(r)).collect(),
        );
        let y = Column::from_cells(
            "y".to_string(),
            ["2", "4", "6"].iter().map(|r| CellValue::from_raw(r)).collect(),
        );
        let label = Column::from_cells(
            "label".to_string(),
            ["a", "b", "a"].iter().map(|r| CellValue::from_raw(r)).collect(),
        );
        DataTable::new(vec![x, y, label]).unwrap()
    }

    #[test]
    fn summary_dimensions_equal_the_table_dimensions() {
        let table = table();
        let summary = SummaryServiceImpl::new(5).summarize(&table);

        assert_eq!(*summary.row_count(), table.row_count());
        assert_eq!(*summary.column_count(), table.column_count());
        assert_eq!(*summary.column_names(), table.column_names());
        assert_eq!(summary.preview_rows().len(), 3);
    }

    #[test]
    fn preview_is_limited_to_the_configured_row_count() {
        let summary = SummaryServiceImpl::new(2).summarize(&table());
        assert_eq!(summary.preview_rows().len(), 2);
    }

    #[test]
    fn numeric_columns_get_full_statistics() {
        let stats = SummaryServiceImpl::new(5)
            .describe_column(&table(), "y")
            .unwrap();

        let numeric = stats.numeric().as_ref().unwrap();
        assert_eq!(*stats.count(), 3);
        assert_eq!(*numeric.mean(), 4.0);
        assert!((numeric.std_dev() - 2.0).abs() < 1e-9);
        assert_eq!(*numeric.min(), 2.0);
        assert_eq!(*numeric.median(), 4.0);
        assert_eq!(*numeric.max(), 6.0);
    }

    #[test]
    fn text_columns_get_a_distinct_value_count() {
        let stats = SummaryServiceImpl::new(5)
            .describe_column(&table(), "label")
            .unwrap();

        assert_eq!(*stats.count(), 3);
        assert!(stats.numeric().is_none());
        assert_eq!(*stats.unique_count(), Some(2));
    }

    #[test]
    fn unknown_columns_signal_a_selection_failure() {
        let err = SummaryServiceImpl::new(5)
            .describe_column(&table(), "missing")
            .expect_err("unknown column must not describe");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::ColumnSelection(_))
        ));
    }
}
