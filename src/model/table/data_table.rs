use crate::common::*;

use crate::model::table::column::*;

#[doc = r#"
    The in-memory table built from one upload.

    Invariant: every column holds the same number of rows; `new` refuses
    anything else. The table is never mutated after the loader hands it out.
"#]
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> anyhow::Result<Self> {
        if let Some(first) = columns.first() {
            let expected: usize = first.row_count();

            for column in &columns {
                if column.row_count() != expected {
                    return Err(anyhow!(
                        "[DataTable->new] Column '{}' has {} rows, expected {}",
                        column.name(),
                        column.row_count(),
                        expected
                    ));
                }
            }
        }

        Ok(DataTable { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.row_count())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    #[doc = "First `n` rows in row-major display form, for previews and prompts"]
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let preview_rows: usize = n.min(self.row_count());

        (0..preview_rows)
            .map(|row_idx| {
                self.columns
                    .iter()
                    .map(|column| column.values()[row_idx].display())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::cell_value::*;

    fn column(name: &str, raws: &[&str]) -> Column {
        Column::from_cells(
            name.to_string(),
            raws.iter().map(|raw| CellValue::from_raw(raw)).collect(),
        )
    }

    #[test]
    fn dimensions_match_the_loaded_content() {
        let table = DataTable::new(vec![
            column("x", &["1", "2", "3"]),
            column("y", &["2", "4", "6"]),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["x", "y"]);
    }

    #[test]
    fn unequal_column_lengths_are_rejected() {
        let result = DataTable::new(vec![column("x", &["1", "2"]), column("y", &["2"])]);
        assert!(result.is_err());
    }

    #[test]
    fn head_is_capped_at_the_row_count() {
        let table = DataTable::new(vec![column("x", &["1", "2"])]).unwrap();
        let preview: Vec<Vec<String>> = table.head(5);

        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0], vec!["1"]);
    }

    #[test]
    fn missing_column_lookup_returns_none() {
        let table = DataTable::new(vec![column("x", &["1"])]).unwrap();
        assert!(table.column("x").is_some());
        assert!(table.column("nope").is_none());
    }
}
