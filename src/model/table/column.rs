use crate::common::*;

use crate::model::table::cell_value::*;

#[doc = "Inferred scalar type of a whole column"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Temporal,
    Text,
}

#[doc = r#"
    One named column of the loaded table.

    The type is inferred once at load time so that render-time code can
    branch on it instead of re-guessing per cell: a column is Numeric when
    every non-empty cell parsed as a number, Temporal when every non-empty
    cell matches a known date/datetime shape, and Text otherwise.
"#]
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
    column_type: ColumnType,
}

impl Column {
    pub fn from_cells(name: String, values: Vec<CellValue>) -> Self {
        let column_type: ColumnType = infer_column_type(&values);

        Column {
            name,
            values,
            column_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    #[doc = "All numeric cell values in row order; empty cells are skipped"]
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(|v| v.as_number()).collect()
    }

    pub fn display_values(&self) -> Vec<String> {
        self.values.iter().map(|v| v.display()).collect()
    }
}

fn infer_column_type(values: &[CellValue]) -> ColumnType {
    let non_empty: Vec<&CellValue> = values
        .iter()
        .filter(|v| !matches!(v, CellValue::Empty))
        .collect();

    if non_empty.is_empty() {
        return ColumnType::Text;
    }

    if non_empty.iter().all(|v| matches!(v, CellValue::Number(_))) {
        return ColumnType::Numeric;
    }

    if non_empty.iter().all(|v| is_temporal_cell(v)) {
        return ColumnType::Temporal;
    }

    ColumnType::Text
}

fn is_temporal_cell(value: &CellValue) -> bool {
    let text: &str = match value {
        CellValue::Text(text) => text.as_str(),
        _ => return false,
    };

    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(text, "%Y/%m/%d").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").is_ok()
}
