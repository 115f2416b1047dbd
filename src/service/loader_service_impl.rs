use crate::common::*;

use crate::traits::service_traits::loader_service::*;

use crate::enums::upload_format::*;
use crate::model::table::{cell_value::*, column::*, data_table::*};
use crate::utils_modules::errors::*;

use calamine::{Data, Reader, Sheets, open_workbook_auto};

#[derive(Debug, Clone, new)]
pub struct LoaderServiceImpl;

impl LoaderServiceImpl {
    fn parse_error(input_path: &Path, reason: String) -> anyhow::Error {
        let file_name: String = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input_path.display().to_string());

        anyhow::Error::new(AgentError::Parse { file_name, reason })
    }

    #[doc = r#"
        Delimited-text parsing with a header row. The reader is strict about
        field counts, so a ragged row surfaces as a Parse failure instead of
        a silently truncated table.
    "#]
    fn load_csv(&self, input_path: &Path) -> anyhow::Result<DataTable> {
        let mut reader: csv::Reader<fs::File> = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(input_path)
            .map_err(|e| Self::parse_error(input_path, e.to_string()))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Self::parse_error(input_path, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(Self::parse_error(
                input_path,
                "no header row present".to_string(),
            ));
        }

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record: csv::StringRecord =
                record.map_err(|e| Self::parse_error(input_path, e.to_string()))?;

            for (col_idx, field) in record.iter().enumerate() {
                cells[col_idx].push(CellValue::from_raw(field));
            }
        }

        self.build_table(headers, cells)
    }

    #[doc = "First worksheet of a spreadsheet container, header row first"]
    fn load_excel(&self, input_path: &Path) -> anyhow::Result<DataTable> {
        let mut workbook: Sheets<_> = open_workbook_auto(input_path)
            .map_err(|e| Self::parse_error(input_path, e.to_string()))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let first_sheet: &String = sheet_names.first().ok_or_else(|| {
            Self::parse_error(input_path, "workbook contains no sheets".to_string())
        })?;

        let range = workbook
            .worksheet_range(first_sheet)
            .map_err(|e| Self::parse_error(input_path, e.to_string()))?;

        let mut rows = range.rows();

        let header_row: &[Data] = rows
            .next()
            .ok_or_else(|| Self::parse_error(input_path, "no header row present".to_string()))?;

        let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

        for row in rows {
            for (col_idx, cell) in row.iter().enumerate().take(headers.len()) {
                cells[col_idx].push(convert_excel_cell(cell));
            }
        }

        self.build_table(headers, cells)
    }

    fn build_table(
        &self,
        headers: Vec<String>,
        cells: Vec<Vec<CellValue>>,
    ) -> anyhow::Result<DataTable> {
        let columns: Vec<Column> = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::from_cells(name, values))
            .collect();

        DataTable::new(columns)
    }
}

#[doc = r#"
    Spreadsheet cells arrive already typed; string cells still go through the
    raw-field parser so that "1" in a spreadsheet and "1" in a CSV produce the
    same cell value. Date/time serials are kept as their numeric form.
"#]
fn convert_excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::from_raw(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

#[async_trait]
impl LoaderService for LoaderServiceImpl {
    async fn load_table(&self, input_path: &Path) -> anyhow::Result<DataTable> {
        let file_name: String = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let table: DataTable = match UploadFormat::from_file_name(&file_name) {
            UploadFormat::Csv => self.load_csv(input_path)?,
            UploadFormat::Excel => self.load_excel(input_path)?,
        };

        info!(
            "Loaded '{}': {} rows, {} columns",
            file_name,
            table.row_count(),
            table.column_count()
        );

        Ok(table)
    }
}
