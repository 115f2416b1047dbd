use crate::common::*;

use crate::traits::service_traits::export_service::*;

use crate::dto::rendered_chart::*;
use crate::model::table::{cell_value::*, data_table::*};
use crate::utils_modules::errors::*;

use rust_xlsxwriter::{Image, Workbook, XlsxError};

#[derive(Debug, Clone, new)]
pub struct ExportServiceImpl {
    sheet_name: String,
    image_anchor_row: u32,
    image_anchor_col: u16,
}

impl ExportServiceImpl {
    fn export_error(e: XlsxError) -> anyhow::Error {
        anyhow::Error::new(AgentError::Export(e.to_string()))
    }

    fn write_workbook(&self, table: &DataTable, chart: &RenderedChart) -> anyhow::Result<Vec<u8>> {
        let mut workbook: Workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(Self::export_error)?;

        /* header row, then typed cells; no index column */
        for (col_idx, column) in table.columns().iter().enumerate() {
            let col: u16 = col_idx as u16;

            worksheet
                .write_string(0, col, column.name())
                .map_err(Self::export_error)?;

            for (row_idx, value) in column.values().iter().enumerate() {
                let row: u32 = row_idx as u32 + 1;

                match value {
                    CellValue::Number(number) => {
                        worksheet
                            .write_number(row, col, *number)
                            .map_err(Self::export_error)?;
                    }
                    CellValue::Text(text) => {
                        worksheet
                            .write_string(row, col, text)
                            .map_err(Self::export_error)?;
                    }
                    CellValue::Empty => {}
                }
            }
        }

        let image: Image =
            Image::new_from_buffer(chart.png_bytes()).map_err(Self::export_error)?;

        worksheet
            .insert_image(self.image_anchor_row, self.image_anchor_col, &image)
            .map_err(Self::export_error)?;

        workbook.save_to_buffer().map_err(Self::export_error)
    }
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    async fn export_workbook(
        &self,
        table: &DataTable,
        chart: &RenderedChart,
    ) -> anyhow::Result<Vec<u8>> {
        let workbook_bytes: Vec<u8> = self.write_workbook(table, chart)?;

        info!(
            "Exported workbook: sheet '{}', {} rows, embedded chart '{}' at (row {}, col {})",
            self.sheet_name,
            table.row_count(),
            chart.title(),
            self.image_anchor_row,
            self.image_anchor_col
        );

        Ok(workbook_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::column::*;
    use calamine::{Data, Reader, open_workbook_auto};

    fn column(name: &str, raws: &[&str]) -> Column {
        Column::from_cells(
            name.to_string(),
            raws.iter().map(|raw| CellValue::from_raw(raw)).collect(),
        )
    }

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let mut png_bytes: Vec<u8> = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
            .unwrap();
        png_bytes
    }

    fn chart() -> RenderedChart {
        RenderedChart::new(tiny_png(), "Line Plot: y vs x".to_string(), "x".to_string(), "y".to_string())
    }

    #[tokio::test]
    async fn exported_workbook_round_trips_the_table() {
        let table = DataTable::new(vec![
            column("x", &["1", "2", "3"]),
            column("y", &["2", "4", "6"]),
            column("label", &["a", "b", "c"]),
        ])
        .unwrap();

        let service = ExportServiceImpl::new("Sheet1".to_string(), 1, 4);
        let bytes = service.export_workbook(&table, &chart()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modified_excel.xlsx");
        fs::write(&path, &bytes).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let sheet_names = workbook.sheet_names().to_vec();
        assert_eq!(sheet_names, vec!["Sheet1"]);

        let range = workbook.worksheet_range("Sheet1").unwrap();
        let rows: Vec<_> = range.rows().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            &[
                Data::String("x".to_string()),
                Data::String("y".to_string()),
                Data::String("label".to_string())
            ]
        );
        assert_eq!(
            rows[1],
            &[
                Data::Float(1.0),
                Data::Float(2.0),
                Data::String("a".to_string())
            ]
        );
        assert_eq!(
            rows[3],
            &[
                Data::Float(3.0),
                Data::Float(6.0),
                Data::String("c".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn a_corrupt_chart_image_signals_an_export_failure() {
        let table = DataTable::new(vec![column("x", &["1"])]).unwrap();
        let broken_chart = RenderedChart::new(
            vec![1, 2, 3],
            "Line Plot: y vs x".to_string(),
            "x".to_string(),
            "y".to_string(),
        );

        let service = ExportServiceImpl::new("Sheet1".to_string(), 1, 4);
        let err = service
            .export_workbook(&table, &broken_chart)
            .await
            .expect_err("corrupt image bytes must not export");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::Export(_))
        ));
    }

    #[tokio::test]
    async fn an_empty_table_still_exports_a_header_only_sheet() {
        let table = DataTable::new(vec![column("x", &[]), column("y", &[])]).unwrap();

        let service = ExportServiceImpl::new("Sheet1".to_string(), 1, 4);
        let bytes = service.export_workbook(&table, &chart()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        fs::write(&path, &bytes).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let rows: Vec<_> = range.rows().collect();

        assert_eq!(rows.len(), 1);
    }
}
