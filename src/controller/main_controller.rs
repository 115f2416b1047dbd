use crate::common::*;

use crate::traits::service_traits::{
    caption_service::*, chart_service::*, export_service::*, loader_service::*, summary_service::*,
};

use crate::dto::{column_stats::*, plot_request::*, rendered_chart::*, table_summary::*};
use crate::model::table::data_table::*;

#[derive(Debug, new)]
pub struct MainController<L, S, C, E, P>
where
    L: LoaderService,
    S: SummaryService,
    C: ChartService,
    E: ExportService,
    P: CaptionService,
{
    loader_service: L,
    summary_service: S,
    chart_service: C,
    export_service: E,
    caption_service: Option<P>,
}

impl<L, S, C, E, P> MainController<L, S, C, E, P>
where
    L: LoaderService,
    S: SummaryService,
    C: ChartService,
    E: ExportService,
    P: CaptionService,
{
    #[doc = r#"
        Runs one "Generate Plot" action end to end:

        1. parse the upload into a table
        2. print the initial analysis report
        3. (variant) caption the data; failure prints a placeholder and moves on
        4. dispatch the chart rendering
        5. print the detailed analysis report
        6. export the workbook and write it to the output path
        7. (variant) write the multi-series overview chart

        Parse and export failures abort the action. A chart-step failure
        (absent column, non-numeric data for a numeric-only chart) leaves
        the already-printed table summary in place.
    "#]
    pub async fn run(&self, request: &PlotRequest) -> anyhow::Result<()> {
        /* 1. Load the uploaded file into a table */
        let table: DataTable = self.loader_service.load_table(request.input_path()).await?;

        /* 2. Initial analysis report */
        let summary: TableSummary = self.summary_service.summarize(&table);
        self.print_initial_report(&summary);

        /* 3. Caption variant: never blocks chart rendering */
        if *request.caption_requested() {
            self.print_caption(&table).await;
        }

        /* 4. Chart dispatch */
        let chart: RenderedChart = self
            .chart_service
            .render_chart(&table, request.selection(), *request.chart_type())
            .await?;

        /* 5. Detailed analysis report */
        self.print_detailed_report(request, &table, &chart)?;

        /* 6. Workbook export */
        let workbook_bytes: Vec<u8> = self
            .export_service
            .export_workbook(&table, &chart)
            .await?;

        fs::write(request.output_path(), &workbook_bytes).with_context(|| {
            format!(
                "[MainController->run] Failed to write workbook to {:?}",
                request.output_path()
            )
        })?;

        info!(
            "Workbook written to {:?} ({} bytes)",
            request.output_path(),
            workbook_bytes.len()
        );

        /* 7. Secondary output: fixed multi-series line chart */
        if let Some(overview_path) = request.overview_chart_path() {
            let overview: RenderedChart = self.chart_service.render_overview_chart(&table).await?;

            fs::write(overview_path, overview.png_bytes()).with_context(|| {
                format!(
                    "[MainController->run] Failed to write overview chart to {:?}",
                    overview_path
                )
            })?;

            info!("Overview chart written to {:?}", overview_path);
        }

        Ok(())
    }

    fn print_initial_report(&self, summary: &TableSummary) {
        println!("Data from the uploaded file:");
        println!("{}", summary.column_names().join("\t"));
        println!(
            "{}",
            summary
                .preview_rows()
                .iter()
                .map(|row| row.join("\t"))
                .collect::<Vec<String>>()
                .join("\n")
        );
        println!();
        println!("### Initial Analysis Report");
        println!(
            "The dataset contains {} rows and {} columns.",
            summary.row_count().to_formatted_string(&Locale::en),
            summary.column_count()
        );
        println!(
            "The columns in the dataset are: {}.",
            summary.column_names().join(", ")
        );
    }

    async fn print_caption(&self, table: &DataTable) {
        let caption_service: &P = match &self.caption_service {
            Some(caption_service) => caption_service,
            None => {
                warn!(
                    "[MainController->print_caption] caption requested but no completion credential is configured"
                );
                println!("Plot Description: (caption unavailable)");
                return;
            }
        };

        match caption_service.generate_caption(table).await {
            Ok(caption) => {
                println!("Plot Description:");
                println!("{}", caption);
            }
            Err(_) => {
                /* the cause was logged where it happened; the flow continues */
                println!("Plot Description: (caption unavailable)");
            }
        }
    }

    fn print_detailed_report(
        &self,
        request: &PlotRequest,
        table: &DataTable,
        chart: &RenderedChart,
    ) -> anyhow::Result<()> {
        println!();
        println!("### Detailed Analysis Report");
        println!("Plot Type: {}", request.chart_type().label());
        println!(
            "X-axis: {}, Y-axis: {}",
            request.selection().x_axis().as_deref().unwrap_or("-"),
            request.selection().y_axis()
        );
        println!("Chart Title: {}", chart.title());

        let y_name: &str = request.selection().y_axis();
        let stats: ColumnStats = self.summary_service.describe_column(table, y_name)?;

        println!("Summary of {}:", y_name);
        println!("count    {}", stats.count());

        match (stats.numeric(), stats.unique_count()) {
            (Some(numeric), _) => {
                println!("mean     {:.6}", numeric.mean());
                println!("std      {:.6}", numeric.std_dev());
                println!("min      {:.6}", numeric.min());
                println!("25%      {:.6}", numeric.q1());
                println!("50%      {:.6}", numeric.median());
                println!("75%      {:.6}", numeric.q3());
                println!("max      {:.6}", numeric.max());
            }
            (None, Some(unique_count)) => {
                println!("unique   {}", unique_count);
            }
            (None, None) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dto::column_selection::*;
    use crate::enums::chart_type::*;
    use crate::repository::completion_repository_impl::*;
    use crate::service::{
        caption_service_impl::*, chart_service_impl::*, export_service_impl::*,
        loader_service_impl::*, summary_service_impl::*,
    };

    use calamine::{Reader, open_workbook_auto};

    type TestController = MainController<
        LoaderServiceImpl,
        SummaryServiceImpl,
        ChartServiceImpl,
        ExportServiceImpl,
        CaptionServiceImpl<CompletionRepositoryImpl>,
    >;

    fn controller() -> TestController {
        MainController::new(
            LoaderServiceImpl::new(),
            SummaryServiceImpl::new(5),
            ChartServiceImpl::new(640, 480),
            ExportServiceImpl::new("Sheet1".to_string(), 1, 4),
            None,
        )
    }

    fn request(
        dir: &tempfile::TempDir,
        chart_type: ChartType,
        overview: bool,
    ) -> (PathBuf, PlotRequest) {
        let input_path = dir.path().join("data.csv");
        fs::write(&input_path, "x,y\n1,2\n2,4\n3,6\n").unwrap();

        let output_path = dir.path().join("modified_excel.xlsx");
        let overview_path = overview.then(|| dir.path().join("plot.png"));

        let request = PlotRequest::new(
            input_path,
            ColumnSelection::new(Some("x".to_string()), "y".to_string()),
            chart_type,
            output_path.clone(),
            false,
            overview_path,
        );

        (output_path, request)
    }

    #[tokio::test]
    async fn the_full_pipeline_produces_a_round_trippable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let (output_path, request) = request(&dir, ChartType::Line, false);

        controller().run(&request).await.unwrap();

        let mut workbook = open_workbook_auto(&output_path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let rows: Vec<_> = range.rows().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0].to_string(), "x");
        assert_eq!(rows[2][1].to_string(), "4");
    }

    #[tokio::test]
    async fn the_overview_chart_lands_next_to_the_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let (_, request) = request(&dir, ChartType::Scatter, true);

        controller().run(&request).await.unwrap();

        let png_bytes = fs::read(dir.path().join("plot.png")).unwrap();
        assert!(png_bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn a_chart_step_failure_aborts_before_any_export() {
        let dir = tempfile::tempdir().unwrap();

        let input_path = dir.path().join("data.csv");
        fs::write(&input_path, "x,label\n1,a\n2,b\n").unwrap();

        let output_path = dir.path().join("modified_excel.xlsx");
        let request = PlotRequest::new(
            input_path,
            ColumnSelection::new(None, "label".to_string()),
            ChartType::Histogram,
            output_path.clone(),
            false,
            None,
        );

        controller()
            .run(&request)
            .await
            .expect_err("a type mismatch must abort the chart step");

        assert!(!output_path.exists());
    }
}
