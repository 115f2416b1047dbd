mod common;
mod external_deps;
mod prelude;
use common::*;

mod controller;
use controller::main_controller::*;

mod dto;
use dto::{column_selection::*, plot_request::*};

mod enums;
use enums::chart_type::*;

mod env_configuration;

mod model;
use model::configs::total_config::*;

mod repository;
use repository::completion_repository_impl::*;

mod service;
use service::{
    caption_service_impl::*, chart_service_impl::*, export_service_impl::*,
    loader_service_impl::*, summary_service_impl::*,
};

mod traits;

mod utils_modules;
use utils_modules::logger_utils::*;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Loads a spreadsheet, renders a chart of two selected columns, and exports a workbook with the chart embedded",
    long_about = "One invocation is one \"Generate Plot\" action: parse the upload, print an \
                  analysis report, render the selected chart, and write a workbook bundling the \
                  data with the chart image.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  AGENT_CONFIG_PATH     Path of the agent TOML configuration\n  \
                  COMPLETION_API_KEY    Credential for the caption endpoint (only with --caption)"
)]
struct Args {
    /// Path of the uploaded .csv, .xlsx, or .xls file
    #[arg(short, long)]
    input: PathBuf,

    /// Column plotted on the X axis (ignored by histogram and box-plot)
    #[arg(short, long)]
    x_axis: Option<String>,

    /// Column plotted on the Y axis
    #[arg(short, long)]
    y_axis: String,

    /// Chart kind to render
    #[arg(short, long, value_enum)]
    chart: ChartType,

    /// Where to write the workbook with the embedded chart
    #[arg(short, long, default_value = "modified_excel.xlsx")]
    output: PathBuf,

    /// Ask the completion endpoint to describe the data
    #[arg(long)]
    caption: bool,

    /// Also write the fixed multi-series line chart to this PNG path
    #[arg(long)]
    overview_chart: Option<PathBuf>,
}

#[doc = r#"
    Builds the caption service when a credential is available. The API key is
    read once here and handed to the repository as a plain value; a missing
    key downgrades captions to the unavailable placeholder instead of
    aborting the run.
"#]
fn build_caption_service() -> Option<CaptionServiceImpl<CompletionRepositoryImpl>> {
    let api_key: String = match env::var("COMPLETION_API_KEY") {
        Ok(api_key) => api_key,
        Err(_) => {
            warn!("[main] COMPLETION_API_KEY is not set. Captions will be unavailable.");
            return None;
        }
    };

    let caption_config = get_caption_config_info();

    match CompletionRepositoryImpl::new(caption_config, api_key) {
        Ok(completion_repo) => Some(CaptionServiceImpl::new(
            completion_repo,
            *get_system_config_info().preview_row_count(),
            *caption_config.max_tokens(),
        )),
        Err(e) => {
            error!("[main] Failed to initialize the completion client: {:?}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    set_global_logger();

    let args: Args = Args::parse();

    info!("Plotting agent start!");

    let system_config = get_system_config_info();
    let export_config = get_export_config_info();

    /* 의존 주입 */
    let loader_service: LoaderServiceImpl = LoaderServiceImpl::new();
    let summary_service: SummaryServiceImpl =
        SummaryServiceImpl::new(*system_config.preview_row_count());
    let chart_service: ChartServiceImpl =
        ChartServiceImpl::new(*system_config.chart_width(), *system_config.chart_height());
    let export_service: ExportServiceImpl = ExportServiceImpl::new(
        export_config.sheet_name().clone(),
        *export_config.image_anchor_row(),
        *export_config.image_anchor_col(),
    );

    let caption_service: Option<CaptionServiceImpl<CompletionRepositoryImpl>> = if args.caption {
        build_caption_service()
    } else {
        None
    };

    let main_controller: MainController<
        LoaderServiceImpl,
        SummaryServiceImpl,
        ChartServiceImpl,
        ExportServiceImpl,
        CaptionServiceImpl<CompletionRepositoryImpl>,
    > = MainController::new(
        loader_service,
        summary_service,
        chart_service,
        export_service,
        caption_service,
    );

    let request: PlotRequest = PlotRequest::new(
        args.input,
        ColumnSelection::new(args.x_axis, args.y_axis),
        args.chart,
        args.output,
        args.caption,
        args.overview_chart,
    );

    main_controller.run(&request).await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
