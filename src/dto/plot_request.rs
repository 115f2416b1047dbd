use crate::common::*;

use crate::dto::column_selection::*;
use crate::enums::chart_type::*;

#[doc = "Everything one \"Generate Plot\" action needs, assembled by the host"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct PlotRequest {
    pub input_path: PathBuf,
    pub selection: ColumnSelection,
    pub chart_type: ChartType,
    pub output_path: PathBuf,
    pub caption_requested: bool,
    pub overview_chart_path: Option<PathBuf>,
}
