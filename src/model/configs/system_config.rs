use crate::common::*;

#[derive(Debug, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct SystemConfig {
    pub preview_row_count: usize,
    pub chart_width: u32,
    pub chart_height: u32,
}
