use crate::common::*;

#[doc = "Initial analysis report data: dimensions, column listing, head preview"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct TableSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub preview_rows: Vec<Vec<String>>,
}
