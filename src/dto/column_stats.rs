use crate::common::*;

#[doc = "Descriptive statistics of a numeric column"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct NumericStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[doc = r#"
    Per-column summary used in the post-plot report. Numeric columns carry
    the full statistics block; other columns fall back to a distinct-value
    count.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct ColumnStats {
    pub column_name: String,
    pub count: usize,
    pub numeric: Option<NumericStats>,
    pub unique_count: Option<usize>,
}
