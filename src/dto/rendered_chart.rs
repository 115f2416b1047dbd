use crate::common::*;

#[doc = r#"
    One rendered chart: PNG bytes plus the labels used to draw it. Built per
    request and dropped once the workbook (or the standalone PNG) is written.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct RenderedChart {
    pub png_bytes: Vec<u8>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}
