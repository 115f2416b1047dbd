use crate::common::*;

#[doc = r#"
    Workbook export settings.

    The image anchor defaults to cell E2 (row 1, column 4) so the embedded
    chart sits clear of the data range for typical column counts.
"#]
#[derive(Debug, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct ExportConfig {
    pub sheet_name: String,
    pub image_anchor_row: u32,
    pub image_anchor_col: u16,
}
