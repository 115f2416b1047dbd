use crate::common::*;

#[doc = r#"
    The user's x/y column pick for one chart. `x_axis` is `None` for the
    chart kinds that draw from the y column alone.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct ColumnSelection {
    pub x_axis: Option<String>,
    pub y_axis: String,
}
