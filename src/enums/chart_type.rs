use clap::ValueEnum;

#[doc = r#"
    Closed set of chart kinds the dispatcher knows how to render.

    Adding a kind means adding a variant here and a match arm in the chart
    service; every match over this enum is exhaustive on purpose.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Scatter,
    Histogram,
    StackedColumn,
    BoxPlot,
}

impl ChartType {
    #[doc = "Histogram and BoxPlot draw from the y column alone"]
    pub fn requires_x(&self) -> bool {
        !matches!(self, ChartType::Histogram | ChartType::BoxPlot)
    }

    #[doc = "Chart kinds that refuse non-numeric y data instead of falling back to categories"]
    pub fn requires_numeric_y(&self) -> bool {
        matches!(self, ChartType::Histogram | ChartType::BoxPlot)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line Plot",
            ChartType::Bar => "Bar Plot",
            ChartType::Area => "Area Plot",
            ChartType::Scatter => "Scatter Plot",
            ChartType::Histogram => "Histogram",
            ChartType::StackedColumn => "Stacked Column Chart",
            ChartType::BoxPlot => "Box Plot",
        }
    }

    #[doc = "Chart title with the selected column names substituted"]
    pub fn title(&self, x_axis: &str, y_axis: &str) -> String {
        match self {
            ChartType::Line | ChartType::Bar | ChartType::Area | ChartType::Scatter => {
                format!("{}: {} vs {}", self.label(), y_axis, x_axis)
            }
            ChartType::StackedColumn => format!("{}: {} by {}", self.label(), y_axis, x_axis),
            ChartType::Histogram | ChartType::BoxPlot => {
                format!("{}: {}", self.label(), y_axis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_substitute_selected_columns() {
        assert_eq!(ChartType::Line.title("x", "y"), "Line Plot: y vs x");
        assert_eq!(ChartType::Bar.title("month", "sales"), "Bar Plot: sales vs month");
        assert_eq!(ChartType::Area.title("x", "y"), "Area Plot: y vs x");
        assert_eq!(ChartType::Scatter.title("x", "y"), "Scatter Plot: y vs x");
        assert_eq!(ChartType::Histogram.title("x", "y"), "Histogram: y");
        assert_eq!(
            ChartType::StackedColumn.title("region", "total"),
            "Stacked Column Chart: total by region"
        );
        assert_eq!(ChartType::BoxPlot.title("x", "y"), "Box Plot: y");
    }

    #[test]
    fn only_histogram_and_box_plot_skip_the_x_column() {
        assert!(ChartType::Line.requires_x());
        assert!(ChartType::StackedColumn.requires_x());
        assert!(!ChartType::Histogram.requires_x());
        assert!(!ChartType::BoxPlot.requires_x());
    }
}
