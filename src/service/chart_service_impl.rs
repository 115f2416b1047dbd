use crate::common::*;

use crate::traits::service_traits::chart_service::*;

use crate::dto::{column_selection::*, rendered_chart::*};
use crate::enums::chart_type::*;
use crate::model::table::{cell_value::*, column::*, data_table::*};
use crate::utils_modules::{errors::*, stats_utils::*};

use plotters::prelude::*;

const PRIMARY_COLOR: RGBColor = RGBColor(42, 100, 246);
const GRID_COLOR: RGBColor = RGBColor(235, 235, 240);

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl {
    chart_width: u32,
    chart_height: u32,
}

#[doc = r#"
    One selected column prepared for plotting.

    A Numeric column plots at its own values. Anything else becomes a
    categorical axis: each distinct display value is assigned the index of
    its first occurrence, so encounter order defines position. Empty cells
    carry no coordinate and drop the row from the plotted series.
"#]
#[derive(Debug, Clone)]
enum AxisData {
    Numeric(Vec<Option<f64>>),
    Categorical {
        labels: Vec<String>,
        positions: Vec<Option<usize>>,
    },
}

impl AxisData {
    fn from_column(column: &Column) -> Self {
        if column.is_numeric() {
            return AxisData::Numeric(column.values().iter().map(|v| v.as_number()).collect());
        }

        Self::categorical_from_column(column)
    }

    #[doc = "Category axis regardless of the inferred column type; stacked columns group by value"]
    fn categorical_from_column(column: &Column) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();

        let positions: Vec<Option<usize>> = column
            .values()
            .iter()
            .map(|value| {
                if matches!(value, CellValue::Empty) {
                    return None;
                }

                let key: String = value.display();
                let position: usize = *index_of.entry(key.clone()).or_insert_with(|| {
                    labels.push(key);
                    labels.len() - 1
                });

                Some(position)
            })
            .collect();

        AxisData::Categorical { labels, positions }
    }

    fn coord(&self, row_idx: usize) -> Option<f64> {
        match self {
            AxisData::Numeric(values) => values.get(row_idx).copied().flatten(),
            AxisData::Categorical { positions, .. } => {
                positions.get(row_idx).copied().flatten().map(|p| p as f64)
            }
        }
    }

    fn row_count(&self) -> usize {
        match self {
            AxisData::Numeric(values) => values.len(),
            AxisData::Categorical { positions, .. } => positions.len(),
        }
    }

    fn labels(&self) -> Option<&[String]> {
        match self {
            AxisData::Numeric(_) => None,
            AxisData::Categorical { labels, .. } => Some(labels),
        }
    }
}

#[doc = "Rows where both coordinates are present, in row order"]
fn paired_points(x_axis: &AxisData, y_axis: &AxisData) -> Vec<(f64, f64)> {
    (0..x_axis.row_count().min(y_axis.row_count()))
        .filter_map(|row_idx| Some((x_axis.coord(row_idx)?, y_axis.coord(row_idx)?)))
        .collect()
}

#[doc = "Axis range for the plotted values; a degenerate or empty span still yields a drawable range"]
fn padded_range(values: impl Iterator<Item = f64>, include_zero: bool) -> std::ops::Range<f64> {
    let mut min_val: f64 = f64::INFINITY;
    let mut max_val: f64 = f64::NEG_INFINITY;

    for value in values {
        min_val = min_val.min(value);
        max_val = max_val.max(value);
    }

    if !min_val.is_finite() || !max_val.is_finite() {
        return 0.0..1.0;
    }

    if include_zero {
        min_val = min_val.min(0.0);
        max_val = max_val.max(0.0);
    }

    let span: f64 = max_val - min_val;
    let padding: f64 = if span > 0.0 { span * 0.1 } else { 0.5 };

    (min_val - padding)..(max_val + padding)
}

fn axis_range(axis: &AxisData, values: impl Iterator<Item = f64>, include_zero: bool) -> std::ops::Range<f64> {
    match axis.labels() {
        Some(labels) => {
            let upper: f64 = if labels.is_empty() {
                0.5
            } else {
                labels.len() as f64 - 0.5
            };
            -0.5..upper
        }
        None => padded_range(values, include_zero),
    }
}

fn format_axis_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[doc = "Tick formatter: category labels at their positions, plain numbers otherwise"]
fn axis_formatter(labels: Option<Vec<String>>) -> Box<dyn Fn(&f64) -> String> {
    match labels {
        Some(labels) => Box::new(move |value: &f64| {
            let rounded: f64 = value.round();
            if (value - rounded).abs() > 0.3 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }),
        None => Box::new(|value: &f64| format_axis_value(*value)),
    }
}

fn tick_count(axis: &AxisData) -> usize {
    match axis.labels() {
        Some(labels) => labels.len().clamp(1, 12),
        None => 10,
    }
}

#[doc = "Cumulative y segments per x category, in encounter order"]
struct StackSegment {
    category_pos: f64,
    lower: f64,
    upper: f64,
    segment_idx: usize,
}

fn stack_segments(x_axis: &AxisData, y_axis: &AxisData) -> Vec<StackSegment> {
    let mut running_total: HashMap<usize, (f64, usize)> = HashMap::new();
    let mut segments: Vec<StackSegment> = Vec::new();

    for row_idx in 0..x_axis.row_count().min(y_axis.row_count()) {
        let (category, y_value) = match (x_axis.coord(row_idx), y_axis.coord(row_idx)) {
            (Some(category), Some(y_value)) => (category as usize, y_value),
            _ => continue,
        };

        let entry = running_total.entry(category).or_insert((0.0, 0));
        let lower: f64 = entry.0;
        let segment_idx: usize = entry.1;
        entry.0 += y_value;
        entry.1 += 1;

        segments.push(StackSegment {
            category_pos: category as f64,
            lower,
            upper: lower + y_value,
            segment_idx,
        });
    }

    segments
}

impl ChartServiceImpl {
    fn encode_png(&self, rgb_buffer: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let image_buffer: image::RgbImage =
            image::RgbImage::from_raw(self.chart_width, self.chart_height, rgb_buffer).ok_or_else(
                || {
                    anyhow::Error::new(AgentError::Export(
                        "rendered buffer does not match the canvas size".to_string(),
                    ))
                },
            )?;

        let mut png_bytes: Vec<u8> = Vec::new();
        image::DynamicImage::ImageRgb8(image_buffer)
            .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
            .map_err(|e| anyhow::Error::new(AgentError::Export(e.to_string())))?;

        Ok(png_bytes)
    }

    #[doc = "Line, Bar, Area, and Scatter share one point-pair layout and differ only in the drawn series"]
    fn draw_xy_chart(
        &self,
        chart_type: ChartType,
        title: &str,
        x_axis: &AxisData,
        y_axis: &AxisData,
        x_desc: &str,
        y_desc: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let points: Vec<(f64, f64)> = paired_points(x_axis, y_axis);
        let include_zero: bool = matches!(chart_type, ChartType::Bar | ChartType::Area);

        let x_range = axis_range(x_axis, points.iter().map(|p| p.0), false);
        let y_range = axis_range(y_axis, points.iter().map(|p| p.1), include_zero);

        let mut rgb_buffer: Vec<u8> =
            vec![0u8; (self.chart_width * self.chart_height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(
                &mut rgb_buffer,
                (self.chart_width, self.chart_height),
            )
            .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 32).into_font())
                .margin(20)
                .x_label_area_size(55)
                .y_label_area_size(70)
                .build_cartesian_2d(x_range, y_range)?;

            let x_fmt = axis_formatter(x_axis.labels().map(|l| l.to_vec()));
            let y_fmt = axis_formatter(y_axis.labels().map(|l| l.to_vec()));

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .x_labels(tick_count(x_axis))
                .y_labels(tick_count(y_axis))
                .x_label_formatter(&*x_fmt)
                .y_label_formatter(&*y_fmt)
                .light_line_style(GRID_COLOR)
                .draw()?;

            match chart_type {
                ChartType::Line => {
                    chart.draw_series(LineSeries::new(
                        points.iter().copied(),
                        ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2),
                    ))?;
                }
                ChartType::Scatter => {
                    chart.draw_series(
                        points
                            .iter()
                            .map(|&point| Circle::new(point, 4, PRIMARY_COLOR.filled())),
                    )?;
                }
                ChartType::Bar => {
                    chart.draw_series(points.iter().map(|&(x, y)| {
                        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], PRIMARY_COLOR.mix(0.85).filled())
                    }))?;
                }
                ChartType::Area => {
                    chart.draw_series(
                        AreaSeries::new(points.iter().copied(), 0.0, PRIMARY_COLOR.mix(0.35))
                            .border_style(ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2)),
                    )?;
                }
                _ => {
                    return Err(anyhow!(
                        "[ChartServiceImpl->draw_xy_chart] {} is not an xy chart",
                        chart_type.label()
                    ));
                }
            }

            root.present()?;
        }

        self.encode_png(rgb_buffer)
    }

    fn draw_stacked_column(
        &self,
        title: &str,
        x_axis: &AxisData,
        y_axis: &AxisData,
        x_desc: &str,
        y_desc: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let segments: Vec<StackSegment> = stack_segments(x_axis, y_axis);

        let x_range = axis_range(x_axis, std::iter::empty(), false);
        let y_range = padded_range(
            segments.iter().flat_map(|s| [s.lower, s.upper]),
            true,
        );

        let mut rgb_buffer: Vec<u8> =
            vec![0u8; (self.chart_width * self.chart_height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(
                &mut rgb_buffer,
                (self.chart_width, self.chart_height),
            )
            .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 32).into_font())
                .margin(20)
                .x_label_area_size(55)
                .y_label_area_size(70)
                .build_cartesian_2d(x_range, y_range)?;

            let x_fmt = axis_formatter(x_axis.labels().map(|l| l.to_vec()));
            let y_fmt = axis_formatter(None);

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .x_labels(tick_count(x_axis))
                .y_labels(10)
                .x_label_formatter(&*x_fmt)
                .y_label_formatter(&*y_fmt)
                .light_line_style(GRID_COLOR)
                .draw()?;

            chart.draw_series(segments.iter().map(|segment| {
                let color = Palette99::pick(segment.segment_idx).to_rgba();
                Rectangle::new(
                    [
                        (segment.category_pos - 0.4, segment.lower),
                        (segment.category_pos + 0.4, segment.upper),
                    ],
                    color.mix(0.85).filled(),
                )
            }))?;

            root.present()?;
        }

        self.encode_png(rgb_buffer)
    }

    fn draw_histogram(
        &self,
        title: &str,
        values: &[f64],
        x_desc: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let edges: Vec<f64> = auto_bin_edges(&sorted);
        let counts: Vec<usize> = bin_counts(&sorted, &edges);
        let max_count: f64 = counts.iter().max().copied().unwrap_or(0) as f64;

        let x_range = padded_range(edges.iter().copied(), false);
        let y_range = 0.0..(max_count * 1.1).max(1.0);

        let mut rgb_buffer: Vec<u8> =
            vec![0u8; (self.chart_width * self.chart_height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(
                &mut rgb_buffer,
                (self.chart_width, self.chart_height),
            )
            .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 32).into_font())
                .margin(20)
                .x_label_area_size(55)
                .y_label_area_size(70)
                .build_cartesian_2d(x_range, y_range)?;

            let fmt = axis_formatter(None);

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc("Frequency")
                .x_labels(10)
                .y_labels(10)
                .x_label_formatter(&*fmt)
                .light_line_style(GRID_COLOR)
                .draw()?;

            chart.draw_series(counts.iter().enumerate().map(|(bin_idx, &count)| {
                Rectangle::new(
                    [
                        (edges[bin_idx], 0.0),
                        (edges[bin_idx + 1], count as f64),
                    ],
                    PRIMARY_COLOR.mix(0.85).filled(),
                )
            }))?;

            chart.draw_series(counts.iter().enumerate().map(|(bin_idx, &count)| {
                Rectangle::new(
                    [
                        (edges[bin_idx], 0.0),
                        (edges[bin_idx + 1], count as f64),
                    ],
                    PRIMARY_COLOR.stroke_width(1),
                )
            }))?;

            root.present()?;
        }

        self.encode_png(rgb_buffer)
    }

    fn draw_box_plot(&self, title: &str, values: &[f64], y_desc: &str) -> anyhow::Result<Vec<u8>> {
        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let y_range = padded_range(sorted.iter().copied(), false);

        let mut rgb_buffer: Vec<u8> =
            vec![0u8; (self.chart_width * self.chart_height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(
                &mut rgb_buffer,
                (self.chart_width, self.chart_height),
            )
            .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 32).into_font())
                .margin(20)
                .x_label_area_size(30)
                .y_label_area_size(70)
                .build_cartesian_2d(0.0_f64..2.0_f64, y_range)?;

            chart
                .configure_mesh()
                .y_desc(y_desc)
                .x_labels(0)
                .y_labels(10)
                .disable_x_mesh()
                .light_line_style(GRID_COLOR)
                .draw()?;

            if !sorted.is_empty() {
                let (min_v, q1, median, q3, max_v) = five_number_summary(&sorted);

                /* whiskers with end caps */
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(1.0, min_v), (1.0, q1)],
                    ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2),
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(1.0, q3), (1.0, max_v)],
                    ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2),
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(0.9, min_v), (1.1, min_v)],
                    ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2),
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(0.9, max_v), (1.1, max_v)],
                    ShapeStyle::from(&PRIMARY_COLOR).stroke_width(2),
                )))?;

                /* interquartile box and median line */
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(0.75, q1), (1.25, q3)],
                    PRIMARY_COLOR.mix(0.35).filled(),
                )))?;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(0.75, q1), (1.25, q3)],
                    PRIMARY_COLOR.stroke_width(2),
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(0.75, median), (1.25, median)],
                    ShapeStyle::from(&PRIMARY_COLOR).stroke_width(3),
                )))?;
            }

            root.present()?;
        }

        self.encode_png(rgb_buffer)
    }

    fn draw_overview(
        &self,
        title: &str,
        x_axis: &AxisData,
        series: &[(String, Vec<Option<f64>>)],
        x_desc: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let all_y: Vec<f64> = series
            .iter()
            .flat_map(|(_, values)| values.iter().copied().flatten())
            .collect();

        let all_x: Vec<f64> = (0..x_axis.row_count())
            .filter_map(|row_idx| x_axis.coord(row_idx))
            .collect();

        let x_range = axis_range(x_axis, all_x.iter().copied(), false);
        let y_range = padded_range(all_y.iter().copied(), false);

        let mut rgb_buffer: Vec<u8> =
            vec![0u8; (self.chart_width * self.chart_height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(
                &mut rgb_buffer,
                (self.chart_width, self.chart_height),
            )
            .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 32).into_font())
                .margin(20)
                .x_label_area_size(55)
                .y_label_area_size(70)
                .build_cartesian_2d(x_range, y_range)?;

            let x_fmt = axis_formatter(x_axis.labels().map(|l| l.to_vec()));

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc("Values")
                .x_labels(tick_count(x_axis))
                .y_labels(10)
                .x_label_formatter(&*x_fmt)
                .light_line_style(GRID_COLOR)
                .draw()?;

            for (series_idx, (series_name, values)) in series.iter().enumerate() {
                let color = Palette99::pick(series_idx).to_rgba();

                let points: Vec<(f64, f64)> = (0..x_axis.row_count().min(values.len()))
                    .filter_map(|row_idx| {
                        Some((x_axis.coord(row_idx)?, values[row_idx]?))
                    })
                    .collect();

                chart
                    .draw_series(LineSeries::new(
                        points,
                        ShapeStyle::from(&color).stroke_width(2),
                    ))?
                    .label(series_name.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 18, y)],
                            ShapeStyle::from(&color).stroke_width(2),
                        )
                    });
            }

            if !series.is_empty() {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.85))
                    .border_style(BLACK)
                    .draw()?;
            }

            root.present()?;
        }

        self.encode_png(rgb_buffer)
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn render_chart(
        &self,
        table: &DataTable,
        selection: &ColumnSelection,
        chart_type: ChartType,
    ) -> anyhow::Result<RenderedChart> {
        let y_name: String = selection.y_axis().clone();
        let y_column: &Column = table.column(&y_name).ok_or_else(|| {
            anyhow::Error::new(AgentError::ColumnSelection(y_name.clone()))
        })?;

        let x_name: Option<String> = if chart_type.requires_x() {
            let name: String = selection.x_axis().clone().ok_or_else(|| {
                anyhow!(
                    "[ChartServiceImpl->render_chart] {} requires an x column",
                    chart_type.label()
                )
            })?;

            if table.column(&name).is_none() {
                return Err(anyhow::Error::new(AgentError::ColumnSelection(name)));
            }

            Some(name)
        } else {
            None
        };

        /* Histogram/BoxPlot bin and summarize y; StackedColumn sums it. None of them can take categories.
        An entirely empty column carries no data to mismatch and still renders a degenerate chart. */
        let needs_numeric_y: bool =
            chart_type.requires_numeric_y() || chart_type == ChartType::StackedColumn;
        let y_has_values: bool = y_column
            .values()
            .iter()
            .any(|v| !matches!(v, CellValue::Empty));
        if needs_numeric_y && y_has_values && !y_column.is_numeric() {
            return Err(anyhow::Error::new(AgentError::TypeMismatch {
                chart: chart_type.label().to_string(),
                column: y_name.clone(),
            }));
        }

        let title: String = chart_type.title(x_name.as_deref().unwrap_or_default(), &y_name);

        let y_axis: AxisData = AxisData::from_column(y_column);
        let x_axis: Option<AxisData> = x_name.as_deref().and_then(|name| table.column(name)).map(
            |column| match chart_type {
                ChartType::StackedColumn => AxisData::categorical_from_column(column),
                _ => AxisData::from_column(column),
            },
        );

        let service: ChartServiceImpl = self.clone();
        let task_title: String = title.clone();
        let task_y_name: String = y_name.clone();
        let task_x_name: String = x_name.clone().unwrap_or_default();
        let y_values: Vec<f64> = y_column.numeric_values();

        let handle: tokio::task::JoinHandle<Result<Vec<u8>, anyhow::Error>> =
            tokio::task::spawn_blocking(move || match chart_type {
                ChartType::Line | ChartType::Bar | ChartType::Area | ChartType::Scatter => {
                    let x_axis = x_axis.ok_or_else(|| {
                        anyhow!("[ChartServiceImpl->render_chart] missing x axis data")
                    })?;
                    service.draw_xy_chart(
                        chart_type,
                        &task_title,
                        &x_axis,
                        &y_axis,
                        &task_x_name,
                        &task_y_name,
                    )
                }
                ChartType::StackedColumn => {
                    let x_axis = x_axis.ok_or_else(|| {
                        anyhow!("[ChartServiceImpl->render_chart] missing x axis data")
                    })?;
                    service.draw_stacked_column(
                        &task_title,
                        &x_axis,
                        &y_axis,
                        &task_x_name,
                        &task_y_name,
                    )
                }
                ChartType::Histogram => {
                    service.draw_histogram(&task_title, &y_values, &task_y_name)
                }
                ChartType::BoxPlot => service.draw_box_plot(&task_title, &y_values, &task_y_name),
            });

        let png_bytes: Vec<u8> = handle
            .await
            .context("[ChartServiceImpl->render_chart] blocking task join failed (panic/cancelled)")??;

        info!("Rendered '{}' ({} bytes)", title, png_bytes.len());

        let (x_label, y_label): (String, String) = match chart_type {
            ChartType::Histogram => (y_name.clone(), "Frequency".to_string()),
            ChartType::BoxPlot => (String::new(), y_name.clone()),
            _ => (x_name.unwrap_or_default(), y_name.clone()),
        };

        Ok(RenderedChart::new(png_bytes, title, x_label, y_label))
    }

    async fn render_overview_chart(&self, table: &DataTable) -> anyhow::Result<RenderedChart> {
        let columns: &Vec<Column> = table.columns();

        let x_column: &Column = columns.first().ok_or_else(|| {
            anyhow!("[ChartServiceImpl->render_overview_chart] table has no columns")
        })?;

        let x_name: String = x_column.name().clone();
        let x_axis: AxisData = AxisData::from_column(x_column);

        let series: Vec<(String, Vec<Option<f64>>)> = columns
            .iter()
            .skip(1)
            .filter(|column| {
                if column.is_numeric() {
                    true
                } else {
                    warn!(
                        "[ChartServiceImpl->render_overview_chart] skipping non-numeric column '{}'",
                        column.name()
                    );
                    false
                }
            })
            .map(|column| {
                (
                    column.name().clone(),
                    column.values().iter().map(|v| v.as_number()).collect(),
                )
            })
            .collect();

        let service: ChartServiceImpl = self.clone();
        let task_x_name: String = x_name.clone();

        let handle: tokio::task::JoinHandle<Result<Vec<u8>, anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                service.draw_overview("Line Plot", &x_axis, &series, &task_x_name)
            });

        let png_bytes: Vec<u8> = handle.await.context(
            "[ChartServiceImpl->render_overview_chart] blocking task join failed (panic/cancelled)",
        )??;

        Ok(RenderedChart::new(
            png_bytes,
            "Line Plot".to_string(),
            x_name,
            "Values".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, raws: &[&str]) -> Column {
        Column::from_cells(
            name.to_string(),
            raws.iter().map(|raw| CellValue::from_raw(raw)).collect(),
        )
    }

    fn numeric_table() -> DataTable {
        DataTable::new(vec![
            column("x", &["1", "2", "3"]),
            column("y", &["2", "4", "6"]),
        ])
        .unwrap()
    }

    fn service() -> ChartServiceImpl {
        ChartServiceImpl::new(640, 480)
    }

    fn xy_selection() -> ColumnSelection {
        ColumnSelection::new(Some("x".to_string()), "y".to_string())
    }

    fn is_png(bytes: &[u8]) -> bool {
        bytes.starts_with(&[0x89, b'P', b'N', b'G'])
    }

    #[tokio::test]
    async fn every_chart_type_renders_with_its_template_title() {
        let table = numeric_table();
        let cases = [
            (ChartType::Line, "Line Plot: y vs x"),
            (ChartType::Bar, "Bar Plot: y vs x"),
            (ChartType::Area, "Area Plot: y vs x"),
            (ChartType::Scatter, "Scatter Plot: y vs x"),
            (ChartType::Histogram, "Histogram: y"),
            (ChartType::StackedColumn, "Stacked Column Chart: y by x"),
            (ChartType::BoxPlot, "Box Plot: y"),
        ];

        for (chart_type, expected_title) in cases {
            let chart = service()
                .render_chart(&table, &xy_selection(), chart_type)
                .await
                .unwrap();

            assert_eq!(chart.title(), expected_title);
            assert!(is_png(chart.png_bytes()), "{:?} must produce a PNG", chart_type);
        }
    }

    #[tokio::test]
    async fn categorical_x_plots_in_encounter_order() {
        let table = DataTable::new(vec![
            column("region", &["west", "east", "west", "north"]),
            column("sales", &["10", "20", "30", "40"]),
        ])
        .unwrap();

        let selection = ColumnSelection::new(Some("region".to_string()), "sales".to_string());
        let chart = service()
            .render_chart(&table, &selection, ChartType::Bar)
            .await
            .unwrap();

        assert_eq!(chart.title(), "Bar Plot: sales vs region");
        assert_eq!(chart.x_label(), "region");
    }

    #[test]
    fn first_occurrence_defines_the_category_position() {
        let axis = AxisData::from_column(&column("c", &["b", "a", "b", "c"]));

        match &axis {
            AxisData::Categorical { labels, positions } => {
                assert_eq!(labels, &vec!["b", "a", "c"]);
                assert_eq!(positions, &vec![Some(0), Some(1), Some(0), Some(2)]);
            }
            _ => panic!("expected a categorical axis"),
        }
    }

    #[tokio::test]
    async fn histogram_on_non_numeric_y_signals_type_mismatch() {
        let table = DataTable::new(vec![
            column("x", &["1", "2"]),
            column("label", &["a", "b"]),
        ])
        .unwrap();

        let selection = ColumnSelection::new(None, "label".to_string());
        let err = service()
            .render_chart(&table, &selection, ChartType::Histogram)
            .await
            .expect_err("non-numeric histogram input must be rejected");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::TypeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn box_plot_on_non_numeric_y_signals_type_mismatch() {
        let table = DataTable::new(vec![column("label", &["a", "b"])]).unwrap();

        let selection = ColumnSelection::new(None, "label".to_string());
        let err = service()
            .render_chart(&table, &selection, ChartType::BoxPlot)
            .await
            .expect_err("non-numeric box plot input must be rejected");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::TypeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn absent_columns_signal_a_selection_failure() {
        let table = numeric_table();
        let selection = ColumnSelection::new(Some("x".to_string()), "nope".to_string());

        let err = service()
            .render_chart(&table, &selection, ChartType::Line)
            .await
            .expect_err("absent column must be rejected");

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::ColumnSelection(_))
        ));
    }

    #[tokio::test]
    async fn an_empty_table_still_renders_a_degenerate_chart() {
        let table = DataTable::new(vec![column("x", &[]), column("y", &[])]).unwrap();

        for chart_type in [
            ChartType::Line,
            ChartType::Bar,
            ChartType::Histogram,
            ChartType::BoxPlot,
        ] {
            let chart = service()
                .render_chart(&table, &xy_selection(), chart_type)
                .await
                .unwrap();
            assert!(is_png(chart.png_bytes()));
        }
    }

    #[tokio::test]
    async fn overview_chart_draws_one_series_per_numeric_column() {
        let table = DataTable::new(vec![
            column("t", &["1", "2", "3"]),
            column("a", &["1", "2", "3"]),
            column("b", &["3", "2", "1"]),
            column("note", &["x", "y", "z"]),
        ])
        .unwrap();

        let chart = service().render_overview_chart(&table).await.unwrap();

        assert_eq!(chart.title(), "Line Plot");
        assert_eq!(chart.x_label(), "t");
        assert_eq!(chart.y_label(), "Values");
        assert!(is_png(chart.png_bytes()));
    }
}
