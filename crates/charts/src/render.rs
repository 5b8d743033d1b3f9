//! Plotters-based rendering routines, one per chart kind.
//!
//! Every routine reads the table only, writes exactly one artifact at the
//! path it is given, and requires nothing beyond the model column and the
//! kind's central metric column. Auxiliary columns only add annotations or
//! overlays; their absence is silent.

use crate::error::{backend_err, ChartError};
use crate::kind::{ChartFormat, ChartKind};
use llm_benchviz_core::table::{columns, SummaryTable};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// Category palette for the summary charts.
const BAR_BLUE: RGBColor = RGBColor(31, 119, 180);
const BAR_ORANGE: RGBColor = RGBColor(255, 127, 14);
const BAR_GREEN: RGBColor = RGBColor(44, 160, 44);
const LINE_RED: RGBColor = RGBColor(214, 39, 40);
const BAR_PURPLE: RGBColor = RGBColor(148, 103, 189);
const GPU_ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Render one chart kind to `path` in the requested format.
///
/// # Errors
///
/// Chart-local only: an empty table, a missing central column, or a
/// backend failure. The dispatcher is expected to isolate these.
pub fn render(
    kind: ChartKind,
    table: &SummaryTable,
    path: &Path,
    format: ChartFormat,
    dpi: u32,
) -> Result<(), ChartError> {
    let size = figure_size(kind, dpi);
    match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(kind, table, &root)?;
            root.present().map_err(backend_err)
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(kind, table, &root)?;
            root.present().map_err(backend_err)
        }
    }
}

/// Figure dimensions in pixels: 10x6 figure units, 15x12 for the overview
/// panel, scaled by the requested density.
fn figure_size(kind: ChartKind, dpi: u32) -> (u32, u32) {
    let dpi = dpi.clamp(10, 1000);
    match kind {
        ChartKind::Overview => (15 * dpi, 12 * dpi),
        _ => (10 * dpi, 6 * dpi),
    }
}

fn draw<DB: DrawingBackend>(
    kind: ChartKind,
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    if table.is_empty() {
        return Err(ChartError::EmptyTable);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    match kind {
        ChartKind::TokensPerSecond => draw_tokens_per_second(table, root),
        ChartKind::Memory => draw_memory(table, root),
        ChartKind::Performance => draw_performance(table, root),
        ChartKind::Efficiency => draw_efficiency(table, root),
        ChartKind::Overview => draw_overview(table, root),
        ChartKind::GpuPower => draw_gpu_power(table, root),
        ChartKind::GpuPowerVsPerformance => draw_gpu_power_vs_performance(table, root),
    }
}

fn draw_tokens_per_second<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let values = required_column(table, columns::TOKENS_PER_SEC)?;
    let annotations = value_labels(&values, 1);
    draw_bar_panel(
        root,
        table.models(),
        &values,
        &BarPanel {
            title: "Average Tokens per Second",
            y_desc: "Tokens/sec",
            color: BAR_BLUE,
            caption_size: 28,
            annotations,
        },
    )
}

fn draw_memory<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let values = required_column(table, columns::MEMORY_MB)?;

    // Per-bar efficiency annotations, only where the auxiliary column has a
    // numeric value for that row.
    let annotations = table
        .column(columns::TOKENS_PER_MB)
        .map(|efficiency| {
            values
                .iter()
                .zip(efficiency)
                .enumerate()
                .filter_map(|(idx, (memory, eff))| {
                    eff.map(|e| (idx, memory + memory * 0.05, format!("Efficiency: {e:.3}")))
                })
                .collect()
        })
        .unwrap_or_default();

    draw_bar_panel(
        root,
        table.models(),
        &values,
        &BarPanel {
            title: "Memory Usage with Efficiency",
            y_desc: "Memory Usage (MB)",
            color: BAR_ORANGE,
            caption_size: 28,
            annotations,
        },
    )
}

fn draw_performance<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let tokens = required_column(table, columns::TOKENS_PER_SEC)?;
    let cpu = table.column(columns::CPU_PCT).map(fill_missing);

    draw_bars_with_overlay(
        root,
        table.models(),
        &tokens,
        cpu.as_deref(),
        &OverlayPanel {
            title: "Performance Comparison",
            bar_desc: "Tokens per Second",
            line_desc: "CPU Usage (%)",
            bar_label: "Avg Tokens/sec",
            line_label: "Avg CPU (%)",
            bar_color: BAR_GREEN,
            line_color: LINE_RED,
        },
    )
}

fn draw_efficiency<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    match table.column(columns::THROUGHPUT_SCORE) {
        Some(series) => {
            let values = fill_missing(series);
            let annotations = value_labels(&values, 2);
            draw_bar_panel(
                root,
                table.models(),
                &values,
                &BarPanel {
                    title: "Efficiency Score (Higher is Better)",
                    y_desc: "Throughput Score (tokens/sec per CPU%)",
                    color: BAR_PURPLE,
                    caption_size: 28,
                    annotations,
                },
            )
        }
        None => draw_placeholder(root, "Throughput Score data not available"),
    }
}

fn draw_overview<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let panels = root.split_evenly((2, 2));
    let specs = [
        (
            columns::TOKENS_PER_SEC,
            "Tokens per Second",
            "Tokens/sec",
            BAR_BLUE,
            "Tokens/sec data not available",
        ),
        (
            columns::MEMORY_MB,
            "Memory Usage",
            "Memory (MB)",
            BAR_ORANGE,
            "Memory data not available",
        ),
        (
            columns::CPU_PCT,
            "CPU Usage",
            "CPU (%)",
            LINE_RED,
            "CPU data not available",
        ),
        (
            columns::THROUGHPUT_SCORE,
            "Efficiency Score",
            "Throughput Score",
            BAR_PURPLE,
            "Throughput data not available",
        ),
    ];

    for (panel, (column, title, y_desc, color, missing)) in panels.iter().zip(specs) {
        match table.column(column) {
            Some(series) => draw_bar_panel(
                panel,
                table.models(),
                &fill_missing(series),
                &BarPanel {
                    title,
                    y_desc,
                    color,
                    caption_size: 20,
                    annotations: Vec::new(),
                },
            )?,
            None => draw_placeholder(panel, missing)?,
        }
    }
    Ok(())
}

fn draw_gpu_power<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let (models, power) = gpu_rows(table)?;
    draw_bar_panel(
        root,
        &models,
        &power,
        &BarPanel {
            title: "Average GPU Power Usage",
            y_desc: "GPU Power (W)",
            color: GPU_ORANGE,
            caption_size: 28,
            annotations: Vec::new(),
        },
    )
}

fn draw_gpu_power_vs_performance<DB: DrawingBackend>(
    table: &SummaryTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let tokens = required_column(table, columns::TOKENS_PER_SEC)?;
    let rows = table.coerced_rows(columns::GPU_POWER_W);
    if rows.is_empty() {
        return Err(ChartError::MissingColumn(columns::GPU_POWER_W));
    }

    // Only the rows with measured GPU power participate in this chart.
    let models: Vec<String> = rows
        .iter()
        .map(|(idx, _)| table.models()[*idx].clone())
        .collect();
    let bars: Vec<f64> = rows.iter().map(|(idx, _)| tokens[*idx]).collect();
    let power: Vec<f64> = rows.iter().map(|(_, watts)| *watts).collect();

    draw_bars_with_overlay(
        root,
        &models,
        &bars,
        Some(&power),
        &OverlayPanel {
            title: "Performance vs. GPU Power",
            bar_desc: "Tokens/sec",
            line_desc: "GPU Power (W)",
            bar_label: "Tokens/sec",
            line_label: "Avg GPU Power (W)",
            bar_color: BAR_BLUE,
            line_color: LINE_RED,
        },
    )
}

/// Coerced GPU power rows paired with their model names.
fn gpu_rows(table: &SummaryTable) -> Result<(Vec<String>, Vec<f64>), ChartError> {
    let rows = table.coerced_rows(columns::GPU_POWER_W);
    if rows.is_empty() {
        return Err(ChartError::MissingColumn(columns::GPU_POWER_W));
    }
    let models = rows
        .iter()
        .map(|(idx, _)| table.models()[*idx].clone())
        .collect();
    let power = rows.iter().map(|(_, watts)| *watts).collect();
    Ok((models, power))
}

struct BarPanel<'a> {
    title: &'a str,
    y_desc: &'a str,
    color: RGBColor,
    caption_size: u32,
    /// `(row index, y anchor, text)` drawn centered above the anchor.
    annotations: Vec<(usize, f64, String)>,
}

fn draw_bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    models: &[String],
    values: &[f64],
    panel: &BarPanel<'_>,
) -> Result<(), ChartError> {
    let n = models.len() as u32;
    let y_max = nice_max(values);
    let x_formatter = |value: &SegmentValue<u32>| segment_label(models, value);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", panel.caption_size))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)
        .map_err(backend_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Model")
        .y_desc(panel.y_desc)
        .x_labels(models.len())
        .x_label_formatter(&x_formatter)
        .draw()
        .map_err(backend_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(panel.color.filled())
                .margin(10)
                .data(values.iter().enumerate().map(|(idx, v)| (idx as u32, *v))),
        )
        .map_err(backend_err)?;

    if !panel.annotations.is_empty() {
        let style = annotation_style();
        chart
            .draw_series(panel.annotations.iter().map(|(idx, y, text)| {
                Text::new(
                    text.clone(),
                    (SegmentValue::CenterOf(*idx as u32), *y),
                    style.clone(),
                )
            }))
            .map_err(backend_err)?;
    }

    Ok(())
}

struct OverlayPanel<'a> {
    title: &'a str,
    bar_desc: &'a str,
    line_desc: &'a str,
    bar_label: &'a str,
    line_label: &'a str,
    bar_color: RGBColor,
    line_color: RGBColor,
}

/// Bars on the primary axis, an optional marker line on a secondary axis.
fn draw_bars_with_overlay<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    models: &[String],
    bars: &[f64],
    line: Option<&[f64]>,
    panel: &OverlayPanel<'_>,
) -> Result<(), ChartError> {
    let n = models.len() as u32;
    let y_max = nice_max(bars);
    let line_max = line.map(nice_max).unwrap_or(100.0);
    let x_formatter = |value: &SegmentValue<u32>| segment_label(models, value);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)
        .map_err(backend_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Model")
        .y_desc(panel.bar_desc)
        .x_labels(models.len())
        .x_label_formatter(&x_formatter)
        .draw()
        .map_err(backend_err)?;

    let bar_color = panel.bar_color;
    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(bar_color.filled())
                .margin(10)
                .data(bars.iter().enumerate().map(|(idx, v)| (idx as u32, *v))),
        )
        .map_err(backend_err)?
        .label(panel.bar_label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], bar_color.filled()));

    if let Some(line_values) = line {
        let mut chart = chart.set_secondary_coord((0u32..n).into_segmented(), 0f64..line_max);
        let line_color = panel.line_color;
        chart
            .draw_secondary_series(LineSeries::new(
                line_values
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| (SegmentValue::CenterOf(idx as u32), *v)),
                line_color.stroke_width(2),
            ))
            .map_err(backend_err)?
            .label(panel.line_label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
            });

        chart
            .draw_secondary_series(line_values.iter().enumerate().map(|(idx, v)| {
                Circle::new(
                    (SegmentValue::CenterOf(idx as u32), *v),
                    3,
                    line_color.filled(),
                )
            }))
            .map_err(backend_err)?;

        chart
            .configure_secondary_axes()
            .y_desc(panel.line_desc)
            .draw()
            .map_err(backend_err)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend_err)?;
    }

    Ok(())
}

/// Centered message filling an otherwise empty drawing area.
fn draw_placeholder<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    message: &str,
) -> Result<(), ChartError> {
    let (width, height) = area.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", 20).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        message.to_string(),
        ((width / 2) as i32, (height / 2) as i32),
        style,
    ))
    .map_err(backend_err)
}

fn required_column(table: &SummaryTable, name: &'static str) -> Result<Vec<f64>, ChartError> {
    table
        .column(name)
        .map(fill_missing)
        .ok_or(ChartError::MissingColumn(name))
}

/// Rows whose cell did not parse draw as zero-height bars.
fn fill_missing(series: &[Option<f64>]) -> Vec<f64> {
    series.iter().map(|v| v.unwrap_or(0.0)).collect()
}

fn value_labels(values: &[f64], precision: usize) -> Vec<(usize, f64, String)> {
    let headroom = nice_max(values) * 0.02;
    values
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx, v + headroom, format!("{v:.precision$}")))
        .collect()
}

fn annotation_style() -> TextStyle<'static> {
    TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom))
}

/// Axis label for a segment: the model name at its center, nothing at the
/// boundary ticks.
fn segment_label(models: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => models
            .get(*idx as usize)
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn nice_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.15
    }
}
