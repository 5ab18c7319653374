//! Chart rendering: declarative series in, PNG bytes out.
//!
//! Charts are drawn with plotters into an in-memory RGB framebuffer and
//! PNG-encoded with the image crate. Input validation happens before any
//! pixel is touched so malformed requests fail without side effects.

use std::io::Cursor;
use std::str::FromStr;

use plotters::element::Pie;
use plotters::prelude::*;

use crate::error::DeckError;

/// The chart kinds exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Heatmap,
    Histogram,
    ScatterMatrix,
}

impl FromStr for ChartKind {
    type Err = DeckError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "scatter" => Ok(ChartKind::Scatter),
            "heatmap" => Ok(ChartKind::Heatmap),
            "histogram" => Ok(ChartKind::Histogram),
            "scatter_matrix" => Ok(ChartKind::ScatterMatrix),
            other => Err(DeckError::invalid(format!(
                "Unsupported chart type: {other}"
            ))),
        }
    }
}

/// Presentation options shared by every chart kind.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            width: 800,
            height: 600,
        }
    }
}

impl RenderOptions {
    fn clamped(&self) -> (u32, u32) {
        (self.width.clamp(16, 4096), self.height.clamp(16, 4096))
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> DeckError {
    DeckError::Render(err.to_string())
}

fn encode_png(width: u32, height: u32, raw: Vec<u8>) -> Result<Vec<u8>, DeckError> {
    let img = image::RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| DeckError::Render("framebuffer size mismatch".to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(render_err)?;
    Ok(png)
}

/// Pad a value range so degenerate (constant) series still get a usable
/// axis.
fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0)..(max + 1.0)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

const SERIES_PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

pub fn render_bar(
    categories: &[String],
    values: &[f64],
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    if categories.len() != values.len() {
        return Err(DeckError::invalid(
            "categories and values must have the same length",
        ));
    }
    if categories.is_empty() {
        return Err(DeckError::invalid("at least one category is required"));
    }

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (min, max) = bounds(values);
        let y_range = padded(min.min(0.0), max.max(0.0));
        let mut chart = ChartBuilder::on(&root)
            .caption(&opts.title, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(0f64..categories.len() as f64, y_range)
            .map_err(render_err)?;

        let labels = categories.to_vec();
        chart
            .configure_mesh()
            .x_desc(opts.x_label.as_str())
            .y_desc(opts.y_label.as_str())
            .x_labels(categories.len().min(12))
            .x_label_formatter(&move |x| {
                labels
                    .get(x.floor() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(values.iter().enumerate().map(|(index, value)| {
                let x0 = index as f64 + 0.1;
                let x1 = index as f64 + 0.9;
                Rectangle::new([(x0, 0.0), (x1, *value)], SERIES_PALETTE[0].mix(0.8).filled())
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

fn render_xy(
    x_values: &[f64],
    y_values: &[f64],
    opts: &RenderOptions,
    as_line: bool,
) -> Result<Vec<u8>, DeckError> {
    if x_values.len() != y_values.len() {
        return Err(DeckError::invalid(
            "x_values and y_values must have the same length",
        ));
    }
    if x_values.is_empty() {
        return Err(DeckError::invalid("at least one point is required"));
    }

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (x_min, x_max) = bounds(x_values);
        let (y_min, y_max) = bounds(y_values);
        let mut chart = ChartBuilder::on(&root)
            .caption(&opts.title, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(padded(x_min, x_max), padded(y_min, y_max))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(opts.x_label.as_str())
            .y_desc(opts.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        let points = x_values.iter().copied().zip(y_values.iter().copied());
        if as_line {
            chart
                .draw_series(LineSeries::new(points, &SERIES_PALETTE[0]))
                .map_err(render_err)?;
        } else {
            chart
                .draw_series(
                    points.map(|point| Circle::new(point, 3, SERIES_PALETTE[0].filled())),
                )
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

pub fn render_line(
    x_values: &[f64],
    y_values: &[f64],
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    render_xy(x_values, y_values, opts, true)
}

pub fn render_scatter(
    x_values: &[f64],
    y_values: &[f64],
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    render_xy(x_values, y_values, opts, false)
}

pub fn render_pie(
    labels: &[String],
    values: &[f64],
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    if labels.len() != values.len() {
        return Err(DeckError::invalid(
            "labels and values must have the same length",
        ));
    }
    if labels.is_empty() {
        return Err(DeckError::invalid("at least one segment is required"));
    }
    if values.iter().any(|value| *value < 0.0) || values.iter().sum::<f64>() <= 0.0 {
        return Err(DeckError::invalid(
            "segment values must be non-negative and sum to a positive number",
        ));
    }

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = if opts.title.is_empty() {
            root
        } else {
            root.titled(&opts.title, ("sans-serif", 24)).map_err(render_err)?
        };

        let center = (width as i32 / 2, height as i32 / 2);
        let radius = (width.min(height) as f64) * 0.35;
        let colors: Vec<RGBColor> = (0..values.len())
            .map(|index| SERIES_PALETTE[index % SERIES_PALETTE.len()])
            .collect();
        let sizes = values.to_vec();
        let names = labels.to_vec();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &names);
        pie.label_style(("sans-serif", 16).into_font());
        root.draw(&pie).map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

/// Linear ramp between two fixed endpoints, dark blue to light yellow.
fn heat_color(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if (max - min).abs() < f64::EPSILON {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(68, 253), lerp(1, 231), lerp(84, 37))
}

pub fn render_heatmap(
    matrix: &[Vec<f64>],
    x_labels: Option<&[String]>,
    y_labels: Option<&[String]>,
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    if matrix.is_empty() || matrix[0].is_empty() {
        return Err(DeckError::invalid("matrix must not be empty"));
    }
    let columns = matrix[0].len();
    if matrix.iter().any(|row| row.len() != columns) {
        return Err(DeckError::invalid("all matrix rows must have the same length"));
    }

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let rows = matrix.len();
        let flat: Vec<f64> = matrix.iter().flatten().copied().collect();
        let (min, max) = bounds(&flat);

        let mut chart = ChartBuilder::on(&root)
            .caption(&opts.title, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(0f64..columns as f64, 0f64..rows as f64)
            .map_err(render_err)?;

        let x_names: Vec<String> = x_labels.map(<[String]>::to_vec).unwrap_or_default();
        let y_names: Vec<String> = y_labels.map(<[String]>::to_vec).unwrap_or_default();
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(columns.min(12))
            .y_labels(rows.min(12))
            .x_label_formatter(&move |x| {
                let index = x.floor() as usize;
                x_names.get(index).cloned().unwrap_or_else(|| index.to_string())
            })
            .y_label_formatter(&move |y| {
                let index = y.floor() as usize;
                y_names.get(index).cloned().unwrap_or_else(|| index.to_string())
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(matrix.iter().enumerate().flat_map(|(row, cells)| {
                cells.iter().enumerate().map(move |(column, value)| {
                    Rectangle::new(
                        [
                            (column as f64, row as f64),
                            (column as f64 + 1.0, row as f64 + 1.0),
                        ],
                        heat_color(*value, min, max).filled(),
                    )
                })
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

pub fn render_histogram(
    values: &[f64],
    bins: Option<usize>,
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    if values.is_empty() {
        return Err(DeckError::invalid("at least one value is required"));
    }

    let bin_count = bins
        .unwrap_or_else(|| (values.len() as f64).sqrt().ceil() as usize)
        .max(1);
    let (min, max) = bounds(values);
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };
    let bin_width = span / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for value in values {
        let index = (((value - min) / bin_width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }
    let top = counts.iter().copied().max().unwrap_or(1) as f64;

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&opts.title, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(min..(min + span), 0f64..(top * 1.1))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(opts.x_label.as_str())
            .y_desc(opts.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(index, count)| {
                let x0 = min + bin_width * index as f64;
                let x1 = x0 + bin_width;
                Rectangle::new(
                    [(x0, 0.0), (x1, *count as f64)],
                    SERIES_PALETTE[0].mix(0.8).filled(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

pub fn render_scatter_matrix(
    columns: &[(String, Vec<f64>)],
    opts: &RenderOptions,
) -> Result<Vec<u8>, DeckError> {
    if columns.is_empty() {
        return Err(DeckError::invalid("at least one data column is required"));
    }
    let length = columns[0].1.len();
    if length == 0 {
        return Err(DeckError::invalid("data columns must not be empty"));
    }
    if columns.iter().any(|(_, values)| values.len() != length) {
        return Err(DeckError::invalid("All data lists must have the same length"));
    }

    let (width, height) = opts.clamped();
    let mut raw = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = if opts.title.is_empty() {
            root
        } else {
            root.titled(&opts.title, ("sans-serif", 24)).map_err(render_err)?
        };

        let n = columns.len();
        let panels = root.split_evenly((n, n));
        for (panel_index, panel) in panels.iter().enumerate() {
            let row = panel_index / n;
            let column = panel_index % n;
            let (x_name, x_data) = &columns[column];
            let (_, y_data) = &columns[row];

            let (x_min, x_max) = bounds(x_data);
            let (y_min, y_max) = bounds(y_data);
            let mut chart = ChartBuilder::on(panel)
                .margin(6)
                .build_cartesian_2d(padded(x_min, x_max), padded(y_min, y_max))
                .map_err(render_err)?;
            chart
                .configure_mesh()
                .disable_mesh()
                .draw()
                .map_err(render_err)?;
            chart
                .draw_series(
                    x_data
                        .iter()
                        .copied()
                        .zip(y_data.iter().copied())
                        .map(|point| Circle::new(point, 2, SERIES_PALETTE[0].filled())),
                )
                .map_err(render_err)?;

            if row == column {
                panel
                    .draw(&Text::new(x_name.clone(), (10, 10), ("sans-serif", 14)))
                    .map_err(render_err)?;
            }
        }

        root.present().map_err(render_err)?;
    }
    encode_png(width, height, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn mismatched_lengths_fail_before_rendering() {
        let opts = RenderOptions::default();
        let err = render_bar(
            &["a".to_string(), "b".to_string(), "c".to_string()],
            &[1.0, 2.0],
            &opts,
        )
        .expect_err("mismatch");
        assert!(err.to_string().contains("same length"));

        let err = render_line(&[1.0], &[1.0, 2.0], &opts).expect_err("mismatch");
        assert!(matches!(err, DeckError::InvalidInput(_)));
    }

    #[test]
    fn bar_chart_produces_png() {
        let opts = RenderOptions {
            title: "Revenue".to_string(),
            x_label: "Quarter".to_string(),
            y_label: "MUSD".to_string(),
            width: 320,
            height: 240,
        };
        let png = render_bar(
            &["Q1".to_string(), "Q2".to_string()],
            &[10.0, 12.5],
            &opts,
        )
        .expect("render");
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn heatmap_rejects_ragged_matrix() {
        let err = render_heatmap(
            &[vec![1.0, 2.0], vec![3.0]],
            None,
            None,
            &RenderOptions::default(),
        )
        .expect_err("ragged");
        assert!(err.to_string().contains("same length"));
    }

    #[test]
    fn heat_color_interpolates_endpoints() {
        assert_eq!(heat_color(0.0, 0.0, 1.0), RGBColor(68, 1, 84));
        assert_eq!(heat_color(1.0, 0.0, 1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn unknown_chart_kind_is_rejected() {
        let err = "sunburst".parse::<ChartKind>().expect_err("unknown");
        assert!(err.to_string().contains("Unsupported chart type"));
    }
}
