//! PNG and SVG output via plotters
//!
//! Each panel becomes its own cartesian chart, split evenly across the image
//! width. Layers are drawn in order with plotters primitives: circles for
//! points, polylines for segments and paths, filled triangles for arrowheads
//! and rectangles behind boxed labels.

use std::collections::HashMap;
use std::path::PathBuf;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use super::{validate_layers, Writer};
use crate::data::frame::{f64_column, str_column};
use crate::plot::layer::geom::{GeomAesthetics, GeomType};
use crate::plot::scale::{linetype_dash_period, palette_color, parse_rgba, DiscreteColorScale};
use crate::plot::ParameterValue;
use crate::spec::resolve_layer_data_key;
use crate::{AestheticValue, DataFrame, EmbedplotError, Figure, Layer, Plot, Result, Spec};

/// Conversion factor from points to pixels (96 DPI, 72 points/inch)
const POINTS_TO_PIXELS: f64 = 96.0 / 72.0;

/// Point radius in points when no size is set
const DEFAULT_POINT_RADIUS: f64 = 3.0;

/// Font size in points when no size is set
const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Fraction of the data span added on each side of an unbounded axis
const RANGE_PADDING: f64 = 0.05;

/// Image size used by `write`, which has no figure to take a size from
const DEFAULT_SIZE: (u32, u32) = (800, 600);

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Writer that draws figures into an image file
pub struct PlottersWriter {
    format: ImageFormat,
    path: PathBuf,
}

impl PlottersWriter {
    pub fn new(path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }

    pub fn png(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ImageFormat::Png)
    }

    pub fn svg(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ImageFormat::Svg)
    }
}

impl Writer for PlottersWriter {
    type Output = PathBuf;

    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<PathBuf> {
        let figure = Figure::single(
            Spec::new(plot.clone(), data.clone()),
            DEFAULT_SIZE.0,
            DEFAULT_SIZE.1,
        );
        self.render(&figure)
    }

    fn validate(&self, plot: &Plot) -> Result<()> {
        validate_layers(plot, "PlottersWriter")
    }

    fn render(&self, figure: &Figure) -> Result<PathBuf> {
        figure.validate()?;
        for spec in &figure.panels {
            self.validate(spec.plot())?;
        }

        let size = (figure.width, figure.height);
        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&self.path, size).into_drawing_area();
                draw_figure(&root, figure)?;
                root.present().map_err(draw_error)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&self.path, size).into_drawing_area();
                draw_figure(&root, figure)?;
                root.present().map_err(draw_error)?;
            }
        }

        info!(path = %self.path.display(), format = ?self.format, "Wrote image");
        Ok(self.path.clone())
    }
}

fn draw_error<E: std::fmt::Debug>(e: E) -> EmbedplotError {
    EmbedplotError::WriterError(format!("Drawing failed: {:?}", e))
}

/// Plotters draws single-line captions
fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(draw_error)?;

    let area = match &figure.title {
        Some(title) => root
            .titled(&single_line(title), ("sans-serif", 22))
            .map_err(draw_error)?,
        None => root.clone(),
    };

    let panel_areas = area.split_evenly((1, figure.panels.len()));
    for (panel_idx, (panel_area, spec)) in panel_areas.iter().zip(&figure.panels).enumerate() {
        debug!(panel = panel_idx, layers = spec.plot().layers.len(), "Drawing panel");
        draw_panel(panel_area, spec.plot(), spec.data())?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot: &Plot,
    data: &HashMap<String, DataFrame>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let rows = plot
        .layers
        .iter()
        .enumerate()
        .map(|(layer_idx, layer)| {
            let df = match resolve_layer_data_key(layer, layer_idx, data) {
                Some(key) => Some(data.get(&key).ok_or_else(|| {
                    EmbedplotError::WriterError(format!(
                        "Missing data source '{}' for layer {}",
                        key,
                        layer_idx + 1
                    ))
                })?),
                None => None,
            };
            Ok(LayerRows::new(layer, df))
        })
        .collect::<Result<Vec<_>>>()?;

    let x_range = axis_range(plot, &rows, "x")?;
    let y_range = axis_range(plot, &rows, "y")?;

    let mut builder = ChartBuilder::on(area);
    builder.margin(15).x_label_area_size(40).y_label_area_size(50);
    if let Some(title) = plot.label("title") {
        builder.caption(single_line(title), ("sans-serif", 16));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_error)?;

    {
        let mut mesh = chart.configure_mesh();
        if plot.theme.grid {
            mesh.light_line_style(BLACK.mix(plot.theme.grid_opacity * 0.3).stroke_width(1))
                .bold_line_style(BLACK.mix(plot.theme.grid_opacity).stroke_width(1));
        } else {
            mesh.disable_mesh();
        }
        if let Some(x) = plot.label("x") {
            mesh.x_desc(x);
        }
        if let Some(y) = plot.label("y") {
            mesh.y_desc(y);
        }
        mesh.draw().map_err(draw_error)?;
    }

    let (width_px, height_px) = chart.plotting_area().dim_in_pixel();
    let panel = PanelGeometry {
        x_range,
        y_range,
        pixels_per_unit: (
            width_px as f64 / (x_range.1 - x_range.0),
            height_px as f64 / (y_range.1 - y_range.0),
        ),
    };

    let mut has_legend = false;
    for layer_rows in &rows {
        has_legend |= draw_layer(&mut chart, layer_rows, plot, &panel)?;
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(draw_error)?;
    }
    Ok(())
}

/// Axis extents and scale of a drawn panel
struct PanelGeometry {
    x_range: (f64, f64),
    y_range: (f64, f64),
    pixels_per_unit: (f64, f64),
}

/// Range for one axis: coordinate limits, else the padded data extent
fn axis_range(plot: &Plot, rows: &[LayerRows<'_>], axis: &str) -> Result<(f64, f64)> {
    let limits = plot.coord.as_ref().and_then(|coord| match axis {
        "x" => coord.xlim,
        _ => coord.ylim,
    });
    if let Some(limits) = limits {
        return Ok(limits);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for layer_rows in rows {
        for aesthetic in layer_rows.layer.geom.aesthetics().supported {
            if GeomAesthetics::primary_aesthetic(aesthetic) != axis {
                continue;
            }
            for value in layer_rows.numbers(aesthetic)?.into_iter().flatten() {
                if value.is_finite() {
                    min = min.min(value);
                    max = max.max(value);
                }
            }
        }
    }

    if !min.is_finite() {
        return Ok((-1.0, 1.0));
    }
    let span = max - min;
    let pad = if span > 0.0 { span * RANGE_PADDING } else { 1.0 };
    Ok((min - pad, max + pad))
}

/// Row-wise view of a layer's aesthetics over its dataset
struct LayerRows<'a> {
    layer: &'a Layer,
    df: Option<&'a DataFrame>,
    len: usize,
}

impl<'a> LayerRows<'a> {
    fn new(layer: &'a Layer, df: Option<&'a DataFrame>) -> Self {
        let len = df.map(|df| df.height()).unwrap_or(1);
        Self { layer, df, len }
    }

    fn data(&self, column: &str) -> Result<&'a DataFrame> {
        self.df.ok_or_else(|| {
            EmbedplotError::WriterError(format!("Column '{}' has no data", column))
        })
    }

    /// Literal value from a mapping or a fixed setting
    fn literal(&self, aesthetic: &str) -> Option<&'a ParameterValue> {
        self.layer
            .mappings
            .get(aesthetic)
            .and_then(|value| value.literal())
            .or_else(|| self.layer.parameters.get(aesthetic))
    }

    fn literal_number(&self, aesthetic: &str) -> Option<f64> {
        self.literal(aesthetic).and_then(|v| v.as_number())
    }

    fn numbers(&self, aesthetic: &str) -> Result<Vec<Option<f64>>> {
        match self.layer.mappings.get(aesthetic) {
            Some(AestheticValue::Column { name, .. }) => f64_column(self.data(name)?, name),
            _ => Ok(vec![self.literal_number(aesthetic); self.len]),
        }
    }

    fn strings(&self, aesthetic: &str) -> Result<Vec<Option<String>>> {
        match self.layer.mappings.get(aesthetic) {
            Some(AestheticValue::Column { name, .. }) => str_column(self.data(name)?, name),
            _ => {
                let value = self.literal(aesthetic).map(|v| match v {
                    ParameterValue::String(s) => s.clone(),
                    other => other.to_string(),
                });
                Ok(vec![value; self.len])
            }
        }
    }

    /// Non-identity colour column, if the aesthetic maps one
    fn scaled_column(&self, aesthetic: &str) -> Option<&'a str> {
        match self.layer.mappings.get(aesthetic) {
            Some(AestheticValue::Column {
                name,
                identity: false,
            }) => Some(name.as_str()),
            _ => None,
        }
    }

    fn opacity(&self) -> f64 {
        self.literal_number("opacity").unwrap_or(1.0)
    }

    /// Per-row colours for a colour aesthetic, with layer opacity applied
    fn colors(&self, aesthetic: &str, default: &str) -> Result<Vec<RGBAColor>> {
        let opacity = self.opacity();
        let values = self.strings(aesthetic)?;

        let scale = self.scaled_column(aesthetic).map(|_| {
            DiscreteColorScale::from_values(values.iter().flatten().map(|s| s.as_str()))
        });

        values
            .iter()
            .map(|value| {
                let color = match (&scale, value.as_deref()) {
                    (Some(scale), Some(value)) => scale.color_for(value).unwrap_or(default),
                    (None, Some(value)) => value,
                    (_, None) => default,
                };
                rgba(color, opacity)
            })
            .collect()
    }

    fn positions(&self, x: &str, y: &str) -> Result<Vec<Option<(f64, f64)>>> {
        let xs = self.numbers(x)?;
        let ys = self.numbers(y)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
                _ => None,
            })
            .collect())
    }

    /// Line style from `linewidth` (points) and `linetype`
    fn line_style(&self) -> Result<(u32, Option<(u32, u32)>)> {
        let width = self.literal_number("linewidth").unwrap_or(1.0) * POINTS_TO_PIXELS;
        let width = width.round().max(1.0) as u32;

        let dash = match self.literal("linetype").and_then(|v| v.as_str()) {
            None | Some("solid") => None,
            Some(name) => Some(linetype_dash_period(name).ok_or_else(|| {
                EmbedplotError::ValidationError(format!("Unknown linetype '{}'", name))
            })?),
        };
        Ok((width, dash))
    }
}

fn rgba(value: &str, opacity: f64) -> Result<RGBAColor> {
    let [r, g, b, a] = parse_rgba(value).map_err(EmbedplotError::ValidationError)?;
    Ok(RGBAColor(r, g, b, a as f64 / 255.0 * opacity))
}

/// Draw one layer; returns whether it added legend entries
fn draw_layer<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    rows: &LayerRows<'_>,
    plot: &Plot,
    panel: &PanelGeometry,
) -> Result<bool>
where
    DB::ErrorType: 'static,
{
    match rows.layer.geom.geom_type() {
        GeomType::Point => return draw_points(chart, rows, plot),
        GeomType::Text => draw_text(chart, rows, false)?,
        GeomType::Label => draw_text(chart, rows, true)?,
        GeomType::Segment | GeomType::Arrow => draw_segments(chart, rows, panel)?,
        GeomType::Path => draw_paths(chart, rows, panel)?,
        GeomType::HLine => {
            let colors = rows.colors("color", "black")?;
            let (width, _) = rows.line_style()?;
            for (y, color) in rows.numbers("yintercept")?.into_iter().zip(colors) {
                if let Some(y) = y {
                    let line = [(panel.x_range.0, y), (panel.x_range.1, y)];
                    draw_polyline(chart, &line, color.stroke_width(width), None, panel)?;
                }
            }
        }
        GeomType::VLine => {
            let colors = rows.colors("color", "black")?;
            let (width, _) = rows.line_style()?;
            for (x, color) in rows.numbers("xintercept")?.into_iter().zip(colors) {
                if let Some(x) = x {
                    let line = [(x, panel.y_range.0), (x, panel.y_range.1)];
                    draw_polyline(chart, &line, color.stroke_width(width), None, panel)?;
                }
            }
        }
    }
    Ok(false)
}

fn draw_points<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    rows: &LayerRows<'_>,
    plot: &Plot,
) -> Result<bool>
where
    DB::ErrorType: 'static,
{
    let positions = rows.positions("x", "y")?;
    let radius = rows.literal_number("size").unwrap_or(DEFAULT_POINT_RADIUS) * POINTS_TO_PIXELS;
    let radius = radius.round().max(1.0) as i32;

    // One series per group so the legend can name it
    if plot.theme.legend && rows.scaled_column("color").is_some() {
        let groups = rows.strings("color")?;
        let scale =
            DiscreteColorScale::from_values(groups.iter().flatten().map(|s| s.as_str()));
        let opacity = rows.opacity();

        for (group, hex) in scale.domain.iter().zip(&scale.range) {
            let color = rgba(hex, opacity)?;
            let points = positions
                .iter()
                .zip(&groups)
                .filter(|(_, g)| g.as_deref() == Some(group.as_str()))
                .filter_map(|(p, _)| *p);
            chart
                .draw_series(points.map(|p| Circle::new(p, radius, color.filled())))
                .map_err(draw_error)?
                .label(group.clone())
                .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
        }
        return Ok(!scale.is_empty());
    }

    let colors = rows.colors("color", palette_color(0))?;
    chart
        .draw_series(
            positions
                .iter()
                .zip(colors)
                .filter_map(|(p, color)| p.map(|p| Circle::new(p, radius, color.filled()))),
        )
        .map_err(draw_error)?;
    Ok(false)
}

fn text_anchor(align: Option<&str>) -> HPos {
    match align {
        Some("center") => HPos::Center,
        Some("right") => HPos::Right,
        _ => HPos::Left,
    }
}

/// Pixel box around `lines` of text anchored at its bottom edge
fn text_box(lines: &[&str], font_px: f64, anchor: HPos) -> [(i32, i32); 2] {
    let pad = (font_px * 0.3).round() as i32;
    let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = (max_chars as f64 * font_px * 0.6).round() as i32;
    let height = (lines.len() as f64 * font_px * 1.2).round() as i32;

    let left = match anchor {
        HPos::Left => 0,
        HPos::Center => -width / 2,
        HPos::Right => -width,
    };
    [(left - pad, -height - pad), (left + width + pad, pad)]
}

fn draw_text<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    rows: &LayerRows<'_>,
    boxed: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let positions = rows.positions("x", "y")?;
    let labels = rows.strings("label")?;
    let colors = rows.colors("color", "black")?;
    let weights = rows.strings("fontweight")?;
    let fills = if boxed {
        // Boxes keep the layer opacity; text on top stays opaque
        Some(rows.colors("fill", "white")?)
    } else {
        None
    };

    let font_px = rows.literal_number("size").unwrap_or(DEFAULT_FONT_SIZE) * POINTS_TO_PIXELS;
    let anchor = text_anchor(rows.literal("align").and_then(|v| v.as_str()));
    let line_height = (font_px * 1.2).round() as i32;

    for (row, position) in positions.iter().enumerate() {
        let (Some(position), Some(label)) = (position, &labels[row]) else {
            continue;
        };
        let lines: Vec<&str> = label.split('\n').collect();

        if let Some(fills) = &fills {
            let corners = text_box(&lines, font_px, anchor);
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(*position)
                        + Rectangle::new(corners, fills[row].filled()),
                ))
                .map_err(draw_error)?;
        }

        let font_style = match weights[row].as_deref() {
            Some("bold") => FontStyle::Bold,
            _ => FontStyle::Normal,
        };
        let color = if boxed {
            RGBAColor(colors[row].0, colors[row].1, colors[row].2, 1.0)
        } else {
            colors[row]
        };
        let style = FontDesc::new(FontFamily::SansSerif, font_px, font_style)
            .color(&color)
            .pos(Pos::new(anchor, VPos::Bottom));

        let last = lines.len() as i32 - 1;
        for (line_idx, line) in lines.iter().enumerate() {
            let offset = (0, -(last - line_idx as i32) * line_height);
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(*position)
                        + Text::new(line.to_string(), offset, style.clone()),
                ))
                .map_err(draw_error)?;
        }
    }
    Ok(())
}

fn draw_segments<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    rows: &LayerRows<'_>,
    panel: &PanelGeometry,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let starts = rows.positions("x", "y")?;
    let ends = rows.positions("xend", "yend")?;
    let colors = rows.colors("color", palette_color(0))?;
    let (width, dash) = rows.line_style()?;

    let head = match rows.layer.geom.geom_type() {
        GeomType::Arrow => Some((
            rows.literal_number("head_length").unwrap_or(0.15),
            rows.literal_number("head_width").unwrap_or(0.1),
        )),
        _ => None,
    };

    for ((start, end), color) in starts.iter().zip(&ends).zip(colors) {
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };
        draw_polyline(chart, &[*start, *end], color.stroke_width(width), dash, panel)?;

        if let Some((head_length, head_width)) = head {
            if let Some(triangle) = arrow_head(*start, *end, head_length, head_width) {
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        triangle.to_vec(),
                        color.filled(),
                    )))
                    .map_err(draw_error)?;
            }
        }
    }
    Ok(())
}

fn draw_paths<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    rows: &LayerRows<'_>,
    panel: &PanelGeometry,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let positions = rows.positions("x", "y")?;
    let colors = rows.colors("color", palette_color(0))?;
    let (width, dash) = rows.line_style()?;

    let groups: Vec<Option<String>> = match rows.layer.partition_by.first() {
        Some(column) => str_column(rows.data(column)?, column)?,
        None => vec![None; positions.len()],
    };

    // One polyline per group, in first-appearance order
    let mut order: Vec<&Option<String>> = Vec::new();
    for group in &groups {
        if !order.contains(&group) {
            order.push(group);
        }
    }

    for group in order {
        let members: Vec<usize> = (0..positions.len())
            .filter(|&row| &groups[row] == group)
            .collect();
        let points: Vec<(f64, f64)> = members.iter().filter_map(|&row| positions[row]).collect();
        let Some(&first) = members.first() else {
            continue;
        };
        if points.len() >= 2 {
            draw_polyline(chart, &points, colors[first].stroke_width(width), dash, panel)?;
        }
    }
    Ok(())
}

fn draw_polyline<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    points: &[(f64, f64)],
    style: ShapeStyle,
    dash: Option<(u32, u32)>,
    panel: &PanelGeometry,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let pieces = match dash {
        Some((on, off)) => dash_polyline(points, panel.pixels_per_unit, on as f64, off as f64),
        None => vec![points.to_vec()],
    };
    chart
        .draw_series(pieces.into_iter().map(|piece| PathElement::new(piece, style)))
        .map_err(draw_error)?;
    Ok(())
}

/// Arrowhead triangle with its tip at `end`.
///
/// `head_length` runs back along the shaft and `head_width` across it, both
/// in data units. `None` for a zero-length arrow.
pub fn arrow_head(
    start: (f64, f64),
    end: (f64, f64),
    head_length: f64,
    head_width: f64,
) -> Option<[(f64, f64); 3]> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = dx.hypot(dy);
    if length == 0.0 || !length.is_finite() {
        return None;
    }

    let (ux, uy) = (dx / length, dy / length);
    let back = head_length.min(length);
    let base = (end.0 - ux * back, end.1 - uy * back);
    let half = head_width / 2.0;

    Some([
        end,
        (base.0 - uy * half, base.1 + ux * half),
        (base.0 + uy * half, base.1 - ux * half),
    ])
}

/// Split a polyline into dashes of `on` pixels separated by `off` pixels.
///
/// `pixels_per_unit` converts data units to pixels per axis, so dashes keep
/// their on-screen length whatever the axis scales.
pub fn dash_polyline(
    points: &[(f64, f64)],
    pixels_per_unit: (f64, f64),
    on: f64,
    off: f64,
) -> Vec<Vec<(f64, f64)>> {
    let period = on + off;
    if on <= 0.0 || off <= 0.0 {
        return vec![points.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut phase = 0.0;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg_px = ((b.0 - a.0) * pixels_per_unit.0).hypot((b.1 - a.1) * pixels_per_unit.1);
        if seg_px == 0.0 || !seg_px.is_finite() {
            continue;
        }
        let at = |t: f64| {
            let f = t / seg_px;
            (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f)
        };

        let mut t = 0.0;
        while t < seg_px {
            let drawing = phase < on;
            let boundary = if drawing { on } else { period };
            let step = (boundary - phase).min(seg_px - t);

            if drawing {
                if current.is_empty() {
                    current.push(at(t));
                }
                current.push(at(t + step));
            }
            t += step;
            phase += step;

            if drawing && phase >= on {
                pieces.push(std::mem::take(&mut current));
            }
            if phase >= period {
                phase -= period;
            }
        }
    }

    if current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}
