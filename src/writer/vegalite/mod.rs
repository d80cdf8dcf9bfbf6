//! Vega-Lite JSON writer implementation
//!
//! Converts plots and DataFrames into Vega-Lite v6 JSON for web-based
//! interactive visualizations.
//!
//! # Mapping Strategy
//!
//! - Geom → Vega-Lite mark type (arrows become a rule plus a rotated triangle)
//! - Aesthetics → Vega-Lite encoding channels
//! - Layers → Vega-Lite layer composition
//! - Multi-panel figures → `hconcat`
//! - Polars DataFrame → named top-level datasets
//!
//! # Example
//!
//! ```rust,ignore
//! use embedplot::writer::{Writer, VegaLiteWriter};
//!
//! let writer = VegaLiteWriter::new();
//! let vega_json = writer.render(&figure)?;
//! // Can be rendered in browser with vega-embed
//! ```

mod coord;
mod data;
mod layer;

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::data::frame::str_column;
use crate::plot::layer::geom::{GeomAesthetics, GeomType};
use crate::plot::scale::{is_color_aesthetic, linetype_to_stroke_dash, DiscreteColorScale};
use crate::plot::ParameterValue;
use crate::spec::resolve_layer_data_key;
use crate::writer::{validate_layers, Writer};
use crate::{naming, AestheticValue, DataFrame, EmbedplotError, Figure, Layer, Plot, Result};

use layer::{geom_to_mark, get_renderer, validate_layer_columns};

/// Conversion factor from points to pixels (CSS standard: 96 DPI, 72 points/inch)
const POINTS_TO_PIXELS: f64 = 96.0 / 72.0;

/// Conversion factor from radius (in points) to area (in square pixels)
const POINTS_TO_AREA: f64 = std::f64::consts::PI * POINTS_TO_PIXELS * POINTS_TO_PIXELS;

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v6 specifications from figures and their data.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
}

/// A panel ready for composition: the layer spec and the datasets it names
struct PanelOutput {
    spec: Value,
    datasets: Map<String, Value>,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
        }
    }

    /// Build the full Vega-Lite spec for a figure
    pub fn figure_to_value(&self, figure: &Figure) -> Result<Value> {
        figure.validate()?;

        let mut vl_spec = json!({"$schema": self.schema});
        let mut datasets = Map::new();

        if let [spec] = figure.panels.as_slice() {
            let panel = self.build_panel(spec.plot(), spec.data(), |key| key.to_string())?;
            datasets.extend(panel.datasets);

            merge_object(&mut vl_spec, panel.spec);
            if let Some(title) = &figure.title {
                vl_spec["title"] = title_value(title);
            }
            vl_spec["width"] = json!(figure.width);
            vl_spec["height"] = json!(figure.height);
        } else {
            let panel_width = figure.width / figure.panels.len() as u32;
            let mut panels = Vec::with_capacity(figure.panels.len());

            for (panel_idx, spec) in figure.panels.iter().enumerate() {
                let panel = self.build_panel(spec.plot(), spec.data(), |key| {
                    naming::panel_data_key(panel_idx, key)
                })?;
                datasets.extend(panel.datasets);

                let mut panel_spec = panel.spec;
                panel_spec["width"] = json!(panel_width);
                panel_spec["height"] = json!(figure.height);
                panels.push(panel_spec);
            }

            if let Some(title) = &figure.title {
                vl_spec["title"] = title_value(title);
            }
            vl_spec["hconcat"] = json!(panels);
        }

        vl_spec["datasets"] = Value::Object(datasets);

        debug!(
            panels = figure.panels.len(),
            width = figure.width,
            height = figure.height,
            "Built Vega-Lite spec"
        );
        Ok(vl_spec)
    }

    /// Build one panel: layers, titles, limits and theme.
    ///
    /// `dataset_key` maps a panel-local dataset key to the name used in the
    /// output's top-level `datasets`.
    fn build_panel(
        &self,
        plot: &Plot,
        data: &HashMap<String, DataFrame>,
        dataset_key: impl Fn(&str) -> String,
    ) -> Result<PanelOutput> {
        self.validate(plot)?;

        let mut datasets = Map::new();
        for (key, df) in data {
            datasets.insert(dataset_key(key), json!(data::dataframe_to_values(df)?));
        }

        let mut layers = Vec::new();
        for (layer_idx, layer) in plot.layers.iter().enumerate() {
            let data_key = resolve_layer_data_key(layer, layer_idx, data);
            let df = match &data_key {
                Some(key) => Some(data.get(key).ok_or_else(|| {
                    EmbedplotError::WriterError(format!(
                        "Missing data source '{}' for layer {}",
                        key,
                        layer_idx + 1
                    ))
                })?),
                None => None,
            };

            let mut layer_spec = json!({"mark": geom_to_mark(&layer.geom)});
            match (df, &data_key) {
                (Some(df), Some(key)) => {
                    validate_layer_columns(layer, df, layer_idx)?;
                    layer_spec["data"] = json!({"name": dataset_key(key)});
                }
                _ if layer.mappings.columns().is_empty() => {
                    // Literal-only layers still need one row to draw
                    layer_spec["data"] = json!({"values": [{}]});
                }
                _ => {
                    return Err(EmbedplotError::WriterError(format!(
                        "Layer {} maps columns but has no data",
                        layer_idx + 1
                    )));
                }
            }

            let renderer = get_renderer(&layer.geom);
            let mut encoding = self.build_encoding(layer, df, plot)?;
            renderer.modify_encoding(&mut encoding, layer)?;
            layer_spec["encoding"] = Value::Object(encoding);
            renderer.modify_spec(&mut layer_spec, layer)?;

            layers.extend(renderer.finalize(layer_spec, layer, df)?);
        }

        let mut spec = json!({"layer": layers});
        if let Some(title) = plot.label("title") {
            spec["title"] = title_value(title);
        }
        coord::apply_coord(&mut spec, plot.coord.as_ref());
        coord::apply_theme(&mut spec, &plot.theme);

        Ok(PanelOutput { spec, datasets })
    }

    /// Build the encoding map for a layer.
    ///
    /// Mappings come first; fixed settings that name a supported aesthetic
    /// fill in channels the mappings left unset.
    fn build_encoding(
        &self,
        layer: &Layer,
        df: Option<&DataFrame>,
        plot: &Plot,
    ) -> Result<Map<String, Value>> {
        let mut encoding = Map::new();

        for (aesthetic, value) in &layer.mappings.aesthetics {
            if let Some(channel) = map_aesthetic_name(aesthetic) {
                let channel_encoding =
                    self.build_encoding_channel(aesthetic, value, layer, df, plot)?;
                encoding.insert(channel.to_string(), channel_encoding);
            }
        }

        let supported_aesthetics = layer.geom.aesthetics().supported;
        for (param_name, param_value) in &layer.parameters {
            if !supported_aesthetics.contains(&param_name.as_str()) {
                continue;
            }
            if let Some(channel) = map_aesthetic_name(param_name) {
                if !encoding.contains_key(channel) {
                    let literal = AestheticValue::Literal(param_value.clone());
                    let channel_encoding =
                        self.build_encoding_channel(param_name, &literal, layer, df, plot)?;
                    encoding.insert(channel.to_string(), channel_encoding);
                }
            }
        }

        Ok(encoding)
    }

    fn build_encoding_channel(
        &self,
        aesthetic: &str,
        value: &AestheticValue,
        layer: &Layer,
        df: Option<&DataFrame>,
        plot: &Plot,
    ) -> Result<Value> {
        let primary = GeomAesthetics::primary_aesthetic(aesthetic);
        let positional = GeomAesthetics::is_positional(aesthetic);

        match value {
            AestheticValue::Column { name: col, identity } => {
                if matches!(aesthetic, "xend" | "yend") {
                    // Secondary channels share the primary channel's scale and axis
                    return Ok(json!({"field": col}));
                }

                if positional {
                    let mut encoding = json!({
                        "field": col,
                        "type": "quantitative",
                        "scale": {"zero": false}
                    });
                    if let Some(title) = plot.label(primary) {
                        encoding["title"] = json!(title);
                    }
                    return Ok(encoding);
                }

                if *identity {
                    return Ok(json!({
                        "field": col,
                        "type": "nominal",
                        "scale": null,
                        "legend": null
                    }));
                }

                match aesthetic {
                    "label" => Ok(json!({"field": col, "type": "nominal"})),
                    "linetype" => Ok(json!({"field": col, "type": "nominal"})),
                    _ if is_color_aesthetic(aesthetic) => {
                        let df = df.ok_or_else(|| {
                            EmbedplotError::WriterError(format!(
                                "Colour column '{}' has no data",
                                col
                            ))
                        })?;
                        let values = str_column(df, col)?;
                        let scale =
                            DiscreteColorScale::from_values(values.iter().flatten().map(|s| s.as_str()));
                        let legend = if plot.theme.legend {
                            json!({"title": null})
                        } else {
                            Value::Null
                        };
                        Ok(json!({
                            "field": col,
                            "type": "nominal",
                            "scale": {"domain": scale.domain, "range": scale.range},
                            "legend": legend
                        }))
                    }
                    _ => Ok(json!({"field": col, "type": "quantitative", "legend": null})),
                }
            }
            AestheticValue::Literal(lit) => {
                if positional {
                    let mut encoding = json!({"datum": lit.to_json()});
                    if let Some(title) = plot.label(primary) {
                        encoding["title"] = json!(title);
                    }
                    return Ok(encoding);
                }
                Ok(json!({"value": self.literal_value(aesthetic, layer.geom.geom_type(), lit)?}))
            }
        }
    }

    /// Convert a literal to Vega-Lite units
    fn literal_value(
        &self,
        aesthetic: &str,
        geom_type: GeomType,
        lit: &ParameterValue,
    ) -> Result<Value> {
        let value = match (aesthetic, lit) {
            // Point size: radius in points to area in pixels²
            ("size", ParameterValue::Number(n)) if geom_type == GeomType::Point => {
                json!(n * n * POINTS_TO_AREA)
            }
            // Font size: points to pixels
            ("size", ParameterValue::Number(n)) => json!(n * POINTS_TO_PIXELS),
            ("linewidth", ParameterValue::Number(n)) => json!(n * POINTS_TO_PIXELS),
            ("linetype", ParameterValue::String(name)) => {
                let dash = linetype_to_stroke_dash(name).ok_or_else(|| {
                    EmbedplotError::ValidationError(format!("Unknown linetype '{}'", name))
                })?;
                json!(dash)
            }
            _ => lit.to_json(),
        };
        Ok(value)
    }
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an aesthetic name to its Vega-Lite encoding channel.
///
/// `None` for aesthetics that become mark properties instead (`align`,
/// `fontweight`).
fn map_aesthetic_name(aesthetic: &str) -> Option<&'static str> {
    let channel = match aesthetic {
        "x" | "xintercept" => "x",
        "y" | "yintercept" => "y",
        "xend" => "x2",
        "yend" => "y2",
        "label" => "text",
        "linetype" => "strokeDash",
        "linewidth" => "strokeWidth",
        "color" => "color",
        "fill" => "fill",
        "size" => "size",
        "opacity" => "opacity",
        _ => return None,
    };
    Some(channel)
}

/// Title as a string, or an array of lines when it spans several
fn title_value(text: &str) -> Value {
    if text.contains('\n') {
        json!(text.split('\n').collect::<Vec<_>>())
    } else {
        json!(text)
    }
}

fn merge_object(target: &mut Value, source: Value) {
    if let (Some(target), Value::Object(source)) = (target.as_object_mut(), source) {
        target.extend(source);
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<String> {
        let panel = self.build_panel(plot, data, |key| key.to_string())?;

        let mut vl_spec = json!({"$schema": self.schema});
        merge_object(&mut vl_spec, panel.spec);
        // Responsive plot sizing
        vl_spec["width"] = json!("container");
        vl_spec["height"] = json!("container");
        vl_spec["datasets"] = Value::Object(panel.datasets);

        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            EmbedplotError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }

    fn validate(&self, plot: &Plot) -> Result<()> {
        validate_layers(plot, "VegaLiteWriter")
    }

    fn render(&self, figure: &Figure) -> Result<String> {
        let vl_spec = self.figure_to_value(figure)?;
        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            EmbedplotError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }
}
