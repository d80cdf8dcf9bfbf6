//! Geom rendering for Vega-Lite writer
//!
//! This module provides:
//! - Basic geom-to-mark mapping and column validation
//! - A trait-based approach to rendering the different geoms to Vega-Lite layers
//!
//! Each geom can override specific phases of the rendering pipeline while using
//! the defaults for standard behavior.

use serde_json::{json, Map, Value};

use crate::data::frame::{column_names, str_column};
use crate::plot::layer::geom::GeomType;
use crate::{naming, AestheticValue, DataFrame, EmbedplotError, Geom, Layer, Result};

/// Pixels of arrowhead width per data unit of `head_width`
const HEAD_PIXELS_PER_UNIT: f64 = 100.0;

// =============================================================================
// Basic Geom Utilities
// =============================================================================

/// Map a Geom to its Vega-Lite mark.
/// Always includes `clip: true` so marks outside fixed limits are hidden.
pub fn geom_to_mark(geom: &Geom) -> Value {
    match geom.geom_type() {
        GeomType::Point => json!({"type": "point", "filled": true, "clip": true}),
        GeomType::Text | GeomType::Label => json!({
            "type": "text",
            "align": "left",
            "baseline": "bottom",
            "lineBreak": "\n",
            "clip": true
        }),
        GeomType::Path => json!({"type": "line", "clip": true}),
        GeomType::Segment | GeomType::Arrow | GeomType::HLine | GeomType::VLine => {
            json!({"type": "rule", "clip": true})
        }
    }
}

/// Validate column references for a single layer against its DataFrame
pub fn validate_layer_columns(layer: &Layer, data: &DataFrame, layer_idx: usize) -> Result<()> {
    let available_columns = column_names(data);
    let listed_columns: Vec<&str> = available_columns
        .iter()
        .map(|c| c.as_str())
        .filter(|c| !naming::is_synthetic_column(c))
        .collect();
    let source_desc = match &layer.source {
        Some(src) => format!(" (source: {})", src),
        None => String::new(),
    };

    for (aesthetic, value) in &layer.mappings.aesthetics {
        if let AestheticValue::Column { name: col, .. } = value {
            if !available_columns.contains(col) {
                return Err(EmbedplotError::ValidationError(format!(
                    "Column '{}' referenced in aesthetic '{}' (layer {}{}) does not exist.\nAvailable columns: {}",
                    col,
                    aesthetic,
                    layer_idx + 1,
                    source_desc,
                    listed_columns.join(", ")
                )));
            }
        }
    }

    for col in &layer.partition_by {
        if !available_columns.contains(col) {
            return Err(EmbedplotError::ValidationError(format!(
                "Column '{}' used for grouping (layer {}{}) does not exist.\nAvailable columns: {}",
                col,
                layer_idx + 1,
                source_desc,
                listed_columns.join(", ")
            )));
        }
    }

    Ok(())
}

// =============================================================================
// GeomRenderer Trait System
// =============================================================================

/// Trait for rendering geoms to Vega-Lite layers
///
/// Three phases:
/// 1. **Encoding Modifications**: geom-specific channel changes
/// 2. **Spec Modifications**: mark properties and transforms
/// 3. **Layer Output**: finalize and potentially expand into several layers
pub trait GeomRenderer {
    /// Modify the encoding map for this geom.
    /// Default: no modifications
    fn modify_encoding(&self, _encoding: &mut Map<String, Value>, _layer: &Layer) -> Result<()> {
        Ok(())
    }

    /// Modify the mark/layer spec for this geom.
    /// Default: no modifications
    fn modify_spec(&self, _layer_spec: &mut Value, _layer: &Layer) -> Result<()> {
        Ok(())
    }

    /// Finalize the layer(s) for output.
    /// Default: return the single layer unchanged
    fn finalize(
        &self,
        layer_spec: Value,
        _layer: &Layer,
        _data: Option<&DataFrame>,
    ) -> Result<Vec<Value>> {
        Ok(vec![layer_spec])
    }
}

/// Renderer for geoms with no special handling (point, segment, hline, vline)
pub struct DefaultRenderer;

impl GeomRenderer for DefaultRenderer {}

// =============================================================================
// Path Renderer
// =============================================================================

/// Renderer for path geom - keeps rows in data order, one line per group
pub struct PathRenderer;

impl GeomRenderer for PathRenderer {
    fn modify_encoding(&self, encoding: &mut Map<String, Value>, layer: &Layer) -> Result<()> {
        encoding.insert(
            "order".to_string(),
            json!({"field": naming::ORDER_COLUMN, "type": "quantitative"}),
        );
        if let Some(detail) = build_detail_encoding(&layer.partition_by) {
            encoding.insert("detail".to_string(), detail);
        }
        Ok(())
    }

    fn modify_spec(&self, layer_spec: &mut Value, layer: &Layer) -> Result<()> {
        let mut window_transform = json!({
            "window": [{"op": "row_number", "as": naming::ORDER_COLUMN}]
        });
        // Restart numbering per group
        if !layer.partition_by.is_empty() {
            window_transform["groupby"] = json!(layer.partition_by);
        }
        layer_spec["transform"] = json!([window_transform]);
        Ok(())
    }
}

/// Build detail encoding from partition_by columns
fn build_detail_encoding(partition_by: &[String]) -> Option<Value> {
    match partition_by {
        [] => None,
        [single] => Some(json!({"field": single, "type": "nominal"})),
        many => Some(json!(many
            .iter()
            .map(|col| json!({"field": col, "type": "nominal"}))
            .collect::<Vec<_>>())),
    }
}

// =============================================================================
// Text Renderer
// =============================================================================

/// Renderer for text and label geoms
///
/// Vega-Lite has no font-weight channel, so a font weight mapped to a column
/// splits the layer into one filtered layer per distinct weight. Label boxes
/// have no Vega-Lite counterpart; the fill is dropped and only the text drawn.
pub struct TextRenderer;

impl GeomRenderer for TextRenderer {
    fn modify_encoding(&self, encoding: &mut Map<String, Value>, _layer: &Layer) -> Result<()> {
        encoding.remove("fill");
        Ok(())
    }

    fn modify_spec(&self, layer_spec: &mut Value, layer: &Layer) -> Result<()> {
        if let Some(align) = layer.get_literal("align").and_then(|v| v.as_str()) {
            layer_spec["mark"]["align"] = json!(align);
        }
        if let Some(weight) = layer.get_literal("fontweight").and_then(|v| v.as_str()) {
            layer_spec["mark"]["fontWeight"] = json!(weight);
        }
        Ok(())
    }

    fn finalize(
        &self,
        layer_spec: Value,
        layer: &Layer,
        data: Option<&DataFrame>,
    ) -> Result<Vec<Value>> {
        let (column, df) = match (layer.get_column("fontweight"), data) {
            (Some(column), Some(df)) => (column, df),
            _ => return Ok(vec![layer_spec]),
        };

        let mut weights: Vec<String> = Vec::new();
        for weight in str_column(df, column)?.into_iter().flatten() {
            if !weights.contains(&weight) {
                weights.push(weight);
            }
        }

        Ok(weights
            .into_iter()
            .map(|weight| {
                let mut spec = layer_spec.clone();
                spec["mark"]["fontWeight"] = json!(weight);
                spec["transform"] = json!([{"filter": {"field": column, "equal": weight}}]);
                spec
            })
            .collect())
    }
}

// =============================================================================
// Arrow Renderer
// =============================================================================

/// Renderer for arrow geom - a rule for the shaft plus a rotated triangle head
///
/// The head angle is computed in data space, so it points exactly along the
/// shaft only when both axes use the same scale.
pub struct ArrowRenderer;

impl ArrowRenderer {
    /// Vega expression operand for a positional channel
    fn operand(channel: Option<&Value>) -> Option<String> {
        let channel = channel?;
        if let Some(field) = channel.get("field").and_then(|f| f.as_str()) {
            return serde_json::to_string(field)
                .ok()
                .map(|quoted| format!("datum[{}]", quoted));
        }
        channel
            .get("datum")
            .and_then(|d| d.as_f64())
            .map(|d| d.to_string())
    }

    /// Rotation (degrees clockwise from up) of the line from (x, y) to (x2, y2)
    fn angle_expr(encoding: &Value) -> Result<String> {
        let get = |channel: &str| {
            Self::operand(encoding.get(channel)).ok_or_else(|| {
                EmbedplotError::WriterError(format!(
                    "Arrow channel '{}' must be a column or a number",
                    channel
                ))
            })
        };
        Ok(format!(
            "atan2({} - {}, {} - {}) * 180 / PI",
            get("x2")?,
            get("x")?,
            get("y2")?,
            get("y")?
        ))
    }

    /// Positional channel of the head, taken from the shaft's end channel
    fn head_position(end: &Value, start: &Value) -> Value {
        let mut position = end.clone();
        if position.get("field").is_some() {
            position["type"] = json!("quantitative");
        }
        if let Some(title) = start.get("title") {
            position["title"] = title.clone();
        }
        position
    }
}

impl GeomRenderer for ArrowRenderer {
    fn finalize(
        &self,
        layer_spec: Value,
        layer: &Layer,
        _data: Option<&DataFrame>,
    ) -> Result<Vec<Value>> {
        let encoding = &layer_spec["encoding"];
        let angle = Self::angle_expr(encoding)?;

        let mut head_encoding = Map::new();
        head_encoding.insert(
            "x".to_string(),
            Self::head_position(&encoding["x2"], &encoding["x"]),
        );
        head_encoding.insert(
            "y".to_string(),
            Self::head_position(&encoding["y2"], &encoding["y"]),
        );
        for channel in ["color", "opacity"] {
            if let Some(value) = encoding.get(channel) {
                head_encoding.insert(channel.to_string(), value.clone());
            }
        }
        head_encoding.insert(
            "angle".to_string(),
            json!({"field": naming::ANGLE_COLUMN, "type": "quantitative", "scale": null}),
        );

        let head_width = layer.number_parameter("head_width").unwrap_or(0.1);
        let head_px = head_width * HEAD_PIXELS_PER_UNIT;
        head_encoding.insert("size".to_string(), json!({"value": head_px * head_px}));

        let mut head = json!({
            "mark": {"type": "point", "shape": "triangle-up", "filled": true, "clip": true},
            "transform": [{"calculate": angle, "as": naming::ANGLE_COLUMN}],
            "encoding": Value::Object(head_encoding)
        });
        if let Some(data) = layer_spec.get("data") {
            head["data"] = data.clone();
        }

        Ok(vec![layer_spec, head])
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Get the renderer for a geom
pub fn get_renderer(geom: &Geom) -> Box<dyn GeomRenderer> {
    match geom.geom_type() {
        GeomType::Path => Box::new(PathRenderer),
        GeomType::Text | GeomType::Label => Box::new(TextRenderer),
        GeomType::Arrow => Box::new(ArrowRenderer),
        GeomType::Point | GeomType::Segment | GeomType::HLine | GeomType::VLine => {
            Box::new(DefaultRenderer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_geom_to_mark_mapping() {
        assert_eq!(geom_to_mark(&Geom::point())["type"], "point");
        assert_eq!(geom_to_mark(&Geom::text())["type"], "text");
        assert_eq!(geom_to_mark(&Geom::label())["lineBreak"], "\n");
        assert_eq!(geom_to_mark(&Geom::path())["type"], "line");
        for geom in [Geom::segment(), Geom::arrow(), Geom::hline(), Geom::vline()] {
            assert_eq!(geom_to_mark(&geom)["type"], "rule");
        }
    }

    #[test]
    fn test_validate_layer_columns_reports_missing() {
        let df = df!("x" => &[1.0], "y" => &[2.0]).unwrap();
        let layer = Layer::new(Geom::point())
            .with_aesthetic("x", AestheticValue::standard_column("x"))
            .with_aesthetic("y", AestheticValue::standard_column("weight"));

        let err = validate_layer_columns(&layer, &df, 0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Column 'weight'"));
        assert!(msg.contains("layer 1"));
        assert!(msg.contains("Available columns: x, y"));
    }

    #[test]
    fn test_path_detail_encoding() {
        let layer = Layer::new(Geom::path()).with_partition_by(vec!["group".to_string()]);
        let mut encoding = Map::new();
        PathRenderer.modify_encoding(&mut encoding, &layer).unwrap();

        assert_eq!(
            encoding.get("detail"),
            Some(&json!({"field": "group", "type": "nominal"}))
        );
        assert_eq!(encoding["order"]["field"], naming::ORDER_COLUMN);

        let mut spec = json!({"mark": geom_to_mark(&layer.geom)});
        PathRenderer.modify_spec(&mut spec, &layer).unwrap();
        assert_eq!(spec["transform"][0]["groupby"], json!(["group"]));
    }

    #[test]
    fn test_text_splits_on_font_weight_column() {
        let df = df!(
            "label" => &["cat", "dog", "mat"],
            "fontweight" => &["bold", "normal", "normal"]
        )
        .unwrap();
        let layer = Layer::new(Geom::text())
            .with_aesthetic("fontweight", AestheticValue::identity_column("fontweight"));
        let spec = json!({"mark": geom_to_mark(&layer.geom), "encoding": {}});

        let layers = TextRenderer.finalize(spec, &layer, Some(&df)).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0]["mark"]["fontWeight"], "bold");
        assert_eq!(
            layers[1]["transform"][0]["filter"],
            json!({"field": "fontweight", "equal": "normal"})
        );
    }

    #[test]
    fn test_text_literal_settings_become_mark_properties() {
        let layer = Layer::new(Geom::label())
            .with_parameter("align", "center")
            .with_parameter("fontweight", "bold");
        let mut spec = json!({"mark": geom_to_mark(&layer.geom)});
        TextRenderer.modify_spec(&mut spec, &layer).unwrap();
        assert_eq!(spec["mark"]["align"], "center");
        assert_eq!(spec["mark"]["fontWeight"], "bold");

        let mut encoding = Map::new();
        encoding.insert("fill".to_string(), json!({"value": "yellow"}));
        TextRenderer.modify_encoding(&mut encoding, &layer).unwrap();
        assert!(encoding.is_empty());
    }

    #[test]
    fn test_arrow_expands_to_shaft_and_head() {
        let layer = Layer::new(Geom::arrow()).with_parameter("head_width", 0.15);
        let shaft = json!({
            "data": {"name": "vectors"},
            "mark": geom_to_mark(&layer.geom),
            "encoding": {
                "x": {"field": "x", "type": "quantitative", "title": "Weight 1"},
                "y": {"field": "y", "type": "quantitative"},
                "x2": {"field": "xend"},
                "y2": {"field": "yend"},
                "color": {"value": "red"}
            }
        });

        let layers = ArrowRenderer.finalize(shaft, &layer, None).unwrap();
        assert_eq!(layers.len(), 2);

        let head = &layers[1];
        assert_eq!(head["data"]["name"], "vectors");
        assert_eq!(head["mark"]["shape"], "triangle-up");
        assert_eq!(
            head["encoding"]["x"],
            json!({"field": "xend", "type": "quantitative", "title": "Weight 1"})
        );
        assert_eq!(head["encoding"]["color"], json!({"value": "red"}));
        assert_eq!(
            head["transform"][0]["calculate"],
            "atan2(datum[\"xend\"] - datum[\"x\"], datum[\"yend\"] - datum[\"y\"]) * 180 / PI"
        );
        let size = head["encoding"]["size"]["value"].as_f64().unwrap();
        assert!((size - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_with_literal_origin() {
        let encoding = json!({
            "x": {"datum": 0.0},
            "y": {"datum": 0.0},
            "x2": {"field": "xend"},
            "y2": {"field": "yend"}
        });
        assert_eq!(
            ArrowRenderer::angle_expr(&encoding).unwrap(),
            "atan2(datum[\"xend\"] - 0, datum[\"yend\"] - 0) * 180 / PI"
        );
    }
}
