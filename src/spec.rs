//! Prepared panels and figures
//!
//! A [`Spec`] pairs a [`Plot`] with the DataFrames its layers read. A
//! [`Figure`] is one or more specs laid out side by side under an optional
//! overall title, which is what writers render.

use std::collections::HashMap;

use crate::naming;
use crate::plot::{Layer, Plot};
use crate::{DataFrame, EmbedplotError, Result};

/// Summary of the data behind a spec
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    /// Total rows across all datasets
    pub rows: usize,
    /// Number of datasets
    pub datasets: usize,
    /// Number of layers
    pub layer_count: usize,
}

/// A plot together with its datasets
#[derive(Debug, Clone, Default)]
pub struct Spec {
    plot: Plot,
    data: HashMap<String, DataFrame>,
}

impl Spec {
    /// Create a spec from a plot and its datasets
    pub fn new(plot: Plot, data: HashMap<String, DataFrame>) -> Self {
        Self { plot, data }
    }

    /// Add a layer that reads its own dataset.
    ///
    /// The frame is stored under [`naming::layer_key`] for the new layer's index.
    pub fn push_layer(&mut self, layer: Layer, df: DataFrame) {
        let key = naming::layer_key(self.plot.layers.len());
        self.plot.layers.push(layer);
        self.data.insert(key, df);
    }

    /// Add a layer that needs no dataset (literal-only, e.g. reference lines)
    pub fn push_literal_layer(&mut self, layer: Layer) {
        self.plot.layers.push(layer);
    }

    /// Dataset key a layer reads from, if it has one
    pub fn layer_data_key(&self, layer_idx: usize) -> Option<String> {
        let layer = self.plot.layers.get(layer_idx)?;
        resolve_layer_data_key(layer, layer_idx, &self.data)
    }

    /// DataFrame a layer reads from, if it has one
    pub fn layer_data(&self, layer_idx: usize) -> Option<&DataFrame> {
        self.layer_data_key(layer_idx)
            .and_then(|key| self.data.get(&key))
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut Plot {
        &mut self.plot
    }

    pub fn data(&self) -> &HashMap<String, DataFrame> {
        &self.data
    }

    /// Compute a summary of the data behind this spec
    pub fn metadata(&self) -> Metadata {
        Metadata {
            rows: self.data.values().map(|df| df.height()).sum(),
            datasets: self.data.len(),
            layer_count: self.plot.layers.len(),
        }
    }
}

/// Dataset key a layer reads from.
///
/// An explicit source wins, then the layer's own key, then global data.
pub fn resolve_layer_data_key(
    layer: &Layer,
    layer_idx: usize,
    data: &HashMap<String, DataFrame>,
) -> Option<String> {
    if let Some(source) = &layer.source {
        return Some(source.clone());
    }
    let layer_key = naming::layer_key(layer_idx);
    if data.contains_key(&layer_key) {
        Some(layer_key)
    } else if data.contains_key(naming::GLOBAL_DATA_KEY) {
        Some(naming::GLOBAL_DATA_KEY.to_string())
    } else {
        None
    }
}

/// One or more panels rendered side by side
#[derive(Debug, Clone)]
pub struct Figure {
    /// Overall title above all panels
    pub title: Option<String>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Panels, left to right
    pub panels: Vec<Spec>,
}

impl Figure {
    /// Create an empty figure of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            title: None,
            width,
            height,
            panels: Vec::new(),
        }
    }

    /// Figure with a single panel
    pub fn single(spec: Spec, width: u32, height: u32) -> Self {
        Self::new(width, height).with_panel(spec)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_panel(mut self, spec: Spec) -> Self {
        self.panels.push(spec);
        self
    }

    /// Override the output size
    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        self
    }

    /// Check the figure can be rendered: at least one panel, a non-zero
    /// height, and at least one pixel of width per panel
    pub fn validate(&self) -> Result<()> {
        if self.panels.is_empty() {
            return Err(EmbedplotError::ValidationError(
                "Figure requires at least one panel".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(EmbedplotError::ValidationError(format!(
                "Figure size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if (self.width as usize) < self.panels.len() {
            return Err(EmbedplotError::ValidationError(format!(
                "Figure width {} is too small for {} panels",
                self.width,
                self.panels.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::labeled_points_frame;
    use crate::data::LabeledPoint;
    use crate::plot::{AestheticValue, Geom};

    fn point_frame() -> DataFrame {
        labeled_points_frame(&[
            LabeledPoint::new("cat", 2.0, 3.0),
            LabeledPoint::new("dog", 2.2, 2.8),
        ])
        .unwrap()
    }

    #[test]
    fn test_push_layer_assigns_layer_key() {
        let mut spec = Spec::default();
        spec.push_layer(Layer::new(Geom::point()), point_frame());
        spec.push_literal_layer(
            Layer::new(Geom::hline()).with_aesthetic("yintercept", AestheticValue::number(0.0)),
        );

        assert_eq!(spec.layer_data_key(0), Some(naming::layer_key(0)));
        assert_eq!(spec.layer_data_key(1), None);
        assert_eq!(spec.layer_data(0).map(|df| df.height()), Some(2));
    }

    #[test]
    fn test_layer_falls_back_to_global_data() {
        let mut data = HashMap::new();
        data.insert(naming::GLOBAL_DATA_KEY.to_string(), point_frame());
        let plot = Plot::new().with_layer(Layer::new(Geom::point()));
        let spec = Spec::new(plot, data);

        assert_eq!(
            spec.layer_data_key(0),
            Some(naming::GLOBAL_DATA_KEY.to_string())
        );
    }

    #[test]
    fn test_explicit_source_wins() {
        let mut data = HashMap::new();
        data.insert("words".to_string(), point_frame());
        let plot = Plot::new().with_layer(Layer::new(Geom::point()).with_source("words"));
        let spec = Spec::new(plot, data);
        assert_eq!(spec.layer_data_key(0), Some("words".to_string()));
    }

    #[test]
    fn test_metadata() {
        let mut spec = Spec::default();
        spec.push_layer(Layer::new(Geom::point()), point_frame());
        spec.push_layer(Layer::new(Geom::text()), point_frame());
        let meta = spec.metadata();
        assert_eq!(meta.rows, 4);
        assert_eq!(meta.datasets, 2);
        assert_eq!(meta.layer_count, 2);
    }

    #[test]
    fn test_figure_validation() {
        assert!(Figure::new(640, 480).validate().is_err());
        assert!(Figure::single(Spec::default(), 0, 480).validate().is_err());
        assert!(Figure::single(Spec::default(), 640, 480).validate().is_ok());
    }

    #[test]
    fn test_figure_needs_a_pixel_per_panel() {
        let figure = Figure::new(1, 480)
            .with_panel(Spec::default())
            .with_panel(Spec::default());
        let err = figure.validate().unwrap_err();
        assert!(err.to_string().contains("too small for 2 panels"));

        let figure = figure.with_size(Some(2), None);
        assert!(figure.validate().is_ok());
    }

    #[test]
    fn test_figure_size_override() {
        let figure = Figure::new(640, 480).with_size(Some(1200), None);
        assert_eq!((figure.width, figure.height), (1200, 480));
    }
}
