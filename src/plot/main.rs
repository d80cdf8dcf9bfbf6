//! Main Plot struct and its Labels/Theme types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::coord::Coord;
use super::layer::Layer;

/// A single panel: layers drawn on one pair of axes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plot {
    /// Layers, drawn in order (later layers on top)
    pub layers: Vec<Layer>,
    /// Title and axis labels
    pub labels: Option<Labels>,
    /// Coordinate system (axis limits)
    pub coord: Option<Coord>,
    /// Grid and legend styling
    pub theme: Theme,
}

impl Plot {
    /// Create an empty plot with the default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set a label (`title`, `x`, `y`)
    pub fn with_label(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Labels::default)
            .labels
            .insert(name.into(), text.into());
        self
    }

    /// Set the coordinate system
    pub fn with_coord(mut self, coord: Coord) -> Self {
        self.coord = Some(coord);
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Look up a label by name
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|l| l.labels.get(name))
            .map(|s| s.as_str())
    }
}

/// Text labels for a panel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Labels {
    /// Label assignments (label type → text)
    pub labels: HashMap<String, String>,
}

/// Panel styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Draw grid lines
    pub grid: bool,
    /// Grid line opacity (0.0 - 1.0)
    pub grid_opacity: f64,
    /// Draw a legend for column-mapped colours
    pub legend: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            grid: false,
            grid_opacity: 0.3,
            legend: false,
        }
    }
}

impl Theme {
    /// Theme with grid lines at the given opacity
    pub fn with_grid(mut self, opacity: f64) -> Self {
        self.grid = true;
        self.grid_opacity = opacity;
        self
    }

    /// Theme with a legend
    pub fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Geom;

    #[test]
    fn test_plot_builder() {
        let plot = Plot::new()
            .with_layer(Layer::new(Geom::point()))
            .with_label("title", "Words as Vectors")
            .with_label("x", "Weight 1")
            .with_coord(Coord::cartesian().with_xlim(-3.0, 4.0))
            .with_theme(Theme::default().with_grid(0.25).with_legend());

        assert_eq!(plot.layers.len(), 1);
        assert_eq!(plot.label("title"), Some("Words as Vectors"));
        assert_eq!(plot.label("x"), Some("Weight 1"));
        assert_eq!(plot.label("y"), None);
        assert!(plot.theme.grid);
        assert!(plot.theme.legend);
        assert_eq!(plot.theme.grid_opacity, 0.25);
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(!theme.grid);
        assert!(!theme.legend);
    }
}
