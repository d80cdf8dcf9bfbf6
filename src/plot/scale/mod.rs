//! Scale types for aesthetic mappings
//!
//! Only discrete colour scales exist: a grouping column (cluster, place type)
//! is mapped onto the categorical palette in first-appearance order. Both
//! writers resolve scales through [`DiscreteColorScale`], so a group gets the
//! same colour in JSON and in a raster image.

pub mod colour;
pub mod linetype;

pub use colour::{color_to_hex, is_color_aesthetic, palette_color, parse_rgba, CATEGORY10};
pub use linetype::{linetype_dash_period, linetype_to_stroke_dash};

/// Discrete mapping from group values to palette colours
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColorScale {
    /// Distinct group values in first-appearance order
    pub domain: Vec<String>,
    /// Hex colour for each domain entry
    pub range: Vec<String>,
}

impl DiscreteColorScale {
    /// Build a scale from column values, keeping first-appearance order
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut domain: Vec<String> = Vec::new();
        for value in values {
            if !domain.iter().any(|d| d == value) {
                domain.push(value.to_string());
            }
        }
        let range = (0..domain.len())
            .map(|i| palette_color(i).to_string())
            .collect();
        Self { domain, range }
    }

    /// Colour assigned to a group value
    pub fn color_for(&self, value: &str) -> Option<&str> {
        self.domain
            .iter()
            .position(|d| d == value)
            .map(|i| self.range[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
