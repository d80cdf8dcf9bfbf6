//! Geom trait and implementations
//!
//! This module provides a trait-based design for geometric objects (geoms).
//! Each geom type is implemented as its own struct, allowing for cleaner separation
//! of concerns and easier extensibility.
//!
//! # Architecture
//!
//! - `GeomType`: Enum for pattern matching and serialization
//! - `GeomTrait`: Trait defining geom behavior with default implementations
//! - `Geom`: Wrapper struct holding a shared trait object
//!
//! # Example
//!
//! ```rust
//! use embedplot::plot::layer::geom::{Geom, GeomType};
//!
//! let point = Geom::point();
//! assert_eq!(point.geom_type(), GeomType::Point);
//! assert!(point.aesthetics().required.contains(&"x"));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod types;

// Geom implementations
mod arrow;
mod hline;
mod label;
mod path;
mod point;
mod segment;
mod text;
mod vline;

// Re-export types
pub use types::{DefaultParam, DefaultParamValue, GeomAesthetics, AESTHETIC_FAMILIES};

// Re-export geom structs for direct access if needed
pub use arrow::Arrow;
pub use hline::HLine;
pub use label::Label;
pub use path::Path;
pub use point::Point;
pub use segment::Segment;
pub use text::Text;
pub use vline::VLine;

/// Enum of all geom types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomType {
    Point,
    Text,
    Label,
    Segment,
    Arrow,
    Path,
    HLine,
    VLine,
}

impl std::fmt::Display for GeomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GeomType::Point => "point",
            GeomType::Text => "text",
            GeomType::Label => "label",
            GeomType::Segment => "segment",
            GeomType::Arrow => "arrow",
            GeomType::Path => "path",
            GeomType::HLine => "hline",
            GeomType::VLine => "vline",
        };
        write!(f, "{}", s)
    }
}

/// Core trait for geom behavior
///
/// Each geom type implements this trait. Only `geom_type()` and `aesthetics()`
/// are required implementations.
pub trait GeomTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Returns which geom type this is (for pattern matching)
    fn geom_type(&self) -> GeomType;

    /// Returns aesthetic information (REQUIRED - each geom is different)
    fn aesthetics(&self) -> GeomAesthetics;

    /// Returns non-aesthetic parameters with their default values.
    fn default_params(&self) -> &'static [DefaultParam] {
        &[]
    }

    /// Returns valid parameter names for layer settings.
    ///
    /// Combines supported aesthetics with non-aesthetic parameters.
    fn valid_settings(&self) -> Vec<&'static str> {
        let mut valid: Vec<&'static str> = self.aesthetics().supported.to_vec();
        for param in self.default_params() {
            valid.push(param.name);
        }
        valid
    }
}

/// Wrapper struct for geom trait objects
///
/// This provides a convenient interface for working with geoms while hiding
/// the complexity of trait objects.
#[derive(Clone)]
pub struct Geom(Arc<dyn GeomTrait>);

impl Geom {
    /// Create a Point geom
    pub fn point() -> Self {
        Self(Arc::new(Point))
    }

    /// Create a Text geom
    pub fn text() -> Self {
        Self(Arc::new(Text))
    }

    /// Create a Label geom
    pub fn label() -> Self {
        Self(Arc::new(Label))
    }

    /// Create a Segment geom
    pub fn segment() -> Self {
        Self(Arc::new(Segment))
    }

    /// Create an Arrow geom
    pub fn arrow() -> Self {
        Self(Arc::new(Arrow))
    }

    /// Create a Path geom
    pub fn path() -> Self {
        Self(Arc::new(Path))
    }

    /// Create an HLine geom
    pub fn hline() -> Self {
        Self(Arc::new(HLine))
    }

    /// Create a VLine geom
    pub fn vline() -> Self {
        Self(Arc::new(VLine))
    }

    /// Create a Geom from a GeomType
    pub fn from_type(t: GeomType) -> Self {
        match t {
            GeomType::Point => Self::point(),
            GeomType::Text => Self::text(),
            GeomType::Label => Self::label(),
            GeomType::Segment => Self::segment(),
            GeomType::Arrow => Self::arrow(),
            GeomType::Path => Self::path(),
            GeomType::HLine => Self::hline(),
            GeomType::VLine => Self::vline(),
        }
    }

    /// Get the geom type
    pub fn geom_type(&self) -> GeomType {
        self.0.geom_type()
    }

    /// Get aesthetics information
    pub fn aesthetics(&self) -> GeomAesthetics {
        self.0.aesthetics()
    }

    /// Get default parameters
    pub fn default_params(&self) -> &'static [DefaultParam] {
        self.0.default_params()
    }

    /// Get valid settings
    pub fn valid_settings(&self) -> Vec<&'static str> {
        self.0.valid_settings()
    }
}

impl std::fmt::Debug for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Geom::{:?}", self.geom_type())
    }
}

impl std::fmt::Display for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Geom {
    fn eq(&self, other: &Self) -> bool {
        self.geom_type() == other.geom_type()
    }
}

impl Eq for Geom {}

impl Serialize for Geom {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.geom_type().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geom {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let geom_type = GeomType::deserialize(deserializer)?;
        Ok(Geom::from_type(geom_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geom_creation() {
        assert_eq!(Geom::point().geom_type(), GeomType::Point);
        assert_eq!(Geom::arrow().geom_type(), GeomType::Arrow);
    }

    #[test]
    fn test_geom_equality() {
        assert_eq!(Geom::point(), Geom::point());
        assert_ne!(Geom::point(), Geom::text());
    }

    #[test]
    fn test_geom_display() {
        assert_eq!(format!("{}", Geom::point()), "point");
        assert_eq!(format!("{}", Geom::hline()), "hline");
        assert_eq!(format!("{:?}", Geom::label()), "Geom::Label");
    }

    #[test]
    fn test_geom_from_type_round_trips_every_variant() {
        for t in [
            GeomType::Point,
            GeomType::Text,
            GeomType::Label,
            GeomType::Segment,
            GeomType::Arrow,
            GeomType::Path,
            GeomType::HLine,
            GeomType::VLine,
        ] {
            assert_eq!(Geom::from_type(t).geom_type(), t);
            assert_eq!(Geom::from_type(t).to_string(), t.to_string());
        }
    }

    #[test]
    fn test_arrow_settings_include_head_params() {
        let valid = Geom::arrow().valid_settings();
        assert!(valid.contains(&"head_width"));
        assert!(valid.contains(&"head_length"));
        assert!(valid.contains(&"color"));
        assert!(!Geom::point().valid_settings().contains(&"head_width"));
    }

    #[test]
    fn test_geom_serialization() {
        let json = serde_json::to_string(&Geom::vline()).unwrap();
        assert_eq!(json, "\"vline\"");

        let deserialized: Geom = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.geom_type(), GeomType::VLine);
    }
}
