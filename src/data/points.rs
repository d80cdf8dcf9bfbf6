//! Labelled 2-D points
//!
//! A labelled point is a name paired with a 2-D coordinate. Tables keep
//! insertion order because order decides legend order and which points get
//! labelled when only every N-th one is.

use serde::{Deserialize, Serialize};

use crate::{EmbedplotError, Result};

/// A name paired with a 2-D coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl LabeledPoint {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    /// Coordinate as a tuple
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A labelled point belonging to a named cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub cluster: String,
}

/// A named place given as latitude/longitude
///
/// Plotted map-style: longitude on x, latitude on y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// Euclidean distance between two 2-D points
pub fn euclidean_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Insertion-ordered word → point table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointTable {
    points: Vec<LabeledPoint>,
}

impl PointTable {
    /// Build a table from `(label, (x, y))` entries
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, (f64, f64))>) -> Self {
        Self {
            points: entries
                .into_iter()
                .map(|(label, (x, y))| LabeledPoint::new(label, x, y))
                .collect(),
        }
    }

    /// Look up a point by label
    pub fn get(&self, label: &str) -> Option<&LabeledPoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// Look up a point by label, failing on unknown labels
    pub fn require(&self, label: &str) -> Result<&LabeledPoint> {
        self.get(label).ok_or_else(|| {
            EmbedplotError::ValidationError(format!(
                "Unknown point '{}'. Known points: {}",
                label,
                self.labels().join(", ")
            ))
        })
    }

    /// Distance between two named points
    pub fn distance(&self, a: &str, b: &str) -> Result<f64> {
        let pa = self.require(a)?;
        let pb = self.require(b)?;
        Ok(euclidean_distance(pa.xy(), pb.xy()))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledPoint> {
        self.points.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }
}
