//! Point data and DataFrame helpers
//!
//! - [`points`] - labelled point types, ordered tables and Euclidean distance
//! - [`frame`] - conversion between point lists and Polars DataFrames

pub mod frame;
pub mod points;

pub use points::{euclidean_distance, ClusterPoint, GeoPoint, LabeledPoint, PointTable};
