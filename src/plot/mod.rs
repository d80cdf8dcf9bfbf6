//! Plot types for embedplot figures
//!
//! This module contains all the types that describe what a panel draws: the
//! main Plot struct, layers, geoms, scales, coordinates, and value types.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `main` - Main Plot struct and Labels/Theme types
//! - `types` - Value types: Mappings, AestheticValue, ParameterValue
//! - `layer` - Layer struct and Geom subsystem
//! - `scale` - Colour scales, palette and linetypes
//! - `coord` - Coordinate system (axis limits)

pub mod coord;
pub mod layer;
pub mod main;
pub mod scale;
pub mod types;

// Re-export all types for convenience
pub use coord::*;
pub use layer::*;
pub use main::*;
pub use scale::DiscreteColorScale;
pub use types::*;
