//! Layer type for plot layers
//!
//! This module defines the Layer struct: one geom drawn from one dataset with
//! its aesthetic mappings and fixed settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Geom is a submodule of layer
pub mod geom;

// Re-export geom types for convenience
pub use geom::{DefaultParam, DefaultParamValue, Geom, GeomAesthetics, GeomTrait, GeomType};

use crate::plot::types::{AestheticValue, Mappings, ParameterValue};

/// A single visualization layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Geometric object type
    pub geom: Geom,
    /// Aesthetic mappings (aesthetic → column or literal)
    pub mappings: Mappings,
    /// Fixed settings: literal aesthetics (e.g. `color => 'red'`) and geom parameters
    pub parameters: HashMap<String, ParameterValue>,
    /// Optional dataset key for this layer (defaults to the layer's own key, then global data)
    pub source: Option<String>,
    /// Columns for grouping/partitioning (one path per group)
    pub partition_by: Vec<String>,
}

impl Layer {
    /// Create a new layer with the given geom
    pub fn new(geom: Geom) -> Self {
        Self {
            geom,
            mappings: Mappings::new(),
            parameters: HashMap::new(),
            source: None,
            partition_by: Vec::new(),
        }
    }

    /// Set the data source for this layer
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add an aesthetic mapping
    pub fn with_aesthetic(mut self, aesthetic: impl Into<String>, value: AestheticValue) -> Self {
        self.mappings.insert(aesthetic, value);
        self
    }

    /// Add a parameter
    pub fn with_parameter(
        mut self,
        parameter: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.parameters.insert(parameter.into(), value.into());
        self
    }

    /// Set the partition columns for grouping
    pub fn with_partition_by(mut self, columns: Vec<String>) -> Self {
        self.partition_by = columns;
        self
    }

    /// Get a column reference from an aesthetic, if it's mapped to a column
    pub fn get_column(&self, aesthetic: &str) -> Option<&str> {
        match self.mappings.get(aesthetic) {
            Some(AestheticValue::Column { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Get a literal value for an aesthetic.
    ///
    /// A literal in the mappings wins over a fixed setting of the same name.
    pub fn get_literal(&self, aesthetic: &str) -> Option<&ParameterValue> {
        match self.mappings.get(aesthetic) {
            Some(AestheticValue::Literal(lit)) => Some(lit),
            Some(AestheticValue::Column { .. }) => None,
            None => self.parameters.get(aesthetic),
        }
    }

    /// Numeric parameter value, falling back to the geom's default
    pub fn number_parameter(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.get_literal(name) {
            return value.as_number();
        }
        self.geom
            .default_params()
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| match p.default {
                DefaultParamValue::Number(n) => Some(n),
                _ => None,
            })
    }

    /// Check if this layer has the required aesthetics for its geom
    pub fn validate_required_aesthetics(&self) -> std::result::Result<(), String> {
        for aesthetic in self.geom.aesthetics().required {
            if !self.mappings.contains_key(aesthetic) {
                return Err(format!(
                    "Geom '{}' requires aesthetic '{}' but it was not provided",
                    self.geom, aesthetic
                ));
            }
        }

        Ok(())
    }

    /// Validate that all mapped aesthetics are supported by this layer's geom
    pub fn validate_mappings(&self) -> std::result::Result<(), String> {
        let supported = self.geom.aesthetics().supported;
        for aesthetic in self.mappings.aesthetics.keys() {
            if !supported.contains(&aesthetic.as_str()) {
                return Err(format!(
                    "Aesthetic '{}' is not supported by geom '{}'. Supported aesthetics are: {}",
                    aesthetic,
                    self.geom,
                    supported.join(", ")
                ));
            }
        }
        Ok(())
    }

    /// Validate that all settings are valid for this layer's geom
    pub fn validate_settings(&self) -> std::result::Result<(), String> {
        let valid = self.geom.valid_settings();
        for param_name in self.parameters.keys() {
            if !valid.contains(&param_name.as_str()) {
                return Err(format!(
                    "Invalid setting '{}' for geom '{}'. Valid settings are: {}",
                    param_name,
                    self.geom,
                    valid.join(", ")
                ));
            }
        }
        Ok(())
    }
}
