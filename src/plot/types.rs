//! Value types for plot specifications
//!
//! This module defines the building blocks layers are made of: aesthetic
//! mappings (aesthetic → column or literal) and parameter values.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

// =============================================================================
// Mapping Types
// =============================================================================

/// Aesthetic mapping specification for a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Mappings {
    /// Explicit aesthetic mappings (aesthetic → value)
    pub aesthetics: HashMap<String, AestheticValue>,
}

impl Mappings {
    /// Create a new empty Mappings
    pub fn new() -> Self {
        Self {
            aesthetics: HashMap::new(),
        }
    }

    /// Check if there are no mappings
    pub fn is_empty(&self) -> bool {
        self.aesthetics.is_empty()
    }

    /// Insert an aesthetic mapping
    pub fn insert(&mut self, aesthetic: impl Into<String>, value: AestheticValue) {
        self.aesthetics.insert(aesthetic.into(), value);
    }

    /// Get an aesthetic value by name
    pub fn get(&self, aesthetic: &str) -> Option<&AestheticValue> {
        self.aesthetics.get(aesthetic)
    }

    /// Check if an aesthetic is mapped
    pub fn contains_key(&self, aesthetic: &str) -> bool {
        self.aesthetics.contains_key(aesthetic)
    }

    /// Get the number of aesthetic mappings
    pub fn len(&self) -> usize {
        self.aesthetics.len()
    }

    /// Column names referenced by these mappings
    pub fn columns(&self) -> Vec<&str> {
        self.aesthetics
            .values()
            .filter_map(|v| v.column_name())
            .collect()
    }
}

// =============================================================================
// Value Types (used in mappings/parameters)
// =============================================================================

/// Value for aesthetic mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AestheticValue {
    /// Column reference
    Column {
        name: String,
        /// Whether the column already holds final values (e.g. hex colours),
        /// so no scale is applied and no legend is drawn
        identity: bool,
    },
    /// Literal value applied to every row
    Literal(ParameterValue),
}

impl AestheticValue {
    /// Create a column mapping
    pub fn standard_column(name: impl Into<String>) -> Self {
        Self::Column {
            name: name.into(),
            identity: false,
        }
    }

    /// Create a column mapping whose values are used as-is
    pub fn identity_column(name: impl Into<String>) -> Self {
        Self::Column {
            name: name.into(),
            identity: true,
        }
    }

    /// Create a literal string mapping
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(ParameterValue::String(value.into()))
    }

    /// Create a literal number mapping
    pub fn number(value: f64) -> Self {
        Self::Literal(ParameterValue::Number(value))
    }

    /// Get column name if this is a column mapping
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Check if this is an identity column
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Column { identity, .. } => *identity,
            _ => false,
        }
    }

    /// Check if this is a literal value (not a column mapping)
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Get the literal value, if any
    pub fn literal(&self) -> Option<&ParameterValue> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for AestheticValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AestheticValue::Column { name, .. } => write!(f, "{}", name),
            AestheticValue::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// Parameter and literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ParameterValue {
    /// Convert to a JSON value
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::String(s) => json!(s),
            ParameterValue::Number(n) => json!(n),
            ParameterValue::Boolean(b) => json!(b),
        }
    }

    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::String(s) => write!(f, "'{}'", s),
            ParameterValue::Number(n) => write!(f, "{}", n),
            ParameterValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(n: f64) -> Self {
        ParameterValue::Number(n)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::String(s.to_string())
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        ParameterValue::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mappings_columns() {
        let mut mappings = Mappings::new();
        mappings.insert("x", AestheticValue::standard_column("lon"));
        mappings.insert("y", AestheticValue::standard_column("lat"));
        mappings.insert("opacity", AestheticValue::number(0.9));

        let mut columns = mappings.columns();
        columns.sort();
        assert_eq!(columns, vec!["lat", "lon"]);
        assert_eq!(mappings.len(), 3);
    }

    #[test]
    fn test_identity_column() {
        let value = AestheticValue::identity_column("color");
        assert!(value.is_identity());
        assert_eq!(value.column_name(), Some("color"));
        assert!(!AestheticValue::standard_column("color").is_identity());
    }

    #[test]
    fn test_literal_accessors() {
        let value = AestheticValue::string("dashed");
        assert!(value.is_literal());
        assert_eq!(value.literal().and_then(|v| v.as_str()), Some("dashed"));
        assert_eq!(value.column_name(), None);
    }

    #[test]
    fn test_parameter_value_display() {
        assert_eq!(ParameterValue::from("red").to_string(), "'red'");
        assert_eq!(ParameterValue::from(0.5).to_string(), "0.5");
        assert_eq!(ParameterValue::from(true).to_json(), json!(true));
    }
}
