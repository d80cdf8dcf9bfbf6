//! Centralized naming conventions for embedplot-generated identifiers.
//!
//! Synthetic dataset keys and helper columns use a double-underscore
//! prefix/suffix pattern to avoid collision with user-facing column names.
//! Plain column names shared by the figure builders and the writers live here
//! as well, so both sides agree on what a dataset looks like.
//!
//! # Categories
//!
//! - **Data keys**: Keys for datasets in a panel's data map (`__embedplot_global__`, `__embedplot_layer_<idx>__`)
//! - **Panel keys**: Dataset keys made unique across the panels of one figure
//! - **Helper columns**: Columns the writers derive (`__embedplot_order__`, `__embedplot_angle__`)
//! - **Dataset columns**: `label`, `x`, `y`, `xend`, `yend`, ...

use const_format::concatcp;

// ============================================================================
// Base Building Blocks
// ============================================================================

/// Base prefix for all synthetic identifiers
const EMBEDPLOT_PREFIX: &str = "__embedplot_";

/// Suffix for all synthetic identifiers (double underscore)
const EMBEDPLOT_SUFFIX: &str = "__";

/// Full prefix for layer data keys: `__embedplot_layer_`
const LAYER_PREFIX: &str = concatcp!(EMBEDPLOT_PREFIX, "layer_");

/// Full prefix for panel-scoped data keys: `__embedplot_panel_`
const PANEL_PREFIX: &str = concatcp!(EMBEDPLOT_PREFIX, "panel_");

// ============================================================================
// Data Keys
// ============================================================================

/// Key for data shared by every layer of a panel.
pub const GLOBAL_DATA_KEY: &str = concatcp!(EMBEDPLOT_PREFIX, "global", EMBEDPLOT_SUFFIX);

/// Key for data owned by a single layer.
///
/// # Example
/// ```
/// use embedplot::naming;
/// assert_eq!(naming::layer_key(2), "__embedplot_layer_2__");
/// ```
pub fn layer_key(layer_idx: usize) -> String {
    format!("{}{}{}", LAYER_PREFIX, layer_idx, EMBEDPLOT_SUFFIX)
}

/// Dataset key made unique across the panels of a figure.
///
/// Vega-Lite keeps every dataset in one top-level map, so a two-panel figure
/// needs distinct names for the two panels' `__embedplot_layer_0__`.
pub fn panel_data_key(panel_idx: usize, key: &str) -> String {
    format!("{}{}{}", PANEL_PREFIX, panel_idx, key)
}

// ============================================================================
// Helper Columns
// ============================================================================

/// Column name for row ordering in Vega-Lite (used by the path geom)
pub const ORDER_COLUMN: &str = concatcp!(EMBEDPLOT_PREFIX, "order", EMBEDPLOT_SUFFIX);

/// Column name for arrowhead rotation in Vega-Lite (used by the arrow geom)
pub const ANGLE_COLUMN: &str = concatcp!(EMBEDPLOT_PREFIX, "angle", EMBEDPLOT_SUFFIX);

// ============================================================================
// Dataset Columns
// ============================================================================

pub const LABEL: &str = "label";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const XEND: &str = "xend";
pub const YEND: &str = "yend";
pub const CLUSTER: &str = "cluster";
pub const GROUP: &str = "group";
pub const COLOR: &str = "color";
pub const FILL: &str = "fill";
pub const FONTWEIGHT: &str = "fontweight";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";

/// Check whether a column name is one of the synthetic helper columns
pub fn is_synthetic_column(name: &str) -> bool {
    name.starts_with(EMBEDPLOT_PREFIX) && name.ends_with(EMBEDPLOT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_data_key() {
        assert_eq!(GLOBAL_DATA_KEY, "__embedplot_global__");
    }

    #[test]
    fn test_layer_key() {
        assert_eq!(layer_key(0), "__embedplot_layer_0__");
        assert_eq!(layer_key(11), "__embedplot_layer_11__");
    }

    #[test]
    fn test_panel_data_key_is_unique_per_panel() {
        let a = panel_data_key(0, &layer_key(0));
        let b = panel_data_key(1, &layer_key(0));
        assert_ne!(a, b);
        assert!(a.starts_with("__embedplot_panel_0"));
    }

    #[test]
    fn test_is_synthetic_column() {
        assert!(is_synthetic_column(ORDER_COLUMN));
        assert!(is_synthetic_column(ANGLE_COLUMN));
        assert!(!is_synthetic_column(LABEL));
        assert!(!is_synthetic_column("__embedplot_partial"));
    }
}
