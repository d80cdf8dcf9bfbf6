//! Color utilities
//!
//! Provides color parsing and the categorical palette used for grouped data.

// =============================================================================
// Color Utilities
// =============================================================================

/// Categorical palette used for grouped data, in assignment order.
///
/// Same ten colours (and order) as the "tab10" palette, so clusters get the
/// familiar blue, orange, green, red, ... sequence.
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Convert a CSS color name/value to hex format.
/// Supports named colors (e.g., "red"), hex (#FF0000), rgb(), rgba(), hsl(), etc.
pub fn color_to_hex(value: &str) -> Result<String, String> {
    csscolorparser::parse(value)
        .map(|c| c.to_css_hex())
        .map_err(|e| format!("Invalid color '{}': {}", value, e))
}

/// Parse a CSS color into 8-bit RGBA components.
pub fn parse_rgba(value: &str) -> Result<[u8; 4], String> {
    csscolorparser::parse(value)
        .map(|c| c.to_rgba8())
        .map_err(|e| format!("Invalid color '{}': {}", value, e))
}

/// Check if an aesthetic name is color-related.
pub fn is_color_aesthetic(aesthetic: &str) -> bool {
    matches!(aesthetic, "color" | "colour" | "fill")
}

/// Palette color for the `index`-th group, cycling when groups outnumber colours.
pub fn palette_color(index: usize) -> &'static str {
    CATEGORY10[index % CATEGORY10.len()]
}
