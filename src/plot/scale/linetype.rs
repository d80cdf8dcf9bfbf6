//! Linetype definitions and conversion to dash patterns.

/// Get the strokeDash array for a named linetype.
///
/// # Named linetype patterns
/// - `solid`: continuous line (empty array)
/// - `dashed`: regular dashes `[6, 4]`
/// - `dotted`: dots `[1, 2]`
/// - `longdash`: longer dashes `[10, 4]`
pub fn linetype_to_stroke_dash(name: &str) -> Option<Vec<u32>> {
    match name.to_lowercase().as_str() {
        "solid" => Some(vec![]),
        "dashed" => Some(vec![6, 4]),
        "dotted" => Some(vec![1, 2]),
        "longdash" => Some(vec![10, 4]),
        _ => None,
    }
}

/// Dash length and gap in pixels for a linetype, or `None` for solid lines.
///
/// Only the first on/off pair is used; raster output draws single-period dashes.
pub fn linetype_dash_period(name: &str) -> Option<(u32, u32)> {
    let dash = linetype_to_stroke_dash(name)?;
    match dash.as_slice() {
        [on, off, ..] => Some((*on, *off)),
        _ => None,
    }
}
