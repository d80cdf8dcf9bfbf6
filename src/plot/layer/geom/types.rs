//! Core types for the geom trait system
//!
//! These types are used by all geom implementations and are shared across the module.

/// Maps variant aesthetics to their primary aesthetic family.
///
/// `xend` and `xintercept` belong to the "x" family, so a label set for "x"
/// titles whichever of them is encoded first.
pub const AESTHETIC_FAMILIES: &[(&str, &str)] = &[
    ("xend", "x"),
    ("xintercept", "x"),
    ("yend", "y"),
    ("yintercept", "y"),
];

/// Aesthetic information for a geom type
#[derive(Debug, Clone, Copy)]
pub struct GeomAesthetics {
    /// All aesthetics this geom type supports
    pub supported: &'static [&'static str],
    /// Aesthetics required for this geom type to be valid
    pub required: &'static [&'static str],
}

impl GeomAesthetics {
    /// Get the primary aesthetic for a given aesthetic name.
    ///
    /// Returns the primary family aesthetic if the input is a variant (e.g., "xend" -> "x"),
    /// or returns the aesthetic itself if it's already primary (e.g., "x" -> "x", "color" -> "color").
    pub fn primary_aesthetic(aesthetic: &str) -> &str {
        AESTHETIC_FAMILIES
            .iter()
            .find(|(variant, _)| *variant == aesthetic)
            .map(|(_, primary)| *primary)
            .unwrap_or(aesthetic)
    }

    /// Check whether an aesthetic is positional (x or y family)
    pub fn is_positional(aesthetic: &str) -> bool {
        matches!(Self::primary_aesthetic(aesthetic), "x" | "y")
    }
}

/// Non-aesthetic parameter with its default value
#[derive(Debug, Clone, Copy)]
pub struct DefaultParam {
    pub name: &'static str,
    pub default: DefaultParamValue,
}

/// Default value for a geom parameter
#[derive(Debug, Clone, Copy)]
pub enum DefaultParamValue {
    String(&'static str),
    Number(f64),
    Boolean(bool),
    Null,
}
