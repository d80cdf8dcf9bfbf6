//! VLine geom implementation

use super::{GeomAesthetics, GeomTrait, GeomType};

/// VLine geom - vertical reference line across the panel
#[derive(Debug, Clone, Copy)]
pub struct VLine;

impl GeomTrait for VLine {
    fn geom_type(&self) -> GeomType {
        GeomType::VLine
    }

    fn aesthetics(&self) -> GeomAesthetics {
        GeomAesthetics {
            supported: &["xintercept", "color", "linewidth", "opacity"],
            required: &["xintercept"],
        }
    }
}

impl std::fmt::Display for VLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vline")
    }
}
