//! Label geom implementation

use super::{GeomAesthetics, GeomTrait, GeomType};

/// Label geom - text drawn on a rounded, filled box
///
/// `fill` and `opacity` style the box; `color` styles the text.
#[derive(Debug, Clone, Copy)]
pub struct Label;

impl GeomTrait for Label {
    fn geom_type(&self) -> GeomType {
        GeomType::Label
    }

    fn aesthetics(&self) -> GeomAesthetics {
        GeomAesthetics {
            supported: &[
                "x",
                "y",
                "label",
                "color",
                "fill",
                "size",
                "opacity",
                "fontweight",
                "align",
            ],
            required: &["x", "y", "label"],
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "label")
    }
}
