//! Arrow geom implementation

use super::{DefaultParam, DefaultParamValue, GeomAesthetics, GeomTrait, GeomType};

/// Arrow geom - line segments with a filled arrowhead at (xend, yend)
///
/// Head size is given in data units, so heads scale with the axes.
#[derive(Debug, Clone, Copy)]
pub struct Arrow;

impl GeomTrait for Arrow {
    fn geom_type(&self) -> GeomType {
        GeomType::Arrow
    }

    fn aesthetics(&self) -> GeomAesthetics {
        GeomAesthetics {
            supported: &[
                "x",
                "y",
                "xend",
                "yend",
                "color",
                "linewidth",
                "opacity",
            ],
            required: &["x", "y", "xend", "yend"],
        }
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[
            DefaultParam {
                name: "head_width",
                default: DefaultParamValue::Number(0.1),
            },
            DefaultParam {
                name: "head_length",
                default: DefaultParamValue::Number(0.15),
            },
        ]
    }
}

impl std::fmt::Display for Arrow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arrow")
    }
}
