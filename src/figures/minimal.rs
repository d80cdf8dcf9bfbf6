//! Three words as arrows from the origin

use crate::data::frame::origin_vectors_frame;
use crate::data::LabeledPoint;
use crate::naming;
use crate::plot::scale::palette_color;
use crate::plot::{AestheticValue, Geom, Layer, Plot};
use crate::{Figure, Result, Spec};

pub const TITLE: &str = "Words as Vectors (Simplified)";

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// The hardcoded word vectors
pub fn vectors() -> Vec<LabeledPoint> {
    vec![
        LabeledPoint::new("cat", 2.0, 3.0),
        LabeledPoint::new("dog", 2.2, 2.8),
        LabeledPoint::new("car", -1.5, -2.0),
    ]
}

pub fn build() -> Result<Figure> {
    let frame = origin_vectors_frame(&vectors())?;

    let plot = Plot::new()
        .with_label("title", TITLE)
        .with_label("x", "Weight 1")
        .with_label("y", "Weight 2");
    let mut spec = Spec::new(plot, Default::default());

    spec.push_layer(
        super::origin_arrow_layer()
            .with_parameter("color", palette_color(0))
            .with_parameter("head_width", 0.1),
        frame.clone(),
    );
    spec.push_layer(
        Layer::new(Geom::text())
            .with_aesthetic("x", AestheticValue::standard_column(naming::XEND))
            .with_aesthetic("y", AestheticValue::standard_column(naming::YEND))
            .with_aesthetic("label", AestheticValue::standard_column(naming::LABEL)),
        frame,
    );
    for axis in super::origin_axes(palette_color(0), 1.0) {
        spec.push_literal_layer(axis);
    }

    Ok(Figure::single(spec, WIDTH, HEIGHT))
}
