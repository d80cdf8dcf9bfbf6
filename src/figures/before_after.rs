//! "The cat sat on the mat": word vectors before and after training
//!
//! Two panels on identical axes. Before training the vectors are random and
//! `cat` sits far from `mat`; after training related words bunch together.
//! The cat↔mat distance is annotated on both panels and summarised by
//! [`DistanceReport`].

use polars::prelude::*;
use std::f64::consts::PI;
use std::fmt;

use crate::data::{LabeledPoint, PointTable};
use crate::naming;
use crate::plot::scale::color_to_hex;
use crate::plot::{AestheticValue, Coord, Geom, Layer, Plot, Theme};
use crate::{EmbedplotError, Figure, Result, Spec};

pub const TITLE: &str =
    "\"The cat sat on the mat\" - How Training Brings Related Words Together";
pub const BEFORE_TITLE: &str = "BEFORE TRAINING\n(Random Embeddings)";
pub const AFTER_TITLE: &str = "AFTER TRAINING\n(Learned Patterns)";

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 600;

const CIRCLE_RADIUS: f64 = 0.4;
const CIRCLE_SEGMENTS: usize = 64;

pub fn vectors_before() -> PointTable {
    PointTable::from_entries([
        ("cat", (0.8, -0.3)),
        ("dog", (2.1, 2.8)),
        ("mat", (-1.5, 2.5)),
        ("floor", (2.8, -0.5)),
        ("xylophone", (0.9, -0.2)),
    ])
}

pub fn vectors_after() -> PointTable {
    PointTable::from_entries([
        ("cat", (2.0, 3.0)),
        ("dog", (2.2, 3.1)),
        ("mat", (1.8, 2.9)),
        ("floor", (1.9, 2.7)),
        ("xylophone", (-1.5, -1.2)),
    ])
}

/// Euclidean distance between two named points of a table
pub fn distance_between(table: &PointTable, a: &str, b: &str) -> Result<f64> {
    table.distance(a, b)
}

/// cat↔mat distance before and after training
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReport {
    pub before: f64,
    pub after: f64,
}

impl DistanceReport {
    pub fn compute() -> Result<Self> {
        Ok(Self {
            before: distance_between(&vectors_before(), "cat", "mat")?,
            after: distance_between(&vectors_after(), "cat", "mat")?,
        })
    }

    /// How much closer the pair got, as a percentage of the starting distance
    pub fn improvement_pct(&self) -> f64 {
        if self.before == 0.0 {
            return 0.0;
        }
        (self.before - self.after) / self.before * 100.0
    }
}

impl fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance Changes:")?;
        writeln!(f, "cat ↔ mat BEFORE: {:.2} (far apart)", self.before)?;
        writeln!(f, "cat ↔ mat AFTER:  {:.2} (close together!)", self.after)?;
        writeln!(f)?;
        write!(f, "Improvement: {:.1}% closer", self.improvement_pct())
    }
}

fn before_color(word: &str) -> &'static str {
    match word {
        "cat" | "xylophone" => "red",
        _ => "blue",
    }
}

fn after_color(word: &str) -> &'static str {
    match word {
        "cat" | "dog" => "green",
        "mat" | "floor" => "blue",
        _ => "red",
    }
}

fn hex(color: &str) -> Result<String> {
    color_to_hex(color).map_err(EmbedplotError::ValidationError)
}

fn frame_error(e: PolarsError) -> EmbedplotError {
    EmbedplotError::DataError(format!("Failed to build comparison frame: {}", e))
}

/// Panel description that differs between before and after
struct PanelStyle {
    title: &'static str,
    color_of: fn(&str) -> &'static str,
    link_color: &'static str,
    note_at: (f64, f64),
    note_fill: &'static str,
}

fn arrows_frame(table: &PointTable, color_of: fn(&str) -> &'static str) -> Result<DataFrame> {
    let labels: Vec<&str> = table.iter().map(|p| p.label.as_str()).collect();
    let zeros = vec![0.0; table.len()];
    let xends: Vec<f64> = table.iter().map(|p| p.x).collect();
    let yends: Vec<f64> = table.iter().map(|p| p.y).collect();
    let colors = table
        .iter()
        .map(|p| hex(color_of(&p.label)))
        .collect::<Result<Vec<String>>>()?;

    df!(
        naming::LABEL => labels,
        naming::X => zeros.clone(),
        naming::Y => zeros,
        naming::XEND => xends,
        naming::YEND => yends,
        naming::COLOR => colors
    )
    .map_err(frame_error)
}

/// Word labels 0.2 above each tip; `cat` in bold
fn word_labels_frame(table: &PointTable) -> Result<DataFrame> {
    let labels: Vec<&str> = table.iter().map(|p| p.label.as_str()).collect();
    let xs: Vec<f64> = table.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = table.iter().map(|p| p.y + 0.2).collect();
    let weights: Vec<&str> = table
        .iter()
        .map(|p| if p.label == "cat" { "bold" } else { "normal" })
        .collect();

    df!(
        naming::LABEL => labels,
        naming::X => xs,
        naming::Y => ys,
        naming::FONTWEIGHT => weights
    )
    .map_err(frame_error)
}

fn link_frame(from: &LabeledPoint, to: &LabeledPoint) -> Result<DataFrame> {
    df!(
        naming::X => [from.x],
        naming::Y => [from.y],
        naming::XEND => [to.x],
        naming::YEND => [to.y]
    )
    .map_err(frame_error)
}

fn boxed_text_frame(entries: &[(String, (f64, f64), &str)]) -> Result<DataFrame> {
    let labels: Vec<&str> = entries.iter().map(|(text, _, _)| text.as_str()).collect();
    let xs: Vec<f64> = entries.iter().map(|(_, (x, _), _)| *x).collect();
    let ys: Vec<f64> = entries.iter().map(|(_, (_, y), _)| *y).collect();
    let fills = entries
        .iter()
        .map(|(_, _, fill)| hex(fill))
        .collect::<Result<Vec<String>>>()?;

    df!(
        naming::LABEL => labels,
        naming::X => xs,
        naming::Y => ys,
        naming::FILL => fills
    )
    .map_err(frame_error)
}

/// Closed polylines approximating circles, one group per circle
pub fn circles_frame(circles: &[(&str, (f64, f64), f64, &str)]) -> Result<DataFrame> {
    let mut groups = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut colors = Vec::new();

    for (name, (cx, cy), r, color) in circles {
        let color = hex(color)?;
        for i in 0..=CIRCLE_SEGMENTS {
            let theta = 2.0 * PI * i as f64 / CIRCLE_SEGMENTS as f64;
            groups.push(name.to_string());
            xs.push(cx + r * theta.cos());
            ys.push(cy + r * theta.sin());
            colors.push(color.clone());
        }
    }

    df!(
        naming::GROUP => groups,
        naming::X => xs,
        naming::Y => ys,
        naming::COLOR => colors
    )
    .map_err(frame_error)
}

fn with_xy(layer: Layer) -> Layer {
    layer
        .with_aesthetic("x", AestheticValue::standard_column(naming::X))
        .with_aesthetic("y", AestheticValue::standard_column(naming::Y))
}

fn boxed_text_layer(size: f64, opacity: f64) -> Layer {
    with_xy(Layer::new(Geom::label()))
        .with_aesthetic("label", AestheticValue::standard_column(naming::LABEL))
        .with_aesthetic("fill", AestheticValue::identity_column(naming::FILL))
        .with_parameter("size", size)
        .with_parameter("opacity", opacity)
}

fn panel(table: &PointTable, style: &PanelStyle) -> Result<Spec> {
    let distance = distance_between(table, "cat", "mat")?;

    let plot = Plot::new()
        .with_label("title", style.title)
        .with_label("x", "Weight 1 (Dimension 1)")
        .with_label("y", "Weight 2 (Dimension 2)")
        .with_coord(Coord::cartesian().with_xlim(-3.0, 4.0).with_ylim(-2.0, 4.0))
        .with_theme(Theme::default().with_grid(0.3));
    let mut spec = Spec::new(plot, Default::default());

    for axis in super::origin_axes("gray", 0.5) {
        spec.push_literal_layer(axis);
    }

    spec.push_layer(
        super::origin_arrow_layer()
            .with_aesthetic("color", AestheticValue::identity_column(naming::COLOR))
            .with_parameter("opacity", 0.6)
            .with_parameter("linewidth", 2.0)
            .with_parameter("head_width", 0.15)
            .with_parameter("head_length", 0.1),
        arrows_frame(table, style.color_of)?,
    );

    spec.push_layer(
        with_xy(Layer::new(Geom::text()))
            .with_aesthetic("label", AestheticValue::standard_column(naming::LABEL))
            .with_aesthetic(
                "fontweight",
                AestheticValue::identity_column(naming::FONTWEIGHT),
            )
            .with_parameter("size", 12.0)
            .with_parameter("align", "center"),
        word_labels_frame(table)?,
    );

    spec.push_layer(
        with_xy(Layer::new(Geom::segment()))
            .with_aesthetic("xend", AestheticValue::standard_column(naming::XEND))
            .with_aesthetic("yend", AestheticValue::standard_column(naming::YEND))
            .with_parameter("color", style.link_color)
            .with_parameter("linetype", "dashed")
            .with_parameter("opacity", 0.5)
            .with_parameter("linewidth", 2.0),
        link_frame(table.require("cat")?, table.require("mat")?)?,
    );

    spec.push_layer(
        boxed_text_layer(10.0, 0.7),
        boxed_text_frame(&[(
            format!("cat ↔ mat\ndistance: {:.2}", distance),
            style.note_at,
            style.note_fill,
        )])?,
    );

    Ok(spec)
}

/// Dashed circles around the learned clusters, with boxed captions
fn add_cluster_circles(spec: &mut Spec) -> Result<()> {
    spec.push_layer(
        with_xy(Layer::new(Geom::path()))
            .with_aesthetic("color", AestheticValue::identity_column(naming::COLOR))
            .with_parameter("linetype", "dashed")
            .with_parameter("opacity", 0.5)
            .with_parameter("linewidth", 2.0)
            .with_partition_by(vec![naming::GROUP.to_string()]),
        circles_frame(&[
            ("Animals", (2.1, 3.05), CIRCLE_RADIUS, "green"),
            ("Surfaces", (1.85, 2.8), CIRCLE_RADIUS, "blue"),
        ])?,
    );

    spec.push_layer(
        boxed_text_layer(9.0, 0.5).with_parameter("align", "center"),
        boxed_text_frame(&[
            ("Animals".to_string(), (2.1, 3.6), "lightgreen"),
            ("Surfaces".to_string(), (1.85, 2.2), "lightblue"),
        ])?,
    );
    Ok(())
}

pub fn build() -> Result<Figure> {
    let before = panel(
        &vectors_before(),
        &PanelStyle {
            title: BEFORE_TITLE,
            color_of: before_color,
            link_color: "red",
            note_at: (-0.3, 1.0),
            note_fill: "yellow",
        },
    )?;

    let mut after = panel(
        &vectors_after(),
        &PanelStyle {
            title: AFTER_TITLE,
            color_of: after_color,
            link_color: "green",
            note_at: (2.2, 2.0),
            note_fill: "lightgreen",
        },
    )?;
    add_cluster_circles(&mut after)?;

    Ok(Figure::new(WIDTH, HEIGHT)
        .with_title(TITLE)
        .with_panel(before)
        .with_panel(after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::{f64_column, str_column};
    use crate::data::euclidean_distance;
    use crate::plot::GeomType;

    #[test]
    fn test_distance_is_euclidean_norm() {
        let table = vectors_before();
        let cat = table.get("cat").unwrap().xy();
        let mat = table.get("mat").unwrap().xy();
        let expected = ((cat.0 - mat.0).powi(2) + (cat.1 - mat.1).powi(2)).sqrt();

        assert_eq!(distance_between(&table, "cat", "mat").unwrap(), expected);
        assert_eq!(euclidean_distance(cat, mat), expected);
    }

    #[test]
    fn test_unknown_word_is_an_error() {
        let err = distance_between(&vectors_after(), "cat", "rug").unwrap_err();
        assert!(matches!(err, EmbedplotError::ValidationError(_)));
    }

    #[test]
    fn test_training_brings_cat_and_mat_together() {
        let report = DistanceReport::compute().unwrap();
        assert!(report.after < report.before);
        assert!((report.before - 3.6235).abs() < 1e-3);
        assert!((report.after - 0.2236).abs() < 1e-3);
        assert!((report.improvement_pct() - 93.83).abs() < 0.01);
    }

    #[test]
    fn test_report_text() {
        let text = DistanceReport::compute().unwrap().to_string();
        assert_eq!(
            text,
            "Distance Changes:\n\
             cat ↔ mat BEFORE: 3.62 (far apart)\n\
             cat ↔ mat AFTER:  0.22 (close together!)\n\
             \n\
             Improvement: 93.8% closer"
        );
    }

    #[test]
    fn test_improvement_with_zero_start_distance() {
        let report = DistanceReport {
            before: 0.0,
            after: 0.0,
        };
        assert_eq!(report.improvement_pct(), 0.0);
    }

    #[test]
    fn test_two_panels_with_shared_limits() {
        let figure = build().unwrap();
        assert_eq!(figure.title.as_deref(), Some(TITLE));
        assert_eq!(figure.panels.len(), 2);

        for spec in &figure.panels {
            let coord = spec.plot().coord.as_ref().unwrap();
            assert_eq!(coord.xlim, Some((-3.0, 4.0)));
            assert_eq!(coord.ylim, Some((-2.0, 4.0)));
        }
        assert_eq!(figure.panels[0].plot().label("title"), Some(BEFORE_TITLE));
        assert_eq!(figure.panels[1].plot().label("title"), Some(AFTER_TITLE));
    }

    #[test]
    fn test_after_panel_adds_circles_and_captions() {
        let figure = build().unwrap();
        let count = |spec: &Spec, geom: GeomType| {
            spec.plot()
                .layers
                .iter()
                .filter(|l| l.geom.geom_type() == geom)
                .count()
        };
        assert_eq!(count(&figure.panels[0], GeomType::Path), 0);
        assert_eq!(count(&figure.panels[1], GeomType::Path), 1);
        assert_eq!(count(&figure.panels[0], GeomType::Label), 1);
        assert_eq!(count(&figure.panels[1], GeomType::Label), 2);
    }

    #[test]
    fn test_arrow_colours_follow_roles() {
        let frame = arrows_frame(&vectors_after(), after_color).unwrap();
        let colors: Vec<String> = str_column(&frame, naming::COLOR)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(
            colors,
            vec!["#008000", "#008000", "#0000ff", "#0000ff", "#ff0000"]
        );
    }

    #[test]
    fn test_word_labels_above_tips() {
        let frame = word_labels_frame(&vectors_before()).unwrap();
        let ys = f64_column(&frame, naming::Y).unwrap();
        // cat sits at y = -0.3
        assert!((ys[0].unwrap() - -0.1).abs() < 1e-9);

        let weights = str_column(&frame, naming::FONTWEIGHT).unwrap();
        assert_eq!(weights[0].as_deref(), Some("bold"));
        assert_eq!(weights[1].as_deref(), Some("normal"));
    }

    #[test]
    fn test_circle_is_closed_and_on_radius() {
        let frame = circles_frame(&[("Animals", (2.1, 3.05), 0.4, "green")]).unwrap();
        assert_eq!(frame.height(), CIRCLE_SEGMENTS + 1);

        let xs = f64_column(&frame, naming::X).unwrap();
        let ys = f64_column(&frame, naming::Y).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            let r = euclidean_distance((x.unwrap(), y.unwrap()), (2.1, 3.05));
            assert!((r - 0.4).abs() < 1e-9);
        }
        assert!((xs[0].unwrap() - xs[CIRCLE_SEGMENTS].unwrap()).abs() < 1e-9);
    }
}
