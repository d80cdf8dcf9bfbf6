//! Synthetic "embedding-like" clusters
//!
//! One scatter coloured by cluster, optional arrows from the origin, and a
//! label on every N-th point (counted across all clusters, in sampling order).

use tracing::debug;

use crate::config::ClusterConfig;
use crate::data::frame::{cluster_points_frame, labeled_points_frame, origin_vectors_frame};
use crate::data::{ClusterPoint, LabeledPoint};
use crate::naming;
use crate::plot::scale::palette_color;
use crate::plot::{AestheticValue, Geom, Layer, Plot, Theme};
use crate::sampler::{default_clusters, ClusterSampler, SamplerConfig};
use crate::{Figure, Result, Spec};

pub const TITLE: &str = "Vectors on an X–Y Plane (Synthetic 'Embedding-like' Clusters)";

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;

/// Sample the default clusters with the configured seed, size and jitter
pub fn sample_points(config: &ClusterConfig) -> Result<Vec<ClusterPoint>> {
    ClusterSampler::new(SamplerConfig::from(config))?.sample(&default_clusters())
}

/// Points whose global index is a multiple of `every_n`
pub fn labelled_subset(points: &[ClusterPoint], every_n: usize) -> Vec<LabeledPoint> {
    points
        .iter()
        .enumerate()
        .filter(|(idx, _)| every_n > 0 && idx % every_n == 0)
        .map(|(_, p)| LabeledPoint::new(p.label.clone(), p.x, p.y))
        .collect()
}

pub fn build(config: &ClusterConfig) -> Result<Figure> {
    let points = sample_points(config)?;
    let labelled = labelled_subset(&points, config.label_every_n);
    debug!(
        points = points.len(),
        labelled = labelled.len(),
        "Sampled cluster figure data"
    );

    let plot = Plot::new()
        .with_label("title", TITLE)
        .with_label("x", "Weight / Feature 1 (2D simplification)")
        .with_label("y", "Weight / Feature 2 (2D simplification)")
        .with_theme(Theme::default().with_grid(0.25).with_legend());
    let mut spec = Spec::new(plot, Default::default());

    spec.push_layer(
        Layer::new(Geom::point())
            .with_aesthetic("x", AestheticValue::standard_column(naming::X))
            .with_aesthetic("y", AestheticValue::standard_column(naming::Y))
            .with_aesthetic("color", AestheticValue::standard_column(naming::CLUSTER))
            .with_parameter("opacity", 0.8),
        cluster_points_frame(&points)?,
    );

    if config.draw_arrows {
        let tips: Vec<LabeledPoint> = points
            .iter()
            .map(|p| LabeledPoint::new(p.label.clone(), p.x, p.y))
            .collect();
        spec.push_layer(
            super::origin_arrow_layer()
                .with_parameter("color", palette_color(0))
                .with_parameter("opacity", 0.12)
                .with_parameter("head_width", 0.08)
                .with_parameter("head_length", 0.12),
            origin_vectors_frame(&tips)?,
        );
    }

    spec.push_layer(
        Layer::new(Geom::text())
            .with_aesthetic("x", AestheticValue::standard_column(naming::X))
            .with_aesthetic("y", AestheticValue::standard_column(naming::Y))
            .with_aesthetic("label", AestheticValue::standard_column(naming::LABEL))
            .with_parameter("size", 8.0),
        labeled_points_frame(&labelled)?,
    );

    for axis in super::origin_axes(palette_color(0), 1.0) {
        spec.push_literal_layer(axis);
    }

    Ok(Figure::single(spec, WIDTH, HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::str_column;
    use crate::plot::GeomType;

    fn geoms(figure: &Figure) -> Vec<GeomType> {
        figure.panels[0]
            .plot()
            .layers
            .iter()
            .map(|l| l.geom.geom_type())
            .collect()
    }

    #[test]
    fn test_scatter_holds_every_point() {
        let config = ClusterConfig::default();
        let figure = build(&config).unwrap();
        let scatter = figure.panels[0].layer_data(0).unwrap();
        assert_eq!(scatter.height(), 5 * config.points_per_cluster);
    }

    #[test]
    fn test_every_nth_point_labelled() {
        let config = ClusterConfig::default();
        let figure = build(&config).unwrap();

        // 300 points, every 12th: indices 0, 12, ..., 288
        let text = figure.panels[0].layer_data(1).unwrap();
        assert_eq!(text.height(), 25);

        let labels = str_column(text, naming::LABEL).unwrap();
        assert_eq!(labels[0].as_deref(), Some("cat"));
    }

    #[test]
    fn test_labelled_subset_counts_globally() {
        let points = sample_points(&ClusterConfig {
            points_per_cluster: 10,
            ..ClusterConfig::default()
        })
        .unwrap();
        let subset = labelled_subset(&points, 4);
        let labels: Vec<&str> = subset.iter().map(|p| p.label.as_str()).collect();
        // Indices 0, 4, 8 fall in Animals; 12, 16 in Vehicles
        assert_eq!(&labels[..5], &["cat", "lion", "ani_000", "bike", "scooter"]);
    }

    #[test]
    fn test_arrows_only_when_enabled() {
        let without = build(&ClusterConfig::default()).unwrap();
        assert!(!geoms(&without).contains(&GeomType::Arrow));

        let with = build(&ClusterConfig {
            draw_arrows: true,
            ..ClusterConfig::default()
        })
        .unwrap();
        assert_eq!(geoms(&with)[1], GeomType::Arrow);
    }

    #[test]
    fn test_theme_has_grid_and_legend() {
        let figure = build(&ClusterConfig::default()).unwrap();
        let theme = &figure.panels[0].plot().theme;
        assert!(theme.grid);
        assert!(theme.legend);
        assert_eq!(theme.grid_opacity, 0.25);
    }
}
