//! Built-in figures
//!
//! Each submodule turns hardcoded tables (or sampled clusters) into a
//! [`Figure`]. Builders are pure: they never touch the filesystem, and the
//! same [`Config`] always yields the same figure.

pub mod before_after;
pub mod clusters;
pub mod geography;
pub mod minimal;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use crate::naming;
use crate::plot::{AestheticValue, Geom, Layer};
use crate::{Config, EmbedplotError, Figure, Result};

/// The figures this crate can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigureKind {
    Clusters,
    BeforeAfter,
    Geography,
    Minimal,
}

impl FigureKind {
    /// Every figure, in listing order
    pub const ALL: &'static [FigureKind] = &[
        FigureKind::Clusters,
        FigureKind::BeforeAfter,
        FigureKind::Geography,
        FigureKind::Minimal,
    ];

    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            FigureKind::Clusters => "clusters",
            FigureKind::BeforeAfter => "before-after",
            FigureKind::Geography => "geography",
            FigureKind::Minimal => "minimal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FigureKind::Clusters => "Synthetic embedding-like clusters around five centres",
            FigureKind::BeforeAfter => "\"The cat sat on the mat\" before and after training",
            FigureKind::Geography => "Lake District lakes and London Tube stations by lon/lat",
            FigureKind::Minimal => "Three words as arrows from the origin",
        }
    }
}

impl std::fmt::Display for FigureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FigureKind {
    type Err = EmbedplotError;

    fn from_str(s: &str) -> Result<Self> {
        FigureKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let available: Vec<&str> = FigureKind::ALL.iter().map(|k| k.name()).collect();
                EmbedplotError::ValidationError(format!(
                    "Unknown figure '{}'. Available figures: {}",
                    s,
                    available.join(", ")
                ))
            })
    }
}

/// Build a figure, applying the configured output size
pub fn build_figure(kind: FigureKind, config: &Config) -> Result<Figure> {
    config.validate()?;

    let figure = match kind {
        FigureKind::Clusters => clusters::build(&config.clusters)?,
        FigureKind::BeforeAfter => before_after::build()?,
        FigureKind::Geography => geography::build()?,
        FigureKind::Minimal => minimal::build()?,
    }
    .with_size(config.output.width, config.output.height);

    figure.validate()?;
    validate_layers(&figure)?;

    info!(
        figure = %kind,
        panels = figure.panels.len(),
        width = figure.width,
        height = figure.height,
        "Built figure"
    );
    Ok(figure)
}

/// Horizontal and vertical reference lines through the origin
pub(crate) fn origin_axes(color: &str, linewidth: f64) -> [Layer; 2] {
    let hline = Layer::new(Geom::hline())
        .with_aesthetic("yintercept", AestheticValue::number(0.0))
        .with_parameter("color", color)
        .with_parameter("linewidth", linewidth);
    let vline = Layer::new(Geom::vline())
        .with_aesthetic("xintercept", AestheticValue::number(0.0))
        .with_parameter("color", color)
        .with_parameter("linewidth", linewidth);
    [hline, vline]
}

/// Arrow layer from (`x`, `y`) to (`xend`, `yend`) of an origin-vector frame
pub(crate) fn origin_arrow_layer() -> Layer {
    Layer::new(Geom::arrow())
        .with_aesthetic("x", AestheticValue::standard_column(naming::X))
        .with_aesthetic("y", AestheticValue::standard_column(naming::Y))
        .with_aesthetic("xend", AestheticValue::standard_column(naming::XEND))
        .with_aesthetic("yend", AestheticValue::standard_column(naming::YEND))
}

/// Check every layer of a figure against its geom
pub(crate) fn validate_layers(figure: &Figure) -> Result<()> {
    for spec in &figure.panels {
        for layer in &spec.plot().layers {
            layer
                .validate_required_aesthetics()
                .and_then(|_| layer.validate_mappings())
                .and_then(|_| layer.validate_settings())
                .map_err(EmbedplotError::ValidationError)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_kind_names_round_trip() {
        for kind in FigureKind::ALL {
            assert_eq!(kind.name().parse::<FigureKind>().unwrap(), *kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_figure_lists_available() {
        let err = "scatter".parse::<FigureKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown figure 'scatter'"));
        assert!(msg.contains("before-after"));
    }

    #[test]
    fn test_every_figure_builds_with_valid_layers() {
        let config = Config::default();
        for kind in FigureKind::ALL {
            let figure = build_figure(*kind, &config).unwrap();
            validate_layers(&figure).unwrap();
        }
    }

    #[test]
    fn test_huge_cluster_config_is_rejected() {
        let mut config = Config::default();
        config.clusters.points_per_cluster = usize::MAX;
        let err = build_figure(FigureKind::Clusters, &config).unwrap_err();
        assert!(matches!(err, crate::EmbedplotError::ConfigError(_)));
    }

    #[test]
    fn test_output_size_override() {
        let mut config = Config::default();
        config.output.width = Some(320);
        let figure = build_figure(FigureKind::Minimal, &config).unwrap();
        assert_eq!(figure.width, 320);
        assert_eq!(figure.height, 480);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.clusters.label_every_n = 0;
        assert!(build_figure(FigureKind::Clusters, &config).is_err());
    }
}
