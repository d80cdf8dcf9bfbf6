/*!
# embedplot - word embeddings as vectors in a plane

Builds small illustrative 2-D plots that teach the idea of a "word embedding":
labelled points and arrows from the origin, grouped into clusters, compared
before and after training, or laid out like places on a map.

## Example

```rust,ignore
use embedplot::figures::{build_figure, FigureKind};
use embedplot::writer::{VegaLiteWriter, Writer};
use embedplot::Config;

let figure = build_figure(FigureKind::Clusters, &Config::default())?;
let json = VegaLiteWriter::new().render(&figure)?;
println!("{}", json);
```

## Architecture

Figures are built in two steps:
- **Figure builders** ([`figures`]) turn hardcoded tables or sampled clusters
  ([`sampler`], [`data`]) into a declarative [`Figure`]: one or more panels,
  each a [`Plot`] of layers plus the Polars DataFrames those layers read.
- **Writers** ([`writer`]) turn a [`Figure`] into output: Vega-Lite JSON, an
  HTML page embedding that JSON, or a PNG/SVG image drawn with plotters.

## Core Components

- [`plot`] - Plot, layer, geom and colour types
- [`sampler`] - Seeded Gaussian cluster sampling
- [`figures`] - The four built-in figures
- [`writer`] - Output format abstraction layer
- [`config`] - TOML configuration
*/

pub mod config;
pub mod data;
pub mod figures;
pub mod naming;
pub mod plot;
pub mod sampler;
pub mod spec;
pub mod writer;

// Re-export key types for convenience
pub use config::Config;
pub use plot::{AestheticValue, Geom, Labels, Layer, Mappings, ParameterValue, Plot};
pub use spec::{Figure, Spec};

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum EmbedplotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmbedplotError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
#[cfg(feature = "vegalite")]
mod integration_tests {
    use super::*;
    use crate::figures::{build_figure, FigureKind};
    use crate::writer::{HtmlWriter, VegaLiteWriter, Writer};
    use serde_json::Value;

    #[test]
    fn test_end_to_end_every_figure_renders_to_vegalite() {
        let config = Config::default();
        let writer = VegaLiteWriter::new();

        for kind in FigureKind::ALL {
            let figure = build_figure(*kind, &config).unwrap();
            let json_str = writer.render(&figure).unwrap();
            let vl_spec: Value = serde_json::from_str(&json_str).unwrap();

            assert_eq!(
                vl_spec["$schema"],
                "https://vega.github.io/schema/vega-lite/v6.json",
                "figure {} should carry the Vega-Lite schema",
                kind
            );
            assert!(vl_spec["datasets"].is_object());
        }
    }

    #[test]
    fn test_end_to_end_cluster_point_count_reaches_output() {
        let config = Config::default();
        let figure = build_figure(FigureKind::Clusters, &config).unwrap();
        let json_str = VegaLiteWriter::new().render(&figure).unwrap();
        let vl_spec: Value = serde_json::from_str(&json_str).unwrap();

        // First layer is the scatter; its dataset holds every sampled point
        let key = vl_spec["layer"][0]["data"]["name"].as_str().unwrap();
        let rows = vl_spec["datasets"][key].as_array().unwrap();
        assert_eq!(rows.len(), 5 * config.clusters.points_per_cluster);
    }

    #[test]
    fn test_end_to_end_before_after_is_side_by_side() {
        let figure = build_figure(FigureKind::BeforeAfter, &Config::default()).unwrap();
        let json_str = VegaLiteWriter::new().render(&figure).unwrap();
        let vl_spec: Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(vl_spec["hconcat"].as_array().unwrap().len(), 2);
        assert!(vl_spec["title"]
            .as_str()
            .unwrap()
            .contains("How Training Brings Related Words Together"));
    }

    #[test]
    fn test_end_to_end_html_embeds_spec() {
        let figure = build_figure(FigureKind::Minimal, &Config::default()).unwrap();
        let html = HtmlWriter::new().render(&figure).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("vegaEmbed"));
        assert!(html.contains("Words as Vectors (Simplified)"));
    }
}
