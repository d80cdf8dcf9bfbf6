//! Output writer abstraction layer for embedplot
//!
//! The writer module provides a pluggable interface for turning a prepared
//! [`Figure`] (or a single [`Plot`] plus its datasets) into output.
//!
//! # Architecture
//!
//! All writers implement the `Writer` trait, which provides:
//! - Plot + Data → Output conversion
//! - Validation for writer compatibility
//! - Figure rendering (one or more panels)
//!
//! # Example
//!
//! ```rust,ignore
//! use embedplot::figures::{build_figure, FigureKind};
//! use embedplot::writer::{Writer, VegaLiteWriter};
//!
//! let figure = build_figure(FigureKind::Minimal, &Default::default())?;
//! let json = VegaLiteWriter::new().render(&figure)?;
//! println!("{}", json);
//! ```

use std::collections::HashMap;

use crate::{DataFrame, EmbedplotError, Figure, Plot, Result};

#[cfg(feature = "vegalite")]
pub mod html;
#[cfg(feature = "vegalite")]
pub mod vegalite;

#[cfg(feature = "plotters")]
pub mod plotters;

#[cfg(feature = "vegalite")]
pub use html::HtmlWriter;
#[cfg(feature = "vegalite")]
pub use vegalite::VegaLiteWriter;

#[cfg(feature = "plotters")]
pub use self::plotters::{ImageFormat, PlottersWriter};

/// Trait for visualization output writers
///
/// Writers take a Plot and its datasets and produce formatted output
/// (JSON, HTML, an image file, ...).
///
/// # Associated Types
///
/// * `Output` - The type returned by `write()` and `render()`.
pub trait Writer {
    /// The output type produced by this writer.
    type Output;

    /// Generate output for a single panel
    ///
    /// # Arguments
    ///
    /// * `plot` - The panel to draw
    /// * `data` - A map of dataset keys to DataFrames. Layers resolve their
    ///   dataset by explicit source, then their own layer key, then global data.
    ///
    /// # Errors
    ///
    /// Returns `EmbedplotError::WriterError` or `ValidationError` if:
    /// - The plot is incompatible with this writer
    /// - The data doesn't match the layers' mappings
    /// - Output generation fails
    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<Self::Output>;

    /// Validate that a plot is compatible with this writer
    ///
    /// Checks whether the plot can be rendered without generating output.
    fn validate(&self, plot: &Plot) -> Result<()>;

    /// Render a figure to the output format
    ///
    /// Multi-panel figures are laid out side by side, left to right.
    fn render(&self, figure: &Figure) -> Result<Self::Output>;
}

/// Layer checks shared by every writer
pub(crate) fn validate_layers(plot: &Plot, writer_name: &str) -> Result<()> {
    if plot.layers.is_empty() {
        return Err(EmbedplotError::ValidationError(format!(
            "{} requires at least one layer",
            writer_name
        )));
    }

    for layer in &plot.layers {
        layer.validate_required_aesthetics().map_err(|e| {
            EmbedplotError::ValidationError(format!("Layer validation failed: {}", e))
        })?;

        layer.validate_settings().map_err(|e| {
            EmbedplotError::ValidationError(format!("Layer validation failed: {}", e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{AestheticValue, Geom, Layer};

    #[test]
    fn test_validate_layers_requires_a_layer() {
        let err = validate_layers(&Plot::new(), "TestWriter").unwrap_err();
        assert!(err.to_string().contains("TestWriter requires at least one layer"));
    }

    #[test]
    fn test_validate_layers_checks_settings() {
        let plot = Plot::new().with_layer(
            Layer::new(Geom::hline())
                .with_aesthetic("yintercept", AestheticValue::number(0.0))
                .with_parameter("head_width", 0.1),
        );
        let err = validate_layers(&plot, "TestWriter").unwrap_err();
        assert!(err.to_string().contains("Invalid setting 'head_width'"));
    }

    #[test]
    fn test_validate_layers_checks_required_aesthetics() {
        let plot = Plot::new().with_layer(Layer::new(Geom::text()));
        assert!(validate_layers(&plot, "TestWriter").is_err());
    }
}
