//! Standalone HTML output
//!
//! Wraps the Vega-Lite spec in a self-contained page that loads vega-embed
//! from a CDN. Opening the file in a browser replaces an interactive window.

use std::collections::HashMap;
use tracing::debug;

use super::{VegaLiteWriter, Writer};
use crate::{DataFrame, EmbedplotError, Figure, Plot, Result};

const VEGA_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/vega@6";
const VEGA_LITE_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/vega-lite@6";
const VEGA_EMBED_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/vega-embed@7";

/// HTML page writer
#[derive(Default)]
pub struct HtmlWriter {
    vegalite: VegaLiteWriter,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the page around a serialized Vega-Lite spec
    fn page(&self, title: &str, spec_json: &str) -> String {
        // A literal "</" inside the spec would end the script element early
        let spec_json = spec_json.replace("</", "<\\/");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{vega}"></script>
  <script src="{vega_lite}"></script>
  <script src="{vega_embed}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 2em; }}
  </style>
</head>
<body>
  <div id="vis"></div>
  <script type="text/javascript">
    const spec = {spec};
    vegaEmbed('#vis', spec, {{"actions": true}}).catch(console.error);
  </script>
</body>
</html>
"#,
            title = escape_html(title),
            vega = VEGA_SCRIPT,
            vega_lite = VEGA_LITE_SCRIPT,
            vega_embed = VEGA_EMBED_SCRIPT,
            spec = spec_json,
        )
    }
}

/// Page title: the figure title, else the first panel's title
fn page_title(figure: &Figure) -> String {
    figure
        .title
        .clone()
        .or_else(|| {
            figure
                .panels
                .first()
                .and_then(|spec| spec.plot().label("title"))
                .map(str::to_string)
        })
        .unwrap_or_else(|| "embedplot".to_string())
        .replace('\n', " ")
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

impl Writer for HtmlWriter {
    type Output = String;

    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<String> {
        let spec_json = self.vegalite.write(plot, data)?;
        let title = plot.label("title").unwrap_or("embedplot").replace('\n', " ");
        Ok(self.page(&title, &spec_json))
    }

    fn validate(&self, plot: &Plot) -> Result<()> {
        self.vegalite.validate(plot)
    }

    fn render(&self, figure: &Figure) -> Result<String> {
        let vl_spec = self.vegalite.figure_to_value(figure)?;
        let spec_json = serde_json::to_string(&vl_spec).map_err(|e| {
            EmbedplotError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })?;

        let title = page_title(figure);
        debug!(title = %title, "Wrapping Vega-Lite spec in HTML page");
        Ok(self.page(&title, &spec_json))
    }
}
