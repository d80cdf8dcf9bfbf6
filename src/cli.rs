/*!
embedplot Command Line Interface

Builds the illustrative embedding figures and writes them as Vega-Lite JSON,
an HTML page, or a PNG/SVG image.
*/

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use embedplot::figures::before_after::DistanceReport;
use embedplot::figures::clusters::sample_points;
use embedplot::figures::{build_figure, FigureKind};
use embedplot::writer::{HtmlWriter, ImageFormat, PlottersWriter, VegaLiteWriter, Writer};
use embedplot::{Config, VERSION};

#[derive(Parser)]
#[command(name = "embedplot")]
#[command(about = "Plots of word embeddings as vectors in a plane")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a figure and write it out
    Render {
        /// Figure to build (see `embedplot list`)
        figure: FigureKind,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputWriter::Vegalite)]
        writer: OutputWriter,

        /// Output file path (text formats print to stdout without it)
        #[arg(long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the available figures
    List,

    /// Print how far "cat" and "mat" moved during training
    Distances,

    /// Print the sampled cluster points as JSON
    Sample {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputWriter {
    Vegalite,
    Html,
    Png,
    Svg,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Print text output, or write it when a path is given
fn emit_text(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("embedplot=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            figure,
            writer,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let built = build_figure(figure, &config)?;

            match writer {
                OutputWriter::Vegalite => {
                    let json = VegaLiteWriter::new().render(&built)?;
                    emit_text(&json, output.as_deref())?;
                }
                OutputWriter::Html => {
                    let html = HtmlWriter::new().render(&built)?;
                    emit_text(&html, output.as_deref())?;
                }
                OutputWriter::Png | OutputWriter::Svg => {
                    let format = match writer {
                        OutputWriter::Svg => ImageFormat::Svg,
                        _ => ImageFormat::Png,
                    };
                    let path = output.unwrap_or_else(|| {
                        PathBuf::from(format!("{}.{}", figure.name(), format.extension()))
                    });
                    let written = PlottersWriter::new(path, format).render(&built)?;
                    println!("{}", written.display());
                }
            }
        }

        Commands::List => {
            for kind in FigureKind::ALL {
                println!("{:<14} {}", kind.name(), kind.description());
            }
        }

        Commands::Distances => {
            println!("{}", DistanceReport::compute()?);
        }

        Commands::Sample { config } => {
            let config = load_config(config.as_deref())?;
            let points = sample_points(&config.clusters)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
    }

    Ok(())
}
