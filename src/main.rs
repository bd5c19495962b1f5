use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpx2map::options::{RenderOptions, SizeUnit};
use gpx2map::render_map_file;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render GPX survey waypoints as a static map", long_about = None)]
struct Cli {
    /// GPX file with survey waypoints
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output image path (.png or .svg)
    #[arg(short, long, default_value = "map.png", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Optional JSON file with render options
    #[arg(long, value_hint = ValueHint::FilePath)]
    options: Option<PathBuf>,

    /// Page width in --unit
    #[arg(long)]
    width: Option<f64>,

    /// Page height in --unit
    #[arg(long)]
    height: Option<f64>,

    /// Page size unit
    #[arg(long, value_enum)]
    unit: Option<UnitOpt>,

    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Bounding-box margin as a fraction of each axis span (negative widens the frame)
    #[arg(long, allow_negative_numbers = true)]
    margin: Option<f64>,

    /// Map title
    #[arg(long)]
    title: Option<String>,

    /// Skip the group legend
    #[arg(long, action = ArgAction::SetTrue)]
    no_legend: bool,

    /// Skip the graticule and axis labels
    #[arg(long, action = ArgAction::SetTrue)]
    no_axes: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitOpt {
    Mm,
    Cm,
    In,
}

impl From<UnitOpt> for SizeUnit {
    fn from(unit: UnitOpt) -> Self {
        match unit {
            UnitOpt::Mm => SizeUnit::Mm,
            UnitOpt::Cm => SizeUnit::Cm,
            UnitOpt::In => SizeUnit::In,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut opts = match cli.options.as_ref() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<RenderOptions>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => RenderOptions::default(),
    };

    // Flags override the options file
    if let Some(width) = cli.width {
        opts.width = width;
    }
    if let Some(height) = cli.height {
        opts.height = height;
    }
    if let Some(unit) = cli.unit {
        opts.unit = unit.into();
    }
    if let Some(dpi) = cli.dpi {
        opts.dpi = dpi;
    }
    if let Some(margin) = cli.margin {
        opts.margin = margin;
    }
    if let Some(title) = cli.title {
        opts.title = Some(title);
    }
    if cli.no_legend {
        opts.show_legend = false;
    }
    if cli.no_axes {
        opts.show_axes = false;
    }

    let summary = render_map_file(&cli.input, &cli.output, &opts)
        .with_context(|| format!("failed to render {}", cli.input.display()))?;

    for (group, count) in &summary.group_counts {
        info!("{}: {} waypoints", group.label(), count);
    }
    info!(
        "wrote {} ({} waypoints)",
        cli.output.display(),
        summary.waypoint_count
    );

    Ok(())
}
