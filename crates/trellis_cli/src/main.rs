//! Trellis CLI
//!
//! Playground for inspecting callout outlines and waterfall layouts.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trellis_core::{PathCommand, Size};
use trellis_layout::{ArrangeOutput, FixedChild, Orientation, WaterfallPanel};
use trellis_paint::{ArrowGeometry, ArrowPlacement, ArrowPointing, ArrowedRectangle};

mod config;

use config::PlaygroundConfig;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Trellis callout and waterfall playground", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing trellis.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a callout outline
    Callout(CalloutArgs),

    /// Pack items into columns
    Waterfall(WaterfallArgs),

    /// List arrow placements and defaults
    Info,
}

#[derive(Args)]
struct CalloutArgs {
    /// Arrow placement (e.g. bottom-edge-aligned-left)
    #[arg(short, long)]
    placement: Option<ArrowPlacement>,

    /// Shape width
    #[arg(long)]
    width: Option<f64>,

    /// Shape height
    #[arg(long)]
    height: Option<f64>,

    /// Arrow size along the edge
    #[arg(long)]
    size: Option<f64>,

    /// Arrow height-to-width ratio
    #[arg(long)]
    ratio: Option<f64>,

    /// Radius of the arrow tip
    #[arg(long)]
    arrow_radius: Option<f64>,

    /// Distance from the corner for edge-aligned placements
    #[arg(long)]
    offset: Option<f64>,

    /// Corner radius of the rectangle
    #[arg(long)]
    corner_radius: Option<f64>,

    /// Stroke thickness; the outline is inset by half of it
    #[arg(long)]
    stroke: Option<f64>,

    /// Draw the plain rounded rectangle
    #[arg(long)]
    hide_arrow: bool,

    /// Write a standalone SVG document to this path
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Args)]
struct WaterfallArgs {
    /// Item heights (main-axis extents), comma separated
    #[arg(long, value_delimiter = ',')]
    heights: Vec<f64>,

    /// Uniform item width used with --heights
    #[arg(long, default_value = "100")]
    width: f64,

    /// Number of columns
    #[arg(short = 'k', long)]
    columns: Option<i64>,

    /// Orientation (vertical or horizontal)
    #[arg(short, long)]
    orientation: Option<Orientation>,

    /// Print the arrangement as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = PlaygroundConfig::load_from_dir(&cli.config)?;

    match cli.command {
        Commands::Callout(args) => cmd_callout(&config, args),
        Commands::Waterfall(args) => cmd_waterfall(&config, args),
        Commands::Info => cmd_info(),
    }
}

fn cmd_callout(config: &PlaygroundConfig, args: CalloutArgs) -> Result<()> {
    let defaults = &config.callout;
    let mut geometry = defaults.arrow;
    if let Some(size) = args.size {
        geometry.size = size;
    }
    if let Some(ratio) = args.ratio {
        geometry.ratio = ratio;
    }
    if let Some(radius) = args.arrow_radius {
        geometry.corner_radius = radius;
    }
    if let Some(offset) = args.offset {
        geometry.offset = offset;
    }
    if let Some(radius) = args.corner_radius {
        geometry = geometry.with_radius(radius);
    }
    if let Some(stroke) = args.stroke {
        geometry.stroke_thickness = stroke;
    }
    if args.hide_arrow {
        geometry.show_arrow = false;
    }

    let placement = args.placement.unwrap_or(defaults.placement);
    let size = Size::new(
        args.width.unwrap_or(defaults.width),
        args.height.unwrap_or(defaults.height),
    );
    let shape = ArrowedRectangle::new(size)
        .placement(placement)
        .geometry(geometry);
    let path = shape
        .try_defining_geometry()
        .context("Cannot build callout outline")?;

    info!(
        "Callout {} ({}x{}) pointing {}",
        placement,
        size.width,
        size.height,
        placement.pointing()
    );

    println!("placement:  {} (points {})", placement, placement.pointing());
    println!("size:       {} x {}", size.width, size.height);
    println!("protrusion: {}", geometry.protrusion());
    println!();
    println!("commands:");
    for command in path.commands() {
        println!("  {}", describe(command));
    }
    println!();
    println!("d: {}", path.to_svg_data());

    if let Some(out) = args.svg {
        write_svg(&out, size, &path.to_svg_data(), geometry.stroke_thickness)?;
        info!("Wrote {}", out.display());
    }

    Ok(())
}

fn describe(command: &PathCommand) -> String {
    match *command {
        PathCommand::MoveTo(p) => format!("move  ({}, {})", p.x, p.y),
        PathCommand::LineTo(p) => format!("line  ({}, {})", p.x, p.y),
        PathCommand::QuadTo { control, end } => format!(
            "quad  ({}, {}) via ({}, {})",
            end.x, end.y, control.x, control.y
        ),
        PathCommand::ArcTo { end, radii, .. } => {
            format!("arc   ({}, {}) r ({}, {})", end.x, end.y, radii.x, radii.y)
        }
        PathCommand::Close => "close".to_string(),
    }
}

fn write_svg(out: &Path, size: Size, data: &str, stroke: f64) -> Result<()> {
    let stroke_width = if stroke > 0.0 { stroke } else { 1.0 };
    let document = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
            "viewBox=\"0 0 {w} {h}\">\n",
            "  <path d=\"{d}\" fill=\"#f4f4f5\" stroke=\"#3f3f46\" stroke-width=\"{s}\"/>\n",
            "</svg>\n"
        ),
        w = size.width,
        h = size.height,
        d = data,
        s = stroke_width
    );
    fs::write(out, document).with_context(|| format!("Failed to write {}", out.display()))
}

fn cmd_waterfall(config: &PlaygroundConfig, args: WaterfallArgs) -> Result<()> {
    let section = &config.waterfall;
    let mut panel = WaterfallPanel::from_config(&section.panel)?;
    if let Some(columns) = args.columns {
        panel.set_max_columns(columns)?;
    }
    if let Some(orientation) = args.orientation {
        panel.set_orientation(orientation);
    }

    let mut items: Vec<FixedChild> = if args.heights.is_empty() {
        section
            .items
            .iter()
            .map(|s| FixedChild::new(s.width, s.height))
            .collect()
    } else {
        // --heights are main-axis extents; transpose for horizontal panels
        args.heights
            .iter()
            .map(|&h| match panel.orientation() {
                Orientation::Vertical => FixedChild::new(args.width, h),
                Orientation::Horizontal => FixedChild::new(h, args.width),
            })
            .collect()
    };

    if items.is_empty() {
        anyhow::bail!("No items to arrange. Pass --heights or add [waterfall] items to trellis.toml");
    }

    panel.measure(&mut items);
    let output = panel.arrange(&mut items);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_arrangement(&panel, &output);
    }

    Ok(())
}

fn print_arrangement(panel: &WaterfallPanel, output: &ArrangeOutput) {
    println!(
        "{} columns, {}: {} x {}",
        panel.max_columns(),
        panel.orientation(),
        output.size.width,
        output.size.height
    );
    println!();
    for item in &output.items {
        let b = item.bounds;
        println!(
            "  item {:>3}  column {:>2}  offset {:>8}  bounds ({}, {}, {}, {})",
            item.index,
            item.column,
            item.main_offset,
            b.x(),
            b.y(),
            b.width(),
            b.height()
        );
    }
    println!();
    for column in &output.columns {
        println!(
            "  column {:>2}  extent {:>8}  cross {:>8}",
            column.index, column.main_extent, column.cross_extent
        );
    }
}

fn cmd_info() -> Result<()> {
    println!("Trellis");
    println!("=======");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Arrow placements:");
    for placement in ArrowPlacement::ALL {
        println!(
            "  {:>2}  {:<24} -> {}{}",
            placement as u8,
            placement.name(),
            placement.pointing(),
            if placement.is_centered() { " (centered)" } else { "" }
        );
    }
    println!();
    println!("Pointing directions:");
    for pointing in ArrowPointing::ALL {
        println!("  - {}", pointing);
    }
    println!();
    let defaults = ArrowGeometry::default();
    println!("Arrow defaults:");
    println!("  - size: {}", defaults.size);
    println!("  - ratio: {}", defaults.ratio);
    println!("  - arrow radius: {}", defaults.corner_radius);
    println!("  - offset: {}", defaults.offset);
    println!("  - protrusion: {}", defaults.protrusion());
    println!();
    println!("Waterfall orientations: {}, {}", Orientation::Vertical, Orientation::Horizontal);

    Ok(())
}
