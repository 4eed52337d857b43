// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: convert a black-and-white image into an SDF wall model
//!
//! Dark pixels become walls. The document is written to stdout, logs go to
//! stderr (set `RUST_LOG=debug` for per-phase details).
//!
//! Usage:
//!   img2sdf <IMAGE> <SCALE> [--height H] [--name NAME] [options]

use clap::{Parser, ValueEnum};
use sdf_walls::{
    extract_rects, load_grid, render_world, save_debug_image, verify_decomposition,
    ConversionConfig, OutputFormat, SceneBuilder, Strategy, Threshold, DEFAULT_MODEL_NAME,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "img2sdf")]
#[command(about = "Generate an SDF model with rectangular walls from a black-and-white image")]
struct Args {
    /// Image to generate a world from
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Multiplier to convert from pixels to meters
    #[arg(value_name = "SCALE", allow_negative_numbers = true)]
    scale: f64,

    /// Wall height in meters
    #[arg(long, default_value_t = 1.0)]
    height: f64,

    /// Name to give the model
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    name: String,

    /// Luma level below which a pixel is a wall, or "otsu"
    #[arg(long, default_value = "128")]
    threshold: Threshold,

    /// Rectangle decomposition strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::RunLength)]
    strategy: StrategyArg,

    /// Output document format
    #[arg(long, value_enum, default_value_t = FormatArg::Sdf)]
    format: FormatArg,

    /// Save an image with the extracted rectangles colored in
    #[arg(long, value_name = "PATH")]
    debug_image: Option<PathBuf>,

    /// Check that the rectangles tile the walls exactly before writing
    #[arg(long)]
    verify: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    RunLength,
    Probing,
    ProbingOverlap,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RunLength => Strategy::RunLength,
            StrategyArg::Probing => Strategy::Probing {
                clear_consumed: true,
            },
            StrategyArg::ProbingOverlap => Strategy::Probing {
                clear_consumed: false,
            },
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Sdf,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Sdf => OutputFormat::Sdf,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> sdf_walls::Result<()> {
    let config = ConversionConfig {
        scale: args.scale,
        wall_height: args.height,
        model_name: args.name.clone(),
        threshold: args.threshold,
        strategy: args.strategy.into(),
        format: args.format.into(),
    };
    config.validate()?;

    let grid = load_grid(&args.image, config.threshold)?;
    let rects = extract_rects(&grid, config.strategy);
    tracing::info!(
        image = %args.image.display(),
        width = grid.width(),
        height = grid.height(),
        occupied = grid.occupied_count(),
        rects = rects.len(),
        "Extracted wall rectangles"
    );

    if args.verify {
        let coverage = verify_decomposition(&grid, &rects)?;
        tracing::info!(
            rects = coverage.rect_count,
            cells = coverage.covered_cells,
            "Decomposition verified"
        );
    }

    if let Some(path) = &args.debug_image {
        save_debug_image(path, &grid, &rects)?;
        tracing::info!(path = %path.display(), "Saved debug image");
    }

    let mut builder = SceneBuilder::new(config.scale, config.wall_height);
    builder.extend(&rects);
    let world = builder.build(config.model_name.clone());
    let document = render_world(&world, config.format)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}
