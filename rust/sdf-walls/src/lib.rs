// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall models from black-and-white images
//!
//! This crate provides a small pipeline for:
//! 1. Binarizing an image into an occupancy grid (dark pixels are walls)
//! 2. Decomposing the grid into disjoint axis-aligned rectangles
//! 3. Mapping rectangles to physical wall boxes
//! 4. Serializing the walls as an SDF model (or JSON)
//!
//! # Usage
//!
//! ```rust,ignore
//! use sdf_walls::{decompose, to_sdf_string, OccupancyGrid, SceneBuilder};
//!
//! let grid = OccupancyGrid::parse("###\n#..\n")?;
//! let mut builder = SceneBuilder::new(0.05, 2.5);
//! builder.extend(&decompose(&grid));
//! let xml = to_sdf_string(&builder.build("Maze"))?;
//! ```

pub mod config;
pub mod decompose;
pub mod error;
pub mod grid;
pub mod image_ops;
pub mod probe;
pub mod scene;
pub mod sdf;
pub mod types;
pub mod verify;

// Re-export commonly used types and functions
pub use config::{ConversionConfig, OutputFormat, Strategy, DEFAULT_MODEL_NAME};
pub use decompose::{decompose, Decomposer, RunLengthTable};
pub use error::{Error, Result};
pub use grid::OccupancyGrid;
pub use image_ops::{grid_from_luma, load_grid, render_rects, save_debug_image, Threshold};
pub use probe::{decompose_probing, ProbeOptions};
pub use scene::{Pose, SceneBuilder, Size, Wall, World};
pub use sdf::to_sdf_string;
pub use types::Rect;
pub use verify::{verify_decomposition, Coverage};

use std::path::Path;

/// Run the configured decomposer over a grid
pub fn extract_rects(grid: &OccupancyGrid, strategy: Strategy) -> Vec<Rect> {
    match strategy {
        Strategy::RunLength => decompose(grid),
        Strategy::Probing { clear_consumed } => {
            decompose_probing(grid, ProbeOptions { clear_consumed })
        }
    }
}

/// Decompose a grid and turn every rectangle into a wall
///
/// Walls keep the decomposer's emission order, which also fixes their ids.
pub fn convert_grid(grid: &OccupancyGrid, config: &ConversionConfig) -> Result<World> {
    config.validate()?;

    let rects = extract_rects(grid, config.strategy);
    let mut builder = SceneBuilder::new(config.scale, config.wall_height);
    builder.extend(&rects);

    tracing::info!(
        width = grid.width(),
        height = grid.height(),
        walls = builder.wall_count(),
        strategy = ?config.strategy,
        "Converted grid into walls"
    );
    Ok(builder.build(config.model_name.clone()))
}

/// Serialize a world in the configured format
pub fn render_world(world: &World, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Sdf => to_sdf_string(world),
        OutputFormat::Json => world.to_json(),
    }
}

/// Full pipeline: image file in, document string out
pub fn process_image(path: impl AsRef<Path>, config: &ConversionConfig) -> Result<String> {
    config.validate()?;
    let grid = load_grid(path, config.threshold)?;
    let world = convert_grid(&grid, config)?;
    render_world(&world, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn create_room_image() -> GrayImage {
        let mut img = GrayImage::from_pixel(20, 12, Luma([255]));

        // Outer walls, two pixels thick
        for x in 0..20 {
            for y in [0, 1, 10, 11] {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        for y in 0..12 {
            for x in [0, 1, 18, 19] {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        // Interior wall with a door gap
        for y in 2..7 {
            img.put_pixel(9, y, Luma([0]));
        }

        img
    }

    #[test]
    fn test_room_pipeline() {
        let grid = grid_from_luma(&create_room_image(), Threshold::default());
        let config = ConversionConfig::new(0.1);
        let world = convert_grid(&grid, &config).unwrap();

        let rects = decompose(&grid);
        assert_eq!(world.walls.len(), rects.len());
        verify_decomposition(&grid, &rects).unwrap();

        // Side walls run down through the bottom wall, which keeps only
        // the span between them
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 20, 2),
                Rect::new(0, 2, 2, 10),
                Rect::new(9, 2, 1, 5),
                Rect::new(18, 2, 2, 10),
                Rect::new(2, 10, 16, 2),
            ]
        );
    }

    #[test]
    fn test_convert_rejects_bad_config() {
        let grid = OccupancyGrid::new(2, 2);
        let result = convert_grid(&grid, &ConversionConfig::new(-1.0));
        assert!(matches!(result, Err(Error::Argument(_))));
    }

    #[test]
    fn test_strategies_agree_when_disjoint() {
        let grid = grid_from_luma(&create_room_image(), Threshold::default());
        assert_eq!(
            extract_rects(&grid, Strategy::RunLength),
            extract_rects(&grid, Strategy::Probing { clear_consumed: true })
        );
    }

    #[test]
    fn test_render_world_json() {
        let grid = OccupancyGrid::parse("#\n").unwrap();
        let world = convert_grid(&grid, &ConversionConfig::new(1.0)).unwrap();
        let json = render_world(&world, OutputFormat::Json).unwrap();
        assert!(json.contains("UnnamedWallsFromImage"));
    }
}
