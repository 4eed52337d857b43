// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walk through the image-to-walls pipeline on a synthetic floor plan
//!
//! Run with: cargo run -p sdf-walls --example convert_demo

use sdf_walls::{
    decompose, decompose_probing, grid_from_luma, to_sdf_string, verify_decomposition,
    ProbeOptions, SceneBuilder, Threshold,
};
use image::{GrayImage, Luma};

fn main() {
    println!("=== Image to SDF Walls Demo ===\n");

    let image = create_synthetic_floor_plan();
    let grid = grid_from_luma(&image, Threshold::default());
    println!("Grid: {}x{}, {} occupied cells", grid.width(), grid.height(), grid.occupied_count());

    let rects = decompose(&grid);
    println!("Run-length decomposition: {} rectangles", rects.len());
    for (i, r) in rects.iter().enumerate() {
        println!("  {:2}: x={:3} y={:3} w={:3} h={:3}", i, r.x, r.y, r.w, r.h);
    }

    match verify_decomposition(&grid, &rects) {
        Ok(coverage) => println!("  Coverage OK: {} cells", coverage.covered_cells),
        Err(e) => println!("  Coverage FAILED: {}", e),
    }

    let overlapping = decompose_probing(&grid, ProbeOptions { clear_consumed: false });
    println!("Probing without clearing: {} rectangles\n", overlapping.len());

    let mut builder = SceneBuilder::new(0.05, 2.5);
    builder.extend(&rects);
    let world = builder.build("DemoFloorPlan");

    match to_sdf_string(&world) {
        Ok(xml) => println!("{}", xml),
        Err(e) => eprintln!("Failed to write SDF: {}", e),
    }
}

/// 120x80 plan with thick outer walls, one partition and a door gap
fn create_synthetic_floor_plan() -> GrayImage {
    let mut img = GrayImage::from_pixel(120, 80, Luma([255]));

    let mut fill = |x0: u32, y0: u32, x1: u32, y1: u32| {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
    };

    fill(0, 0, 120, 4);
    fill(0, 76, 120, 80);
    fill(0, 0, 4, 80);
    fill(116, 0, 120, 80);
    fill(60, 4, 62, 40);
    fill(60, 55, 62, 76);

    img
}
