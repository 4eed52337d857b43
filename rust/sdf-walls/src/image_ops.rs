// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image loading, binarization and debug rendering

use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::types::Rect;
use image::{GrayImage, ImageReader, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Foreground/background policy: pixels darker than the level are occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    /// Fixed luma level
    Fixed(u8),
    /// Level chosen per image with Otsu's method; pixels at or below
    /// Otsu's level are occupied
    Otsu,
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Fixed(128)
    }
}

impl Threshold {
    /// Resolve to a concrete luma level for `image`
    pub fn level(&self, image: &GrayImage) -> u8 {
        match *self {
            Threshold::Fixed(level) => level,
            Threshold::Otsu => imageproc::contrast::otsu_level(image).saturating_add(1),
        }
    }
}

impl FromStr for Threshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("otsu") {
            return Ok(Threshold::Otsu);
        }
        s.parse::<u8>().map(Threshold::Fixed).map_err(|_| {
            Error::Argument(format!(
                "threshold must be 'otsu' or an integer in 0..=255, got '{}'",
                s
            ))
        })
    }
}

/// Open and decode an image file, then binarize it
pub fn load_grid(path: impl AsRef<Path>, threshold: Threshold) -> Result<OccupancyGrid> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| match e {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Decode(format!("{}: {}", path.display(), other)),
        })?;

    let grayscale = image.to_luma8();
    tracing::debug!(
        path = %path.display(),
        width = grayscale.width(),
        height = grayscale.height(),
        "Decoded image"
    );
    Ok(grid_from_luma(&grayscale, threshold))
}

/// Binarize a grayscale image: luma strictly below the level is occupied
pub fn grid_from_luma(image: &GrayImage, threshold: Threshold) -> OccupancyGrid {
    let level = threshold.level(image);
    tracing::debug!(level, ?threshold, "Binarizing image");
    OccupancyGrid::from_fn(image.width(), image.height(), |x, y| {
        image.get_pixel(x, y).0[0] < level
    })
}

const PALETTE: [[u8; 3]; 8] = [
    [230, 25, 75],
    [60, 180, 75],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [128, 128, 0],
];

/// Debug overlay: empty cells white, uncovered occupied cells black, each
/// rectangle filled with a palette color picked by its index
pub fn render_rects(grid: &OccupancyGrid, rects: &[Rect]) -> RgbImage {
    let mut img = RgbImage::from_fn(grid.width(), grid.height(), |x, y| {
        if grid.get(x, y) {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });

    for (i, rect) in rects.iter().enumerate() {
        let color = Rgb(PALETTE[i % PALETTE.len()]);
        for (x, y) in rect.cells() {
            if x < img.width() && y < img.height() {
                img.put_pixel(x, y, color);
            }
        }
    }

    img
}

/// Render and save a debug overlay; format follows the file extension
pub fn save_debug_image(path: impl AsRef<Path>, grid: &OccupancyGrid, rects: &[Rect]) -> Result<()> {
    render_rects(grid, rects).save(path.as_ref())?;
    Ok(())
}
