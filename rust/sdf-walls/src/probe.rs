// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-cell probing decomposer
//!
//! Simpler alternative to [`crate::decompose`]: no run-length table, every
//! start cell probes rightward and then downward directly on the grid.
//! With `clear_consumed` set it reaches the same rectangles as the
//! run-length decomposer at a higher cost per start cell. Without it the
//! rectangles may overlap, so the two are not interchangeable.

use crate::grid::OccupancyGrid;
use crate::types::Rect;
use serde::{Deserialize, Serialize};

/// Options for [`decompose_probing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Clear emitted cells from the working grid.
    ///
    /// When false, probing reads the original grid, so later rectangles may
    /// overlap earlier ones. Start cells that are already covered are still
    /// skipped.
    pub clear_consumed: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            clear_consumed: true,
        }
    }
}

/// Decompose by probing each uncovered occupied cell
pub fn decompose_probing(grid: &OccupancyGrid, options: ProbeOptions) -> Vec<Rect> {
    let width = grid.width();
    let height = grid.height();

    let mut working = grid.clone();
    let mut covered = OccupancyGrid::new(width, height);
    let mut rects = Vec::new();

    for y in 0..height {
        let mut x = 0;
        while x < width {
            if covered.get(x, y) || !working.get(x, y) {
                x += 1;
                continue;
            }

            let rect = probe(&working, x, y);
            for (cx, cy) in rect.cells() {
                covered.set(cx, cy, true);
                if options.clear_consumed {
                    working.set(cx, cy, false);
                }
            }
            rects.push(rect);
            x += rect.w;
        }
    }

    tracing::debug!(
        width,
        height,
        rects = rects.len(),
        clear_consumed = options.clear_consumed,
        "Probing decomposition finished"
    );
    rects
}

/// Widest run at `(x, y)`, then every row below whose full span is occupied
fn probe(grid: &OccupancyGrid, x: u32, y: u32) -> Rect {
    let mut w = 1;
    while grid.get(x + w, y) {
        w += 1;
    }

    let mut h = 1;
    while y + h < grid.height() && (x..x + w).all(|cx| grid.get(cx, y + h)) {
        h += 1;
    }

    Rect::new(x, y, w, h)
}
