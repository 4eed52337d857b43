// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coverage checks for a decomposition

use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::types::Rect;
use serde::Serialize;

/// Summary of a valid decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub rect_count: usize,
    pub covered_cells: u64,
}

/// Check that `rects` tile exactly the occupied cells of `grid`
///
/// Every rectangle must be non-empty, inside the grid and cover only
/// occupied cells; no cell may be covered twice; every occupied cell must
/// be covered.
pub fn verify_decomposition(grid: &OccupancyGrid, rects: &[Rect]) -> Result<Coverage> {
    let mut owner: Vec<Option<usize>> = vec![None; grid.cells().len()];
    let width = grid.width() as usize;

    for (i, rect) in rects.iter().enumerate() {
        if rect.w == 0 || rect.h == 0 {
            return Err(Error::InvalidDecomposition(format!(
                "rect #{} {:?} is empty",
                i, rect
            )));
        }
        let right = rect.x.checked_add(rect.w);
        let bottom = rect.y.checked_add(rect.h);
        if right.map_or(true, |r| r > grid.width()) || bottom.map_or(true, |b| b > grid.height()) {
            return Err(Error::InvalidDecomposition(format!(
                "rect #{} {:?} exceeds the {}x{} grid",
                i,
                rect,
                grid.width(),
                grid.height()
            )));
        }

        for (x, y) in rect.cells() {
            if !grid.get(x, y) {
                return Err(Error::InvalidDecomposition(format!(
                    "rect #{} covers empty cell ({}, {})",
                    i, x, y
                )));
            }
            let slot = &mut owner[y as usize * width + x as usize];
            if let Some(prev) = *slot {
                return Err(Error::InvalidDecomposition(format!(
                    "cell ({}, {}) covered by rect #{} and rect #{}",
                    x, y, prev, i
                )));
            }
            *slot = Some(i);
        }
    }

    for (i, (&occupied, covered)) in grid.cells().iter().zip(&owner).enumerate() {
        if occupied && covered.is_none() {
            return Err(Error::InvalidDecomposition(format!(
                "occupied cell ({}, {}) is not covered",
                i % width,
                i / width
            )));
        }
    }

    Ok(Coverage {
        rect_count: rects.len(),
        covered_cells: rects.iter().map(Rect::area).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> OccupancyGrid {
        OccupancyGrid::parse(text).unwrap()
    }

    #[test]
    fn test_valid_tiling() {
        let g = grid("##\n#.\n");
        let coverage =
            verify_decomposition(&g, &[Rect::new(0, 0, 2, 1), Rect::new(0, 1, 1, 1)]).unwrap();
        assert_eq!(coverage.rect_count, 2);
        assert_eq!(coverage.covered_cells, 3);
    }

    #[test]
    fn test_detects_overlap() {
        let g = grid("##\n##\n");
        let err = verify_decomposition(&g, &[Rect::new(0, 0, 2, 2), Rect::new(1, 1, 1, 1)]);
        assert!(matches!(err, Err(Error::InvalidDecomposition(_))));
    }

    #[test]
    fn test_detects_missing_cell() {
        let g = grid("##\n");
        let err = verify_decomposition(&g, &[Rect::new(0, 0, 1, 1)]);
        assert!(matches!(err, Err(Error::InvalidDecomposition(_))));
    }

    #[test]
    fn test_detects_false_positive_and_bounds() {
        let g = grid("#.\n");
        assert!(verify_decomposition(&g, &[Rect::new(0, 0, 2, 1)]).is_err());
        assert!(verify_decomposition(&g, &[Rect::new(0, 0, 1, 2)]).is_err());
        assert!(verify_decomposition(&g, &[Rect::new(0, 0, 0, 1)]).is_err());
    }

    #[test]
    fn test_empty_grid_empty_tiling() {
        let coverage = verify_decomposition(&OccupancyGrid::new(0, 0), &[]).unwrap();
        assert_eq!(coverage.rect_count, 0);
    }
}
