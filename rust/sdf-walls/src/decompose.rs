// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greedy rectangle decomposition of an occupancy grid
//!
//! Two phases:
//! 1. A horizontal run-length table is built, where each entry holds the
//!    number of consecutive occupied cells starting at that cell and
//!    extending rightward.
//! 2. Cells are scanned in row-major order. Each live start cell takes its
//!    full horizontal run as the rectangle width, then grows downward while
//!    the rows below offer at least the same run at the same column.
//!
//! Emitted rectangles are consumed from the table immediately, so they are
//! pairwise disjoint and together cover exactly the occupied cells.
//!
//! Phase 1 is O(width * height). Phase 2 is usually close to that, but the
//! downward probe makes it O(width * height * height) in the worst case
//! (many tall, thin regions).

use crate::grid::OccupancyGrid;
use crate::types::Rect;

/// Mutable table of rightward run lengths
///
/// Stored as a dense arena indexed by `y * width + x`. A value of zero
/// means the cell is empty or already consumed.
#[derive(Debug, Clone)]
pub struct RunLengthTable {
    width: u32,
    height: u32,
    runs: Vec<u32>,
}

impl RunLengthTable {
    /// Compute run lengths for every row, right to left
    pub fn new(grid: &OccupancyGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut runs = vec![0u32; width as usize * height as usize];

        for y in 0..height {
            let row_start = y as usize * width as usize;
            let mut run = 0u32;
            for x in (0..width).rev() {
                run = if grid.get(x, y) { run + 1 } else { 0 };
                runs[row_start + x as usize] = run;
            }
        }

        Self {
            width,
            height,
            runs,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Run length starting at `(x, y)`; zero when empty, consumed or out of bounds
    #[inline]
    pub fn run(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.runs[self.index(x, y)]
    }

    /// Greedy rectangle starting at `(x, y)`: full run width first, then as
    /// many rows as keep at least that width at the same column.
    pub fn expand(&self, x: u32, y: u32) -> Option<Rect> {
        let w = self.run(x, y);
        if w == 0 {
            return None;
        }

        let mut h = 1;
        for below in (y + 1)..self.height {
            if self.run(x, below) >= w {
                h += 1;
            } else {
                break;
            }
        }

        Some(Rect::new(x, y, w, h))
    }

    /// Mark a rectangle as consumed
    ///
    /// Zeroes the rectangle's cells, then re-derives the runs of the cells
    /// directly to its left in every affected row. Those runs used to extend
    /// into the rectangle; after this call they stop at its left edge.
    pub fn consume(&mut self, rect: &Rect) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);

        for y in rect.y..bottom {
            let row_start = y as usize * self.width as usize;
            for x in rect.x..right {
                self.runs[row_start + x as usize] = 0;
            }

            let mut run = 0u32;
            for x in (0..rect.x).rev() {
                let i = row_start + x as usize;
                if self.runs[i] == 0 {
                    break;
                }
                run += 1;
                self.runs[i] = run;
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Lazy decomposition of a grid into rectangles
///
/// Yields rectangles in row-major order of their top-left corner. The
/// working table is owned by the iterator; the source grid is untouched.
#[derive(Debug, Clone)]
pub struct Decomposer {
    table: RunLengthTable,
    x: u32,
    y: u32,
}

impl Decomposer {
    pub fn new(grid: &OccupancyGrid) -> Self {
        Self {
            table: RunLengthTable::new(grid),
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for Decomposer {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        while self.y < self.table.height() {
            while self.x < self.table.width() {
                match self.table.expand(self.x, self.y) {
                    Some(rect) => {
                        self.table.consume(&rect);
                        self.x += rect.w;
                        return Some(rect);
                    }
                    None => self.x += 1,
                }
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Decompose a grid into disjoint rectangles covering every occupied cell
///
/// Never fails: a zero-area grid or a grid without occupied cells yields an
/// empty vector.
pub fn decompose(grid: &OccupancyGrid) -> Vec<Rect> {
    let rects: Vec<Rect> = Decomposer::new(grid).collect();
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        occupied = grid.occupied_count(),
        rects = rects.len(),
        "Decomposed occupancy grid"
    );
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> OccupancyGrid {
        OccupancyGrid::parse(text).unwrap()
    }

    #[test]
    fn test_run_length_table() {
        let table = RunLengthTable::new(&grid("##.#\n.###\n"));
        assert_eq!(table.run(0, 0), 2);
        assert_eq!(table.run(1, 0), 1);
        assert_eq!(table.run(2, 0), 0);
        assert_eq!(table.run(3, 0), 1);
        assert_eq!(table.run(0, 1), 0);
        assert_eq!(table.run(1, 1), 3);
        assert_eq!(table.run(9, 9), 0);
    }

    #[test]
    fn test_expand_width_first() {
        let table = RunLengthTable::new(&grid("###\n##.\n##.\n"));
        // Width 3 at the top row; the next row only offers 2, so height stays 1
        assert_eq!(table.expand(0, 0), Some(Rect::new(0, 0, 3, 1)));
        assert_eq!(table.expand(0, 1), Some(Rect::new(0, 1, 2, 2)));
        assert_eq!(table.expand(2, 1), None);
    }

    #[test]
    fn test_consume_rederives_left_runs() {
        let mut table = RunLengthTable::new(&grid(".##\n###\n"));
        table.consume(&Rect::new(1, 0, 2, 2));
        assert_eq!(table.run(1, 1), 0);
        assert_eq!(table.run(2, 1), 0);
        // Used to be 3 before the rectangle was consumed
        assert_eq!(table.run(0, 1), 1);
    }

    #[test]
    fn test_empty_grid() {
        assert!(decompose(&OccupancyGrid::new(0, 0)).is_empty());
        assert!(decompose(&OccupancyGrid::new(0, 5)).is_empty());
        assert!(decompose(&OccupancyGrid::new(3, 3)).is_empty());
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(decompose(&grid("#\n")), vec![Rect::new(0, 0, 1, 1)]);
    }

    #[test]
    fn test_solid_rectangle() {
        let g = OccupancyGrid::from_fn(4, 2, |_, _| true);
        assert_eq!(decompose(&g), vec![Rect::new(0, 0, 4, 2)]);
    }

    #[test]
    fn test_l_shape() {
        let rects = decompose(&grid("###\n###\n##.\n"));
        assert_eq!(rects, vec![Rect::new(0, 0, 3, 2), Rect::new(0, 2, 2, 1)]);
        assert_eq!(rects.iter().map(Rect::area).sum::<u64>(), 8);
    }

    #[test]
    fn test_consumed_cells_not_recovered_from_left() {
        // The block at the top right is consumed first; the lower-left start
        // must not extend back into it.
        let rects = decompose(&grid(".##\n###\n"));
        assert_eq!(rects, vec![Rect::new(1, 0, 2, 2), Rect::new(0, 1, 1, 1)]);
    }

    #[test]
    fn test_iterator_is_lazy_and_matches_eager() {
        let g = grid("#.#\n###\n#.#\n");
        let mut iter = Decomposer::new(&g);
        assert_eq!(iter.next(), Some(Rect::new(0, 0, 1, 3)));
        let rest: Vec<_> = iter.collect();
        let eager = decompose(&g);
        assert_eq!(eager[0], Rect::new(0, 0, 1, 3));
        assert_eq!(&eager[1..], rest.as_slice());
    }

    #[test]
    fn test_source_grid_untouched() {
        let g = grid("##\n##\n");
        let before = g.clone();
        let _ = decompose(&g);
        assert_eq!(g, before);
    }
}
