// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core geometry types shared by the decomposers and the scene builder

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in grid (pixel) coordinates
///
/// `(x, y)` is the top-left cell; `w` and `h` are at least 1 for every
/// rectangle produced by a decomposer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Number of cells covered
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether two rectangles share at least one cell
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Iterate covered cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_area() {
        let r = Rect::new(2, 3, 4, 1);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 4);
        assert_eq!(r.area(), 4);
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 4));
    }

    #[test]
    fn test_rect_cells_row_major() {
        let r = Rect::new(1, 1, 2, 2);
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(cells, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 2, 2);
        assert!(a.intersects(&Rect::new(1, 1, 2, 2)));
        // Touching edges do not share cells
        assert!(!a.intersects(&Rect::new(2, 0, 1, 2)));
        assert!(!a.intersects(&Rect::new(0, 2, 2, 1)));
    }
}
