// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary occupancy grid
//!
//! Cells are stored row-major in a dense vector. Origin is the top-left
//! corner, x grows rightward and y grows downward. `true` marks an occupied
//! cell that should become part of a wall.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an empty (all unoccupied) grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Wrap a row-major cell buffer
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "expected {} cells for a {}x{} grid, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from nested rows
    ///
    /// Every row must have the same length; a ragged input is rejected
    /// instead of being padded.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }

        let width = u32::try_from(width)
            .map_err(|_| Error::InvalidGrid(format!("width {} is too large", width)))?;
        let height = u32::try_from(height)
            .map_err(|_| Error::InvalidGrid(format!("height {} is too large", height)))?;

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse an ASCII drawing of a grid
    ///
    /// `#`, `X` and `1` are occupied; `.`, `0` and space are empty. Blank
    /// lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .chars()
                .map(|c| match c {
                    '#' | 'X' | '1' => Ok(true),
                    '.' | '0' | ' ' => Ok(false),
                    other => Err(Error::InvalidGrid(format!(
                        "unexpected character {:?} on line {}",
                        other,
                        line_no + 1
                    ))),
                })
                .collect::<Result<Vec<bool>>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the grid has zero area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Cell value; out-of-bounds reads as unoccupied
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[self.index(x, y)]
    }

    /// Set a cell value; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.cells[i] = value;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
