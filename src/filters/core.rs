//! Core utilities shared by the filters.
//!
//! This module provides:
//! - Channel rounding into the 0-255 range
//! - The bounded 3x3 neighborhood sampler used by blur and edge detection

use crate::grid::{Color, PixelGrid};

/// Round half away from zero, then clamp into a channel value.
///
/// Every channel write in every filter goes through this function so that
/// ties and saturation behave identically everywhere.
#[inline]
pub fn round_to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// One in-bounds cell of a 3x3 window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub row: usize,
    pub col: usize,
    /// Row offset from the center, in `-1..=1`.
    pub dy: isize,
    /// Column offset from the center, in `-1..=1`.
    pub dx: isize,
}

impl Neighbor {
    /// Weight of this cell in a 3x3 kernel laid out as `kernel[dy + 1][dx + 1]`.
    #[inline]
    pub fn weight(self, kernel: &[[i32; 3]; 3]) -> i32 {
        kernel[(self.dy + 1) as usize][(self.dx + 1) as usize]
    }
}

/// Iterator over the cells of the 3x3 window centred on a pixel that lie
/// inside a `height x width` grid.
///
/// Offsets falling outside the grid are skipped, never clamped or padded:
/// a corner yields 4 cells, a border pixel 6, an interior pixel 9.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    row: usize,
    col: usize,
    height: usize,
    width: usize,
    next_offset: u8,
}

impl Neighborhood {
    pub fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Self {
            row,
            col,
            height,
            width,
            next_offset: 0,
        }
    }
}

impl Iterator for Neighborhood {
    type Item = Neighbor;

    fn next(&mut self) -> Option<Neighbor> {
        while self.next_offset < 9 {
            let dy = (self.next_offset / 3) as isize - 1;
            let dx = (self.next_offset % 3) as isize - 1;
            self.next_offset += 1;

            let sy = self.row as isize + dy;
            if sy < 0 || sy >= self.height as isize {
                continue;
            }
            let sx = self.col as isize + dx;
            if sx < 0 || sx >= self.width as isize {
                continue;
            }

            return Some(Neighbor {
                row: sy as usize,
                col: sx as usize,
                dy,
                dx,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(9 - self.next_offset as usize))
    }
}

impl PixelGrid {
    /// In-bounds neighbors of `(row, col)` together with their colors.
    pub fn neighborhood(&self, row: usize, col: usize) -> impl Iterator<Item = (Neighbor, Color)> + '_ {
        let (height, width) = self.dim();
        Neighborhood::new(row, col, height, width).map(move |n| (n, self.pixel(n.row, n.col)))
    }
}
