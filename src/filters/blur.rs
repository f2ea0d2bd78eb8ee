//! 3x3 box blur.
//!
//! Each output channel is the rounded mean of that channel over the in-bounds
//! part of the 3x3 window around the pixel, so corners average 4 samples,
//! borders 6 and interior pixels 9.
//!
//! The replacement image is computed row-parallel from the untouched input
//! and only then swapped into the caller's grid.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, Axis};

use super::core::round_to_channel;
use crate::grid::{PixelGrid, CHANNELS};

/// Compute the box-blurred pixels of `grid` without modifying it.
///
/// # Returns
/// New `(height, width, 3)` array with the blurred channels
pub fn box_average_3x3(grid: &PixelGrid) -> Array3<u8> {
    let (height, width) = grid.dim();
    let mut output = Array3::<u8>::zeros((height, width, CHANNELS));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let mut sum = [0u32; CHANNELS];
                let mut count = 0u32;

                for (_, color) in grid.neighborhood(y, x) {
                    for (acc, v) in sum.iter_mut().zip(color.channels()) {
                        *acc += v as u32;
                    }
                    count += 1;
                }

                for c in 0..CHANNELS {
                    row[[x, c]] = round_to_channel(sum[c] as f64 / count as f64);
                }
            }
        });

    output
}

/// Blur `grid` in place.
pub fn blur(grid: &mut PixelGrid) {
    let blurred = box_average_3x3(grid);
    grid.replace_with(blurred);
}
