//! Sobel edge detection.
//!
//! Unlike luminance-based edge filters, each color channel is convolved on
//! its own with the horizontal and vertical Sobel kernels. The two responses
//! are combined as `round(sqrt(gx^2 + gy^2))`, capped at 255.
//!
//! Kernel cells that fall outside the image are skipped, so border pixels
//! only sum over their in-bounds neighbors. As with blur, the result is
//! computed from the untouched input and swapped in afterwards.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, Axis};

use super::core::round_to_channel;
use crate::grid::{PixelGrid, CHANNELS};

/// Horizontal gradient kernel, indexed `[dy + 1][dx + 1]`.
pub const SOBEL_GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical gradient kernel, indexed `[dy + 1][dx + 1]`.
pub const SOBEL_GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Combine the two gradient responses into a channel value.
#[inline]
pub fn gradient_magnitude(gx: i32, gy: i32) -> u8 {
    let mag = ((gx * gx + gy * gy) as f64).sqrt();
    round_to_channel(mag.min(255.0))
}

/// Compute the Sobel magnitude of every channel of `grid` without modifying it.
///
/// # Returns
/// New `(height, width, 3)` array of per-channel gradient magnitudes
pub fn sobel_magnitudes(grid: &PixelGrid) -> Array3<u8> {
    let (height, width) = grid.dim();
    let mut output = Array3::<u8>::zeros((height, width, CHANNELS));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let mut gx = [0i32; CHANNELS];
                let mut gy = [0i32; CHANNELS];

                for (cell, color) in grid.neighborhood(y, x) {
                    let wx = cell.weight(&SOBEL_GX);
                    let wy = cell.weight(&SOBEL_GY);
                    for (c, v) in color.channels().into_iter().enumerate() {
                        gx[c] += v as i32 * wx;
                        gy[c] += v as i32 * wy;
                    }
                }

                for c in 0..CHANNELS {
                    row[[x, c]] = gradient_magnitude(gx[c], gy[c]);
                }
            }
        });

    output
}

/// Replace `grid` with its Sobel edge map.
pub fn edges(grid: &mut PixelGrid) {
    let magnitudes = sobel_magnitudes(grid);
    grid.replace_with(magnitudes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Color;

    #[test]
    fn test_gradient_magnitude_rounds_and_caps() {
        assert_eq!(gradient_magnitude(0, 0), 0);
        assert_eq!(gradient_magnitude(3, 4), 5);
        // sqrt(2) * 30 = 42.43
        assert_eq!(gradient_magnitude(30, 30), 42);
        // sqrt(2) * 100 = 141.42
        assert_eq!(gradient_magnitude(-100, 100), 141);
        assert_eq!(gradient_magnitude(1020, 1020), 255);
    }

    #[test]
    fn test_edges_uniform_interior_is_zero() {
        let mut grid = PixelGrid::new(5, 5, Color::new(10, 120, 250));
        edges(&mut grid);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(grid.pixel(y, x), Color::BLACK, "pixel ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_edges_uniform_border_sees_missing_cells() {
        // Only in-bounds cells contribute, so borders of a flat image respond.
        let mut grid = PixelGrid::new(3, 3, Color::gray(10));
        edges(&mut grid);
        // corner: gx = gy = 3 * 10 -> sqrt(1800) = 42.43
        assert_eq!(grid.pixel(0, 0), Color::gray(42));
        // top border: gx = 0, gy = 4 * 10
        assert_eq!(grid.pixel(0, 1), Color::gray(40));
        // left border: gx = 4 * 10, gy = 0
        assert_eq!(grid.pixel(1, 0), Color::gray(40));
        assert_eq!(grid.pixel(1, 1), Color::BLACK);
    }

    #[test]
    fn test_edges_vertical_step() {
        let mut grid = PixelGrid::from_fn(3, 4, |_, x| if x < 2 { Color::BLACK } else { Color::gray(50) });
        edges(&mut grid);
        // (1, 1): right column weights 1 + 2 + 1 over 50
        assert_eq!(grid.pixel(1, 1), Color::gray(200));
    }

    #[test]
    fn test_edges_caps_at_255() {
        let mut grid = PixelGrid::from_fn(3, 4, |_, x| if x < 2 { Color::BLACK } else { Color::WHITE });
        edges(&mut grid);
        assert_eq!(grid.pixel(1, 1), Color::WHITE);
        assert_eq!(grid.pixel(1, 2), Color::WHITE);
    }

    #[test]
    fn test_edges_channels_independent() {
        let mut grid = PixelGrid::from_fn(3, 4, |_, x| if x < 2 { Color::BLACK } else { Color::new(0, 50, 0) });
        edges(&mut grid);
        assert_eq!(grid.pixel(1, 1), Color::new(0, 200, 0));
    }

    #[test]
    fn test_edges_degenerate_shapes() {
        let mut single = PixelGrid::new(1, 1, Color::WHITE);
        edges(&mut single);
        // Only the center cell, whose weight is zero in both kernels
        assert_eq!(single.pixel(0, 0), Color::BLACK);

        let mut row = PixelGrid::from_rows(vec![vec![Color::gray(10), Color::gray(10), Color::gray(10)]]).unwrap();
        edges(&mut row);
        // ends: gx = +-2 * 10, middle: gx = 0
        assert_eq!(row.row(0), vec![Color::gray(20), Color::BLACK, Color::gray(20)]);

        let mut column = PixelGrid::from_fn(3, 1, |_, _| Color::gray(10));
        edges(&mut column);
        assert_eq!(column.pixel(0, 0), Color::gray(20));
        assert_eq!(column.pixel(1, 0), Color::BLACK);
    }
}
