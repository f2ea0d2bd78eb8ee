//! Horizontal reflection.
//!
//! Mirrors each row about its vertical center line, in place. For odd
//! widths the middle column maps onto itself and is left untouched.

use ndarray::Axis;

use crate::grid::{PixelGrid, CHANNELS};

/// Mirror every row of `grid` left to right.
pub fn reflect(grid: &mut PixelGrid) {
    let width = grid.width();
    let mut pixels = grid.view_mut();

    for mut row in pixels.axis_iter_mut(Axis(0)) {
        for x in 0..width / 2 {
            let mirror = width - 1 - x;
            for c in 0..CHANNELS {
                row.swap([x, c], [mirror, c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Color;

    #[test]
    fn test_reflect_row_of_three() {
        let mut grid = PixelGrid::from_rows(vec![vec![Color::RED, Color::GREEN, Color::BLUE]]).unwrap();
        reflect(&mut grid);
        assert_eq!(grid.row(0), vec![Color::BLUE, Color::GREEN, Color::RED]);
    }

    #[test]
    fn test_reflect_even_width() {
        let mut grid = PixelGrid::from_fn(2, 4, |y, x| Color::gray((y * 10 + x) as u8));
        reflect(&mut grid);
        assert_eq!(
            grid.row(0),
            vec![Color::gray(3), Color::gray(2), Color::gray(1), Color::gray(0)]
        );
        assert_eq!(
            grid.row(1),
            vec![Color::gray(13), Color::gray(12), Color::gray(11), Color::gray(10)]
        );
    }

    #[test]
    fn test_reflect_is_involution() {
        let original = PixelGrid::from_fn(5, 7, |y, x| Color::new((x * 30) as u8, (y * 40) as u8, (x ^ y) as u8));
        let mut grid = original.clone();
        reflect(&mut grid);
        assert_ne!(grid, original);
        reflect(&mut grid);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_reflect_single_column_noop() {
        let original = PixelGrid::from_fn(4, 1, |y, _| Color::gray(y as u8 * 60));
        let mut grid = original.clone();
        reflect(&mut grid);
        assert_eq!(grid, original);
    }
}
