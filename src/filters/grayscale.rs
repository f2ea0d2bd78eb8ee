//! Grayscale conversion filter.
//!
//! Each pixel becomes the plain average of its three channels, written back
//! to red, green and blue alike. The conversion works in place and every
//! pixel is independent of its neighbors.

use ndarray::Axis;

use super::core::round_to_channel;
use crate::grid::{Color, PixelGrid};

/// Gray level of a single color: the rounded mean of its channels.
#[inline]
pub fn gray_level(color: Color) -> u8 {
    let sum = color.red as u32 + color.green as u32 + color.blue as u32;
    round_to_channel(sum as f64 / 3.0)
}

/// Convert every pixel of `grid` to gray in place.
pub fn grayscale(grid: &mut PixelGrid) {
    let mut pixels = grid.view_mut();
    for mut px in pixels.lanes_mut(Axis(2)) {
        let gray = gray_level(Color::new(px[0], px[1], px[2]));
        px.fill(gray);
    }
}
