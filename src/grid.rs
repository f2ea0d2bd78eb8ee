//! Pixel storage shared by every filter.
//!
//! A [`PixelGrid`] owns an `(height, width, 3)` array of bytes with the
//! channels in red, green, blue order on the last axis. Rows are addressed
//! first, then columns, matching the `[[y, x, c]]` indexing used throughout
//! the filters.

use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis, Zip};

use crate::error::GridError;

/// Number of channels stored per pixel.
pub const CHANNELS: usize = 3;

/// One pixel: three independent 8-bit channels, no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Color with the same value in every channel.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Channels as `[red, green, blue]`.
    pub const fn channels(self) -> [u8; CHANNELS] {
        [self.red, self.green, self.blue]
    }

    pub const fn from_channels(c: [u8; CHANNELS]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Dense row-major grid of [`Color`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array3<u8>,
}

impl PixelGrid {
    /// Grid of `height` rows and `width` columns filled with one color.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(height: usize, width: usize, fill: Color) -> Self {
        Self::from_fn(height, width, |_, _| fill)
    }

    /// Grid whose pixel at `(row, col)` is `f(row, col)`, evaluated in raster order.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Color,
    {
        assert!(
            height > 0 && width > 0,
            "pixel grid needs at least one row and one column, got {height}x{width}"
        );
        let mut data = Array3::<u8>::zeros((height, width, CHANNELS));
        Zip::indexed(data.lanes_mut(Axis(2))).for_each(|(y, x), mut px| {
            let color = f(y, x);
            px[0] = color.red;
            px[1] = color.green;
            px[2] = color.blue;
        });
        Self { data }
    }

    /// Build a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                actual: r.len(),
            });
        }
        Ok(Self::from_fn(height, width, |y, x| rows[y][x]))
    }

    /// Wrap an existing `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self, GridError> {
        let (height, width, channels) = data.dim();
        if channels != CHANNELS {
            return Err(GridError::ChannelCount(channels));
        }
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }
        Ok(Self { data })
    }

    /// Build a grid from a flat RGB buffer of length `height * width * 3`.
    pub fn from_rgb_bytes(height: usize, width: usize, bytes: Vec<u8>) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }
        let expected = height * width * CHANNELS;
        if bytes.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), bytes).map_err(|_| {
            GridError::InvalidDimensions { height, width }
        })?;
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        let (h, w, _) = self.data.dim();
        (h, w)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width()
    }

    /// Color at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.contains(row, col).then(|| self.pixel(row, col))
    }

    /// Color at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn pixel(&self, row: usize, col: usize) -> Color {
        Color::new(
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        )
    }

    /// Overwrite the pixel at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, color: Color) -> Result<(), GridError> {
        if !self.contains(row, col) {
            let (height, width) = self.dim();
            return Err(GridError::OutOfBounds {
                row,
                col,
                height,
                width,
            });
        }
        self.data[[row, col, 0]] = color.red;
        self.data[[row, col, 1]] = color.green;
        self.data[[row, col, 2]] = color.blue;
        Ok(())
    }

    /// All pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data
            .lanes(Axis(2))
            .into_iter()
            .map(|px| Color::new(px[0], px[1], px[2]))
    }

    /// One row as a vector of colors.
    pub fn row(&self, row: usize) -> Vec<Color> {
        (0..self.width()).map(|x| self.pixel(row, x)).collect()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Swap the contents for a fully computed buffer of the same shape.
    ///
    /// # Panics
    /// Panics if `next` does not have the grid's shape.
    pub(crate) fn replace_with(&mut self, next: Array3<u8>) {
        assert_eq!(
            next.dim(),
            self.data.dim(),
            "replacement buffer must match the grid shape"
        );
        self.data = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_raster_order() {
        let grid = PixelGrid::from_fn(2, 3, |y, x| Color::gray((y * 3 + x) as u8));
        let values: Vec<u8> = grid.pixels().map(|c| c.red).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.dim(), (2, 3));
    }

    #[test]
    fn test_get_outside_is_none() {
        let grid = PixelGrid::new(2, 2, Color::WHITE);
        assert_eq!(grid.get(1, 1), Some(Color::WHITE));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = PixelGrid::new(1, 1, Color::BLACK);
        assert!(grid.set(0, 0, Color::RED).is_ok());
        assert_eq!(grid.pixel(0, 0), Color::RED);
        assert_eq!(
            grid.set(0, 1, Color::RED),
            Err(GridError::OutOfBounds {
                row: 0,
                col: 1,
                height: 1,
                width: 1
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![Color::RED, Color::GREEN], vec![Color::BLUE]];
        assert_eq!(
            PixelGrid::from_rows(rows),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert!(PixelGrid::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_from_array_checks_channels() {
        let rgba = Array3::<u8>::zeros((2, 2, 4));
        assert_eq!(PixelGrid::from_array(rgba), Err(GridError::ChannelCount(4)));
        let empty = Array3::<u8>::zeros((0, 2, 3));
        assert!(PixelGrid::from_array(empty).is_err());
    }

    #[test]
    fn test_from_rgb_bytes_layout() {
        let grid = PixelGrid::from_rgb_bytes(1, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.pixel(0, 0), Color::new(1, 2, 3));
        assert_eq!(grid.pixel(0, 1), Color::new(4, 5, 6));
        assert_eq!(
            PixelGrid::from_rgb_bytes(1, 2, vec![0; 5]),
            Err(GridError::BufferLength {
                expected: 6,
                actual: 5
            })
        );
    }
}
