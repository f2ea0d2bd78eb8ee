//! Error types for grid construction and bitmap decoding.
//!
//! The filters themselves are total over any valid [`PixelGrid`](crate::grid::PixelGrid)
//! and have no error type of their own.

/// Errors raised while building a pixel grid from external data.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// Both dimensions must be at least one pixel.
    #[error("invalid dimensions: {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    /// The trailing axis of an array did not hold exactly three channels.
    #[error("expected 3 color channels, got {0}")]
    ChannelCount(usize),

    /// Rows of a nested row list had different lengths.
    #[error("row {row} has {actual} pixels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A coordinate fell outside the grid.
    #[error("pixel ({row}, {col}) outside {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// A flat buffer did not match `height * width * 3`.
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

/// Errors that can occur while decoding a 24-bit bitmap.
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    /// Not an uncompressed 24-bit BMP 4.0 file.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file ended before the headers or pixel rows were complete.
    #[error("truncated file: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    /// The pixel buffer could not be reserved.
    #[error("not enough memory to store a {height}x{width} image")]
    Allocation { height: usize, width: usize },

    /// The decoded pixels could not form a grid.
    #[error("invalid pixel grid: {0}")]
    Grid(#[from] GridError),

    /// Writing the encoded file failed.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
