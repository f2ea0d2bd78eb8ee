//! Reading and writing uncompressed 24-bit BMP files.
//!
//! Only the classic layout is accepted: a 14-byte file header, a 40-byte
//! `BITMAPINFOHEADER`, pixel data at offset 54, 24 bits per pixel and no
//! compression. Scanlines are stored as BGR triples padded to a multiple of
//! four bytes; the padding never reaches the [`PixelGrid`].
//!
//! Rows are kept in file order. For the usual bottom-up files the first grid
//! row is therefore the bottom of the picture, which none of the filters
//! care about.

use std::io::Write;

use log::debug;

use crate::error::BmpError;
use crate::filters::Filter;
use crate::grid::{PixelGrid, CHANNELS};

/// `"BM"` read as a little-endian `u16`.
pub const BMP_SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel array when no palette or extra masks are present.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const BITS_PER_PIXEL: u16 = 24;
const BI_RGB: u32 = 0;
/// ~72 DPI
const DEFAULT_PELS_PER_METER: i32 = 2835;

#[inline]
fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn le_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Padding bytes after each scanline of `width` pixels.
pub fn row_padding(width: usize) -> usize {
    (4 - (width * CHANNELS) % 4) % 4
}

/// `BITMAPFILEHEADER`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: u16,
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub off_bits: u32,
}

impl FileHeader {
    fn parse(b: &[u8]) -> Self {
        Self {
            file_type: le_u16(b, 0),
            size: le_u32(b, 2),
            reserved1: le_u16(b, 6),
            reserved2: le_u16(b, 8),
            off_bits: le_u32(b, 10),
        }
    }

    fn write_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.file_type.to_le_bytes());
        buf.extend_from_slice(&self.size.to_le_bytes());
        buf.extend_from_slice(&self.reserved1.to_le_bytes());
        buf.extend_from_slice(&self.reserved2.to_le_bytes());
        buf.extend_from_slice(&self.off_bits.to_le_bytes());
    }
}

/// `BITMAPINFOHEADER`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    /// Positive for bottom-up files, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub clr_used: u32,
    pub clr_important: u32,
}

impl InfoHeader {
    fn parse(b: &[u8]) -> Self {
        Self {
            size: le_u32(b, 0),
            width: le_i32(b, 4),
            height: le_i32(b, 8),
            planes: le_u16(b, 12),
            bit_count: le_u16(b, 14),
            compression: le_u32(b, 16),
            size_image: le_u32(b, 20),
            x_pels_per_meter: le_i32(b, 24),
            y_pels_per_meter: le_i32(b, 28),
            clr_used: le_u32(b, 32),
            clr_important: le_u32(b, 36),
        }
    }

    fn write_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.size.to_le_bytes());
        buf.extend_from_slice(&self.width.to_le_bytes());
        buf.extend_from_slice(&self.height.to_le_bytes());
        buf.extend_from_slice(&self.planes.to_le_bytes());
        buf.extend_from_slice(&self.bit_count.to_le_bytes());
        buf.extend_from_slice(&self.compression.to_le_bytes());
        buf.extend_from_slice(&self.size_image.to_le_bytes());
        buf.extend_from_slice(&self.x_pels_per_meter.to_le_bytes());
        buf.extend_from_slice(&self.y_pels_per_meter.to_le_bytes());
        buf.extend_from_slice(&self.clr_used.to_le_bytes());
        buf.extend_from_slice(&self.clr_important.to_le_bytes());
    }
}

fn check_supported(file: &FileHeader, info: &InfoHeader) -> Result<(), BmpError> {
    let reason = if file.file_type != BMP_SIGNATURE {
        format!("bad signature {:#06x}", file.file_type)
    } else if file.off_bits as usize != PIXEL_DATA_OFFSET {
        format!("pixel data at offset {}, expected {PIXEL_DATA_OFFSET}", file.off_bits)
    } else if info.size as usize != INFO_HEADER_LEN {
        format!("info header of {} bytes, expected {INFO_HEADER_LEN}", info.size)
    } else if info.bit_count != BITS_PER_PIXEL {
        format!("{} bits per pixel, expected {BITS_PER_PIXEL}", info.bit_count)
    } else if info.compression != BI_RGB {
        format!("compression method {}", info.compression)
    } else if info.width <= 0 || info.height == 0 {
        format!("invalid dimensions {}x{}", info.width, info.height)
    } else {
        return Ok(());
    };
    Err(BmpError::UnsupportedFormat(reason))
}

/// A decoded 24-bit bitmap: both headers plus the pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    grid: PixelGrid,
}

impl Bitmap {
    /// Decode a complete BMP file.
    pub fn decode(bytes: &[u8]) -> Result<Self, BmpError> {
        if bytes.len() < PIXEL_DATA_OFFSET {
            return Err(BmpError::Truncated {
                needed: PIXEL_DATA_OFFSET,
                found: bytes.len(),
            });
        }
        let file_header = FileHeader::parse(&bytes[..FILE_HEADER_LEN]);
        let info_header = InfoHeader::parse(&bytes[FILE_HEADER_LEN..PIXEL_DATA_OFFSET]);
        check_supported(&file_header, &info_header)?;

        let width = info_header.width as usize;
        let height = info_header.height.unsigned_abs() as usize;
        let padding = row_padding(width);
        let row_bytes = width * CHANNELS;
        let stride = row_bytes + padding;

        let needed = stride
            .checked_mul(height)
            .and_then(|n| n.checked_add(PIXEL_DATA_OFFSET))
            .ok_or(BmpError::Allocation { height, width })?;
        if bytes.len() < needed {
            return Err(BmpError::Truncated {
                needed,
                found: bytes.len(),
            });
        }

        let mut rgb = Vec::new();
        rgb.try_reserve_exact(height * row_bytes)
            .map_err(|_| BmpError::Allocation { height, width })?;

        for scanline in bytes[PIXEL_DATA_OFFSET..needed].chunks_exact(stride) {
            for bgr in scanline[..row_bytes].chunks_exact(CHANNELS) {
                rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
            }
        }

        debug!(
            "decoded {}x{} bitmap ({} padding bytes per row, {})",
            height,
            width,
            padding,
            if info_header.height > 0 { "bottom-up" } else { "top-down" }
        );

        let grid = PixelGrid::from_rgb_bytes(height, width, rgb)?;
        Ok(Self {
            file_header,
            info_header,
            grid,
        })
    }

    /// Wrap a grid in freshly built bottom-up headers.
    pub fn from_grid(grid: PixelGrid) -> Result<Self, BmpError> {
        let (height, width) = grid.dim();
        let too_large = || BmpError::UnsupportedFormat(format!("{height}x{width} exceeds BMP limits"));

        let image_bytes = (width * CHANNELS + row_padding(width))
            .checked_mul(height)
            .ok_or_else(too_large)?;
        let size_image = u32::try_from(image_bytes).map_err(|_| too_large())?;
        let file_size = size_image
            .checked_add(PIXEL_DATA_OFFSET as u32)
            .ok_or_else(too_large)?;

        let file_header = FileHeader {
            file_type: BMP_SIGNATURE,
            size: file_size,
            reserved1: 0,
            reserved2: 0,
            off_bits: PIXEL_DATA_OFFSET as u32,
        };
        let info_header = InfoHeader {
            size: INFO_HEADER_LEN as u32,
            width: i32::try_from(width).map_err(|_| too_large())?,
            height: i32::try_from(height).map_err(|_| too_large())?,
            planes: 1,
            bit_count: BITS_PER_PIXEL,
            compression: BI_RGB,
            size_image,
            x_pels_per_meter: DEFAULT_PELS_PER_METER,
            y_pels_per_meter: DEFAULT_PELS_PER_METER,
            clr_used: 0,
            clr_important: 0,
        };

        Ok(Self {
            file_header,
            info_header,
            grid,
        })
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    /// Run `filter` over the pixels; headers stay untouched.
    pub fn apply(&mut self, filter: Filter) {
        filter.apply(&mut self.grid);
    }

    /// Serialize headers and pixel rows, padding every row with zeros.
    pub fn encode(&self) -> Vec<u8> {
        let (height, width) = self.grid.dim();
        let padding = [0u8; 3];
        let pad = &padding[..row_padding(width)];

        let mut buf = Vec::with_capacity(PIXEL_DATA_OFFSET + height * (width * CHANNELS + pad.len()));
        self.file_header.write_into(&mut buf);
        self.info_header.write_into(&mut buf);

        for y in 0..height {
            for x in 0..width {
                let px = self.grid.pixel(y, x);
                buf.extend_from_slice(&[px.blue, px.green, px.red]);
            }
            buf.extend_from_slice(pad);
        }
        buf
    }

    /// Write the encoded file to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BmpError> {
        writer.write_all(&self.encode())?;
        writer.flush()?;
        Ok(())
    }
}
