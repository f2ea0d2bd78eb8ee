//! WebAssembly exports for the bitmap filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat RGB byte buffers (length = width * height * 3, no alpha,
//! no row padding) and a new buffer of the same layout is returned.

use wasm_bindgen::prelude::*;

use crate::bmp::Bitmap;
use crate::filters::Filter;
use crate::grid::PixelGrid;

fn run_filter(data: &[u8], width: usize, height: usize, filter: Filter) -> Result<Vec<u8>, JsError> {
    let mut grid = PixelGrid::from_rgb_bytes(height, width, data.to_vec())?;
    filter.apply(&mut grid);
    Ok(grid.into_array().into_raw_vec_and_offset().0)
}

/// Convert to grayscale (mean of the three channels).
#[wasm_bindgen]
pub fn grayscale_rgb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_filter(data, width, height, Filter::Grayscale)
}

/// Mirror every row horizontally.
#[wasm_bindgen]
pub fn reflect_rgb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_filter(data, width, height, Filter::Reflect)
}

/// 3x3 box blur.
#[wasm_bindgen]
pub fn blur_rgb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_filter(data, width, height, Filter::Blur)
}

/// Per-channel Sobel edge magnitude.
#[wasm_bindgen]
pub fn edges_rgb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_filter(data, width, height, Filter::Edges)
}

/// Apply a filter by name to a complete BMP file and return the new file.
///
/// # Arguments
/// * `bmp` - Bytes of an uncompressed 24-bit BMP
/// * `filter` - One of "grayscale", "reflect", "blur", "edges"
#[wasm_bindgen]
pub fn filter_bmp_wasm(bmp: &[u8], filter: &str) -> Result<Vec<u8>, JsError> {
    let filter: Filter = filter.parse()?;
    let mut bitmap = Bitmap::decode(bmp)?;
    bitmap.apply(filter);
    Ok(bitmap.encode())
}
