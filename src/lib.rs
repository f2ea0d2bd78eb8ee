//! bmpfilter
//!
//! Pixel filters for uncompressed 24-bit bitmap images, with a small BMP
//! codec, a command-line front end, and optional Python bindings via PyO3
//! and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are held in a [`grid::PixelGrid`]: an `ndarray` array of shape
//! `(height, width, 3)` with `u8` red, green and blue channels. There is no
//! alpha channel and no float variant; every filter writes channels through
//! one shared round-and-clamp step.
//!
//! ## Filters
//! - **Grayscale** and **Reflect** rewrite the grid in place.
//! - **Blur** and **Edges** compute a complete replacement from the untouched
//!   input (rows in parallel with rayon) and then swap it in.
//!
//! ```
//! use bmpfilter::filters::Filter;
//! use bmpfilter::grid::{Color, PixelGrid};
//!
//! let mut grid = PixelGrid::from_rows(vec![vec![Color::RED, Color::GREEN, Color::BLUE]]).unwrap();
//! Filter::Reflect.apply(&mut grid);
//! assert_eq!(grid.row(0), vec![Color::BLUE, Color::GREEN, Color::RED]);
//! ```

pub mod bmp;
pub mod cli;
pub mod error;
pub mod filters;
pub mod grid;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use bmp::Bitmap;
pub use error::{BmpError, GridError};
pub use filters::Filter;
pub use grid::{Color, PixelGrid};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::Filter;
    use crate::grid::PixelGrid;

    fn run_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: Filter,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut grid = PixelGrid::from_array(image.as_array().to_owned())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        filter.apply(&mut grid);
        Ok(grid.into_array().into_pyarray(py))
    }

    /// Convert an RGB u8 image to grayscale (mean of R, G, B).
    ///
    /// # Arguments
    /// * `image` - Array of shape (height, width, 3)
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run_filter(py, image, Filter::Grayscale)
    }

    /// Mirror an RGB u8 image horizontally.
    #[pyfunction]
    pub fn reflect<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run_filter(py, image, Filter::Reflect)
    }

    /// 3x3 box blur of an RGB u8 image.
    #[pyfunction]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run_filter(py, image, Filter::Blur)
    }

    /// Per-channel Sobel edge magnitude of an RGB u8 image.
    #[pyfunction]
    pub fn edges<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run_filter(py, image, Filter::Edges)
    }

    /// Apply a filter selected by name ("grayscale", "reflect", "blur", "edges").
    #[pyfunction]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filter: Filter = name
            .parse()
            .map_err(|e: crate::filters::UnknownFilter| PyValueError::new_err(e.to_string()))?;
        run_filter(py, image, filter)
    }

    #[pymodule]
    pub fn bmpfilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(reflect, m)?)?;
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(edges, m)?)?;
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        Ok(())
    }
}
