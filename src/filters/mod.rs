//! Filter modules for 24-bit RGB images.
//!
//! ## Filters
//!
//! | Filter | Flag | Strategy | Description |
//! |--------|------|----------|-------------|
//! | Grayscale | `-g` | in place | Mean of the three channels |
//! | Reflect | `-r` | in place | Horizontal mirror of every row |
//! | Blur | `-b` | snapshot | 3x3 box average over in-bounds neighbors |
//! | Edges | `-e` | snapshot | Per-channel Sobel magnitude |
//!
//! ## Architecture
//!
//! - **Shared neighborhood** - Blur and edges both read through
//!   [`core::Neighborhood`], which drops out-of-bounds cells instead of padding
//! - **Shared rounding** - every channel write uses [`core::round_to_channel`]
//! - **Snapshot discipline** - blur and edges build the complete output from
//!   the untouched input before it replaces the caller's grid
//! - **Row parallel** - the snapshot filters compute rows with rayon; output
//!   does not depend on the thread count

pub mod core;
pub mod grayscale;
pub mod reflect;
pub mod blur;
pub mod edge;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::grid::PixelGrid;

pub use self::blur::blur;
pub use self::edge::edges;
pub use self::grayscale::grayscale;
pub use self::reflect::reflect;

/// One of the four available filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Grayscale,
    Reflect,
    Blur,
    Edges,
}

/// Raised when a filter name or flag is not recognized.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid filter: {0}")]
pub struct UnknownFilter(pub String);

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::Blur, Filter::Edges, Filter::Grayscale, Filter::Reflect];

    pub fn name(self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Reflect => "reflect",
            Filter::Blur => "blur",
            Filter::Edges => "edges",
        }
    }

    /// Single-letter command-line flag.
    pub fn flag(self) -> char {
        match self {
            Filter::Grayscale => 'g',
            Filter::Reflect => 'r',
            Filter::Blur => 'b',
            Filter::Edges => 'e',
        }
    }

    pub fn from_flag(flag: char) -> Option<Filter> {
        Filter::ALL.into_iter().find(|f| f.flag() == flag)
    }

    /// Run this filter over `grid`.
    pub fn apply(self, grid: &mut PixelGrid) {
        let (height, width) = grid.dim();
        debug!("applying {} to {}x{} grid", self.name(), height, width);
        match self {
            Filter::Grayscale => grayscale(grid),
            Filter::Reflect => reflect(grid),
            Filter::Blur => blur(grid),
            Filter::Edges => edges(grid),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Filter::ALL
            .into_iter()
            .find(|f| f.name() == lowered)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}
