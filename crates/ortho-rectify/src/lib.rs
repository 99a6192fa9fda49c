#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// rectification error types.
mod error;

/// output grid and tiling module.
pub mod grid;

/// utilities for interpolation.
pub mod interpolation;

/// ray-terrain intersection module.
pub mod intersect;

/// per-tile coordinate mapping module.
pub mod mapper;

/// source resampling module.
pub mod resample;

/// tile-parallel orthorectification engine.
pub mod rectify;

pub use crate::error::RectifyError;
pub use crate::grid::{OrthoGrid, TileWindow};
pub use crate::interpolation::InterpolationMode;
pub use crate::intersect::RayTerrainIntersector;
pub use crate::mapper::{PixelMap, TileMapper};
pub use crate::rectify::{OrthoImage, Orthorectifier, RectifyParams};
