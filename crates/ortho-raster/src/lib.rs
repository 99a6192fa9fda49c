#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// band value traits.
mod band;

/// raster error types.
mod error;

/// raster container types.
mod raster;

pub use crate::band::BandValue;
pub use crate::error::RasterError;
pub use crate::raster::{Raster, RasterSize};
