#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// elevation grid and sampler module.
mod dem;

/// terrain error types.
mod error;

/// world/pixel grid mapping module.
mod transform;

pub use crate::dem::DemGrid;
pub use crate::error::TerrainError;
pub use crate::transform::{Bounds, GeoTransform};
