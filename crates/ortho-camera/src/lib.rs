#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// camera model composition module.
mod camera;

/// lens distortion models module.
pub mod distortion;

/// camera error types.
mod error;

/// interior parameter types module.
mod intrinsics;

/// exterior pose module.
mod pose;

/// shared interior parameter registry module.
mod registry;

pub use crate::camera::{Camera, CameraKind};
pub use crate::distortion::{BrownConrady, Fisheye};
pub use crate::error::CameraError;
pub use crate::intrinsics::CameraIntrinsics;
pub use crate::pose::CameraPose;
pub use crate::registry::{CameraInterior, CameraRegistry};
