use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Represents the interior parameters of a frame camera
///
/// # Fields
///
/// * `fx` - The focal length in the x direction, in pixels
/// * `fy` - The focal length in the y direction, in pixels
/// * `cx` - The x coordinate of the principal point, in pixels
/// * `cy` - The y coordinate of the principal point, in pixels
/// * `width` - The sensor width in pixels
/// * `height` - The sensor height in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// The focal length in the x direction, in pixels
    pub fx: f64,
    /// The focal length in the y direction, in pixels
    pub fy: f64,
    /// The x coordinate of the principal point, in pixels
    pub cx: f64,
    /// The y coordinate of the principal point, in pixels
    pub cy: f64,
    /// The sensor width in pixels
    pub width: usize,
    /// The sensor height in pixels
    pub height: usize,
}

impl CameraIntrinsics {
    /// Create validated interior parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a focal length is not strictly positive or a
    /// sensor dimension is zero.
    pub fn new(
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        width: usize,
        height: usize,
    ) -> Result<Self, CameraError> {
        if !(fx > 0.0) || !(fy > 0.0) {
            return Err(CameraError::InvalidFocalLength(fx, fy));
        }
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidSensorSize(width, height));
        }
        Ok(Self {
            fx,
            fy,
            cx,
            cy,
            width,
            height,
        })
    }

    /// Interior parameters with the principal point at the sensor centre.
    pub fn with_centered_principal_point(
        fx: f64,
        fy: f64,
        width: usize,
        height: usize,
    ) -> Result<Self, CameraError> {
        let cx = (width as f64 - 1.0) / 2.0;
        let cy = (height as f64 - 1.0) / 2.0;
        Self::new(fx, fy, cx, cy, width, height)
    }

    /// Normalize a pixel coordinate to image-plane coordinates.
    #[inline]
    pub fn normalize(&self, u: f64, v: f64) -> (f64, f64) {
        ((u - self.cx) / self.fx, (v - self.cy) / self.fy)
    }

    /// Scale an image-plane coordinate back to pixels.
    #[inline]
    pub fn denormalize(&self, x: f64, y: f64) -> (f64, f64) {
        (self.fx * x + self.cx, self.fy * y + self.cy)
    }
}
