use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use ortho_raster::{BandValue, Raster};

/// Interpolation mode for source resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation over a 4x4 window
    Bicubic,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `src` - The source raster with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated band values.
pub fn interpolate_pixel<T: BandValue, const C: usize>(
    src: &Raster<T, C>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> [f64; C] {
    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(src, u, v),
        InterpolationMode::Bilinear => bilinear_interpolation(src, u, v),
        InterpolationMode::Bicubic => bicubic_interpolation(src, u, v),
    }
}
