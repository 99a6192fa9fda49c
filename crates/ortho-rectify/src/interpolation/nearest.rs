use ortho_raster::{BandValue, Raster};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `src` - The source raster.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The band values of the nearest pixel.
pub(crate) fn nearest_neighbor_interpolation<T: BandValue, const C: usize>(
    src: &Raster<T, C>,
    u: f64,
    v: f64,
) -> [f64; C] {
    let (rows, cols) = (src.rows(), src.cols());

    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(rows - 1);

    let base = (iv * cols + iu) * C;
    let data = src.as_slice();

    let mut pixel = [0.0; C];
    for (k, p) in pixel.iter_mut().enumerate() {
        *p = data[base + k].to_f64();
    }

    pixel
}
