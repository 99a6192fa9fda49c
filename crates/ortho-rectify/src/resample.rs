//! Source resampling over a tile's pixel map.

use ortho_raster::{BandValue, Raster};

use crate::error::RectifyError;
use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::mapper::PixelMap;

/// Fill one output tile by sampling the source raster at the mapped
/// coordinates.
///
/// Map entries that are no-data or fall outside the source image write
/// the no-data value across all bands; writes are tile-local.
///
/// # Arguments
///
/// * `src` - The source raster with shape (height, width, C).
/// * `map` - The tile's pixel map.
/// * `out` - The tile buffer, length `map width * map height * C`.
/// * `nodata` - The output no-data value.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the tile buffer length does not match the map.
pub fn resample_tile<T: BandValue, const C: usize>(
    src: &Raster<T, C>,
    map: &PixelMap,
    out: &mut [T],
    nodata: T,
    interpolation: InterpolationMode,
) -> Result<(), RectifyError> {
    let n = map.width() * map.height();
    if out.len() != n * C {
        return Err(RectifyError::Raster(ortho_raster::RasterError::InvalidDataLength(
            out.len(),
            n * C,
        )));
    }

    let (max_u, max_v) = ((src.cols() - 1) as f32, (src.rows() - 1) as f32);
    let map_u = map.map_u();
    let map_v = map.map_v();

    for (i, out_px) in out.chunks_exact_mut(C).enumerate() {
        let (u, v) = (map_u[i], map_v[i]);

        if !u.is_finite() || !v.is_finite() || u < 0.0 || u > max_u || v < 0.0 || v > max_v {
            out_px.fill(nodata);
            continue;
        }

        let value = interpolate_pixel(src, u as f64, v as f64, interpolation);
        for (k, p) in out_px.iter_mut().enumerate() {
            *p = T::from_f64(value[k]);
        }
    }

    Ok(())
}
