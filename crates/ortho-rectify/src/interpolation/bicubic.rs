use ortho_raster::{BandValue, Raster};

/// Catmull-Rom spline coefficient (OpenCV's INTER_CUBIC uses the same).
const A: f64 = -0.5;

/// One-dimensional cubic kernel weight for a tap at distance `t`.
fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Kernel for bicubic interpolation over a 4x4 support window
///
/// Taps outside the image are clamped to the nearest edge pixel.
///
/// # Arguments
///
/// * `src` - The source raster.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated band values.
pub(crate) fn bicubic_interpolation<T: BandValue, const C: usize>(
    src: &Raster<T, C>,
    u: f64,
    v: f64,
) -> [f64; C] {
    let (rows, cols) = (src.rows(), src.cols());
    let data = src.as_slice();

    let iu = u.floor() as isize;
    let iv = v.floor() as isize;
    let fu = u - iu as f64;
    let fv = v - iv as f64;

    let mut pixel = [0.0; C];
    for dy in -1..=2isize {
        let wy = cubic_weight(dy as f64 - fv);
        if wy == 0.0 {
            continue;
        }
        let row = (iv + dy).clamp(0, rows as isize - 1) as usize;
        for dx in -1..=2isize {
            let wx = cubic_weight(dx as f64 - fu);
            if wx == 0.0 {
                continue;
            }
            let col = (iu + dx).clamp(0, cols as isize - 1) as usize;
            let base = (row * cols + col) * C;
            let w = wx * wy;
            for (k, p) in pixel.iter_mut().enumerate() {
                *p += data[base + k].to_f64() * w;
            }
        }
    }

    pixel
}
