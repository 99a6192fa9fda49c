use ortho_raster::{BandValue, Raster};

/// Kernel for bilinear interpolation
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
pub(crate) fn bilinear_interpolation<T: BandValue, const C: usize>(
    src: &Raster<T, C>,
    u: f64,
    v: f64,
) -> [f64; C] {
    let (rows, cols) = (src.rows(), src.cols());

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = src.as_slice();

    let mut pixel = [0.0; C];
    for (k, p) in pixel.iter_mut().enumerate() {
        *p = data[base00 + k].to_f64() * w00
            + data[base01 + k].to_f64() * w01
            + data[base10 + k].to_f64() * w10
            + data[base11 + k].to_f64() * w11;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ortho_raster::RasterSize;

    #[test]
    fn midpoint_averages_neighbours() {
        let src = Raster::<f32, 1>::new(
            RasterSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 2.0, 4.0, 6.0],
        )
        .unwrap();

        let px = bilinear_interpolation(&src, 0.5, 0.5);
        assert_relative_eq!(px[0], 3.0);
    }

    #[test]
    fn integer_coordinate_is_exact() {
        let src = Raster::<u8, 2>::new(
            RasterSize {
                width: 2,
                height: 1,
            },
            vec![10, 20, 30, 40],
        )
        .unwrap();

        let px = bilinear_interpolation(&src, 1.0, 0.0);
        assert_eq!(px, [30.0, 40.0]);
    }
}
