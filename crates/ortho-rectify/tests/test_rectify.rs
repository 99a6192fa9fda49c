use glam::DVec3;
use ortho_camera::{Camera, CameraIntrinsics, CameraKind, CameraPose};
use ortho_raster::{Raster, RasterSize};
use ortho_rectify::{InterpolationMode, Orthorectifier, RectifyError, RectifyParams};
use ortho_terrain::{DemGrid, GeoTransform};

const SENSOR: usize = 101;
const ALTITUDE: f64 = 100.0;
const FOCAL: f64 = 500.0;

fn nadir_camera() -> Camera {
    let intrinsics =
        CameraIntrinsics::new(FOCAL, FOCAL, 50.0, 50.0, SENSOR, SENSOR).unwrap();
    let pose =
        CameraPose::from_omega_phi_kappa(DVec3::new(0.0, 0.0, ALTITUDE), 0.0, 0.0, 0.0).unwrap();
    Camera::new(intrinsics, CameraKind::Pinhole, pose)
}

fn flat_dem(width: usize, height: usize, elevation: f32) -> DemGrid {
    let raster = Raster::from_size_val(RasterSize { width, height }, elevation).unwrap();
    let transform = GeoTransform::new(
        -(width as f64) / 2.0,
        height as f64 / 2.0,
        1.0,
        -1.0,
    )
    .unwrap();
    DemGrid::new(raster, transform, Some(-9999.0)).unwrap()
}

/// Source image whose value encodes the pixel position, so the output can
/// be checked against the expected geometry.
fn gradient_source() -> Raster<f32, 1> {
    let data = (0..SENSOR * SENSOR)
        .map(|i| (i % SENSOR) as f32 + (i / SENSOR) as f32 * 1000.0)
        .collect();
    Raster::new(
        RasterSize {
            width: SENSOR,
            height: SENSOR,
        },
        data,
    )
    .unwrap()
}

#[test]
fn nadir_center_maps_to_principal_point() {
    let camera = nadir_camera();
    let dem = flat_dem(60, 60, 0.0);
    let src = gradient_source();

    let mut params = RectifyParams::new(0.5);
    params.nodata = f64::NAN;
    let ortho = Orthorectifier::new(&camera, &dem, params).unwrap();
    let out = ortho.rectify(&src).unwrap();

    // find the output pixel whose centre is closest to the ground origin,
    // which a nadir camera images at the principal point
    let (mut best, mut best_d2) = ((0usize, 0usize), f64::INFINITY);
    for row in 0..out.raster.rows() {
        for col in 0..out.raster.cols() {
            let (x, y) = out.transform.pixel_center(row, col);
            let d2 = x * x + y * y;
            if d2 < best_d2 {
                best_d2 = d2;
                best = (row, col);
            }
        }
    }

    let (x, y) = out.transform.pixel_center(best.0, best.1);
    let value = out.raster.pixel(best.0, best.1).unwrap()[0] as f64;

    // expected source coordinate from the collinearity relation
    let scale = FOCAL / ALTITUDE;
    let expected_u = 50.0 + scale * x;
    let expected_v = 50.0 - scale * y;
    let expected = expected_u + expected_v * 1000.0;

    assert!(
        (value - expected).abs() < 1.0,
        "value {value} vs expected {expected}"
    );
    // and that pixel is within half an output pixel of the principal ray
    assert!(best_d2.sqrt() < 0.5);
}

#[test]
fn above_horizon_view_has_no_footprint() {
    // camera pitched 60 degrees up: every border ray either points above
    // the horizon or leaves the DEM long before intersecting it
    let intrinsics =
        CameraIntrinsics::new(FOCAL, FOCAL, 50.0, 50.0, SENSOR, SENSOR).unwrap();
    let pose = CameraPose::from_omega_phi_kappa(
        DVec3::new(0.0, 0.0, ALTITUDE),
        std::f64::consts::FRAC_PI_3 * 2.0,
        0.0,
        0.0,
    )
    .unwrap();
    let camera = Camera::new(intrinsics, CameraKind::Pinhole, pose);
    let dem = flat_dem(60, 60, 0.0);

    let ortho = Orthorectifier::new(&camera, &dem, RectifyParams::new(1.0)).unwrap();
    assert_eq!(ortho.footprint().unwrap_err(), RectifyError::EmptyFootprint);

    let src = gradient_source();
    assert_eq!(
        ortho.rectify(&src).unwrap_err(),
        RectifyError::EmptyFootprint
    );
}

#[test]
fn dem_hole_punches_matching_nodata_region() {
    let camera = nadir_camera();
    let src = gradient_source();

    // flat DEM with a no-data hole around world (2, 2)..(4, 4)
    let (w, h) = (60usize, 60usize);
    let transform = GeoTransform::new(-30.0, 30.0, 1.0, -1.0).unwrap();
    let mut data = vec![0.0f32; w * h];
    for row in 0..h {
        for col in 0..w {
            let x = -30.0 + col as f64 + 0.5;
            let y = 30.0 - row as f64 - 0.5;
            if (2.0..=4.0).contains(&x) && (2.0..=4.0).contains(&y) {
                data[row * w + col] = -9999.0;
            }
        }
    }
    let raster = Raster::new(RasterSize { width: w, height: h }, data).unwrap();
    let dem = DemGrid::new(raster, transform, Some(-9999.0)).unwrap();

    for interpolation in [
        InterpolationMode::Nearest,
        InterpolationMode::Bilinear,
        InterpolationMode::Bicubic,
    ] {
        let mut params = RectifyParams::new(0.5);
        params.interpolation = interpolation;
        params.nodata = f64::NAN;
        let ortho = Orthorectifier::new(&camera, &dem, params).unwrap();
        let out = ortho.rectify(&src).unwrap();

        let mut hole_nodata = 0usize;
        let mut clear_valid = 0usize;
        for row in 0..out.raster.rows() {
            for col in 0..out.raster.cols() {
                let (x, y) = out.transform.pixel_center(row, col);
                let v = out.raster.pixel(row, col).unwrap()[0];
                if (2.5..=3.5).contains(&x) && (2.5..=3.5).contains(&y) {
                    // safely inside the hole: must be no-data
                    assert!(v.is_nan(), "expected no-data at ({x}, {y}) with {interpolation:?}");
                    hole_nodata += 1;
                } else if x.abs() < 1.0 && y.abs() < 1.0 {
                    // far from the hole: must be valid
                    assert!(!v.is_nan(), "unexpected no-data at ({x}, {y})");
                    clear_valid += 1;
                }
            }
        }
        assert!(hole_nodata > 0);
        assert!(clear_valid > 0);
    }
}

#[test]
fn pipeline_is_deterministic() {
    let camera = nadir_camera();
    let dem = flat_dem(60, 60, 5.0);
    let src = gradient_source();

    let mut params = RectifyParams::new(0.25);
    params.tile_height = 7;
    let ortho = Orthorectifier::new(&camera, &dem, params).unwrap();

    let a = ortho.rectify(&src).unwrap();
    let b = ortho.rectify(&src).unwrap();

    assert_eq!(a.transform, b.transform);
    let bytes_a: Vec<u8> = a
        .raster
        .as_slice()
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let bytes_b: Vec<u8> = b
        .raster
        .as_slice()
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn output_type_conversion_clamps() {
    // same scene, u8 source: output values come back as u8 with the
    // gradient preserved
    let camera = nadir_camera();
    let dem = flat_dem(60, 60, 0.0);

    let data = (0..SENSOR * SENSOR).map(|i| (i % 251) as u8).collect();
    let src = Raster::<u8, 1>::new(
        RasterSize {
            width: SENSOR,
            height: SENSOR,
        },
        data,
    )
    .unwrap();

    let ortho = Orthorectifier::new(&camera, &dem, RectifyParams::new(1.0)).unwrap();
    let out = ortho.rectify(&src).unwrap();
    assert_eq!(out.raster.num_bands(), 1);
    assert!(out.raster.as_slice().iter().any(|&v| v > 0));
}
