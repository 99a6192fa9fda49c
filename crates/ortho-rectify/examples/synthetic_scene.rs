//! Orthorectify a synthetic scene and print a coarse preview.
//!
//! Run with `RUST_LOG=debug cargo run --example synthetic_scene` to see
//! the engine's setup telemetry.

use glam::DVec3;
use ortho_camera::{Camera, CameraIntrinsics, CameraKind, CameraPose};
use ortho_raster::{Raster, RasterSize};
use ortho_rectify::{Orthorectifier, RectifyParams};
use ortho_terrain::{DemGrid, GeoTransform};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // a gently rolling terrain around 5 m elevation
    let (w, h) = (200usize, 200usize);
    let dem_data = (0..w * h)
        .map(|i| {
            let (col, row) = ((i % w) as f64, (i / w) as f64);
            (5.0 + (col * 0.08).sin() * 2.0 + (row * 0.05).cos() * 2.0) as f32
        })
        .collect();
    let dem = DemGrid::new(
        Raster::new(RasterSize { width: w, height: h }, dem_data)?,
        GeoTransform::new(-100.0, 100.0, 1.0, -1.0)?,
        Some(-9999.0),
    )?;

    // an oblique camera 150 m above the terrain
    let camera = Camera::new(
        CameraIntrinsics::with_centered_principal_point(800.0, 800.0, 401, 401)?,
        CameraKind::Pinhole,
        CameraPose::from_omega_phi_kappa(DVec3::new(10.0, -20.0, 150.0), 0.08, -0.05, 0.4)?,
    );

    // a checkerboard source image
    let src_data = (0..401 * 401)
        .map(|i| {
            let (col, row) = (i % 401, i / 401);
            if (col / 25 + row / 25) % 2 == 0 {
                200.0f32
            } else {
                40.0
            }
        })
        .collect();
    let src = Raster::<f32, 1>::new(
        RasterSize {
            width: 401,
            height: 401,
        },
        src_data,
    )?;

    let mut params = RectifyParams::new(0.5);
    params.nodata = f64::NAN;
    let ortho = Orthorectifier::new(&camera, &dem, params)?;
    let out = ortho.rectify(&src)?;

    println!(
        "output: {}x{} pixels, origin ({:.1}, {:.1})",
        out.raster.cols(),
        out.raster.rows(),
        out.transform.origin_x,
        out.transform.origin_y,
    );

    // coarse ASCII preview, one character per 8x8 block
    for row in (0..out.raster.rows()).step_by(8) {
        let mut line = String::new();
        for col in (0..out.raster.cols()).step_by(8) {
            let v = out.raster.pixel(row, col)?[0];
            line.push(if v.is_nan() {
                ' '
            } else if v > 120.0 {
                '#'
            } else {
                '.'
            });
        }
        println!("{line}");
    }

    Ok(())
}
