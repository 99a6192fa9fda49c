use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::distortion::{BrownConrady, Fisheye};
use crate::error::CameraError;
use crate::intrinsics::CameraIntrinsics;
use crate::pose::CameraPose;

/// Margin around the sensor, as a fraction of each dimension, inside which
/// projections are still accepted. Points projecting further out are
/// rejected so wildly extrapolated coordinates never reach the resampler.
const SENSOR_MARGIN: f64 = 1.0;

/// Minimum camera-frame depth for a projectable point.
const MIN_DEPTH: f64 = 1e-9;

/// The projection model of a camera, chosen per camera at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CameraKind {
    /// Distortion-free perspective projection.
    Pinhole,
    /// Perspective projection with Brown-Conrady distortion.
    Brown(BrownConrady),
    /// Equidistant fisheye projection.
    Fisheye(Fisheye),
}

/// A frame camera: interior parameters, projection model and exterior pose.
///
/// Read-only once constructed; safe to share across worker threads for the
/// duration of an orthorectification run.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    intrinsics: CameraIntrinsics,
    kind: CameraKind,
    pose: CameraPose,
}

impl Camera {
    /// Compose a camera from validated parts.
    pub fn new(intrinsics: CameraIntrinsics, kind: CameraKind, pose: CameraPose) -> Self {
        Self {
            intrinsics,
            kind,
            pose,
        }
    }

    /// The interior parameters.
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// The projection model.
    pub fn kind(&self) -> CameraKind {
        self.kind
    }

    /// The exterior pose.
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Project a camera-frame point to a pixel coordinate.
    ///
    /// # Errors
    ///
    /// * [`CameraError::PointBehindCamera`] if the point depth is not positive.
    /// * [`CameraError::OutsideSensorBounds`] if the projection falls
    ///   outside the sensor grown by the acceptance margin.
    pub fn project(&self, point: DVec3) -> Result<DVec2, CameraError> {
        if point.z <= MIN_DEPTH {
            return Err(CameraError::PointBehindCamera);
        }

        let (xd, yd) = match self.kind {
            CameraKind::Pinhole => (point.x / point.z, point.y / point.z),
            CameraKind::Brown(d) => d.distort(point.x / point.z, point.y / point.z),
            CameraKind::Fisheye(d) => {
                let r = (point.x * point.x + point.y * point.y).sqrt();
                if r < MIN_DEPTH {
                    (0.0, 0.0)
                } else {
                    let theta_d = d.theta_d(r.atan2(point.z));
                    (theta_d * point.x / r, theta_d * point.y / r)
                }
            }
        };

        let (u, v) = self.intrinsics.denormalize(xd, yd);

        let (w, h) = (self.intrinsics.width as f64, self.intrinsics.height as f64);
        if u < -SENSOR_MARGIN * w
            || u > (1.0 + SENSOR_MARGIN) * w
            || v < -SENSOR_MARGIN * h
            || v > (1.0 + SENSOR_MARGIN) * h
        {
            return Err(CameraError::OutsideSensorBounds);
        }

        Ok(DVec2::new(u, v))
    }

    /// Back-project a pixel coordinate to a unit ray in the camera frame.
    ///
    /// Distortion is removed iteratively; see the distortion models for
    /// the convergence contract.
    pub fn unproject(&self, pixel: DVec2) -> Result<DVec3, CameraError> {
        let (xd, yd) = self.intrinsics.normalize(pixel.x, pixel.y);

        let dir = match self.kind {
            CameraKind::Pinhole => DVec3::new(xd, yd, 1.0),
            CameraKind::Brown(d) => {
                let (x, y) = d.undistort(xd, yd)?;
                DVec3::new(x, y, 1.0)
            }
            CameraKind::Fisheye(d) => {
                let theta_d = (xd * xd + yd * yd).sqrt();
                if theta_d < MIN_DEPTH {
                    DVec3::Z
                } else {
                    let theta = d.solve_theta(theta_d)?;
                    let (sin_t, cos_t) = theta.sin_cos();
                    DVec3::new(sin_t * xd / theta_d, sin_t * yd / theta_d, cos_t)
                }
            }
        };

        Ok(dir.normalize())
    }

    /// Project a world point to a pixel coordinate through the pose.
    pub fn project_world(&self, point: DVec3) -> Result<DVec2, CameraError> {
        self.project(self.pose.world_to_camera(point))
    }

    /// Back-project a pixel coordinate to a world ray.
    ///
    /// # Returns
    ///
    /// The ray origin (camera position) and unit direction in world
    /// coordinates.
    pub fn world_ray(&self, pixel: DVec2) -> Result<(DVec3, DVec3), CameraError> {
        let dir = self.unproject(pixel)?;
        Ok(self.pose.camera_ray_to_world(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn nadir_camera(kind: CameraKind) -> Camera {
        let intrinsics = CameraIntrinsics::new(1000.0, 1000.0, 320.0, 240.0, 640, 480).unwrap();
        let pose =
            CameraPose::from_omega_phi_kappa(DVec3::new(0.0, 0.0, 100.0), 0.0, 0.0, 0.0).unwrap();
        Camera::new(intrinsics, kind, pose)
    }

    #[test]
    fn principal_ray_hits_principal_point() -> Result<(), CameraError> {
        let camera = nadir_camera(CameraKind::Pinhole);
        let px = camera.project(DVec3::new(0.0, 0.0, 50.0))?;
        assert_relative_eq!(px.x, 320.0, epsilon = 1e-12);
        assert_relative_eq!(px.y, 240.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn behind_camera_is_rejected() {
        let camera = nadir_camera(CameraKind::Pinhole);
        assert_eq!(
            camera.project(DVec3::new(0.0, 0.0, -5.0)),
            Err(CameraError::PointBehindCamera)
        );
        // a world point above a nadir camera is behind it
        assert_eq!(
            camera.project_world(DVec3::new(0.0, 0.0, 200.0)),
            Err(CameraError::PointBehindCamera)
        );
    }

    #[test]
    fn far_outside_sensor_is_rejected() {
        let camera = nadir_camera(CameraKind::Pinhole);
        assert_eq!(
            camera.project(DVec3::new(10.0, 0.0, 1.0)),
            Err(CameraError::OutsideSensorBounds)
        );
    }

    #[test]
    fn project_unproject_round_trip_brown() -> Result<(), CameraError> {
        let camera = nadir_camera(CameraKind::Brown(BrownConrady {
            k1: -0.1,
            k2: 0.02,
            k3: 0.0,
            p1: 1e-4,
            p2: -2e-4,
        }));

        let pixel = DVec2::new(400.0, 180.0);
        let ray = camera.unproject(pixel)?;
        let back = camera.project(ray * 25.0)?;

        assert_relative_eq!(back.x, pixel.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, pixel.y, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn project_unproject_round_trip_fisheye() -> Result<(), CameraError> {
        let camera = nadir_camera(CameraKind::Fisheye(Fisheye {
            k1: 0.03,
            k2: -0.005,
            k3: 0.001,
            k4: 0.0,
        }));

        let pixel = DVec2::new(100.0, 350.0);
        let ray = camera.unproject(pixel)?;
        let back = camera.project(ray * 10.0)?;

        assert_relative_eq!(back.x, pixel.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, pixel.y, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn nadir_world_projection() -> Result<(), CameraError> {
        let camera = nadir_camera(CameraKind::Pinhole);
        // the ground point under the camera maps to the principal point
        let px = camera.project_world(DVec3::new(0.0, 0.0, 0.0))?;
        assert_relative_eq!(px.x, 320.0, epsilon = 1e-9);
        assert_relative_eq!(px.y, 240.0, epsilon = 1e-9);

        // a point east of the camera moves along +u
        let px_east = camera.project_world(DVec3::new(5.0, 0.0, 0.0))?;
        assert!(px_east.x > 320.0);
        Ok(())
    }
}
