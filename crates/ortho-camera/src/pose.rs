use glam::{DMat3, DVec3};

use crate::error::CameraError;

/// Tolerance for the orthonormality check on rotation matrices.
const ORTHONORMAL_TOLERANCE: f64 = 1e-8;

/// Exterior pose of a camera: world position and orientation.
///
/// The stored rotation maps camera-frame directions to world directions.
/// The camera frame is right-handed with +z along the optical axis, +x to
/// the right and +y down the image, so at zero Euler angles the camera
/// points at nadir with image rows increasing southward.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    position: DVec3,
    cam_to_world: DMat3,
    world_to_cam: DMat3,
}

/// Axis flip mapping the photogrammetric (PATB) camera axes onto the
/// computer-vision convention used here.
fn axis_flip() -> DMat3 {
    DMat3::from_diagonal(DVec3::new(1.0, -1.0, -1.0))
}

impl CameraPose {
    /// Create a pose from a camera-to-world rotation matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not orthonormal with positive
    /// determinant.
    pub fn from_rotation(position: DVec3, cam_to_world: DMat3) -> Result<Self, CameraError> {
        let gram = cam_to_world * cam_to_world.transpose();
        if !gram.abs_diff_eq(DMat3::IDENTITY, ORTHONORMAL_TOLERANCE)
            || (cam_to_world.determinant() - 1.0).abs() > ORTHONORMAL_TOLERANCE
        {
            return Err(CameraError::NonOrthonormalRotation);
        }
        Ok(Self {
            position,
            cam_to_world,
            world_to_cam: cam_to_world.transpose(),
        })
    }

    /// Create a pose from omega, phi, kappa angles in radians.
    ///
    /// Angles follow the photogrammetric convention `R = Rx(omega) *
    /// Ry(phi) * Rz(kappa)`; zero angles place the optical axis at nadir.
    pub fn from_omega_phi_kappa(
        position: DVec3,
        omega: f64,
        phi: f64,
        kappa: f64,
    ) -> Result<Self, CameraError> {
        let rotation = DMat3::from_rotation_x(omega)
            * DMat3::from_rotation_y(phi)
            * DMat3::from_rotation_z(kappa)
            * axis_flip();
        Self::from_rotation(position, rotation)
    }

    /// Create a pose from roll, pitch, yaw angles in radians.
    ///
    /// Composed as `Rz(yaw) * Ry(pitch) * Rx(roll)` about the world axes,
    /// then aligned to the nadir-at-zero camera convention. Converting
    /// navigation-frame angles into this world frame is the ingestion
    /// layer's job.
    pub fn from_roll_pitch_yaw(
        position: DVec3,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> Result<Self, CameraError> {
        let rotation = DMat3::from_rotation_z(yaw)
            * DMat3::from_rotation_y(pitch)
            * DMat3::from_rotation_x(roll)
            * axis_flip();
        Self::from_rotation(position, rotation)
    }

    /// The camera position in world coordinates.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// The camera-to-world rotation.
    pub fn rotation(&self) -> DMat3 {
        self.cam_to_world
    }

    /// Transform a world point into the camera frame.
    #[inline]
    pub fn world_to_camera(&self, point: DVec3) -> DVec3 {
        self.world_to_cam * (point - self.position)
    }

    /// Transform a camera-frame point into the world frame.
    #[inline]
    pub fn camera_to_world(&self, point: DVec3) -> DVec3 {
        self.cam_to_world * point + self.position
    }

    /// Turn a camera-frame ray direction into a world ray.
    ///
    /// # Returns
    ///
    /// The ray origin (the camera position) and the rotated direction.
    #[inline]
    pub fn camera_ray_to_world(&self, direction: DVec3) -> (DVec3, DVec3) {
        (self.position, self.cam_to_world * direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_angles_point_nadir() -> Result<(), CameraError> {
        let pose = CameraPose::from_omega_phi_kappa(DVec3::new(10.0, 20.0, 100.0), 0.0, 0.0, 0.0)?;

        let (origin, dir) = pose.camera_ray_to_world(DVec3::Z);
        assert_eq!(origin, DVec3::new(10.0, 20.0, 100.0));
        assert_relative_eq!(dir.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dir.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn world_camera_round_trip() -> Result<(), CameraError> {
        let pose = CameraPose::from_omega_phi_kappa(
            DVec3::new(-5.0, 3.0, 50.0),
            0.1,
            -0.2,
            1.3,
        )?;

        let p = DVec3::new(12.0, -7.0, 2.0);
        let back = pose.camera_to_world(pose.world_to_camera(p));

        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn ground_point_in_front_has_positive_depth() -> Result<(), CameraError> {
        let pose = CameraPose::from_omega_phi_kappa(DVec3::new(0.0, 0.0, 100.0), 0.0, 0.0, 0.0)?;
        let p_cam = pose.world_to_camera(DVec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(p_cam.z, 100.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn rejects_non_orthonormal() {
        let scaled = DMat3::from_diagonal(DVec3::new(2.0, 1.0, 1.0));
        assert_eq!(
            CameraPose::from_rotation(DVec3::ZERO, scaled).unwrap_err(),
            CameraError::NonOrthonormalRotation
        );

        let reflection = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0));
        assert_eq!(
            CameraPose::from_rotation(DVec3::ZERO, reflection).unwrap_err(),
            CameraError::NonOrthonormalRotation
        );
    }
}
