//! Lens distortion models on normalized image-plane coordinates.
//!
//! The forward direction (ideal -> distorted) is a closed-form polynomial;
//! the inverse has no closed form and is solved iteratively with explicit
//! iteration caps so behaviour stays bounded on degenerate coefficients.

use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Iteration cap for the Brown-Conrady fixed-point inversion.
const UNDISTORT_MAX_ITERATIONS: usize = 50;

/// Convergence tolerance on the normalized-plane residual.
const UNDISTORT_TOLERANCE: f64 = 1e-10;

/// Iteration cap for the fisheye Newton solve.
const THETA_MAX_ITERATIONS: usize = 20;

/// Convergence tolerance on the distorted angle residual.
const THETA_TOLERANCE: f64 = 1e-12;

/// Brown-Conrady polynomial distortion with three radial and two
/// tangential coefficients.
///
/// Compatible with ODM / OpenSFM *brown* parameter estimates and the
/// 5-coefficient OpenCV model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrownConrady {
    /// The first radial distortion coefficient
    pub k1: f64,
    /// The second radial distortion coefficient
    pub k2: f64,
    /// The third radial distortion coefficient
    pub k3: f64,
    /// The first tangential distortion coefficient
    pub p1: f64,
    /// The second tangential distortion coefficient
    pub p2: f64,
}

impl BrownConrady {
    /// Apply forward distortion to a normalized image-plane point.
    pub fn distort(&self, x: f64, y: f64) -> (f64, f64) {
        let r2 = x * x + y * y;
        let r4 = r2 * r2;
        let r6 = r4 * r2;

        let radial = 1.0 + self.k1 * r2 + self.k2 * r4 + self.k3 * r6;

        let xd = x * radial + 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;

        (xd, yd)
    }

    /// Remove distortion from a normalized image-plane point.
    ///
    /// Fixed-point iteration seeded with the distorted point: re-estimate
    /// the distorted position from the current undistorted candidate and
    /// step against the residual until it falls below tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the residual does not converge within the
    /// iteration cap. Callers treat the pixel as no-data.
    pub fn undistort(&self, xd: f64, yd: f64) -> Result<(f64, f64), CameraError> {
        let (mut x, mut y) = (xd, yd);

        for _ in 0..UNDISTORT_MAX_ITERATIONS {
            let (xe, ye) = self.distort(x, y);
            let (ex, ey) = (xe - xd, ye - yd);

            if ex * ex + ey * ey < UNDISTORT_TOLERANCE * UNDISTORT_TOLERANCE {
                return Ok((x, y));
            }

            x -= ex;
            y -= ey;
        }

        let (xe, ye) = self.distort(x, y);
        let residual = ((xe - xd).powi(2) + (ye - yd).powi(2)).sqrt();
        Err(CameraError::UndistortDidNotConverge(residual))
    }
}

/// Equidistant fisheye distortion with four angular coefficients.
///
/// The distorted radius is the Kannala-Brandt polynomial of the incidence
/// angle, `theta_d = theta (1 + k1 theta^2 + k2 theta^4 + k3 theta^6 +
/// k4 theta^8)`, matching ODM / OpenSFM and OpenCV *fisheye* estimates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fisheye {
    /// The first angular distortion coefficient
    pub k1: f64,
    /// The second angular distortion coefficient
    pub k2: f64,
    /// The third angular distortion coefficient
    pub k3: f64,
    /// The fourth angular distortion coefficient
    pub k4: f64,
}

impl Fisheye {
    /// Map the incidence angle to the distorted angle.
    pub fn theta_d(&self, theta: f64) -> f64 {
        let t2 = theta * theta;
        theta * (1.0 + t2 * (self.k1 + t2 * (self.k2 + t2 * (self.k3 + t2 * self.k4))))
    }

    /// Recover the incidence angle from the distorted angle via Newton
    /// iteration seeded with `theta_d` itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the Newton step degenerates or the residual
    /// does not converge within the iteration cap.
    pub fn solve_theta(&self, theta_d: f64) -> Result<f64, CameraError> {
        let mut theta = theta_d;

        for _ in 0..THETA_MAX_ITERATIONS {
            let t2 = theta * theta;
            let f = self.theta_d(theta) - theta_d;

            if f.abs() < THETA_TOLERANCE {
                return Ok(theta);
            }

            let df = 1.0
                + t2 * (3.0 * self.k1
                    + t2 * (5.0 * self.k2 + t2 * (7.0 * self.k3 + t2 * 9.0 * self.k4)));
            if df.abs() < f64::EPSILON {
                return Err(CameraError::UndistortDidNotConverge(f.abs()));
            }

            theta -= f / df;
        }

        let residual = (self.theta_d(theta) - theta_d).abs();
        Err(CameraError::UndistortDidNotConverge(residual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn brown_zero_coefficients_is_identity() {
        let d = BrownConrady::default();
        assert_eq!(d.distort(0.25, -0.1), (0.25, -0.1));
    }

    #[test]
    fn brown_round_trip() -> Result<(), CameraError> {
        let d = BrownConrady {
            k1: -0.12,
            k2: 0.05,
            k3: -0.002,
            p1: 1.2e-4,
            p2: -3.0e-4,
        };

        let (x, y) = (0.3, -0.22);
        let (xd, yd) = d.distort(x, y);
        let (xu, yu) = d.undistort(xd, yd)?;

        assert_relative_eq!(xu, x, epsilon = 1e-8);
        assert_relative_eq!(yu, y, epsilon = 1e-8);
        Ok(())
    }

    #[test]
    fn brown_divergent_coefficients_error() {
        // far outside the convergence basin of the fixed-point iteration
        let d = BrownConrady {
            k1: 50.0,
            k2: 0.0,
            k3: 0.0,
            p1: 0.0,
            p2: 0.0,
        };
        assert!(matches!(
            d.undistort(2.0, 2.0),
            Err(CameraError::UndistortDidNotConverge(_))
        ));
    }

    #[test]
    fn fisheye_round_trip() -> Result<(), CameraError> {
        let d = Fisheye {
            k1: 0.034,
            k2: -0.007,
            k3: 0.0009,
            k4: -0.0002,
        };

        let theta = 0.7;
        let theta_d = d.theta_d(theta);
        let solved = d.solve_theta(theta_d)?;

        assert_relative_eq!(solved, theta, epsilon = 1e-10);
        Ok(())
    }

    #[test]
    fn fisheye_zero_angle() -> Result<(), CameraError> {
        let d = Fisheye::default();
        assert_eq!(d.theta_d(0.0), 0.0);
        assert_eq!(d.solve_theta(0.0)?, 0.0);
        Ok(())
    }
}
