/// An error type for camera construction and per-point projection.
///
/// Construction variants are fatal configuration errors; the per-point
/// variants are recovered by callers as no-data pixels.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CameraError {
    /// Error when a focal length is not strictly positive.
    #[error("Focal length must be > 0, got ({0}, {1})")]
    InvalidFocalLength(f64, f64),

    /// Error when the sensor dimensions are zero.
    #[error("Sensor dimensions must be non-zero, got {0}x{1}")]
    InvalidSensorSize(usize, usize),

    /// Error when a rotation matrix is not orthonormal.
    #[error("Rotation matrix is not orthonormal")]
    NonOrthonormalRotation,

    /// Error when the same camera id is registered twice.
    #[error("Duplicate camera id: '{0}'")]
    DuplicateCameraId(String),

    /// Error when a point lies on or behind the projection centre.
    #[error("Point is behind the camera")]
    PointBehindCamera,

    /// Error when a projection falls outside the sensor bounds margin.
    #[error("Projection is outside the sensor bounds")]
    OutsideSensorBounds,

    /// Error when iterative distortion inversion does not converge.
    #[error("Distortion inversion did not converge (residual {0})")]
    UndistortDidNotConverge(f64),
}
