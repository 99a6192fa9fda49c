/// An error type for raster containers.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RasterError {
    /// Error when the data length does not match the raster shape.
    #[error("Data length ({0}) does not match the raster size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a raster dimension is zero.
    #[error("Raster dimensions must be non-zero, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when a pixel coordinate lies outside the raster.
    #[error("Pixel ({0}, {1}) is outside the raster ({2}x{3})")]
    PixelOutOfBounds(usize, usize, usize, usize),
}
