use ortho_raster::RasterError;

/// An error type for the orthorectification engine.
///
/// Every variant is a fatal configuration or run-level failure; per-pixel
/// geometric failures never surface here, they become no-data pixels.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RectifyError {
    /// Error when the output resolution is not strictly positive.
    #[error("Output resolution must be > 0, got {0}")]
    InvalidResolution(f64),

    /// Error when the tile height is zero.
    #[error("Tile height must be > 0")]
    InvalidTileHeight,

    /// Error when intersector tolerance or iteration cap is degenerate.
    #[error("Intersection tolerance and iteration cap must be > 0")]
    InvalidIntersectParams,

    /// Error when the source image size does not match the camera sensor.
    #[error("Source image size ({0}x{1}) does not match the camera sensor ({2}x{3})")]
    SourceSizeMismatch(usize, usize, usize, usize),

    /// Error when no border ray intersects the terrain.
    #[error("Camera footprint does not intersect the terrain")]
    EmptyFootprint,

    /// Error when the footprint and DEM extent do not overlap.
    #[error("Output extent does not intersect the DEM extent")]
    NoDemOverlap,

    /// Error when a run was cancelled between tiles.
    #[error("Orthorectification run was cancelled")]
    Cancelled,

    /// Error from the underlying raster container.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
