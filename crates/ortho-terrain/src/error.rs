use ortho_raster::RasterError;

/// An error type for terrain grids.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TerrainError {
    /// Error when a geotransform pixel size is zero or not finite.
    #[error("Pixel size must be finite and non-zero, got ({0}, {1})")]
    InvalidPixelSize(f64, f64),

    /// Error when every cell of a DEM is no-data.
    #[error("DEM contains no valid elevation cells")]
    AllNoData,

    /// Error from the underlying raster container.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
