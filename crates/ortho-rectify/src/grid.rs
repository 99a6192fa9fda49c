//! Output grid definition and tiling.

use ortho_terrain::{Bounds, GeoTransform, TerrainError};

use crate::error::RectifyError;

/// The target output grid: a north-up square-pixel raster extent split
/// into full-width row bands for parallel processing.
#[derive(Clone, Debug)]
pub struct OrthoGrid {
    transform: GeoTransform,
    width: usize,
    height: usize,
    tile_height: usize,
}

/// One output tile: a band of whole rows owned by a single worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileWindow {
    /// First output row of the tile
    pub row_off: usize,
    /// Number of rows in the tile
    pub height: usize,
}

impl OrthoGrid {
    /// Derive a grid covering `bounds` at the given resolution.
    ///
    /// The origin is snapped outward onto a whole multiple of the
    /// resolution so repeated runs over overlapping extents stay pixel
    /// aligned.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive resolution or zero tile height.
    pub fn from_bounds(
        bounds: Bounds,
        resolution: f64,
        tile_height: usize,
    ) -> Result<Self, RectifyError> {
        if !(resolution > 0.0) || !resolution.is_finite() {
            return Err(RectifyError::InvalidResolution(resolution));
        }
        if tile_height == 0 {
            return Err(RectifyError::InvalidTileHeight);
        }
        if bounds.is_empty() {
            return Err(RectifyError::NoDemOverlap);
        }

        let origin_x = (bounds.min_x / resolution).floor() * resolution;
        let origin_y = (bounds.max_y / resolution).ceil() * resolution;
        let width = ((bounds.max_x - origin_x) / resolution).ceil() as usize;
        let height = ((origin_y - bounds.min_y) / resolution).ceil() as usize;
        if width == 0 || height == 0 {
            return Err(RectifyError::NoDemOverlap);
        }

        let transform = GeoTransform::new(origin_x, origin_y, resolution, -resolution)
            .map_err(|_: TerrainError| RectifyError::InvalidResolution(resolution))?;

        Ok(Self {
            transform,
            width,
            height,
            tile_height,
        })
    }

    /// The grid geotransform.
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// The output width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The output height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The world bounds of the grid.
    pub fn bounds(&self) -> Bounds {
        self.transform.grid_bounds(self.width, self.height)
    }

    /// Split the grid into row-band tiles, top to bottom.
    pub fn tiles(&self) -> Vec<TileWindow> {
        (0..self.height)
            .step_by(self.tile_height)
            .map(|row_off| TileWindow {
                row_off,
                height: self.tile_height.min(self.height - row_off),
            })
            .collect()
    }
}
