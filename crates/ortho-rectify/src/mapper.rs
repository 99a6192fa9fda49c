//! Per-tile mapping from output pixels to source image coordinates.

use glam::DVec3;
use ortho_camera::Camera;
use ortho_terrain::DemGrid;

use crate::grid::{OrthoGrid, TileWindow};

/// Per-tile map from output pixel (row, col) to fractional source pixel
/// (u, v).
///
/// Failed pixels carry [`f32::NAN`] in both planes; the resampler turns
/// them into no-data output. Built and consumed within one tile's
/// processing.
#[derive(Clone, Debug)]
pub struct PixelMap {
    width: usize,
    height: usize,
    map_u: Vec<f32>,
    map_v: Vec<f32>,
}

impl PixelMap {
    /// Sentinel marking an unmappable output pixel.
    pub const NODATA: f32 = f32::NAN;

    /// Create a map with every entry marked no-data.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            map_u: vec![Self::NODATA; width * height],
            map_v: vec![Self::NODATA; width * height],
        }
    }

    /// The map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The u (source x) plane.
    pub fn map_u(&self) -> &[f32] {
        &self.map_u
    }

    /// The v (source y) plane.
    pub fn map_v(&self) -> &[f32] {
        &self.map_v
    }

    /// Store a source coordinate for one output pixel.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, u: f32, v: f32) {
        let i = row * self.width + col;
        self.map_u[i] = u;
        self.map_v[i] = v;
    }

    /// Whether the entry at a flat index holds a usable coordinate.
    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        self.map_u[index].is_finite() && self.map_v[index].is_finite()
    }
}

/// Builds the pixel map of an output tile from the inverse ortho geometry.
///
/// For each output pixel the planimetric position is known from the grid,
/// the elevation comes from sampling the DEM directly, and the camera
/// projects the resulting world point into the source image. Terrain is
/// assumed visible at its nearest intersection; facades occluding terrain
/// behind them are not detected (no z-buffer pass).
#[derive(Clone, Copy, Debug)]
pub struct TileMapper<'a> {
    camera: &'a Camera,
    dem: &'a DemGrid,
    grid: &'a OrthoGrid,
}

impl<'a> TileMapper<'a> {
    /// Create a mapper over read-only camera, terrain and grid.
    pub fn new(camera: &'a Camera, dem: &'a DemGrid, grid: &'a OrthoGrid) -> Self {
        Self { camera, dem, grid }
    }

    /// Build the pixel map for one tile.
    ///
    /// Per-pixel failures (DEM no-data, point behind camera, projection
    /// outside the sensor margin, distortion divergence) leave the entry
    /// at the no-data sentinel; they never abort the tile.
    pub fn map_tile(&self, tile: &TileWindow) -> PixelMap {
        let mut map = PixelMap::new(self.grid.width(), tile.height);
        let transform = self.grid.transform();

        for tile_row in 0..tile.height {
            let grid_row = tile.row_off + tile_row;
            for col in 0..self.grid.width() {
                let (x, y) = transform.pixel_center(grid_row, col);

                let Some(z) = self.dem.elevation_at(x, y) else {
                    continue;
                };

                if let Ok(px) = self.camera.project_world(DVec3::new(x, y, z)) {
                    map.set(tile_row, col, px.x as f32, px.y as f32);
                }
            }
        }

        map
    }
}
