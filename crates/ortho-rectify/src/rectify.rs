//! Tile-parallel orthorectification engine.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::DVec2;
use ortho_camera::Camera;
use ortho_raster::{BandValue, Raster, RasterSize};
use ortho_terrain::{Bounds, DemGrid, GeoTransform};
use rayon::prelude::*;

use crate::error::RectifyError;
use crate::grid::OrthoGrid;
use crate::interpolation::InterpolationMode;
use crate::intersect::{RayTerrainIntersector, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::mapper::TileMapper;
use crate::resample::resample_tile;

/// Fractions along each sensor border sampled for the footprint estimate.
const FOOTPRINT_EDGE_FRACTIONS: [f64; 3] = [0.0, 0.5, 1.0];

/// Configuration for one orthorectification run.
#[derive(Clone, Copy, Debug)]
pub struct RectifyParams {
    /// Output pixel size in world units
    pub resolution: f64,
    /// Rows per parallel tile
    pub tile_height: usize,
    /// Source interpolation kernel
    pub interpolation: InterpolationMode,
    /// Output no-data value, converted to the output band type
    pub nodata: f64,
    /// Ray intersection convergence tolerance in world units
    pub intersect_tolerance: f64,
    /// Ray intersection iteration cap
    pub intersect_max_iterations: usize,
}

impl RectifyParams {
    /// Parameters with defaults for everything but the resolution.
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            tile_height: 256,
            interpolation: InterpolationMode::Bilinear,
            nodata: 0.0,
            intersect_tolerance: DEFAULT_TOLERANCE,
            intersect_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A georeferenced output raster.
#[derive(Clone, Debug)]
pub struct OrthoImage<T, const C: usize> {
    /// The output pixel data
    pub raster: Raster<T, C>,
    /// The output geotransform
    pub transform: GeoTransform,
}

/// Drives the full remap: footprint estimation, output grid derivation,
/// tile mapping and resampling.
///
/// Holds read-only references for the duration of one run; tiles share
/// the camera and DEM without synchronization.
#[derive(Clone, Copy, Debug)]
pub struct Orthorectifier<'a> {
    camera: &'a Camera,
    dem: &'a DemGrid,
    params: RectifyParams,
}

impl<'a> Orthorectifier<'a> {
    /// Create an engine over a validated camera and DEM.
    ///
    /// # Errors
    ///
    /// Returns an error for degenerate run parameters. Geometry problems
    /// (no terrain under the camera) surface later, before tile work.
    pub fn new(
        camera: &'a Camera,
        dem: &'a DemGrid,
        params: RectifyParams,
    ) -> Result<Self, RectifyError> {
        if !(params.resolution > 0.0) || !params.resolution.is_finite() {
            return Err(RectifyError::InvalidResolution(params.resolution));
        }
        if params.tile_height == 0 {
            return Err(RectifyError::InvalidTileHeight);
        }
        if !(params.intersect_tolerance > 0.0) || params.intersect_max_iterations == 0 {
            return Err(RectifyError::InvalidIntersectParams);
        }
        Ok(Self {
            camera,
            dem,
            params,
        })
    }

    /// Estimate the ground footprint of the camera.
    ///
    /// Rays through a ring of sensor border pixels are cast against the
    /// terrain; the footprint is the bounding box of the hits. Rays that
    /// miss the terrain (above the horizon, off the DEM, unconverged) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when no border ray hits the terrain.
    pub fn footprint(&self) -> Result<Bounds, RectifyError> {
        let intersector = RayTerrainIntersector::with_params(
            self.dem,
            self.params.intersect_tolerance,
            self.params.intersect_max_iterations,
        );

        let k = self.camera.intrinsics();
        let (w, h) = ((k.width - 1) as f64, (k.height - 1) as f64);

        let mut bounds = Bounds::empty();
        let mut hits = 0usize;
        for fy in FOOTPRINT_EDGE_FRACTIONS {
            for fx in FOOTPRINT_EDGE_FRACTIONS {
                if fx == 0.5 && fy == 0.5 {
                    continue;
                }
                let pixel = DVec2::new(fx * w, fy * h);
                let Ok((origin, dir)) = self.camera.world_ray(pixel) else {
                    continue;
                };
                if let Some(hit) = intersector.intersect(origin, dir) {
                    bounds.include(hit.x, hit.y);
                    hits += 1;
                }
            }
        }

        if hits == 0 || bounds.is_empty() {
            return Err(RectifyError::EmptyFootprint);
        }

        log::debug!(
            "footprint from {hits} border rays: x [{:.1}, {:.1}], y [{:.1}, {:.1}]",
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
        );
        Ok(bounds)
    }

    /// Derive the output grid from the footprint clipped to the DEM.
    ///
    /// # Errors
    ///
    /// Returns an error when the footprint and the DEM extent do not
    /// overlap.
    pub fn output_grid(&self) -> Result<OrthoGrid, RectifyError> {
        let footprint = self.footprint()?;
        let extent = footprint
            .intersect(&self.dem.bounds())
            .ok_or(RectifyError::NoDemOverlap)?;
        let grid = OrthoGrid::from_bounds(extent, self.params.resolution, self.params.tile_height)?;
        log::info!(
            "output grid {}x{} at {} world units/pixel",
            grid.width(),
            grid.height(),
            self.params.resolution,
        );
        Ok(grid)
    }

    /// Orthorectify a source image onto the derived output grid.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration failures (source/sensor size
    /// mismatch, empty footprint, no DEM overlap). Per-pixel geometric
    /// failures become no-data output, never errors.
    pub fn rectify<T: BandValue, const C: usize>(
        &self,
        src: &Raster<T, C>,
    ) -> Result<OrthoImage<T, C>, RectifyError> {
        let cancel = AtomicBool::new(false);
        self.rectify_with_cancel(src, &cancel)
    }

    /// Orthorectify with cooperative cancellation.
    ///
    /// The flag is checked between tiles; once set, the run aborts with
    /// [`RectifyError::Cancelled`] and no output is produced.
    pub fn rectify_with_cancel<T: BandValue, const C: usize>(
        &self,
        src: &Raster<T, C>,
        cancel: &AtomicBool,
    ) -> Result<OrthoImage<T, C>, RectifyError> {
        let k = self.camera.intrinsics();
        if src.cols() != k.width || src.rows() != k.height {
            return Err(RectifyError::SourceSizeMismatch(
                src.cols(),
                src.rows(),
                k.width,
                k.height,
            ));
        }

        let grid = self.output_grid()?;
        let mapper = TileMapper::new(self.camera, self.dem, &grid);
        let nodata = T::from_f64(self.params.nodata);

        let tiles = grid.tiles();
        log::debug!("processing {} tiles of {} rows", tiles.len(), self.params.tile_height);

        let tile_buffers = tiles
            .par_iter()
            .map(|tile| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(RectifyError::Cancelled);
                }
                let map = mapper.map_tile(tile);
                let mut buf = vec![nodata; tile.height * grid.width() * C];
                resample_tile(src, &map, &mut buf, nodata, self.params.interpolation)?;
                Ok(buf)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // tiles are ordered row bands; concatenation rebuilds the raster
        let mut data = Vec::with_capacity(grid.width() * grid.height() * C);
        for buf in tile_buffers {
            data.extend_from_slice(&buf);
        }

        let raster = Raster::new(
            RasterSize {
                width: grid.width(),
                height: grid.height(),
            },
            data,
        )?;

        Ok(OrthoImage {
            raster,
            transform: *grid.transform(),
        })
    }
}
