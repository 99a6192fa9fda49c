use ortho_raster::Raster;

use crate::error::TerrainError;
use crate::transform::{Bounds, GeoTransform};

/// A digital elevation model: a single-band grid with a geotransform and
/// an optional no-data value.
///
/// Immutable after construction; all sampling goes through `&self`, so the
/// grid can be shared freely across worker threads.
#[derive(Clone, Debug)]
pub struct DemGrid {
    raster: Raster<f32, 1>,
    transform: GeoTransform,
    nodata: Option<f32>,
    min_elevation: f64,
    max_elevation: f64,
    mean_elevation: f64,
}

impl DemGrid {
    /// Create a DEM from an elevation raster.
    ///
    /// Elevation statistics over the valid cells are computed once here;
    /// they seed the ray intersector and bound the search.
    ///
    /// # Errors
    ///
    /// Returns an error if every cell is no-data.
    pub fn new(
        raster: Raster<f32, 1>,
        transform: GeoTransform,
        nodata: Option<f32>,
    ) -> Result<Self, TerrainError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &v in raster.as_slice() {
            if is_nodata(v, nodata) {
                continue;
            }
            let v = v as f64;
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            return Err(TerrainError::AllNoData);
        }

        log::debug!(
            "DEM {}x{}: elevation range [{min:.1}, {max:.1}], {count} valid cells",
            raster.width(),
            raster.height(),
        );

        Ok(Self {
            raster,
            transform,
            nodata,
            min_elevation: min,
            max_elevation: max,
            mean_elevation: sum / count as f64,
        })
    }

    /// The grid geotransform.
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// The grid width in cells.
    pub fn width(&self) -> usize {
        self.raster.width()
    }

    /// The grid height in cells.
    pub fn height(&self) -> usize {
        self.raster.height()
    }

    /// The world bounds of the full grid.
    pub fn bounds(&self) -> Bounds {
        self.transform
            .grid_bounds(self.raster.width(), self.raster.height())
    }

    /// Minimum valid elevation.
    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    /// Maximum valid elevation.
    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// Mean valid elevation. Default initial estimate for the ray
    /// intersector.
    pub fn mean_elevation(&self) -> f64 {
        self.mean_elevation
    }

    /// Sample the terrain elevation at a world point.
    ///
    /// Bilinear interpolation over the four surrounding cell centres.
    /// Returns `None` when the point falls outside the cell-centre hull of
    /// the grid or any of the four cells is no-data; the value is never
    /// extrapolated or guessed.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        let (col, row) = self.transform.world_to_pixel(x, y);

        // move into cell-centre coordinates
        let cf = col - 0.5;
        let rf = row - 0.5;

        if cf < 0.0 || rf < 0.0 {
            return None;
        }

        let c0 = cf as usize;
        let r0 = rf as usize;
        if c0 + 1 >= self.raster.width() || r0 + 1 >= self.raster.height() {
            return None;
        }

        let z00 = self.cell(r0, c0)?;
        let z01 = self.cell(r0, c0 + 1)?;
        let z10 = self.cell(r0 + 1, c0)?;
        let z11 = self.cell(r0 + 1, c0 + 1)?;

        let fu = cf - c0 as f64;
        let fv = rf - r0 as f64;

        let top = z00 * (1.0 - fu) + z01 * fu;
        let bottom = z10 * (1.0 - fu) + z11 * fu;

        Some(top * (1.0 - fv) + bottom * fv)
    }

    /// One cell value, `None` when no-data.
    #[inline]
    fn cell(&self, row: usize, col: usize) -> Option<f64> {
        let v = self.raster.as_slice()[row * self.raster.width() + col];
        if is_nodata(v, self.nodata) {
            None
        } else {
            Some(v as f64)
        }
    }
}

/// No-data comparison where a NaN sentinel matches NaN cells.
#[inline]
fn is_nodata(v: f32, nodata: Option<f32>) -> bool {
    match nodata {
        Some(nd) => v == nd || (v.is_nan() && nd.is_nan()),
        None => false,
    }
}
