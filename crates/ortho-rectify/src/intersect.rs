//! Ray-terrain intersection by bounded vertical search.

use glam::DVec3;
use ortho_terrain::DemGrid;

/// Default convergence tolerance on the elevation estimate, in world units.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default iteration cap for the vertical search.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// Rays closer to horizontal than this have no usable terrain
/// intersection.
const MIN_VERTICAL_COMPONENT: f64 = 1e-6;

/// Finds where a world ray meets the terrain surface of a DEM.
///
/// The search projects the ray to the current elevation estimate, samples
/// the DEM at the resulting planimetric point and repeats until the
/// estimate is stable. Convergence criteria are explicit: a fixed
/// tolerance and a fixed iteration cap. An unconverged estimate is never
/// returned.
#[derive(Clone, Copy, Debug)]
pub struct RayTerrainIntersector<'a> {
    dem: &'a DemGrid,
    tolerance: f64,
    max_iterations: usize,
}

impl<'a> RayTerrainIntersector<'a> {
    /// Create an intersector with default convergence parameters.
    pub fn new(dem: &'a DemGrid) -> Self {
        Self::with_params(dem, DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }

    /// Create an intersector with explicit tolerance and iteration cap.
    pub fn with_params(dem: &'a DemGrid, tolerance: f64, max_iterations: usize) -> Self {
        Self {
            dem,
            tolerance,
            max_iterations,
        }
    }

    /// Intersect a ray with the terrain, seeding the search with the mean
    /// DEM elevation.
    ///
    /// # Arguments
    ///
    /// * `origin` - The ray origin in world coordinates.
    /// * `direction` - The ray direction; does not need to be normalized.
    ///
    /// # Returns
    ///
    /// The world intersection point, or `None` for near-horizontal rays,
    /// rays that leave DEM coverage or hit no-data, intersections behind
    /// the origin, and searches that do not converge within the cap.
    pub fn intersect(&self, origin: DVec3, direction: DVec3) -> Option<DVec3> {
        self.intersect_seeded(origin, direction, self.dem.mean_elevation())
    }

    /// Intersect a ray with the terrain from an explicit elevation seed.
    ///
    /// A seed taken from a neighbouring pixel's solution speeds up
    /// convergence; correctness does not depend on it.
    pub fn intersect_seeded(
        &self,
        origin: DVec3,
        direction: DVec3,
        seed_elevation: f64,
    ) -> Option<DVec3> {
        let dir = direction.normalize();
        if !dir.is_finite() || dir.z.abs() < MIN_VERTICAL_COMPONENT {
            return None;
        }

        let mut z_est = seed_elevation.clamp(self.dem.min_elevation(), self.dem.max_elevation());

        for _ in 0..self.max_iterations {
            let t = (z_est - origin.z) / dir.z;
            if t <= 0.0 {
                return None;
            }

            let x = origin.x + t * dir.x;
            let y = origin.y + t * dir.y;
            let z_new = self.dem.elevation_at(x, y)?;

            if (z_new - z_est).abs() < self.tolerance {
                // place the result back on the ray at the settled elevation
                let t = (z_new - origin.z) / dir.z;
                if t <= 0.0 {
                    return None;
                }
                return Some(DVec3::new(origin.x + t * dir.x, origin.y + t * dir.y, z_new));
            }

            z_est = z_new;
        }

        None
    }
}
