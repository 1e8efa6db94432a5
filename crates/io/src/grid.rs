//! Shared longitude/latitude coordinate vectors.

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Longitude and latitude axes of the global grid.
///
/// Read once from an input file and reused unchanged for every output file.
/// Values keep the source order, so `lats` may run north to south.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoords {
    lons: Vec<f32>,
    lats: Vec<f32>,
}

impl GridCoords {
    /// Create a new `GridCoords` after checking that neither axis is empty.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if either axis has no points.
    pub fn new(lons: Vec<f32>, lats: Vec<f32>) -> Result<Self, IoError> {
        let mut c = ValidationCollector::new();
        c.check(lons.is_empty(), || "longitude axis is empty".into());
        c.check(lats.is_empty(), || "latitude axis is empty".into());
        c.finish()?;
        Ok(Self { lons, lats })
    }

    /// Longitude values in degrees east.
    pub fn lons(&self) -> &[f32] {
        &self.lons
    }

    /// Latitude values in degrees north.
    pub fn lats(&self) -> &[f32] {
        &self.lats
    }

    /// Number of longitude points.
    pub fn n_lon(&self) -> usize {
        self.lons.len()
    }

    /// Number of latitude points.
    pub fn n_lat(&self) -> usize {
        self.lats.len()
    }

    /// Spatial shape as `(n_lat, n_lon)`, matching the trailing axes of a field.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_lat(), self.n_lon())
    }
}
