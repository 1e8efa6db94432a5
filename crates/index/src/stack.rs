//! Multi-year stack of calendar-aligned difference fields.

use dedi_calendar::{ALIGNED_DAYS, YearRange};
use ndarray::{Array3, Array4, ArrayView3, ArrayView4, Axis, Slice};

use crate::error::DediError;

/// Difference fields for every year of a range, `(year, 366, lat, lon)`.
///
/// Slice `i` holds year `years.start() + i`. Non-leap years carry NaN in
/// slot 59.
#[derive(Debug, Clone)]
pub struct DifferenceStack {
    years: YearRange,
    data: Array4<f64>,
}

impl DifferenceStack {
    /// Wrap an already-aligned 4-D array.
    ///
    /// # Errors
    ///
    /// Returns [`DediError::ShapeMismatch`] unless the leading axes are
    /// `years.len()` by 366.
    pub fn new(years: YearRange, data: Array4<f64>) -> Result<Self, DediError> {
        let (ny, nd, nlat, nlon) = data.dim();
        if ny != years.len() || nd != ALIGNED_DAYS {
            return Err(DediError::ShapeMismatch {
                year: years.start(),
                what: "difference stack",
                expected: vec![years.len(), ALIGNED_DAYS, nlat, nlon],
                got: vec![ny, nd, nlat, nlon],
            });
        }
        Ok(Self { years, data })
    }

    /// NaN-filled stack for `years` on a `(n_lat, n_lon)` grid.
    pub(crate) fn allocate(years: YearRange, (n_lat, n_lon): (usize, usize)) -> Self {
        let data = Array4::from_elem((years.len(), ALIGNED_DAYS, n_lat, n_lon), f64::NAN);
        Self { years, data }
    }

    /// Copy one aligned year into its slice.
    pub(crate) fn insert(&mut self, year: i32, aligned: &Array3<f64>) -> Result<(), DediError> {
        let Some(pos) = self.years.position(year) else {
            return Err(DediError::YearOutsideStack {
                year,
                range: self.years,
            });
        };
        let mut slot = self.data.index_axis_mut(Axis(0), pos);
        if slot.dim() != aligned.dim() {
            return Err(DediError::ShapeMismatch {
                year,
                what: "aligned difference field",
                expected: slot.shape().to_vec(),
                got: aligned.shape().to_vec(),
            });
        }
        slot.assign(aligned);
        Ok(())
    }

    /// Years covered, in slice order.
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Number of year slices.
    pub fn n_years(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Spatial shape `(n_lat, n_lon)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        let (_, _, nlat, nlon) = self.data.dim();
        (nlat, nlon)
    }

    /// The full 4-D array.
    pub fn data(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    /// The first `n` year slices, or fewer if the stack is shorter.
    pub fn leading(&self, n: usize) -> ArrayView4<'_, f64> {
        let n = n.min(self.n_years());
        self.data.slice_axis(Axis(0), Slice::from(..n))
    }

    /// Aligned field of one year, if it is in the stack.
    pub fn year(&self, year: i32) -> Option<ArrayView3<'_, f64>> {
        self.years
            .position(year)
            .map(|pos| self.data.index_axis(Axis(0), pos))
    }

    /// Iterate `(year, aligned field)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, ArrayView3<'_, f64>)> {
        self.years.iter().zip(self.data.outer_iter())
    }
}
