//! Climatology Builder: per-slot mean and spread over the reference window.

use dedi_calendar::ALIGNED_DAYS;
use dedi_stats::nan_mean_sd_axis0;
use ndarray::{Array3, ArrayView3};
use tracing::info;

use crate::error::DediError;
use crate::stack::DifferenceStack;

/// Number of leading years forming the reference window.
pub const REFERENCE_YEARS: usize = 30;

/// Delta degrees of freedom for the standard deviation (sample estimator).
pub const SAMPLE_DDOF: usize = 1;

/// Day-of-year mean and sample standard deviation, each `(366, lat, lon)`.
#[derive(Debug, Clone)]
pub struct Climatology {
    mean: Array3<f64>,
    std: Array3<f64>,
}

impl Climatology {
    /// Build from precomputed fields.
    ///
    /// # Errors
    ///
    /// Returns [`DediError::ClimatologyShape`] unless `mean` has 366 leading
    /// slots and `std` has the same shape.
    pub fn new(mean: Array3<f64>, std: Array3<f64>) -> Result<Self, DediError> {
        let (nd, ny, nx) = mean.dim();
        if nd != ALIGNED_DAYS {
            return Err(DediError::ClimatologyShape {
                field: "mean",
                expected: vec![ALIGNED_DAYS, ny, nx],
                got: mean.shape().to_vec(),
            });
        }
        if std.dim() != mean.dim() {
            return Err(DediError::ClimatologyShape {
                field: "std",
                expected: mean.shape().to_vec(),
                got: std.shape().to_vec(),
            });
        }
        Ok(Self { mean, std })
    }

    /// Reduce the first [`REFERENCE_YEARS`] slices of `stack`.
    ///
    /// NaN entries are skipped, so slot 59 draws only on leap years. A cell
    /// with one valid value has NaN spread; with none, NaN mean as well.
    ///
    /// # Errors
    ///
    /// Returns [`DediError::InsufficientYears`] if the stack is shorter than
    /// the reference window.
    #[tracing::instrument(skip_all, fields(n_years = stack.n_years()))]
    pub fn from_stack(stack: &DifferenceStack) -> Result<Self, DediError> {
        let reference = stack
            .years()
            .reference_window(REFERENCE_YEARS)
            .map_err(|_| DediError::InsufficientYears {
                have: stack.n_years(),
                need: REFERENCE_YEARS,
            })?;
        let (mean, std) = nan_mean_sd_axis0(stack.leading(reference.len()), SAMPLE_DDOF);

        info!(%reference, "climatology computed");
        Ok(Self { mean, std })
    }

    /// Mean per slot and cell.
    pub fn mean(&self) -> ArrayView3<'_, f64> {
        self.mean.view()
    }

    /// Sample standard deviation per slot and cell.
    pub fn std(&self) -> ArrayView3<'_, f64> {
        self.std.view()
    }

    /// Spatial shape `(n_lat, n_lon)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        let (_, ny, nx) = self.mean.dim();
        (ny, nx)
    }
}
