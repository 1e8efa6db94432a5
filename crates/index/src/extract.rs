//! Difference Extractor: raw ERA5 fluxes to aligned AET minus PET in mm.

use dedi_calendar::{YearRange, is_leap_year};
use dedi_io::{FileLayout, GridCoords, ReaderConfig, read_flux, read_grid};
use ndarray::{Array3, Zip};
use tracing::{debug, debug_span, info};

use crate::align::align_to_calendar;
use crate::error::DediError;
use crate::stack::DifferenceStack;

/// Factor taking metres of water equivalent (downward positive) to
/// millimetres of evaporation (upward positive).
pub const FLUX_TO_MM: f64 = -1000.0;

/// Convert one ERA5 flux value to millimetres with the sign flipped.
#[inline]
pub fn flux_to_mm(v: f64) -> f64 {
    v * FLUX_TO_MM
}

/// AET minus PET in millimetres from the two raw fields of `year`.
///
/// # Errors
///
/// Returns [`DediError::ShapeMismatch`] if the fields differ in shape.
pub fn difference_field(
    year: i32,
    aet: &Array3<f64>,
    pet: &Array3<f64>,
) -> Result<Array3<f64>, DediError> {
    if aet.dim() != pet.dim() {
        return Err(DediError::ShapeMismatch {
            year,
            what: "PET field",
            expected: aet.shape().to_vec(),
            got: pet.shape().to_vec(),
        });
    }
    Ok(Zip::from(aet)
        .and(pet)
        .map_collect(|&a, &p| flux_to_mm(a) - flux_to_mm(p)))
}

/// Supplier of one year's raw `(aet, pet)` fields in native units.
pub trait FluxSource {
    /// Read the raw actual and potential evapotranspiration for `year`.
    fn read_pair(&self, year: i32) -> Result<(Array3<f64>, Array3<f64>), DediError>;
}

/// [`FluxSource`] over per-year NetCDF files resolved by a [`FileLayout`].
#[derive(Debug, Clone)]
pub struct NetcdfFluxSource {
    layout: FileLayout,
    reader: ReaderConfig,
}

impl NetcdfFluxSource {
    /// Create a source reading the files named by `layout`.
    pub fn new(layout: FileLayout, reader: ReaderConfig) -> Self {
        Self { layout, reader }
    }

    /// File layout in use.
    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    /// Coordinates of the grid, taken from the AET file of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`DediError::Input`] if the file or its coordinates cannot be read.
    pub fn read_grid(&self, year: i32) -> Result<GridCoords, DediError> {
        read_grid(&self.layout.aet_path(year), &self.reader)
            .map_err(|source| DediError::Input { year, source })
    }
}

impl FluxSource for NetcdfFluxSource {
    fn read_pair(&self, year: i32) -> Result<(Array3<f64>, Array3<f64>), DediError> {
        let input = |source| DediError::Input { year, source };
        let aet = read_flux(&self.layout.aet_path(year), self.reader.aet_var()).map_err(input)?;
        let pet = read_flux(&self.layout.pet_path(year), self.reader.pet_var()).map_err(input)?;
        Ok((aet, pet))
    }
}

/// Read, difference and align every year of `years` into one stack.
///
/// Years are processed one at a time; each year's raw fields are released
/// once copied into the stack. The first failure aborts the extraction.
///
/// # Errors
///
/// Returns whatever `source` reports, or [`DediError::ShapeMismatch`] if a
/// year's fields disagree with each other, with the calendar, or with `grid`.
#[tracing::instrument(skip_all, fields(years = %years))]
pub fn extract_stack(
    years: YearRange,
    source: &impl FluxSource,
    grid: &GridCoords,
) -> Result<DifferenceStack, DediError> {
    let mut stack = DifferenceStack::allocate(years, grid.shape());

    for year in years {
        let _yr = debug_span!("year", year).entered();
        let (aet, pet) = source.read_pair(year)?;
        let diff = difference_field(year, &aet, &pet)?;
        drop((aet, pet));

        let (_, ny, nx) = diff.dim();
        if (ny, nx) != grid.shape() {
            return Err(DediError::ShapeMismatch {
                year,
                what: "spatial grid",
                expected: vec![grid.n_lat(), grid.n_lon()],
                got: vec![ny, nx],
            });
        }

        debug!(leap = is_leap_year(year), "aligning to 366-day calendar");
        let aligned = align_to_calendar(year, diff)?;
        stack.insert(year, &aligned)?;
    }

    info!(n_years = stack.n_years(), "difference stack complete");
    Ok(stack)
}
