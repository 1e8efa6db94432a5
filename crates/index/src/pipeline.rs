//! End-to-end driver: extract, build the climatology, standardize, write.

use dedi_calendar::{YearRange, is_leap_year};
use dedi_io::{FileLayout, GridCoords, WriterConfig, write_climatology, write_index};
use ndarray::ArrayView3;
use tracing::{debug, debug_span, info};

use crate::climatology::{Climatology, REFERENCE_YEARS};
use crate::error::DediError;
use crate::extract::{FluxSource, extract_stack};
use crate::standardize::standardize;

/// Destination for finished index years.
pub trait IndexSink {
    /// Persist the index of `year`, `(days, lat, lon)`.
    fn write_year(&mut self, year: i32, index: ArrayView3<'_, f64>) -> Result<(), DediError>;
}

/// [`IndexSink`] writing one NetCDF file per year at the layout's output path.
#[derive(Debug, Clone)]
pub struct NetcdfIndexSink {
    layout: FileLayout,
    grid: GridCoords,
    writer: WriterConfig,
}

impl NetcdfIndexSink {
    /// Create a sink writing on `grid` with the given writer settings.
    pub fn new(layout: FileLayout, grid: GridCoords, writer: WriterConfig) -> Self {
        Self {
            layout,
            grid,
            writer,
        }
    }
}

impl IndexSink for NetcdfIndexSink {
    fn write_year(&mut self, year: i32, index: ArrayView3<'_, f64>) -> Result<(), DediError> {
        let path = self.layout.output_path(year);
        write_index(&path, year, index, &self.grid, &self.writer)
            .map_err(|source| DediError::Output { year, source })?;
        info!(year, path = %path.display(), "wrote index");
        Ok(())
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Years written, in order.
    pub years: YearRange,
    /// Reference window used for the climatology.
    pub reference: YearRange,
    /// Number of leap years among those written.
    pub n_leap: usize,
}

/// Compute and write the index for every year of `years`.
///
/// The range is checked against the reference window before any input is
/// read. Years are written in order; a failure stops the run and leaves
/// years already written in place.
///
/// # Errors
///
/// Returns [`DediError::Calendar`] if `years` is shorter than the reference
/// window, otherwise the first extraction, standardization or sink error.
#[tracing::instrument(skip_all, fields(years = %years))]
pub fn run_index(
    years: YearRange,
    source: &impl FluxSource,
    grid: &GridCoords,
    sink: &mut impl IndexSink,
) -> Result<RunSummary, DediError> {
    let reference = years.reference_window(REFERENCE_YEARS)?;

    info!("extracting difference fields");
    let stack = extract_stack(years, source, grid)?;
    let clim = Climatology::from_stack(&stack)?;

    let mut n_leap = 0;
    for (year, aligned) in stack.iter() {
        let _yr = debug_span!("year", year).entered();
        let leap = is_leap_year(year);
        debug!(leap, "standardizing");
        n_leap += usize::from(leap);

        let index = standardize(year, aligned, &clim)?;
        sink.write_year(year, index.view())?;
    }

    info!(n_years = years.len(), n_leap, "index run complete");
    Ok(RunSummary {
        years,
        reference,
        n_leap,
    })
}

/// Build the climatology from the reference window of `years` alone.
///
/// Only the first [`REFERENCE_YEARS`] years are read.
///
/// # Errors
///
/// Returns [`DediError::Calendar`] if `years` is too short, otherwise the
/// first extraction error.
#[tracing::instrument(skip_all, fields(years = %years))]
pub fn run_climatology(
    years: YearRange,
    source: &impl FluxSource,
    grid: &GridCoords,
) -> Result<Climatology, DediError> {
    let reference = years.reference_window(REFERENCE_YEARS)?;
    let stack = extract_stack(reference, source, grid)?;
    Climatology::from_stack(&stack)
}

/// Write `clim` to the layout's climatology path.
///
/// # Errors
///
/// Returns [`DediError::Io`] if the file cannot be written.
pub fn export_climatology(
    clim: &Climatology,
    layout: &FileLayout,
    grid: &GridCoords,
    writer: &WriterConfig,
) -> Result<(), DediError> {
    let path = layout.climatology_path();
    write_climatology(&path, clim.mean(), clim.std(), grid, writer)?;
    info!(path = %path.display(), "wrote climatology");
    Ok(())
}
