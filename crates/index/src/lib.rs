//! # dedi-index
//!
//! The Daily Evapotranspiration Deficit Index pipeline.
//!
//! Each year's ERA5 actual and potential evaporation are converted to
//! millimetres, differenced, and placed on a 366-slot calendar so that all
//! years stack along one axis. The first [`REFERENCE_YEARS`] years give a
//! per-slot, per-cell mean and sample standard deviation; every year is then
//! expressed as a z-score against it and returned to its real calendar.
//!
//! ## Architecture
//!
//! ```mermaid
//! flowchart LR
//!     S[FluxSource] -->|read_pair| E[extract_stack]
//!     E -->|difference_field + align_to_calendar| D[DifferenceStack]
//!     D -->|first 30 years| C[Climatology::from_stack]
//!     D --> Z[standardize]
//!     C --> Z
//!     Z -->|restore_calendar| K[IndexSink]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use dedi_calendar::YearRange;
//! use dedi_index::{NetcdfFluxSource, NetcdfIndexSink, run_index};
//! use dedi_io::{FileLayout, ReaderConfig, WriterConfig};
//!
//! let layout = FileLayout::new("./aet", "./pet", "./DEDI");
//! let source = NetcdfFluxSource::new(layout.clone(), ReaderConfig::default());
//! let grid = source.read_grid(1979)?;
//! let mut sink = NetcdfIndexSink::new(layout, grid.clone(), WriterConfig::default());
//! run_index(YearRange::new(1979, 2021)?, &source, &grid, &mut sink)?;
//! ```

mod align;
mod climatology;
mod error;
mod extract;
mod pipeline;
mod stack;
mod standardize;

pub use align::{align_to_calendar, restore_calendar};
pub use climatology::{Climatology, REFERENCE_YEARS, SAMPLE_DDOF};
pub use error::DediError;
pub use extract::{
    FLUX_TO_MM, FluxSource, NetcdfFluxSource, difference_field, extract_stack, flux_to_mm,
};
pub use pipeline::{
    IndexSink, NetcdfIndexSink, RunSummary, export_climatology, run_climatology, run_index,
};
pub use stack::DifferenceStack;
pub use standardize::{standardize, z_score};
