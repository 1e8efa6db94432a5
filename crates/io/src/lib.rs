//! # dedi-io
//!
//! NetCDF input and output for the DEDI pipeline. Reads ERA5 daily
//! evapotranspiration fields and their coordinate axes, resolves per-year
//! file names, and writes the yearly index files and the reference
//! climatology.
//!
//! ```mermaid
//! flowchart LR
//!     L[FileLayout] -->|aet_path / pet_path| R[read_flux]
//!     L -->|aet_path first year| G[read_grid]
//!     R --> P[dedi-index]
//!     G --> P
//!     P --> W[write_index]
//!     P --> C[write_climatology]
//! ```
//!
//! Writers assemble each file under a `.part` name and rename it into place
//! once complete.

mod error;
mod grid;
mod layout;
mod netcdf_read;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use grid::GridCoords;
pub use layout::{FileLayout, YEAR_PLACEHOLDER};
pub use reader::{ReaderConfig, read_flux, read_grid};
pub use writer::{INDEX_LONG_NAME, INDEX_VAR, WriterConfig, write_climatology, write_index};
