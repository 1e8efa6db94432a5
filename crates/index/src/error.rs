//! Error types for the dedi-index crate.

use dedi_calendar::{CalendarError, YearRange};
use dedi_io::IoError;

/// Error type for all fallible operations in the dedi-index crate.
#[derive(Debug, thiserror::Error)]
pub enum DediError {
    /// Returned when an array does not have the shape a stage requires.
    #[error("year {year}: {what} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Year being processed.
        year: i32,
        /// Which array or axis was checked.
        what: &'static str,
        /// Required shape.
        expected: Vec<usize>,
        /// Shape found.
        got: Vec<usize>,
    },

    /// Returned when climatology fields are not `(366, lat, lon)` or differ
    /// from each other.
    #[error("climatology {field} has shape {got:?}, expected {expected:?}")]
    ClimatologyShape {
        /// `mean` or `std`.
        field: &'static str,
        /// Required shape.
        expected: Vec<usize>,
        /// Shape found.
        got: Vec<usize>,
    },

    /// Returned when a year is not part of the stack's range.
    #[error("year {year} is outside stack range {range}")]
    YearOutsideStack {
        /// Year requested.
        year: i32,
        /// Years the stack covers.
        range: YearRange,
    },

    /// Returned when the stack holds fewer years than the reference window.
    #[error("climatology needs {need} reference years, stack holds {have}")]
    InsufficientYears {
        /// Years available.
        have: usize,
        /// Years required.
        need: usize,
    },

    /// Returned when a year's input fields cannot be read.
    #[error("failed to read inputs for year {year}")]
    Input {
        /// Year whose inputs failed.
        year: i32,
        /// Underlying I/O error.
        #[source]
        source: IoError,
    },

    /// Returned when a year's index file cannot be written.
    #[error("failed to write index for year {year}")]
    Output {
        /// Year whose output failed.
        year: i32,
        /// Underlying I/O error.
        #[source]
        source: IoError,
    },

    /// I/O failure not tied to a single year (grid, climatology file).
    #[error(transparent)]
    Io(#[from] IoError),

    /// Invalid year range or reference window.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn display_shape_mismatch() {
        let err = DediError::ShapeMismatch {
            year: 2019,
            what: "aligned difference field",
            expected: vec![366, 2, 2],
            got: vec![365, 2, 2],
        };
        assert_eq!(
            err.to_string(),
            "year 2019: aligned difference field has shape [365, 2, 2], expected [366, 2, 2]"
        );
    }

    #[test]
    fn display_climatology_shape() {
        let err = DediError::ClimatologyShape {
            field: "std",
            expected: vec![366, 2, 2],
            got: vec![366, 2, 3],
        };
        assert_eq!(
            err.to_string(),
            "climatology std has shape [366, 2, 3], expected [366, 2, 2]"
        );
    }

    #[test]
    fn display_year_outside_stack() {
        let err = DediError::YearOutsideStack {
            year: 1999,
            range: YearRange::new(2000, 2001).unwrap(),
        };
        assert_eq!(err.to_string(), "year 1999 is outside stack range 2000..=2001");
    }

    #[test]
    fn display_insufficient_years() {
        let err = DediError::InsufficientYears { have: 12, need: 30 };
        assert_eq!(
            err.to_string(),
            "climatology needs 30 reference years, stack holds 12"
        );
    }

    #[test]
    fn input_error_keeps_source() {
        let err = DediError::Input {
            year: 1985,
            source: IoError::FileNotFound {
                path: PathBuf::from("aet/era5_daily_actual_evaporation_1985.nc"),
            },
        };
        assert_eq!(err.to_string(), "failed to read inputs for year 1985");
        let source = err.source().expect("source is set");
        assert!(source.to_string().contains("era5_daily_actual_evaporation_1985.nc"));
    }

    #[test]
    fn calendar_error_is_transparent() {
        let err: DediError = CalendarError::InvalidYearRange {
            start: 2021,
            end: 1979,
        }
        .into();
        assert_eq!(
            err.to_string(),
            CalendarError::InvalidYearRange {
                start: 2021,
                end: 1979
            }
            .to_string()
        );
    }
}
