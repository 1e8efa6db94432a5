//! Error types for the dedi-calendar crate.

/// Error type for all fallible operations in the dedi-calendar crate.
///
/// Both variants describe a study period that cannot be used: one that ends
/// before it starts, or one too short for the reference window.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year range ends before it starts.
    #[error("invalid year range: {start}..={end}")]
    InvalidYearRange {
        /// First year of the range.
        start: i32,
        /// Last year of the range.
        end: i32,
    },

    /// Returned when a year range is shorter than a requested window.
    #[error("year range {start}..={end} has {len} years, need at least {required}")]
    RangeTooShort {
        /// First year of the range.
        start: i32,
        /// Last year of the range.
        end: i32,
        /// Number of years in the range.
        len: usize,
        /// Number of years requested.
        required: usize,
    },
}
