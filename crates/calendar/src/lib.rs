//! # dedi-calendar
//!
//! Gregorian calendar arithmetic for the DEDI pipeline.
//!
//! Every year, leap or not, is mapped onto a uniform 366-slot day-of-year
//! axis so that per-day statistics can be computed slot by slot across
//! years. In non-leap years slot index 59 (29 February) has no real date.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["year"] -->|"is_leap_year()"| B["bool"]
//!     A -->|"days_in_year()"| C["365 / 366"]
//!     F["YearRange"] -->|".reference_window(30)"| F
//!     A -->|"day_offsets() / time_units()"| G["daily time axis"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use dedi_calendar::{YearRange, days_in_year, is_leap_year, time_units};
//!
//! assert!(is_leap_year(2000));
//! assert!(!is_leap_year(1900));
//! assert_eq!(days_in_year(2019), 365);
//! assert_eq!(time_units(2019), "days since 2019-01-01");
//!
//! let years = YearRange::new(1979, 2021).unwrap();
//! let reference = years.reference_window(30).unwrap(); // 1979..=2008
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `leap` | Gregorian leap rule and aligned-calendar constants |
//! | `year_range` | Contiguous study period and its reference window |
//! | `sequence` | Daily time axis for output files |
//! | `error` | Error types |

mod error;
mod leap;
mod sequence;
mod year_range;

pub use error::CalendarError;
pub use leap::{ALIGNED_DAYS, FEB29_INDEX, days_in_year, is_leap_year};
pub use sequence::{day_offsets, time_units};
pub use year_range::YearRange;
