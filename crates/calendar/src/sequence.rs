//! Daily time axis for per-year output files.

use crate::leap::days_in_year;

/// Integer day offsets `0..days_in_year(year)` counted from 1 January.
pub fn day_offsets(year: i32) -> Vec<i32> {
    (0..days_in_year(year) as i32).collect()
}

/// CF-convention units string for [`day_offsets`], e.g. `"days since 2019-01-01"`.
pub fn time_units(year: i32) -> String {
    format!("days since {year:04}-01-01")
}
