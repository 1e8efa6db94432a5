//! Gregorian leap rule and the aligned-calendar constants.

/// Number of slots in the aligned day-of-year axis.
pub const ALIGNED_DAYS: usize = 366;

/// 0-based slot of 29 February on the aligned axis.
///
/// Non-leap years carry a sentinel here so that every later day keeps the
/// same slot regardless of leap status.
pub const FEB29_INDEX: usize = 59;

/// Returns `true` if `year` is a leap year in the proleptic Gregorian calendar.
///
/// A year is a leap year when it is divisible by 4, except century years,
/// which must also be divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of real days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> usize {
    if is_leap_year(year) { 366 } else { 365 }
}
