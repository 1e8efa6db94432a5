//! Mapping between a year's real days and the 366-slot aligned calendar.

use dedi_calendar::{ALIGNED_DAYS, FEB29_INDEX, days_in_year, is_leap_year};
use ndarray::{Array3, Axis, s};

use crate::error::DediError;

/// Place a year's daily field on the 366-slot calendar.
///
/// Leap years pass through unchanged. Non-leap years gain a NaN layer at
/// slot [`FEB29_INDEX`], shifting 1 March onwards up by one slot.
///
/// # Errors
///
/// Returns [`DediError::ShapeMismatch`] if the field does not have
/// `days_in_year(year)` layers.
pub fn align_to_calendar(year: i32, field: Array3<f64>) -> Result<Array3<f64>, DediError> {
    let (nt, ny, nx) = field.dim();
    let expected = days_in_year(year);
    if nt != expected {
        return Err(DediError::ShapeMismatch {
            year,
            what: "daily field",
            expected: vec![expected, ny, nx],
            got: vec![nt, ny, nx],
        });
    }
    if is_leap_year(year) {
        return Ok(field);
    }

    let mut aligned = Array3::from_elem((ALIGNED_DAYS, ny, nx), f64::NAN);
    aligned
        .slice_mut(s![..FEB29_INDEX, .., ..])
        .assign(&field.slice(s![..FEB29_INDEX, .., ..]));
    aligned
        .slice_mut(s![FEB29_INDEX + 1.., .., ..])
        .assign(&field.slice(s![FEB29_INDEX.., .., ..]));
    Ok(aligned)
}

/// Drop the placeholder slot from an aligned field.
///
/// Inverse of [`align_to_calendar`]: leap years pass through, non-leap
/// years lose slot [`FEB29_INDEX`] and come back with 365 layers.
///
/// # Errors
///
/// Returns [`DediError::ShapeMismatch`] if the field does not have 366 layers.
pub fn restore_calendar(year: i32, aligned: Array3<f64>) -> Result<Array3<f64>, DediError> {
    let (nt, ny, nx) = aligned.dim();
    if nt != ALIGNED_DAYS {
        return Err(DediError::ShapeMismatch {
            year,
            what: "aligned field",
            expected: vec![ALIGNED_DAYS, ny, nx],
            got: vec![nt, ny, nx],
        });
    }
    if is_leap_year(year) {
        return Ok(aligned);
    }

    let real_days: Vec<usize> = (0..ALIGNED_DAYS).filter(|&d| d != FEB29_INDEX).collect();
    Ok(aligned.select(Axis(0), &real_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(nt: usize) -> Array3<f64> {
        Array3::from_shape_fn((nt, 2, 3), |(t, j, i)| t as f64 + 0.1 * j as f64 + 0.01 * i as f64)
    }

    #[test]
    fn non_leap_gains_nan_slot() {
        let field = ramp(365);
        let aligned = align_to_calendar(2019, field.clone()).unwrap();
        assert_eq!(aligned.dim(), (366, 2, 3));
        assert!(aligned.index_axis(Axis(0), FEB29_INDEX).iter().all(|v| v.is_nan()));
        // 28 Feb stays, 1 Mar moves up one slot.
        assert_eq!(aligned[[58, 1, 2]], field[[58, 1, 2]]);
        assert_eq!(aligned[[60, 0, 0]], 59.0);
        assert_eq!(aligned[[365, 0, 0]], 364.0);
    }

    #[test]
    fn leap_passes_through() {
        let field = ramp(366);
        let aligned = align_to_calendar(2020, field.clone()).unwrap();
        assert_eq!(aligned, field);
    }

    #[test]
    fn restore_inverts_align() {
        for year in [1979, 1980, 1900, 2000, 2021] {
            let field = ramp(days_in_year(year));
            let back = restore_calendar(year, align_to_calendar(year, field.clone()).unwrap()).unwrap();
            assert_eq!(back, field, "year {year}");
        }
    }

    #[test]
    fn wrong_length_rejected() {
        let err = align_to_calendar(2020, ramp(365)).unwrap_err();
        match err {
            DediError::ShapeMismatch { year, expected, got, .. } => {
                assert_eq!(year, 2020);
                assert_eq!(expected, vec![366, 2, 3]);
                assert_eq!(got, vec![365, 2, 3]);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert!(restore_calendar(2019, ramp(365)).is_err());
    }
}
