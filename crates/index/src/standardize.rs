//! Index Calculator: z-scores of a year against the climatology.

use dedi_calendar::ALIGNED_DAYS;
use ndarray::{Array3, ArrayView3, Zip};

use crate::align::restore_calendar;
use crate::climatology::Climatology;
use crate::error::DediError;

/// Standardized anomaly of one value; NaN where the spread is zero.
#[inline]
pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        f64::NAN
    } else {
        (value - mean) / std
    }
}

/// Index field of `year` from its aligned difference field.
///
/// Each slot is standardized against the same slot of `clim`, then the
/// placeholder slot is dropped for non-leap years, giving 365 or 366 days.
///
/// # Errors
///
/// Returns [`DediError::ShapeMismatch`] if `aligned` is not
/// `366 x lat x lon` on the climatology's grid.
pub fn standardize(
    year: i32,
    aligned: ArrayView3<'_, f64>,
    clim: &Climatology,
) -> Result<Array3<f64>, DediError> {
    let (ny, nx) = clim.grid_shape();
    if aligned.dim() != (ALIGNED_DAYS, ny, nx) {
        return Err(DediError::ShapeMismatch {
            year,
            what: "aligned difference field",
            expected: vec![ALIGNED_DAYS, ny, nx],
            got: aligned.shape().to_vec(),
        });
    }

    let z = Zip::from(aligned)
        .and(clim.mean())
        .and(clim.std())
        .par_map_collect(|&d, &m, &s| z_score(d, m, s));
    restore_calendar(year, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dedi_calendar::FEB29_INDEX;

    fn clim(mean: f64, std: f64) -> Climatology {
        Climatology::new(
            Array3::from_elem((366, 2, 2), mean),
            Array3::from_elem((366, 2, 2), std),
        )
        .unwrap()
    }

    #[test]
    fn z_score_cases() {
        assert_relative_eq!(z_score(3.0, 1.0, 2.0), 1.0);
        assert!(z_score(3.0, 1.0, 0.0).is_nan());
        assert!(z_score(f64::NAN, 1.0, 2.0).is_nan());
        assert!(z_score(3.0, 1.0, f64::NAN).is_nan());
    }

    #[test]
    fn identity_where_spread_positive() {
        let aligned = Array3::from_shape_fn((366, 2, 2), |(d, j, i)| d as f64 + j as f64 - i as f64);
        let c = clim(10.0, 4.0);
        let z = standardize(2020, aligned.view(), &c).unwrap();
        assert_eq!(z.dim(), (366, 2, 2));
        for ((zv, dv), (m, s)) in z
            .iter()
            .zip(aligned.iter())
            .zip(c.mean().iter().zip(c.std().iter()))
        {
            assert_relative_eq!(zv * s + m, *dv, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_spread_gives_nan() {
        let aligned = Array3::from_elem((366, 2, 2), 5.0);
        let z = standardize(2020, aligned.view(), &clim(5.0, 0.0)).unwrap();
        assert!(z.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn non_leap_drops_placeholder() {
        let mut aligned = Array3::from_elem((366, 2, 2), 2.0);
        aligned.index_axis_mut(ndarray::Axis(0), FEB29_INDEX).fill(f64::NAN);
        let z = standardize(2019, aligned.view(), &clim(1.0, 1.0)).unwrap();
        assert_eq!(z.dim(), (365, 2, 2));
        assert!(z.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn grid_mismatch_rejected() {
        let aligned = Array3::zeros((366, 3, 2));
        let err = standardize(2020, aligned.view(), &clim(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, DediError::ShapeMismatch { year: 2020, .. }));
    }
}
