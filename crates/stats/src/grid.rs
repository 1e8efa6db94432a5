//! Reductions over the leading axis of gridded stacks.

use ndarray::{Array, ArrayView, Axis, Dimension, RemoveAxis, Zip};

use crate::nan_moments;

/// NaN-aware mean and standard deviation along axis 0.
///
/// For a `(year, doy, lat, lon)` stack this yields two `(doy, lat, lon)`
/// arrays. Each output element reduces one lane along axis 0 with
/// `n - ddof` normalisation; lanes with no valid values give NaN for both,
/// lanes with `n <= ddof` valid values give NaN for the deviation.
///
/// Lanes are reduced in parallel on the rayon pool.
pub fn nan_mean_sd_axis0<D>(
    stack: ArrayView<'_, f64, D>,
    ddof: usize,
) -> (Array<f64, D::Smaller>, Array<f64, D::Smaller>)
where
    D: Dimension + RemoveAxis,
{
    let shape = stack.raw_dim().remove_axis(Axis(0));
    let mut mean = Array::from_elem(shape.clone(), f64::NAN);
    let mut sd = Array::from_elem(shape, f64::NAN);

    Zip::from(&mut mean)
        .and(&mut sd)
        .and(stack.lanes(Axis(0)))
        .par_for_each(|m, s, lane| {
            let (mu, var) = nan_moments(lane.iter().copied(), ddof);
            *m = mu;
            *s = var.sqrt();
        });

    (mean, sd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array3, Array4, s};

    #[test]
    fn reduces_leading_axis() {
        // 3 "years" of a 2 x 1 x 2 field, value = year index + cell offset.
        let stack = Array4::from_shape_fn((3, 2, 1, 2), |(y, d, _, x)| {
            y as f64 + 10.0 * d as f64 + 100.0 * x as f64
        });
        let (mean, sd) = nan_mean_sd_axis0(stack.view(), 1);
        assert_eq!(mean.shape(), &[2, 1, 2]);
        assert_relative_eq!(mean[[0, 0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(mean[[1, 0, 1]], 111.0, epsilon = 1e-12);
        // Sample sd of [0, 1, 2] is 1.
        for v in sd.iter() {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn nan_entries_are_ignored_per_lane() {
        let mut stack = Array3::from_elem((4, 1, 2), 2.0);
        stack.slice_mut(s![.., 0, 1]).assign(&ndarray::arr1(&[1.0, f64::NAN, 3.0, f64::NAN]));
        let (mean, sd) = nan_mean_sd_axis0(stack.view(), 1);
        assert_relative_eq!(mean[[0, 0]], 2.0, epsilon = 1e-12);
        assert_eq!(sd[[0, 0]], 0.0);
        assert_relative_eq!(mean[[0, 1]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sd[[0, 1]], 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn all_nan_lane_gives_nan() {
        let stack = Array3::from_elem((5, 1, 1), f64::NAN);
        let (mean, sd) = nan_mean_sd_axis0(stack.view(), 1);
        assert!(mean[[0, 0]].is_nan());
        assert!(sd[[0, 0]].is_nan());
    }

    #[test]
    fn matches_slice_functions() {
        let stack = Array4::from_shape_fn((7, 3, 2, 2), |(y, d, j, i)| {
            ((y * 31 + d * 7 + j * 3 + i) % 11) as f64 * 0.37
        });
        let (mean, sd) = nan_mean_sd_axis0(stack.view(), 1);
        for d in 0..3 {
            for j in 0..2 {
                for i in 0..2 {
                    let lane: Vec<f64> = stack.slice(s![.., d, j, i]).to_vec();
                    assert_relative_eq!(mean[[d, j, i]], crate::nan_mean(&lane), epsilon = 1e-12);
                    assert_relative_eq!(sd[[d, j, i]], crate::nan_sd(&lane, 1), epsilon = 1e-12);
                }
            }
        }
    }
}
