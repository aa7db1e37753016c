use num_traits::{Float, FromPrimitive};

use super::Statistic;

/// Arithmetic mean using **Kahan summation**, so long runs of resampled
/// estimates do not drift.
///
/// Returns `NaN` for an empty slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice: &[T] = data.as_ref();
        if slice.is_empty() {
            return T::nan();
        }

        let mut sum = T::zero();
        let mut c = T::zero();
        for &x in slice {
            let y = x - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }

        match T::from_usize(slice.len()) {
            Some(n) => sum / n,
            None => T::nan(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn empty_slice_returns_nan() {
        let mean: f64 = Mean.compute(&Vec::<f64>::new());
        assert!(mean.is_nan(), "Empty slice must return NaN (got: {mean})");
    }

    #[test]
    fn exact_integer_means() {
        let five: f64 = Mean.compute(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]);
        let one: f32 = Mean.compute(&[42.5_f32]);
        assert_abs_diff_eq!(five, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(one, 42.5, epsilon = 1e-6);
    }

    #[test]
    fn kahan_reduces_accumulation_error() {
        let n = 10_000;
        let data: Vec<f32> = vec![0.1_f32; n];
        let expected = 0.1_f32;

        let kahan_mean: f32 = Mean.compute(&data);
        let naive_mean: f32 = data.iter().sum::<f32>() / (n as f32);

        let kahan_error = (kahan_mean - expected).abs();
        let naive_error = (naive_mean - expected).abs();
        assert!(
            kahan_error < naive_error * 0.5,
            "Kahan error ({kahan_error:.2e}) should be <50% of naive error ({naive_error:.2e})"
        );
    }

    #[test]
    fn means_near_population_centre() {
        let data: Vec<f64> = (0..=100).map(|i| 48.0 + f64::from(i) * 0.04).collect();
        let mean: f64 = Mean.compute(&data);
        assert_relative_eq!(mean, 50.0, max_relative = 1e-12);
    }
}
