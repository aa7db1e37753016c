use num_traits::{Float, FromPrimitive};

use super::{Statistic, Variance};

/// Standard Error of the Mean (SEM).
///
/// ```text
/// SE = sqrt( variance / n )
/// ```
/// where `variance` uses the configured [`Variance`] estimator (Bessel's
/// correction by default). `NaN` whenever the variance is undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SEMean {
    variance: Variance,
}

impl SEMean {
    /// Creates a `SEMean` with a custom variance estimator.
    pub fn with_variance(variance: Variance) -> Self {
        Self { variance }
    }
}

impl<D, T> Statistic<D, T> for SEMean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let var_est: T = self.variance.compute(data);
        if var_est.is_nan() {
            return T::nan();
        }

        match T::from_usize(data.as_ref().len()) {
            Some(n) => (var_est / n).sqrt(),
            None => T::nan(),
        }
    }
}
