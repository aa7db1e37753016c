use num_traits::{Float, FromPrimitive};

use super::Statistic;

/// Studentized statistic: `t = (θ̂ - θ₀) / SE(θ̂)`.
///
/// Returns `NaN` when the standard error is zero or either input is `NaN`.
/// Callers that need a defined value for a zero standard error handle that
/// case themselves (see [`crate::OneSampleTTest`]).
#[derive(Debug, Clone, Copy)]
pub struct Studentized<Estimator, SEE, T> {
    /// Estimator θ̂.
    pub statistic: Estimator,
    /// Standard error of the estimator.
    pub se: SEE,
    /// Hypothesised value θ₀.
    pub null_value: T,
}

impl<Estimator, SEE, T> Studentized<Estimator, SEE, T> {
    /// Creates a studentized statistic (t-statistic) for hypothesis testing.
    pub fn new(statistic: Estimator, se: SEE, null_value: T) -> Self {
        Self {
            statistic,
            se,
            null_value,
        }
    }
}

impl<D, T, Estimator, SEE> Statistic<D, T> for Studentized<Estimator, SEE, T>
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
    Estimator: Statistic<D, T>,
    SEE: Statistic<D, T>,
{
    #[inline]
    fn compute(&self, data: &D) -> T {
        let estimate = self.statistic.compute(data);
        let se_val = self.se.compute(data);

        if se_val.is_zero() || estimate.is_nan() || se_val.is_nan() {
            T::nan()
        } else {
            (estimate - self.null_value) / se_val
        }
    }
}
