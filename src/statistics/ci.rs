use std::fmt;
use std::ops::{Add, Sub};

use num_traits::{Float, FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::{Mean, SEMean, Statistic};

/// Statistical interval with optional estimate and confidence level.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Interval<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
    /// Point estimate the interval was built around, if any.
    pub estimate: Option<T>,
    /// Confidence level in `(0, 1)`, if any.
    pub confidence: Option<f64>,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Create asymmetric interval.
    #[inline]
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper, estimate: None, confidence: None }
    }

    /// Create symmetric interval: `[estimate - error, estimate + error]`.
    #[inline]
    pub fn symmetric(estimate: T, error: T) -> Self
    where
        T: Sub<Output = T> + Add<Output = T>,
    {
        Self {
            lower: estimate - error,
            upper: estimate + error,
            estimate: Some(estimate),
            confidence: None,
        }
    }

    /// Fluent builder: attach confidence level.
    #[must_use]
    pub const fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Check if value lies within `[lower, upper]` (inclusive).
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.lower <= *value && *value <= self.upper
    }

    /// Interval width: `upper - lower`.
    #[inline]
    pub fn width(&self) -> T
    where
        T: Sub<Output = T>,
    {
        self.upper - self.lower
    }

    /// Bounds are ordered and the estimate, if present, lies between them.
    #[inline]
    pub fn is_valid(&self) -> bool {
        if !(self.lower <= self.upper) {
            return false;
        }
        if let Some(est) = self.estimate {
            if !self.contains(&est) {
                return false;
            }
        }
        self.confidence.is_none_or(|c| c > 0.0 && c < 1.0)
    }
}

impl<T: Float> Interval<T> {
    /// Interval representing NaN bounds.
    pub fn nan() -> Self {
        Self::new(T::nan(), T::nan())
    }
}

/// Renders as `(lower, upper)`, two decimals unless a precision is given.
impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(2);
        write!(f, "({:.p$}, {:.p$})", self.lower, self.upper)
    }
}

/// Student-t confidence interval for the mean of a data set.
///
/// ```text
/// x̄ ± t_{(1+c)/2, df} · s / √n
/// ```
/// `df` defaults to `n - 1`. Yields [`Interval::nan`] when the standard
/// error or the reference distribution is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TInterval {
    /// Confidence level in `(0, 1)`.
    pub confidence: f64,
    /// Degrees of freedom of the reference t distribution.
    pub df: Option<f64>,
}

impl TInterval {
    /// Interval at `confidence` with `n - 1` degrees of freedom.
    pub fn new(confidence: f64) -> Self {
        debug_assert!(confidence > 0.0 && confidence < 1.0);
        Self { confidence, df: None }
    }

    /// Override the reference distribution's degrees of freedom.
    #[must_use]
    pub fn with_df(mut self, df: f64) -> Self {
        self.df = Some(df);
        self
    }
}

impl Default for TInterval {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl<D, F> Statistic<D, Interval<F>> for TInterval
where
    D: AsRef<[F]>,
    F: Float + FromPrimitive + ToPrimitive,
{
    fn compute(&self, data: &D) -> Interval<F> {
        let n = data.as_ref().len();
        let (mean, se): (F, F) = (Mean, SEMean::default()).compute(data);
        if mean.is_nan() || se.is_nan() {
            return Interval::nan();
        }

        let df = self.df.unwrap_or(n.saturating_sub(1) as f64);
        let Ok(dist) = StudentsT::new(0.0, 1.0, df) else {
            return Interval::nan();
        };
        let q = dist.inverse_cdf(0.5 + self.confidence / 2.0);
        let Some(q) = F::from_f64(q) else {
            return Interval::nan();
        };

        Interval::symmetric(mean, q * se).confidence(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn covers_its_estimate() {
        let data = [4.1_f64, 3.8, 4.4, 4.0, 3.6, 4.3, 4.2, 3.9];
        let ci: Interval<f64> = TInterval::default().compute(&data);
        assert!(ci.is_valid());
        let mean: f64 = Mean.compute(&data);
        assert!(ci.contains(&mean));
        assert_eq!(ci.confidence, Some(0.95));
    }

    #[test]
    fn matches_reference_quantile() {
        // mean 2.5, se sqrt(5/12), t_{0.975, 3} = 3.182446305284263
        let data = [1.0_f64, 2.0, 3.0, 4.0];
        let ci: Interval<f64> = TInterval::default().compute(&data);
        let half = 3.182_446_305_284_263 * (5.0_f64 / 12.0).sqrt();
        assert_abs_diff_eq!(ci.lower, 2.5 - half, epsilon = 1e-6);
        assert_abs_diff_eq!(ci.upper, 2.5 + half, epsilon = 1e-6);
    }

    #[test]
    fn fewer_degrees_of_freedom_widen_the_interval() {
        let data: Vec<f64> = (0..30).map(|i| f64::from(i % 7)).collect();
        let default: Interval<f64> = TInterval::default().compute(&data);
        let narrow_df: Interval<f64> = TInterval::default().with_df(1.0).compute(&data);
        assert!(narrow_df.width() > default.width());
    }

    #[test]
    fn constant_data_collapses_to_point() {
        let ci: Interval<f64> = TInterval::default().compute(&[2.0_f64; 6]);
        assert_abs_diff_eq!(ci.lower, 2.0);
        assert_abs_diff_eq!(ci.upper, 2.0);
    }

    #[test]
    fn single_value_is_undefined() {
        let ci: Interval<f64> = TInterval::default().compute(&[2.0_f64]);
        assert!(ci.lower.is_nan() && ci.upper.is_nan());
        assert!(!ci.is_valid());
    }

    #[test]
    fn displays_two_decimals() {
        let ci = Interval::new(1.2345_f64, 6.789);
        assert_eq!(ci.to_string(), "(1.23, 6.79)");
        assert_eq!(format!("{ci:.1}"), "(1.2, 6.8)");
    }
}
