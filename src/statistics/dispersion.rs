use std::fmt;

use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};

use super::{Mean, Statistic};

/// Variance estimator with a configurable degrees-of-freedom adjustment.
///
/// The divisor is `n - ddof`:
/// - `ddof = 0`: population variance (biased for samples)
/// - `ddof = 1`: sample variance with Bessel's correction (the default)
///
/// Returns `NaN` when the divisor would be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variance {
    /// Degrees-of-freedom adjustment subtracted from the sample size.
    pub ddof: usize,
}

impl Variance {
    /// Creates a `Variance` estimator with the given adjustment.
    pub fn new(ddof: usize) -> Self {
        Variance { ddof }
    }
}

impl Default for Variance {
    fn default() -> Self {
        Variance { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for Variance
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice = data.as_ref();
        let n = slice.len();
        if n == 0 || n <= self.ddof {
            return T::nan();
        }

        let mean: T = Mean.compute(data);

        // Kahan summation for squared deviations
        let mut sq_sum = T::zero();
        let mut c = T::zero();
        for &x in slice {
            let dev = x - mean;
            let y = dev * dev - c;
            let t = sq_sum + y;
            c = (t - sq_sum) - y;
            sq_sum = t;
        }

        match T::from_usize(n - self.ddof) {
            Some(dof) => sq_sum.max(T::zero()) / dof,
            None => T::nan(),
        }
    }
}

/// Standard deviation: square root of [`Variance`] with the same adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdDev {
    /// Degrees-of-freedom adjustment subtracted from the sample size.
    pub ddof: usize,
}

impl StdDev {
    /// Creates a `StdDev` estimator with the given adjustment.
    pub fn new(ddof: usize) -> Self {
        StdDev { ddof }
    }
}

impl Default for StdDev {
    fn default() -> Self {
        StdDev { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for StdDev
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let var: T = Variance::new(self.ddof).compute(data);
        var.sqrt()
    }
}

/// Which dispersion quantity an experiment compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dispersion {
    /// Variance.
    #[default]
    Variance,
    /// Standard deviation.
    StdDev,
}

impl Dispersion {
    /// Pair this quantity with a degrees-of-freedom adjustment.
    pub fn with_ddof(self, ddof: usize) -> Spread {
        Spread { kind: self, ddof }
    }

    /// Human-readable noun, e.g. for table labels.
    pub fn label(self) -> &'static str {
        match self {
            Dispersion::Variance => "variance",
            Dispersion::StdDev => "standard deviation",
        }
    }
}

impl fmt::Display for Dispersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A [`Dispersion`] bound to a divisor convention, usable as a [`Statistic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    /// Quantity to compute.
    pub kind: Dispersion,
    /// Degrees-of-freedom adjustment.
    pub ddof: usize,
}

impl<D, T> Statistic<D, T> for Spread
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    #[inline]
    fn compute(&self, data: &D) -> T {
        match self.kind {
            Dispersion::Variance => Variance::new(self.ddof).compute(data),
            Dispersion::StdDev => StdDev::new(self.ddof).compute(data),
        }
    }
}
