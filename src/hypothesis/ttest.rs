use std::fmt;

use num_traits::{Float, FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Mean, SEMean, Statistic, Studentized};

/// One-sample Student t-test for the hypothesis about the population mean.
///
/// Tests `H₀: μ = μ₀` against the two-sided alternative `μ ≠ μ₀`:
/// ```text
/// t = (x̄ - μ₀) / (s / √n),    df = n - 1
/// p = 2 · (1 - F_t(|t|; df))
/// ```
///
/// # Statistical assumptions
/// - **Assumes**: i.i.d. observations, approximately normal sample mean
///   (CLT is usually enough for the sample sizes used here)
/// - **Test type**: two-sided
///
/// # Degenerate input
/// - `n < 2`: statistic and p-value are `NaN`
/// - zero standard error: `t = 0, p = 1` if `x̄ == μ₀`, otherwise
///   `t = ±∞, p = 0`
///
/// # Example
/// ```rust
/// use varbias::{OneSampleTTest, Statistic, TTestResult};
///
/// let data = vec![4.1, 3.8, 4.4, 4.0, 3.6];
/// let result: TTestResult<f64> = OneSampleTTest::new(4.0).compute(&data);
/// assert!((0.0..=1.0).contains(&result.p_value));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OneSampleTTest<F> {
    /// Hypothesised mean μ₀.
    pub null_mean: F,
}

impl<F> OneSampleTTest<F> {
    /// Test against the hypothesised mean `null_mean`.
    pub fn new(null_mean: F) -> Self {
        Self { null_mean }
    }
}

/// Result of a one-sample t-test.
///
/// Serialised fields that are infinite or `NaN` are written as the strings
/// `"inf"`, `"-inf"` and `"NaN"` and read back from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Float", deserialize = "F: FromPrimitive"))]
pub struct TTestResult<F> {
    /// Observed t statistic.
    #[serde(with = "non_finite")]
    pub statistic: F,
    /// Degrees of freedom of the reference distribution.
    #[serde(with = "non_finite")]
    pub df: F,
    /// Two-sided p-value.
    #[serde(with = "non_finite")]
    pub p_value: F,
}

// JSON numbers cannot hold inf or NaN
mod non_finite {
    use num_traits::{Float, FromPrimitive};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn serialize<F: Float, S: Serializer>(value: &F, serializer: S) -> Result<S::Ok, S::Error> {
        let x = value.to_f64().unwrap_or(f64::NAN);
        if x.is_finite() {
            serializer.serialize_f64(x)
        } else {
            serializer.collect_str(&x)
        }
    }

    pub(super) fn deserialize<'de, F: FromPrimitive, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<F, D::Error> {
        let x: f64 = match Repr::deserialize(deserializer)? {
            Repr::Number(x) => x,
            Repr::Text(s) => s.parse().map_err(D::Error::custom)?,
        };
        F::from_f64(x).ok_or_else(|| D::Error::custom(format!("{x} does not fit the target type")))
    }
}

impl<D, F> Statistic<D, TTestResult<F>> for OneSampleTTest<F>
where
    D: AsRef<[F]>,
    F: Float + FromPrimitive + ToPrimitive,
{
    fn compute(&self, data: &D) -> TTestResult<F> {
        let n = data.as_ref().len();
        let undefined = TTestResult {
            statistic: F::nan(),
            df: F::nan(),
            p_value: F::nan(),
        };
        if n < 2 {
            return undefined;
        }
        let Some(df) = F::from_usize(n - 1) else {
            return undefined;
        };

        let se: F = SEMean::default().compute(data);
        if se.is_zero() {
            let mean: F = Mean.compute(data);
            let diff = mean - self.null_mean;
            return if diff.is_zero() {
                TTestResult { statistic: F::zero(), df, p_value: F::one() }
            } else {
                TTestResult {
                    statistic: F::infinity().copysign(diff),
                    df,
                    p_value: F::zero(),
                }
            };
        }

        let t: F = Studentized::new(Mean, SEMean::default(), self.null_mean).compute(data);
        let (Some(t64), Some(df64)) = (t.to_f64(), df.to_f64()) else {
            return undefined;
        };
        let Ok(dist) = StudentsT::new(0.0, 1.0, df64) else {
            return undefined;
        };

        // sf(|t|) is more accurate than 1 - cdf(|t|) in the far tail
        let p = (2.0 * dist.sf(t64.abs())).clamp(0.0, 1.0);
        TTestResult {
            statistic: t,
            df,
            p_value: F::from_f64(p).unwrap_or_else(F::nan),
        }
    }
}

/// Outcome of comparing a p-value with the significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// `p > α`: fail to reject H₀.
    Accept,
    /// `p ≤ α` (or undefined p): reject H₀.
    Reject,
}

impl Verdict {
    /// `Accept` iff `p_value > alpha`; a `NaN` p-value rejects.
    pub fn decide<F: Float>(p_value: F, alpha: F) -> Self {
        if p_value > alpha {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }

    /// Whether the null hypothesis survived.
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accept => f.write_str("accept"),
            Verdict::Reject => f.write_str("reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_reference_values() {
        // scipy.stats.ttest_1samp([1, 2, 3, 4], 1.0) -> t = 2.3237900077244502, p = 0.10263
        let data = [1.0_f64, 2.0, 3.0, 4.0];
        let r: TTestResult<f64> = OneSampleTTest::new(1.0).compute(&data);
        assert_abs_diff_eq!(r.statistic, 2.323_790_007_724_450_2, epsilon = 1e-10);
        assert_abs_diff_eq!(r.df, 3.0);
        assert_abs_diff_eq!(r.p_value, 0.1026, epsilon = 1e-3);
    }

    #[test]
    fn symmetric_in_sign() {
        let data = [1.0_f64, 2.0, 3.0, 4.0];
        let above: TTestResult<f64> = OneSampleTTest::new(1.0).compute(&data);
        let below: TTestResult<f64> = OneSampleTTest::new(4.0).compute(&data);
        assert_abs_diff_eq!(above.statistic, -below.statistic, epsilon = 1e-12);
        assert_abs_diff_eq!(above.p_value, below.p_value, epsilon = 1e-12);
    }

    #[test]
    fn null_at_sample_mean_gives_p_one() {
        let data = [1.0_f64, 2.0, 3.0, 4.0];
        let r: TTestResult<f64> = OneSampleTTest::new(2.5).compute(&data);
        assert_abs_diff_eq!(r.statistic, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_observations_are_undefined() {
        let r: TTestResult<f64> = OneSampleTTest::new(0.0).compute(&[1.0_f64]);
        assert!(r.statistic.is_nan() && r.p_value.is_nan());
        assert_eq!(Verdict::decide(r.p_value, 0.05), Verdict::Reject);
    }

    #[test]
    fn zero_standard_error() {
        let data = [3.0_f64; 4];
        let equal: TTestResult<f64> = OneSampleTTest::new(3.0).compute(&data);
        assert_abs_diff_eq!(equal.p_value, 1.0);
        assert_abs_diff_eq!(equal.statistic, 0.0);

        let below: TTestResult<f64> = OneSampleTTest::new(5.0).compute(&data);
        assert_abs_diff_eq!(below.p_value, 0.0);
        assert!(below.statistic.is_infinite() && below.statistic < 0.0);
    }

    #[test]
    fn non_finite_results_survive_json() {
        let below: TTestResult<f64> = OneSampleTTest::new(5.0).compute(&[3.0_f64; 4]);
        let json = serde_json::to_string(&below).unwrap();
        assert!(json.contains(r#""statistic":"-inf""#), "{json}");
        let back: TTestResult<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, below);

        let undefined: TTestResult<f64> = OneSampleTTest::new(0.0).compute(&[1.0_f64]);
        let back: TTestResult<f64> = serde_json::from_str(&serde_json::to_string(&undefined).unwrap()).unwrap();
        assert!(back.statistic.is_nan() && back.df.is_nan() && back.p_value.is_nan());
    }

    #[test]
    fn finite_results_stay_numbers() {
        let r: TTestResult<f64> = OneSampleTTest::new(1.0).compute(&[1.0_f64, 2.0, 3.0, 4.0]);
        let json = serde_json::to_value(r).unwrap();
        assert!(json["statistic"].is_f64());
        assert!(json["df"].is_f64());
    }

    #[test]
    fn verdict_threshold_is_strict() {
        assert_eq!(Verdict::decide(0.051, 0.05), Verdict::Accept);
        assert_eq!(Verdict::decide(0.05, 0.05), Verdict::Reject);
        assert_eq!(Verdict::decide(0.0, 0.05), Verdict::Reject);
        assert!(Verdict::Accept.is_accept());
        assert_eq!(Verdict::Reject.to_string(), "reject");
    }
}
