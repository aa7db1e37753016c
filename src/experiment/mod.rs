//! Resampling estimator: draws repeated samples from a population, estimates
//! their dispersion and tests the mean estimate against the population's own
//! dispersion.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use varbias::{ExperimentConfig, simulate};
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(45);
//! let run = simulate(&ExperimentConfig::default(), &mut rng).unwrap();
//! assert_eq!(run.result.estimates.len(), 10);
//! assert!((0.0..=1.0).contains(&run.result.test.p_value));
//! ```

mod result;

pub use result::{EstimateRecord, EstimationResult};

use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{
    Bootstrap, Dispersion, Interval, Mean, NormalSpec, OneSampleTTest, Population, Re, Sample, Spread,
    Statistic, TInterval, TTestResult, Verdict,
};

/// Significance level used unless configured otherwise.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Confidence level used for the interval unless configured otherwise.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Divisor convention for the population reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reference {
    /// The population is the whole universe: divisor `N`.
    #[default]
    Population,
    /// The configured `ddof` is applied to the population as well: divisor
    /// `N - ddof`.
    Matched,
}

/// Confidence interval settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Confidence level in `(0, 1)`.
    pub confidence: f64,
    /// Degrees of freedom of the reference t distribution; `K - 1` if unset.
    pub df: Option<u64>,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self { confidence: DEFAULT_CONFIDENCE, df: None }
    }
}

/// Parameters of one resampling experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of population members `N`.
    pub population_size: usize,
    /// Distribution population members are drawn from.
    pub distribution: NormalSpec,
    /// Observations per sample `S`.
    pub sample_size: usize,
    /// Degrees-of-freedom adjustment `D`; per-sample divisor is `S - D`.
    pub ddof: usize,
    /// Number of samples `K`.
    pub samples: usize,
    /// Significance level α.
    pub alpha: f64,
    /// Quantity compared between population and samples.
    pub dispersion: Dispersion,
    /// Divisor convention for the population reference.
    pub reference: Reference,
    /// Confidence interval for the mean estimate, if wanted.
    pub interval: Option<IntervalConfig>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            distribution: NormalSpec::default(),
            sample_size: 20,
            ddof: 1,
            samples: 10,
            alpha: DEFAULT_ALPHA,
            dispersion: Dispersion::Variance,
            reference: Reference::Population,
            interval: Some(IntervalConfig::default()),
        }
    }
}

impl ExperimentConfig {
    /// Set the population size.
    #[must_use]
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Set the sample size.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the degrees-of-freedom adjustment.
    #[must_use]
    pub fn with_ddof(mut self, ddof: usize) -> Self {
        self.ddof = ddof;
        self
    }

    /// Set the number of samples.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the dispersion quantity.
    #[must_use]
    pub fn with_dispersion(mut self, dispersion: Dispersion) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Set the reference convention.
    #[must_use]
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    /// Set or clear the confidence interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Option<IntervalConfig>) -> Self {
        self.interval = interval;
        self
    }

    /// Statistic applied to the population.
    pub fn reference_statistic(&self) -> Spread {
        match self.reference {
            Reference::Population => self.dispersion.with_ddof(0),
            Reference::Matched => self.dispersion.with_ddof(self.ddof),
        }
    }

    /// Statistic applied to every sample.
    pub fn sample_statistic(&self) -> Spread {
        self.dispersion.with_ddof(self.ddof)
    }

    /// Reject configurations whose statistics would be undefined.
    ///
    /// # Errors
    /// One [`Error`] variant per violated constraint, checked in field order.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::EmptyPopulation);
        }
        if self.reference == Reference::Matched && self.population_size <= self.ddof {
            return Err(Error::PopulationTooSmall {
                population_size: self.population_size,
                ddof: self.ddof,
            });
        }
        if self.sample_size == 0 {
            return Err(Error::EmptySample);
        }
        if self.sample_size <= self.ddof {
            return Err(Error::NonPositiveDivisor {
                sample_size: self.sample_size,
                ddof: self.ddof,
            });
        }
        if self.samples < 2 {
            return Err(Error::TooFewSamples { samples: self.samples });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidAlpha(self.alpha));
        }
        if let Some(interval) = self.interval {
            if !(interval.confidence > 0.0 && interval.confidence < 1.0) {
                return Err(Error::InvalidConfidence(interval.confidence));
            }
            if interval.df == Some(0) {
                return Err(Error::InvalidIntervalDf);
            }
        }
        Ok(())
    }
}

/// A generated population together with the estimate drawn from it.
#[derive(Debug, Clone)]
pub struct Experiment {
    /// Population used for the run.
    pub population: Population,
    /// Outcome of the run.
    pub result: EstimationResult,
}

/// Generate a population from `config` and run [`estimate`] on it, both
/// drawing from `rng`.
///
/// # Errors
/// Configuration errors from [`ExperimentConfig::validate`] and distribution
/// errors from [`Population::generate`]; nothing is drawn when validation
/// fails.
pub fn simulate<R: Rng + ?Sized>(config: &ExperimentConfig, rng: &mut R) -> Result<Experiment> {
    config.validate()?;
    let population = Population::generate(config.population_size, config.distribution, rng)?;
    let result = estimate(config, &population, rng)?;
    Ok(Experiment { population, result })
}

/// Draw `config.samples` samples of `config.sample_size` with replacement,
/// estimate each one's dispersion and test their mean against the
/// population's dispersion.
///
/// `config.population_size` is ignored; the population's own length is
/// checked instead.
///
/// # Errors
/// Any configuration error, checked before the first draw.
pub fn estimate<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    population: &Population,
    rng: &mut R,
) -> Result<EstimationResult> {
    config.with_population_size(population.len()).validate()?;
    debug!(
        "estimating {} over {} samples of {} (ddof {}, reference {:?}) from a population of {}",
        config.dispersion,
        config.samples,
        config.sample_size,
        config.ddof,
        config.reference,
        population.len(),
    );

    let population_dispersion: f64 = config.reference_statistic().compute(population.sample());

    let statistic = config.sample_statistic();
    let mut boot = Bootstrap::new(rng).with_size(config.sample_size);
    let estimates: Sample<f64> = boot
        .re(population.sample())
        .take(config.samples)
        .enumerate()
        .map(|(i, sample)| {
            let value: f64 = statistic.compute(&sample);
            trace!("sample {}: {value}", i + 1);
            value
        })
        .collect();

    let mean_estimate: f64 = Mean.compute(&estimates);
    let test: TTestResult<f64> = OneSampleTTest::new(population_dispersion).compute(&estimates);
    let verdict = Verdict::decide(test.p_value, config.alpha);

    let interval = config.interval.map(|ic| {
        let mut ci = TInterval::new(ic.confidence);
        if let Some(df) = ic.df {
            ci = ci.with_df(df as f64);
        }
        let ci: Interval<f64> = ci.compute(&estimates);
        ci
    });

    info!(
        "population {} {population_dispersion:.4}, mean sample {} {mean_estimate:.4}, t {:.4}, p {:.4}: {verdict}",
        config.dispersion, config.dispersion, test.statistic, test.p_value,
    );

    Ok(EstimationResult {
        dispersion: config.dispersion,
        population_dispersion,
        estimates,
        mean_estimate,
        test,
        alpha: config.alpha,
        verdict,
        interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{RngCore, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(45)
    }

    #[test]
    fn default_scenario() {
        let run = simulate(&ExperimentConfig::default(), &mut rng()).unwrap();
        assert_eq!(run.population.len(), 20);
        let r = &run.result;
        assert_eq!(r.estimates.len(), 10);
        assert!(r.estimates.iter().all(|&v| v >= 0.0));
        assert!((0.0..=1.0).contains(&r.test.p_value));
        assert_eq!(r.verdict.is_accept(), r.test.p_value > 0.05);
        assert_abs_diff_eq!(r.test.df, 9.0);
    }

    #[test]
    fn reference_uses_population_divisor() {
        let mut rng = rng();
        let population = Population::generate(30, NormalSpec::default(), &mut rng).unwrap();
        let r = estimate(&ExperimentConfig::default(), &population, &mut rng).unwrap();
        let expected: f64 = crate::Variance::new(0).compute(&population);
        assert_abs_diff_eq!(r.population_dispersion, expected, epsilon = 1e-12);
    }

    #[test]
    fn matched_reference_shares_the_divisor() {
        let mut rng = rng();
        let population = Population::generate(30, NormalSpec::default(), &mut rng).unwrap();
        let config = ExperimentConfig::default().with_ddof(2).with_reference(Reference::Matched);
        let r = estimate(&config, &population, &mut rng).unwrap();
        let expected: f64 = crate::Variance::new(2).compute(&population);
        assert_abs_diff_eq!(r.population_dispersion, expected, epsilon = 1e-12);
    }

    #[test]
    fn std_dev_mode_is_consistent() {
        let config = ExperimentConfig::default().with_dispersion(Dispersion::StdDev);
        let mut rng = rng();
        let population = Population::generate(20, NormalSpec::default(), &mut rng).unwrap();
        let r = estimate(&config, &population, &mut rng).unwrap();
        let expected: f64 = crate::StdDev::new(0).compute(&population);
        assert_abs_diff_eq!(r.population_dispersion, expected, epsilon = 1e-12);
        assert_eq!(r.dispersion, Dispersion::StdDev);
        // standard deviations of Normal(50, 2) samples stay near 2, far below variances near 4
        assert!(r.mean_estimate < 3.5);
    }

    #[test]
    fn interval_brackets_the_mean_estimate() {
        let config = ExperimentConfig::default().with_samples(200);
        let r = simulate(&config, &mut rng()).unwrap().result;
        let ci = r.interval.unwrap();
        assert!(ci.lower <= r.mean_estimate && r.mean_estimate <= ci.upper);
        assert_eq!(ci.confidence, Some(0.95));
    }

    #[test]
    fn explicit_interval_df_widens_the_interval() {
        let population = Population::generate(40, NormalSpec::default(), &mut rng()).unwrap();
        let base = ExperimentConfig::default();
        let few_df = base.with_interval(Some(IntervalConfig { confidence: 0.95, df: Some(1) }));

        let default = estimate(&base, &population, &mut rng()).unwrap();
        let widened = estimate(&few_df, &population, &mut rng()).unwrap();
        assert_eq!(default.estimates, widened.estimates);

        let (default_ci, widened_ci) = (default.interval.unwrap(), widened.interval.unwrap());
        assert!(widened_ci.width() > default_ci.width());
        assert!(widened_ci.contains(&widened.mean_estimate));
    }

    #[test]
    fn interval_is_optional() {
        let config = ExperimentConfig::default().with_interval(None);
        let r = simulate(&config, &mut rng()).unwrap().result;
        assert!(r.interval.is_none());
    }

    #[test]
    fn validation_rejects_degenerate_configurations() {
        let base = ExperimentConfig::default();
        assert!(matches!(base.with_samples(1).validate(), Err(Error::TooFewSamples { samples: 1 })));
        assert!(matches!(base.with_population_size(0).validate(), Err(Error::EmptyPopulation)));
        assert!(matches!(base.with_sample_size(0).validate(), Err(Error::EmptySample)));
        assert!(matches!(
            base.with_sample_size(3).with_ddof(3).validate(),
            Err(Error::NonPositiveDivisor { sample_size: 3, ddof: 3 })
        ));
        assert!(matches!(
            base.with_population_size(2).with_ddof(2).with_sample_size(10)
                .with_reference(Reference::Matched).validate(),
            Err(Error::PopulationTooSmall { population_size: 2, ddof: 2 })
        ));
        let no_df = base.with_interval(Some(IntervalConfig { confidence: 0.95, df: Some(0) }));
        assert!(matches!(no_df.validate(), Err(Error::InvalidIntervalDf)));
        let bad_conf = base.with_interval(Some(IntervalConfig { confidence: 1.0, df: None }));
        assert!(matches!(bad_conf.validate(), Err(Error::InvalidConfidence(_))));
        let bad_alpha = ExperimentConfig { alpha: 0.0, ..base };
        assert!(matches!(bad_alpha.validate(), Err(Error::InvalidAlpha(_))));
    }

    #[test]
    fn invalid_config_draws_nothing() {
        let mut used = rng();
        let err = simulate(&ExperimentConfig::default().with_samples(1), &mut used).unwrap_err();
        assert!(matches!(err, Error::TooFewSamples { .. }));
        assert_eq!(used.next_u64(), rng().next_u64());
    }
}
