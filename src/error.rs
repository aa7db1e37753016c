//! Error type shared by the population generator, the estimator and the
//! output writers.

use statrs::distribution::NormalError;

/// Errors raised while validating a configuration or running an experiment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Population size of zero.
    #[error("population size must be at least 1")]
    EmptyPopulation,

    /// Sample size of zero.
    #[error("sample size must be at least 1")]
    EmptySample,

    /// `sample_size - ddof` would leave no positive divisor.
    #[error("sample size {sample_size} must exceed the degrees-of-freedom adjustment {ddof}")]
    NonPositiveDivisor {
        /// Requested sample size.
        sample_size: usize,
        /// Requested degrees-of-freedom adjustment.
        ddof: usize,
    },

    /// Population too small for the divisor when the sample convention is
    /// also applied to the population reference.
    #[error("population size {population_size} must exceed the degrees-of-freedom adjustment {ddof}")]
    PopulationTooSmall {
        /// Requested population size.
        population_size: usize,
        /// Requested degrees-of-freedom adjustment.
        ddof: usize,
    },

    /// Fewer than two samples leave the standard error undefined.
    #[error("at least 2 samples are required for the hypothesis test, got {samples}")]
    TooFewSamples {
        /// Requested number of samples.
        samples: usize,
    },

    /// Significance level outside `(0, 1)`.
    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidAlpha(f64),

    /// Confidence level outside `(0, 1)`.
    #[error("confidence level must lie in (0, 1), got {0}")]
    InvalidConfidence(f64),

    /// Interval degrees of freedom below one.
    #[error("confidence interval degrees of freedom must be at least 1")]
    InvalidIntervalDf,

    /// Population distribution parameters rejected by `statrs`.
    #[error("invalid population distribution: {0}")]
    Normal(#[from] NormalError),

    /// I/O failure while writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialisation failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
