//! Resampling demonstration of whether sample variance is an unbiased
//! estimator of population variance.
//!
//! A synthetic [`Population`] is drawn from a normal distribution, repeated
//! [`Bootstrap`] samples are taken from it, and the mean of their dispersion
//! estimates is tested against the population's own dispersion with a
//! [`OneSampleTTest`]. The generator is always passed in explicitly.

mod error;
mod sample;
mod resample;
mod statistics;
mod hypothesis;
mod experiment;
mod display;
pub mod cli;

pub use crate::error::{Error, Result};
pub use crate::sample::{NormalSpec, Population, Sample};
pub use crate::resample::*;
pub use crate::statistics::*;
pub use crate::hypothesis::*;
pub use crate::experiment::{
    DEFAULT_ALPHA, DEFAULT_CONFIDENCE, EstimateRecord, EstimationResult, Experiment,
    ExperimentConfig, IntervalConfig, Reference, estimate, simulate,
};
pub use crate::display::Histogram;
pub use rand;
pub use rand::Rng;
