use log::debug;
use rand::Rng;
use rand::distributions::Distribution;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::Sample;
use crate::error::{Error, Result};

/// Parameters of the normal distribution a population is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalSpec {
    /// Location.
    pub mean: f64,
    /// Standard deviation.
    pub spread: f64,
}

impl NormalSpec {
    /// Creates a spec; parameters are checked when a population is drawn.
    pub fn new(mean: f64, spread: f64) -> Self {
        Self { mean, spread }
    }

    fn distribution(&self) -> Result<Normal> {
        Ok(Normal::new(self.mean, self.spread)?)
    }
}

impl Default for NormalSpec {
    /// `Normal(50, 2)`.
    fn default() -> Self {
        Self { mean: 50.0, spread: 2.0 }
    }
}

/// A finite synthetic population. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    sample: Sample<f64>,
    spec: NormalSpec,
}

impl Population {
    /// Draw `size` independent values from `spec`.
    ///
    /// Only side effect is advancing `rng`.
    ///
    /// # Errors
    /// [`Error::EmptyPopulation`] for `size == 0`, [`Error::Normal`] for a
    /// non-finite mean or a non-positive spread.
    pub fn generate<R: Rng + ?Sized>(size: usize, spec: NormalSpec, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(Error::EmptyPopulation);
        }
        let normal = spec.distribution()?;
        let sample: Sample<f64> = (0..size).map(|_| normal.sample(rng)).collect();
        debug!(
            "generated population of {size} from Normal({}, {})",
            spec.mean, spec.spread
        );
        Ok(Self { sample, spec })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.sample.len()
    }

    /// Always `false` for a generated population.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }

    /// Distribution the population was drawn from.
    pub fn spec(&self) -> NormalSpec {
        self.spec
    }

    /// Members as a [`Sample`].
    pub fn sample(&self) -> &Sample<f64> {
        &self.sample
    }

    /// Members as a slice.
    pub fn values(&self) -> &[f64] {
        &self.sample.data
    }
}

impl AsRef<[f64]> for Population {
    fn as_ref(&self) -> &[f64] {
        self.values()
    }
}
