use rand::Rng;

use super::Re;
use crate::Sample;

/// Draws with replacement. Each resample has `size` observations, or the
/// length of the source when no size is set; `size` may exceed that length.
///
/// The generator is owned, so pass `&mut rng` to share a caller's generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bootstrap<R: Rng> {
    /// Source of randomness.
    pub rng: R,
    /// Observations per resample.
    pub size: Option<usize>,
}

impl<R: Rng> Bootstrap<R> {
    /// Resamples the same size as the source.
    pub fn new(rng: R) -> Self {
        Self { rng, size: None }
    }

    /// Fix the number of observations per resample.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

impl<T: Copy, R: Rng> Re<Sample<T>> for Bootstrap<R> {
    type Item = Sample<T>;

    fn re<'a>(&'a mut self, sample: &'a Sample<T>) -> impl Iterator<Item = Self::Item> + 'a {
        let size = self.size.unwrap_or(sample.len());
        BootstrapIter::new(&sample.data, &mut self.rng, size)
    }
}

/// Iterator behind [`Bootstrap::re`]. Empty when the source is empty.
pub struct BootstrapIter<'a, T, R: Rng> {
    data: &'a [T],
    rng: &'a mut R,
    size: usize,
}

impl<'a, T: Copy, R: Rng> BootstrapIter<'a, T, R> {
    fn new(data: &'a [T], rng: &'a mut R, size: usize) -> Self {
        Self { data, rng, size }
    }
}

impl<T: Copy, R: Rng> Iterator for BootstrapIter<'_, T, R> {
    type Item = Sample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.data.len();
        if n == 0 {
            return None;
        }

        let mut buffer = Vec::with_capacity(self.size);
        for _ in 0..self.size {
            if let Some(&x) = self.data.get(self.rng.gen_range(0..n)) {
                buffer.push(x);
            }
        }
        Some(Sample::new(buffer))
    }
}
