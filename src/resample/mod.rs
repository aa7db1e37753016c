mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapIter};

/// A resampling scheme producing an endless stream of resamples of `T`.
///
/// Takes `&mut self` so that each call advances the scheme's generator.
pub trait Re<T> {
    /// Type of a single resample.
    type Item;

    /// Stream resamples of `t`.
    fn re<'a>(&'a mut self, t: &'a T) -> impl Iterator<Item = Self::Item> + 'a;
}
