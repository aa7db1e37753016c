/// A statistic computed from a data set `D`, producing a value of type `T`.
pub trait Statistic<D, T> {
    /// Evaluate the statistic on `data`.
    fn compute(&self, data: &D) -> T;
}

mod mean;
mod dispersion;
mod se;
mod studentized;
mod ci;

pub use mean::Mean;
pub use dispersion::{Dispersion, Spread, StdDev, Variance};
pub use se::SEMean;
pub use studentized::Studentized;
pub use ci::{Interval, TInterval};

// ===== 2-tuple =====
impl<D, T1, T2, S1, S2> Statistic<D, (T1, T2)> for (S1, S2)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
{
    #[inline]
    fn compute(&self, data: &D) -> (T1, T2) {
        (self.0.compute(data), self.1.compute(data))
    }
}

// ===== 3-tuple =====
impl<D, T1, T2, T3, S1, S2, S3> Statistic<D, (T1, T2, T3)> for (S1, S2, S3)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
    S3: Statistic<D, T3>,
{
    #[inline]
    fn compute(&self, data: &D) -> (T1, T2, T3) {
        (
            self.0.compute(data),
            self.1.compute(data),
            self.2.compute(data),
        )
    }
}
