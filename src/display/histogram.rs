use std::fmt::Write as _;

/// Equal-width histogram of a set of values.
///
/// Bin edges follow the `'auto'` rule: the narrower of the Sturges and
/// Freedman–Diaconis widths, Sturges alone when the interquartile range is
/// zero. All values fall in some bin, so counts sum to the input length.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub min: f64,
    /// Width of every bin.
    pub width: f64,
    /// Counts per bin, left to right.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` with the `'auto'` rule. Non-finite values are skipped;
    /// `None` when nothing finite remains.
    pub fn auto(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return None;
        };

        let n = sorted.len() as f64;
        let range = max - min;

        if range <= 0.0 {
            return Some(Self {
                min: min - 0.5,
                width: 1.0,
                counts: vec![sorted.len()],
            });
        }

        let sturges = range / (n.log2() + 1.0);
        let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);
        let fd = 2.0 * iqr / n.cbrt();
        let target = if fd > 0.0 { fd.min(sturges) } else { sturges };

        let bins = ((range / target).ceil() as usize).max(1);
        let width = range / bins as f64;
        let mut counts = vec![0; bins];
        for &v in &sorted {
            if let Some(count) = counts.get_mut(Self::index(min, width, bins, v)) {
                *count += 1;
            }
        }
        Some(Self { min, width, counts })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Left and right edge of bin `i`.
    pub fn edges(&self, i: usize) -> (f64, f64) {
        let lo = self.min + self.width * i as f64;
        (lo, lo + self.width)
    }

    /// Right edge of the last bin.
    pub fn max(&self) -> f64 {
        self.min + self.width * self.bins() as f64
    }

    /// Bin containing `value`, `None` outside the histogram's range.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.min || value > self.max() {
            return None;
        }
        Some(Self::index(self.min, self.width, self.bins(), value))
    }

    // the right edge belongs to the last bin
    fn index(min: f64, width: f64, bins: usize, value: f64) -> usize {
        (((value - min) / width).floor() as usize).min(bins.saturating_sub(1))
    }

    /// Horizontal bar chart, one line per bin, with each marker's label
    /// appended to the bin holding its value.
    ///
    /// Markers outside the binned range get a line of their own, above the
    /// first bin or below the last, so every marker appears exactly once.
    pub fn render(&self, bar_width: usize, markers: &[(&str, f64)]) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (label, value) in markers.iter().filter(|(_, v)| *v < self.min) {
            let _ = writeln!(out, "{:>21} │  ◀ {label} ({value:.3}, below range)", "");
        }
        for (i, &count) in self.counts.iter().enumerate() {
            let (lo, hi) = self.edges(i);
            let len = (count * bar_width).div_ceil(peak);
            let _ = write!(out, "{lo:>9.3} – {hi:<9.3} │{:<bar_width$} {count:>4}", "█".repeat(len));
            for (label, value) in markers {
                if self.bin_of(*value) == Some(i) {
                    let _ = write!(out, "  ◀ {label}");
                }
            }
            out.push('\n');
        }
        for (label, value) in markers.iter().filter(|(_, v)| v.is_nan() || *v > self.max()) {
            let side = if value.is_nan() { "not finite" } else { "above range" };
            let _ = writeln!(out, "{:>21} │  ◀ {label} ({value:.3}, {side})", "");
        }
        out
    }
}

// linear interpolation between closest ranks, on sorted data
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let h = sorted.len().saturating_sub(1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    match (sorted.get(lo), sorted.get(hi)) {
        (Some(&a), Some(&b)) => a + (h - lo as f64) * (b - a),
        _ => f64::NAN,
    }
}
