use serde::{Deserialize, Serialize};

use crate::{Dispersion, Interval, Sample, TTestResult, Verdict};

/// Outcome of one resampling experiment. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Quantity that was compared.
    pub dispersion: Dispersion,
    /// Population reference value (the null hypothesis).
    pub population_dispersion: f64,
    /// One estimate per sample, in draw order.
    pub estimates: Sample<f64>,
    /// Arithmetic mean of `estimates`.
    pub mean_estimate: f64,
    /// One-sample t-test of `estimates` against `population_dispersion`.
    pub test: TTestResult<f64>,
    /// Significance level the verdict was reached at.
    pub alpha: f64,
    /// Accept iff `test.p_value > alpha`.
    pub verdict: Verdict,
    /// Confidence interval for `mean_estimate`, when requested.
    pub interval: Option<Interval<f64>>,
}

/// One row of the per-sample export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    /// 1-based draw index.
    pub sample: usize,
    /// Dispersion estimate of that sample.
    pub estimate: f64,
}

impl EstimationResult {
    /// Sentence stating the decision, naming the compared quantity.
    pub fn verdict_text(&self) -> String {
        let q = self.dispersion.label();
        match self.verdict {
            Verdict::Accept => format!(
                "Accept the null hypothesis: The sample {q} is an unbiased estimator of the population {q}."
            ),
            Verdict::Reject => format!(
                "Reject the null hypothesis: The sample {q} is not an unbiased estimator of the population {q}."
            ),
        }
    }

    /// Per-sample estimates numbered from 1.
    pub fn records(&self) -> Sample<EstimateRecord> {
        self.estimates
            .iter()
            .enumerate()
            .map(|(i, &estimate)| EstimateRecord { sample: i + 1, estimate })
            .collect()
    }

    /// One `Sample i: value` line per estimate.
    pub fn sample_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records()
            .into_iter()
            .map(|r| format!("Sample {}: {:.2}", r.sample, r.estimate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(verdict: Verdict) -> EstimationResult {
        EstimationResult {
            dispersion: Dispersion::Variance,
            population_dispersion: 4.0,
            estimates: Sample::new(vec![3.5, 4.25, 4.0]),
            mean_estimate: 3.916_666_666_666_667,
            test: TTestResult { statistic: -0.38, df: 2.0, p_value: 0.74 },
            alpha: 0.05,
            verdict,
            interval: None,
        }
    }

    #[test]
    fn verdict_text_names_the_quantity() {
        assert!(result(Verdict::Accept).verdict_text().starts_with("Accept the null hypothesis"));
        let reject = EstimationResult { dispersion: Dispersion::StdDev, ..result(Verdict::Reject) };
        assert_eq!(
            reject.verdict_text(),
            "Reject the null hypothesis: The sample standard deviation is not an unbiased \
             estimator of the population standard deviation."
        );
    }

    #[test]
    fn records_are_numbered_from_one() {
        let records = result(Verdict::Accept).records();
        assert_eq!(records.len(), 3);
        assert_eq!(records.data.first(), Some(&EstimateRecord { sample: 1, estimate: 3.5 }));
        assert_eq!(records.data.last().map(|r| r.sample), Some(3));
    }

    #[test]
    fn sample_lines_use_two_decimals() {
        let lines: Vec<String> = result(Verdict::Accept).sample_lines().collect();
        assert_eq!(lines, ["Sample 1: 3.50", "Sample 2: 4.25", "Sample 3: 4.00"]);
    }

    #[test]
    fn serialises_estimates_as_a_list() {
        let json = serde_json::to_value(result(Verdict::Accept)).unwrap();
        assert_eq!(json["estimates"], serde_json::json!([3.5, 4.25, 4.0]));
        assert_eq!(json["verdict"], "accept");
        assert_eq!(json["dispersion"], "variance");
    }

    #[test]
    fn degenerate_test_round_trips_through_json() {
        let mut r = result(Verdict::Reject);
        r.estimates = Sample::new(vec![4.0; 3]);
        r.mean_estimate = 4.0;
        r.population_dispersion = 3.5;
        r.test = TTestResult { statistic: f64::INFINITY, df: 2.0, p_value: 0.0 };
        let text = serde_json::to_string(&r).unwrap();
        let back: EstimationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, r);
    }
}
