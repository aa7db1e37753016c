mod ttest;

pub use ttest::{OneSampleTTest, TTestResult, Verdict};
