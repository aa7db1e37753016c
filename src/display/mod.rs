mod histogram;

pub use histogram::Histogram;

use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;

use crate::{EstimationResult, Verdict};

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl EstimationResult {
    /// Summary table of the run.
    pub fn summary_table(&self) -> String {
        let q = self.dispersion.label();

        let p_display = if self.test.p_value < 0.0001 {
            "< 0.0001".to_string()
        } else {
            format!("{:.4}", self.test.p_value)
        };
        let verdict_cell = match self.verdict {
            Verdict::Accept => "🟢 Accept H₀",
            Verdict::Reject => "🔴 Reject H₀",
        };

        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![
                Cell::new(format!("Sample {q} as an estimator of population {q}"))
                    .set_alignment(CellAlignment::Center),
            ]);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Metric").set_alignment(CellAlignment::Center),
                Cell::new("Value").set_alignment(CellAlignment::Center),
            ]);

        let rows = [
            (format!("Population {q}"), format!("{:.4}", self.population_dispersion)),
            (format!("Mean sample {q}"), format!("{:.4}", self.mean_estimate)),
            ("Samples".to_string(), self.estimates.len().to_string()),
            ("t statistic".to_string(), format!("{:.4}", self.test.statistic)),
            ("Degrees of freedom".to_string(), format!("{}", self.test.df)),
            ("p-value".to_string(), p_display),
            ("α".to_string(), format!("{}", self.alpha)),
        ];
        for (metric, value) in rows {
            table.add_row(vec![
                Cell::new(metric).set_alignment(CellAlignment::Left),
                Cell::new(value).set_alignment(CellAlignment::Right),
            ]);
        }
        if let Some(ci) = &self.interval {
            let label = match ci.confidence {
                Some(c) => format!("{:.0}% CI of mean {q}", c * 100.0),
                None => format!("CI of mean {q}"),
            };
            table.add_row(vec![
                Cell::new(label).set_alignment(CellAlignment::Left),
                Cell::new(format!("{ci:.4}")).set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new("Verdict").set_alignment(CellAlignment::Left),
            Cell::new(verdict_cell).set_alignment(CellAlignment::Right),
        ]);

        format!("{title_table}\n{table}\n{}", self.verdict_text())
    }

    /// Histogram of the estimates with the population and mean values marked.
    pub fn histogram(&self) -> String {
        let q = self.dispersion.label();
        match Histogram::auto(self.estimates.as_ref()) {
            Some(h) => {
                let population = format!("population {q}");
                let mean = format!("mean of sample {q}s");
                format!(
                    "Distribution of sample {q}s\n{}",
                    h.render(
                        BAR_WIDTH,
                        &[
                            (population.as_str(), self.population_dispersion),
                            (mean.as_str(), self.mean_estimate),
                        ],
                    )
                )
            }
            None => format!("No finite sample {q}s to plot\n"),
        }
    }
}

/// Full text report: summary, per-sample list and histogram.
impl Display for EstimationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary_table())?;
        writeln!(f)?;
        writeln!(f, "{}:", capitalise(&format!("sample {}s", self.dispersion.label())))?;
        for line in self.sample_lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.histogram())
    }
}
