/*!
# Pair summary
Summary statistics over a pair table, matching the numbers that accompany an ANI vs. AF scatter plot.
AF is converted to a 0-1 ratio if any numeric AF (self and repeated pairs included) is above 1.0.
Rows are then cleaned (non-numeric, self, and repeated pairs removed), and only pairs inside the ANI range are kept for the statistics.

## Example usage
```rust
use pairtab::data_types::genome_pair::GenomePair;
use pairtab::data_types::pair_records::MergedRecord;
use pairtab::data_types::pair_summary::{PairSummary, SummaryConfigBuilder};

let records = vec![
    MergedRecord::new(GenomePair::new("g1", "g2"), "98.0".to_string(), Some("0.90".to_string())),
    MergedRecord::new(GenomePair::new("g1", "g3"), "96.0".to_string(), Some("0.70".to_string())),
    MergedRecord::new(GenomePair::new("g2", "g3"), "80.0".to_string(), Some("0.10".to_string())),
];
let config = SummaryConfigBuilder::default()
    .min_ani(95.0)
    .build().unwrap();
let summary = PairSummary::from_records(&records, config);
assert_eq!(summary.pairs_used, 2);
assert_eq!(summary.dropped_out_of_range, 1);
assert_eq!(summary.ani_median, Some(97.0));
```
*/
use derive_builder::Builder;
use log::{debug, warn};
use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use crate::data_types::genome_pair::GenomePair;
use crate::data_types::pair_records::MergedRecord;

/// Controls which pairs are included in the statistics
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(default)]
pub struct SummaryConfig {
    /// Minimum ANI (inclusive) for a pair to be included
    min_ani: f64,
    /// Maximum ANI (inclusive) for a pair to be included
    max_ani: f64
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_ani: 95.0,
            max_ani: 100.0
        }
    }
}

impl SummaryConfig {
    // getters
    pub fn min_ani(&self) -> f64 {
        self.min_ani
    }

    pub fn max_ani(&self) -> f64 {
        self.max_ani
    }
}

/// Summary of a pair table
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PairSummary {
    /// Number of rows in the input table
    pub total_rows: usize,
    /// Number of pairs that contributed to the statistics
    pub pairs_used: usize,
    /// Rows missing a numeric ANI or AF
    pub dropped_non_numeric: usize,
    /// Rows that compared a genome to itself or repeated an earlier pair
    pub dropped_self_or_duplicate: usize,
    /// Rows with an ANI outside of the configured range
    pub dropped_out_of_range: usize,
    /// Lower ANI bound that was applied
    pub min_ani: f64,
    /// Upper ANI bound that was applied
    pub max_ani: f64,
    /// True if AF values were percentages and got divided by 100
    pub af_as_percent: bool,
    pub ani_mean: Option<f64>,
    pub ani_median: Option<f64>,
    pub af_mean: Option<f64>,
    pub af_median: Option<f64>,
    /// Pearson correlation between ANI and AF ratio
    pub pearson_r: Option<f64>
}

impl PairSummary {
    /// Computes the summary for a collection of merged records
    /// # Arguments
    /// * `records` - the pair table rows
    /// * `config` - the ANI range to summarize
    pub fn from_records(records: &[MergedRecord], config: SummaryConfig) -> Self {
        let mut summary = PairSummary {
            total_rows: records.len(),
            min_ani: config.min_ani(),
            max_ani: config.max_ani(),
            ..Default::default()
        };

        // first pass, collect the numeric and unique pairs
        let mut observed: HashSet<&GenomePair> = Default::default();
        let mut max_af = f64::NEG_INFINITY;
        let mut points: Vec<(f64, f64)> = Vec::with_capacity(records.len());
        for record in records.iter() {
            let ani = record.ani().trim().parse::<f64>().ok();
            let af = record.af().and_then(|s| s.trim().parse::<f64>().ok());
            let (ani, af) = match (ani, af) {
                (Some(ani), Some(af)) if ani.is_finite() && af.is_finite() => (ani, af),
                _ => {
                    summary.dropped_non_numeric += 1;
                    continue;
                }
            };
            max_af = max_af.max(af);

            if record.pair().is_self_pair() || !observed.insert(record.pair()) {
                summary.dropped_self_or_duplicate += 1;
                continue;
            }
            points.push((ani, af));
        }

        if summary.dropped_non_numeric > 0 {
            warn!("Dropped {} rows with missing or non-numeric ANI/AF values", summary.dropped_non_numeric);
        }

        // AF from skani is a percentage, but other tools report a ratio
        summary.af_as_percent = max_af > 1.0;
        if summary.af_as_percent {
            debug!("AF values exceed 1.0, converting from percent to ratio");
            for point in points.iter_mut() {
                point.1 /= 100.0;
            }
        }

        let in_range: Vec<(f64, f64)> = points.into_iter()
            .filter(|&(ani, _af)| ani >= config.min_ani() && ani <= config.max_ani())
            .collect();
        summary.dropped_out_of_range = summary.total_rows - summary.dropped_non_numeric - summary.dropped_self_or_duplicate - in_range.len();
        summary.pairs_used = in_range.len();

        let ani_values: Vec<f64> = in_range.iter().map(|p| p.0).collect();
        let af_values: Vec<f64> = in_range.iter().map(|p| p.1).collect();
        summary.ani_mean = mean(&ani_values);
        summary.ani_median = median(&ani_values);
        summary.af_mean = mean(&af_values);
        summary.af_median = median(&af_values);
        summary.pearson_r = pearson(&ani_values, &af_values);
        summary
    }
}

/// Arithmetic mean, None if empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Median, averaging the two middle values for an even count; None if empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Pearson correlation coefficient.
/// Returns None with fewer than two points or if either side has no variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let mut cov = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        cov += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    if x_var == 0.0 || y_var == 0.0 {
        None
    } else {
        Some(cov / (x_var.sqrt() * y_var.sqrt()))
    }
}
