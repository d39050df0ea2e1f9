use crate::error::{AnalysisError, Result};

/// Min, max, mean, population standard deviation and count of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSummary {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub stddev: f64,
    pub count: usize,
}

// Population stddev (divides by count). i128 sums keep the mean exact
// up to the final division.
pub fn summarize(values: &[i64]) -> Result<StatisticsSummary> {
    let (&first, rest) = values.split_first().ok_or(AnalysisError::EmptyInput)?;

    let mut min = first;
    let mut max = first;
    let mut total = first as i128;
    for &v in rest {
        min = min.min(v);
        max = max.max(v);
        total += v as i128;
    }

    let count = values.len();
    let mean = total as f64 / count as f64;
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();
    let stddev = (sum_sq / count as f64).sqrt();

    Ok(StatisticsSummary {
        min,
        max,
        mean,
        stddev,
        count,
    })
}
