//! Plain-text statistics report.

use chrono::Local;

use crate::config::PlotConfig;
use crate::error::Result;
use crate::histogram::Histogram;
use crate::series::{MeasurementSeries, Primitive};
use crate::util::format_ns;

/// Render the report for each `(primitive, series)` pair, in order.
///
/// Fails with `EmptyInput` as soon as one series has no samples.
pub fn render(series: &[(Primitive, &MeasurementSeries)], config: &PlotConfig) -> Result<String> {
    let mut out = format!("Latency report ({})\n", Local::now().format("%Y-%m-%d %H:%M:%S"));

    for &(primitive, data) in series {
        let summary = data.summarize()?;
        let chunked = data.chunked(config.chunk_size)?;
        let hist = Histogram::build(data.latencies(), config.bin_count, 0.0, config.latency_max as f64)?;

        out.push_str(&format!(
            "\n=== {name} STATISTICS ===\n\
             Samples: {count}\n\
             Minimum: {min} ns\n\
             Maximum: {max} ns\n\
             Average: {mean:.2} ns ({mean_human})\n\
             Std Dev: {stddev:.2} ns\n\
             Chunked: {points} points of {chunk} samples\n\
             Outside 0..{latency_max} ns: {below} below, {above} above\n",
            name = primitive.label().to_uppercase(),
            count = summary.count,
            min = summary.min,
            max = summary.max,
            mean = summary.mean,
            mean_human = format_ns(summary.mean),
            stddev = summary.stddev,
            points = chunked.len(),
            chunk = config.chunk_size,
            latency_max = config.latency_max,
            below = hist.underflow,
            above = hist.overflow,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn test_render_lists_each_primitive() {
        let mutex: MeasurementSeries = vec![(1, 100), (2, 300)].into_iter().collect();
        let sem: MeasurementSeries = vec![(1, 50_000)].into_iter().collect();
        let text = render(
            &[(Primitive::Mutex, &mutex), (Primitive::Semaphore, &sem)],
            &PlotConfig::default(),
        )
        .unwrap();

        assert!(text.contains("=== MUTEX STATISTICS ==="));
        assert!(text.contains("=== SEMAPHORE STATISTICS ==="));
        assert!(text.contains("Average: 200.00 ns"));
        assert!(text.contains("Std Dev: 100.00 ns"));
        assert!(text.contains("Chunked: 1 points of 100 samples"));
        assert!(text.contains("Outside 0..30000 ns: 0 below, 1 above"));
        assert!(text.find("MUTEX").unwrap() < text.find("SEMAPHORE").unwrap());
    }

    #[test]
    fn test_render_empty_series_fails() {
        let empty = MeasurementSeries::new();
        let err = render(&[(Primitive::Mutex, &empty)], &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }
}
