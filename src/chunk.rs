//! Block-mean coarsening of a series into fixed-size windows.
//!
//! A capture can hold tens of thousands of samples, far more than a terminal
//! chart has columns. Each window of `chunk_size` consecutive samples becomes
//! one point holding the mean index and mean latency of that window. The last
//! window may be shorter when the length is not a multiple of the chunk size.

use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPoint {
    pub avg_index: f64,
    pub avg_latency: f64,
    /// Offset of the first source sample in the window.
    pub start: usize,
    // chunk_size except maybe the last window
    pub len: usize,
}

/// Averaged points in window order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkedSeries {
    pub chunk_size: usize,
    pub points: Vec<ChunkPoint>,
}

impl ChunkedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.avg_index, p.avg_latency))
    }

    pub fn peak_latency(&self) -> f64 {
        self.points.iter().map(|p| p.avg_latency).fold(0.0, f64::max)
    }

    pub fn last_index(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.avg_index)
    }
}

/// Average `indices`/`latencies` over consecutive windows of `chunk_size`.
///
/// Produces `ceil(N / chunk_size)` points, none for empty input.
pub fn average_by_chunks(
    indices: &[i64],
    latencies: &[i64],
    chunk_size: usize,
) -> Result<ChunkedSeries> {
    if chunk_size == 0 {
        return Err(AnalysisError::InvalidArgument(
            "chunk size must be at least 1".to_string(),
        ));
    }
    if indices.len() != latencies.len() {
        return Err(AnalysisError::InvalidArgument(format!(
            "index and latency lengths differ ({} vs {})",
            indices.len(),
            latencies.len()
        )));
    }

    let points = indices
        .chunks(chunk_size)
        .zip(latencies.chunks(chunk_size))
        .enumerate()
        .map(|(i, (idx, lat))| ChunkPoint {
            avg_index: mean(idx),
            avg_latency: mean(lat),
            start: i * chunk_size,
            len: idx.len(),
        })
        .collect();

    Ok(ChunkedSeries { chunk_size, points })
}

fn mean(window: &[i64]) -> f64 {
    let total: i128 = window.iter().map(|&v| v as i128).sum();
    total as f64 / window.len() as f64
}
