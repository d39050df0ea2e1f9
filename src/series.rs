//! Measurement series and the `.dat` loader.
//!
//! A capture file holds one sample per line: `<index> <latency>`, both
//! integers, latency in nanoseconds. Extra tokens are ignored. Blank lines,
//! lines with fewer than two tokens, and lines whose first two tokens are not
//! integers are skipped.

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ratatui::style::Color;

use crate::chunk::{average_by_chunks, ChunkedSeries};
use crate::constants::{MUTEX_FILE, SEMAPHORE_FILE};
use crate::error::{AnalysisError, Result};
use crate::stats::{summarize, StatisticsSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Mutex,
    Semaphore,
}

impl Primitive {
    pub const ALL: [Primitive; 2] = [Primitive::Mutex, Primitive::Semaphore];

    pub fn file_name(self) -> &'static str {
        match self {
            Primitive::Mutex => MUTEX_FILE,
            Primitive::Semaphore => SEMAPHORE_FILE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Primitive::Mutex => "Mutex",
            Primitive::Semaphore => "Semaphore",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Primitive::Mutex => Color::Blue,
            Primitive::Semaphore => Color::Red,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered `(index, latency)` samples, stored as two parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementSeries {
    indices: Vec<i64>,
    latencies: Vec<i64>,
}

impl MeasurementSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            latencies: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, index: i64, latency: i64) {
        self.indices.push(index);
        self.latencies.push(latency);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn latencies(&self) -> &[i64] {
        &self.latencies
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.indices.iter().copied().zip(self.latencies.iter().copied())
    }

    pub fn summarize(&self) -> Result<StatisticsSummary> {
        summarize(&self.latencies)
    }

    pub fn chunked(&self, chunk_size: usize) -> Result<ChunkedSeries> {
        average_by_chunks(&self.indices, &self.latencies, chunk_size)
    }
}

impl FromIterator<(i64, i64)> for MeasurementSeries {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        let mut series = MeasurementSeries::new();
        for (index, latency) in iter {
            series.push(index, latency);
        }
        series
    }
}

/// Load a capture file. Only failing to open or read the file is an error.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeasurementSeries> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let series = parse_series(BufReader::new(file)).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), samples = series.len(), "loaded series");
    Ok(series)
}

pub fn parse_series<R: BufRead>(reader: R) -> std::io::Result<MeasurementSeries> {
    let mut series = MeasurementSeries::new();
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some((index, latency)) => series.push(index, latency),
            None => {
                skipped += 1;
                tracing::debug!(line = line_no + 1, content = %line, "skipping malformed line");
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "malformed lines skipped");
    }
    Ok(series)
}

fn parse_line(line: &str) -> Option<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let index = tokens.next()?.parse().ok()?;
    let latency = tokens.next()?.parse().ok()?;
    Some((index, latency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_skips_blank_and_malformed_lines() {
        let series = parse_series(Cursor::new("10 200\n\n20 abc\n30 400\n")).unwrap();
        assert_eq!(series.iter().collect::<Vec<_>>(), vec![(10, 200), (30, 400)]);
    }

    #[test]
    fn test_parse_skips_single_token_lines() {
        let series = parse_series(Cursor::new("1\n2 50\n   \n3")).unwrap();
        assert_eq!(series.indices(), &[2]);
        assert_eq!(series.latencies(), &[50]);
    }

    #[test]
    fn test_parse_ignores_trailing_tokens_and_extra_whitespace() {
        let series = parse_series(Cursor::new("  1\t\t700 extra tokens\n2   800\r\n")).unwrap();
        assert_eq!(series.iter().collect::<Vec<_>>(), vec![(1, 700), (2, 800)]);
    }

    #[test]
    fn test_parse_rejects_non_integer_index() {
        let series = parse_series(Cursor::new("1.5 700\nx 3\n4 9\n")).unwrap();
        assert_eq!(series.iter().collect::<Vec<_>>(), vec![(4, 9)]);
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let series = parse_series(Cursor::new("3 1\n1 2\n2 3\n")).unwrap();
        assert_eq!(series.indices(), &[3, 1, 2]);
    }

    #[test]
    fn test_parse_fails_on_invalid_utf8() {
        let bytes: &[u8] = b"1 2\n\xff\xfe 3\n";
        assert!(parse_series(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_load_missing_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("missing.dat")).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
        assert!(err.to_string().contains("missing.dat"));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 1500").unwrap();
        writeln!(file, "2 1700").unwrap();
        let series = load(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latencies(), &[1500, 1700]);
    }

    #[test]
    fn test_series_from_iter() {
        let series: MeasurementSeries = vec![(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(series.indices(), &[1, 2]);
        assert_eq!(series.latencies(), &[10, 20]);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_primitive_file_names() {
        assert_eq!(Primitive::Mutex.file_name(), "mutex_temporal.dat");
        assert_eq!(Primitive::Semaphore.file_name(), "semaphore_temporal.dat");
        assert_eq!(Primitive::Semaphore.to_string(), "Semaphore");
    }
}
