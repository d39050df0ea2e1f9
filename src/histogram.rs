//! Fixed-range frequency histogram.

use crate::constants::MAX_BIN_COUNT;
use crate::error::{AnalysisError, Result};

/// Equal-width bins over `[lo, hi]`. The last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub bins: Vec<u64>,
    /// Samples below `lo`.
    pub underflow: u64,
    /// Samples above `hi`.
    pub overflow: u64,
}

impl Histogram {
    pub fn build(values: &[i64], bin_count: usize, lo: f64, hi: f64) -> Result<Self> {
        if bin_count == 0 || bin_count > MAX_BIN_COUNT {
            return Err(AnalysisError::InvalidArgument(format!(
                "histogram bin count must be in 1..={MAX_BIN_COUNT}, got {bin_count}"
            )));
        }
        let valid_range = lo.is_finite() && hi.is_finite() && hi > lo;
        if !valid_range {
            return Err(AnalysisError::InvalidArgument(format!(
                "empty histogram range [{lo}, {hi}]"
            )));
        }

        let mut hist = Histogram {
            lo,
            hi,
            bins: vec![0; bin_count],
            underflow: 0,
            overflow: 0,
        };
        let width = hist.bin_width();

        for &v in values {
            let v = v as f64;
            if v < lo {
                hist.underflow += 1;
            } else if v > hi {
                hist.overflow += 1;
            } else {
                let slot = (((v - lo) / width) as usize).min(bin_count - 1);
                hist.bins[slot] += 1;
            }
        }

        if hist.in_range() == 0 && !values.is_empty() {
            tracing::warn!(lo, hi, samples = values.len(), "no samples inside histogram range");
        }
        Ok(hist)
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.bins.len() as f64
    }

    /// `[start, end)` of bin `i`.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let w = self.bin_width();
        (self.lo + i as f64 * w, self.lo + (i + 1) as f64 * w)
    }

    /// Samples counted in some bin.
    pub fn in_range(&self) -> u64 {
        self.bins.iter().sum()
    }

    pub fn peak(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts_into_bins() {
        let h = Histogram::build(&[0, 5, 10, 15, 19], 2, 0.0, 20.0).unwrap();
        assert_eq!(h.bins, vec![2, 3]);
        assert_eq!(h.in_range(), 5);
        assert_eq!(h.peak(), 3);
    }

    #[test]
    fn test_upper_edge_lands_in_last_bin() {
        let h = Histogram::build(&[20], 4, 0.0, 20.0).unwrap();
        assert_eq!(h.bins, vec![0, 0, 0, 1]);
        assert_eq!(h.overflow, 0);
    }

    #[test]
    fn test_out_of_range_values_are_tallied() {
        let h = Histogram::build(&[-1, 5, 21, 1000], 2, 0.0, 20.0).unwrap();
        assert_eq!(h.underflow, 1);
        assert_eq!(h.overflow, 2);
        assert_eq!(h.in_range(), 1);
    }

    #[test]
    fn test_bin_range() {
        let h = Histogram::build(&[], 50, 0.0, 30_000.0).unwrap();
        assert_eq!(h.bin_width(), 600.0);
        assert_eq!(h.bin_range(0), (0.0, 600.0));
        assert_eq!(h.bin_range(49), (29_400.0, 30_000.0));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(Histogram::build(&[1], 0, 0.0, 1.0).is_err());
        assert!(Histogram::build(&[1], usize::MAX / 4, 0.0, 1.0).is_err());
        assert!(Histogram::build(&[1], MAX_BIN_COUNT, 0.0, 1.0).is_ok());
        assert!(Histogram::build(&[1], 3, 5.0, 5.0).is_err());
        assert!(Histogram::build(&[1], 3, f64::NAN, 5.0).is_err());
    }
}
