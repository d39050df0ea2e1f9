//! Latency probe for mutex and semaphore round trips.
//!
//! Each sample times one uncontended acquire + release pair with a monotonic
//! clock, then sleeps for the configured interval. Results are written as
//! `<index> <latency_ns>` lines with 1-based indices.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Condvar, Mutex, PoisonError,
    },
    thread,
    time::{Duration, Instant},
};

use crate::error::{AnalysisError, Result};
use crate::series::{MeasurementSeries, Primitive};

/// Counting semaphore.
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    pub fn wait(&self) {
        let mut permits = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        while *permits == 0 {
            permits = self
                .available
                .wait(permits)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *permits -= 1;
    }

    pub fn post(&self) {
        let mut permits = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        *permits += 1;
        self.available.notify_one();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    /// How long to keep sampling each primitive.
    pub duration: Duration,
    /// Pause between samples.
    pub interval: Duration,
}

/// Sample `primitive` until `options.duration` elapses or `stop` is set.
pub fn measure(primitive: Primitive, options: &RecordOptions, stop: &AtomicBool) -> MeasurementSeries {
    let mutex = Mutex::new(());
    let semaphore = Semaphore::new(1);

    let mut series = MeasurementSeries::new();
    let started = Instant::now();
    let mut index = 1i64;

    while started.elapsed() < options.duration && !stop.load(Ordering::Relaxed) {
        let t0 = Instant::now();
        match primitive {
            Primitive::Mutex => {
                drop(mutex.lock().unwrap_or_else(PoisonError::into_inner));
            }
            Primitive::Semaphore => {
                semaphore.wait();
                semaphore.post();
            }
        }
        let latency = i64::try_from(t0.elapsed().as_nanos()).unwrap_or(i64::MAX);

        series.push(index, latency);
        index += 1;

        if !options.interval.is_zero() {
            thread::sleep(options.interval);
        }
    }

    if stop.load(Ordering::Relaxed) {
        tracing::warn!(%primitive, samples = series.len(), "measurement interrupted");
    } else {
        tracing::info!(%primitive, samples = series.len(), "measurement finished");
    }
    series
}

/// Write `series` in the capture format read back by [`crate::series::load`].
pub fn save<P: AsRef<Path>>(series: &MeasurementSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    let to_err = |source| AnalysisError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(to_err)?);
    for (index, latency) in series.iter() {
        writeln!(out, "{index} {latency}").map_err(to_err)?;
    }
    out.flush().map_err(to_err)?;

    tracing::info!(path = %path.display(), samples = series.len(), "series saved");
    Ok(())
}
