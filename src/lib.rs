//! Mutex vs semaphore latency analysis.
//!
//! Loads `<index> <latency>` capture files, summarizes them, coarsens the
//! time series into fixed-size averaged windows and renders both as a
//! terminal histogram and timeline.

pub mod app;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod histogram;
pub mod recorder;
pub mod report;
pub mod series;
pub mod stats;
pub mod ui;
pub mod util;

pub use chunk::{average_by_chunks, ChunkPoint, ChunkedSeries};
pub use error::AnalysisError;
pub use series::{load, MeasurementSeries, Primitive};
pub use stats::{summarize, StatisticsSummary};
