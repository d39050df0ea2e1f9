//! CLI argument parsing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::app::ViewMode;
use crate::config::Overrides;
use crate::constants::{DEFAULT_RECORD_SECS, DEFAULT_SLEEP_US, MUTEX_FILE, SEMAPHORE_FILE};

#[derive(Parser, Debug)]
#[command(name = "sync_latency")]
#[command(version)]
#[command(about = "Record and plot mutex vs semaphore latency", long_about = None)]
pub struct Cli {
    /// Print debug logs to stderr (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive histogram and timeline of both captures
    Plot(PlotArgs),
    /// Print summary statistics of both captures
    Report(InputArgs),
    /// Measure lock/unlock latencies and write the capture files
    Record(RecordArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum View {
    Histogram,
    Timeline,
}

impl From<View> for ViewMode {
    fn from(v: View) -> Self {
        match v {
            View::Histogram => ViewMode::Histogram,
            View::Timeline => ViewMode::Timeline,
        }
    }
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Mutex capture file
    #[arg(long, value_name = "FILE", default_value = MUTEX_FILE)]
    pub mutex: PathBuf,

    /// Semaphore capture file
    #[arg(long, value_name = "FILE", default_value = SEMAPHORE_FILE)]
    pub semaphore: PathBuf,

    /// TOML file with plot settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Histogram bin count
    #[arg(long = "bins", value_name = "N")]
    pub bin_count: Option<usize>,

    /// Upper bound of the latency axis in nanoseconds
    #[arg(long, value_name = "NS")]
    pub latency_max: Option<u64>,

    /// Histogram frequency ceiling
    #[arg(long, value_name = "N")]
    pub y_max: Option<u64>,

    /// Samples averaged per timeline point
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,
}

impl InputArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bin_count: self.bin_count,
            latency_max: self.latency_max,
            y_max: self.y_max,
            chunk_size: self.chunk_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Initial view
    #[arg(long, value_enum, default_value = "histogram")]
    pub view: View,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Seconds to sample each primitive
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_RECORD_SECS)]
    pub duration: u64,

    /// Sleep between samples, in microseconds
    #[arg(long = "interval-us", value_name = "US", default_value_t = DEFAULT_SLEEP_US)]
    pub interval_us: u64,

    /// Directory the capture files are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}
