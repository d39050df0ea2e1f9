pub const TICK_RATE_MS: u64 = 250;

pub const MUTEX_FILE: &str = "mutex_temporal.dat";
pub const SEMAPHORE_FILE: &str = "semaphore_temporal.dat";

// Plot defaults, overridable from config or flags
pub const DEFAULT_BIN_COUNT: usize = 50;
pub const MAX_BIN_COUNT: usize = 10_000;
pub const DEFAULT_LATENCY_MAX_NS: u64 = 30_000;
pub const DEFAULT_Y_MAX: u64 = 60_000;
pub const DEFAULT_CHUNK_SIZE: usize = 100;

// Recorder defaults
pub const DEFAULT_RECORD_SECS: u64 = 60;
pub const DEFAULT_SLEEP_US: u64 = 1000;
