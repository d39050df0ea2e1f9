//! Plot configuration.
//!
//! Presentation constants live here instead of being baked into the renderer.
//! A TOML file may set any subset of the keys:
//!
//! ```toml
//! bin_count = 50
//! latency_max = 30000
//! y_max = 60000
//! chunk_size = 100
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BIN_COUNT, DEFAULT_CHUNK_SIZE, DEFAULT_LATENCY_MAX_NS, DEFAULT_Y_MAX, MAX_BIN_COUNT,
};
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub bin_count: usize,
    // ns, also caps the timeline y axis
    pub latency_max: u64,
    pub y_max: u64,
    pub chunk_size: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            latency_max: DEFAULT_LATENCY_MAX_NS,
            y_max: DEFAULT_Y_MAX,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

// Command line values; None keeps the configured one
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub bin_count: Option<usize>,
    pub latency_max: Option<u64>,
    pub y_max: Option<u64>,
    pub chunk_size: Option<usize>,
}

impl PlotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AnalysisError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| AnalysisError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the optional file, then overrides. The result is validated.
    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let base = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(overrides);
        config.validate()?;
        tracing::debug!(?config, "plot config resolved");
        Ok(config)
    }

    pub fn with_overrides(self, o: Overrides) -> Self {
        Self {
            bin_count: o.bin_count.unwrap_or(self.bin_count),
            latency_max: o.latency_max.unwrap_or(self.latency_max),
            y_max: o.y_max.unwrap_or(self.y_max),
            chunk_size: o.chunk_size.unwrap_or(self.chunk_size),
        }
    }

    // Zero is meaningless for every field; bin_count is also capped
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("bin_count", self.bin_count as u64),
            ("latency_max", self.latency_max),
            ("y_max", self.y_max),
            ("chunk_size", self.chunk_size as u64),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(AnalysisError::InvalidArgument(format!("{name} must be positive")));
            }
        }
        if self.bin_count > MAX_BIN_COUNT {
            return Err(AnalysisError::InvalidArgument(format!(
                "bin_count must be at most {MAX_BIN_COUNT}"
            )));
        }
        Ok(())
    }
}
