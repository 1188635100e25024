//! Reading delay configuration.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Bounds of the simulated per-book reading delay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Inclusive lower bound in milliseconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,
    /// Exclusive upper bound in milliseconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl ReadingConfig {
    /// The delay range in milliseconds, `[min, max)`.
    pub fn delay_range_ms(&self) -> Range<u64> {
        self.min_delay_ms..self.max_delay_ms
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

fn default_min_delay() -> u64 {
    500
}

fn default_max_delay() -> u64 {
    1500
}
