//! Simulated reading time.

use std::time::Duration;

use rand::Rng;

use reading_room_core::config::reading::ReadingConfig;
use reading_room_core::error::AppError;
use reading_room_core::result::AppResult;

/// Uniform random reading delay in `[min_ms, max_ms)` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingDelay {
    min_ms: u64,
    max_ms: u64,
}

impl ReadingDelay {
    /// Creates a delay range. The range must not be empty.
    pub fn new(min_ms: u64, max_ms: u64) -> AppResult<Self> {
        if min_ms >= max_ms {
            return Err(AppError::validation(format!(
                "Reading delay range is empty: [{min_ms}, {max_ms})"
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Creates the delay range described by `config`.
    pub fn from_config(config: &ReadingConfig) -> AppResult<Self> {
        Self::new(config.min_delay_ms, config.max_delay_ms)
    }

    /// Draw one delay, independently of every other draw.
    pub fn sample(&self) -> Duration {
        let ms = rand::rng().random_range(self.min_ms..self.max_ms);
        Duration::from_millis(ms)
    }
}

impl Default for ReadingDelay {
    fn default() -> Self {
        Self {
            min_ms: 500,
            max_ms: 1500,
        }
    }
}
