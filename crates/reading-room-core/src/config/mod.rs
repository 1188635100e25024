//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field has a default, so an empty configuration runs
//! the stock three-book simulation.

pub mod library;
pub mod logging;
pub mod reading;

use serde::{Deserialize, Serialize};

use self::library::LibraryConfig;
use self::logging::LoggingConfig;
use self::reading::ReadingConfig;

use crate::error::AppError;
use crate::types::Catalog;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Room, quota, and catalog settings.
    #[serde(default)]
    pub library: LibraryConfig,
    /// Reading delay settings.
    #[serde(default)]
    pub reading: ReadingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay and
    /// environment variables prefixed with `READING_ROOM` (for example
    /// `READING_ROOM__LIBRARY__READERS=8`). The result is not validated;
    /// call [`validate`](Self::validate) once all overrides are applied.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("READING_ROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check the values a run cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.library.max_readers_in_room == 0 {
            return Err(AppError::configuration(
                "library.max_readers_in_room must be at least 1",
            ));
        }
        if self.library.max_books_per_reader == 0 {
            return Err(AppError::configuration(
                "library.max_books_per_reader must be at least 1",
            ));
        }
        if self.reading.min_delay_ms >= self.reading.max_delay_ms {
            return Err(AppError::configuration(format!(
                "reading delay range is empty: [{}, {})",
                self.reading.min_delay_ms, self.reading.max_delay_ms
            )));
        }
        self.catalog()?;
        Ok(())
    }

    /// Build the catalog described by `library.catalog`.
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        Catalog::new(self.library.catalog.iter().cloned())
            .map_err(|e| AppError::configuration(format!("Invalid catalog: {}", e.message)))
    }
}
