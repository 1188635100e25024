//! # reading-room-core
//!
//! Core crate for the reading room simulation. Contains the catalog and
//! reader types, configuration schemas, lending events, the narration
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other reading room crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
