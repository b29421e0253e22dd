//! Domain layer for the configuration build pipeline
//!
//! This module contains the typed document model, the error kinds, and the
//! initializer contracts the fan-out consumes.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ConfigError, ConfigResult, InitError, ResourceError};
