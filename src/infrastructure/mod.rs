//! Infrastructure layer module
//!
//! Adapters that satisfy the domain ports, plus the tool's own plumbing:
//! - Document reading, decoding and tool settings (serde_yaml, figment)
//! - Postgres pools (sqlx)
//! - HTTP clients and crawl collectors (reqwest)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod crawler;
pub mod database;
pub mod http;
pub mod logging;
