//! appconf - configuration build pipeline
//!
//! Turns one YAML configuration document into live resources: Postgres pools
//! for database entries, HTTP clients for service entries and crawl
//! collectors for crawler entries.
//!
//! # Pipeline
//!
//! 1. **Read**: buffer the document and fingerprint its bytes
//! 2. **Decode**: build name-keyed collections of typed entries
//! 3. **Merge**: layer each entry's component overrides on the defaults
//! 4. **Fan out**: hand each entry to its initializer, collecting failures
//! 5. **Look up**: query entries by collection and name
//!
//! Read and decode failures abort a build. Merge and initialization
//! failures are collected and returned next to the partially initialized
//! document.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): document model, errors and initializer ports
//! - **Service Layer** (`services`): merge, fan-out and the builder
//! - **Infrastructure Layer** (`infrastructure`): reader, decoder, settings,
//!   sqlx, reqwest and logging adapters
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use appconf::infrastructure::config::DatabaseSettings;
//! use appconf::services::{ConfigBuilder, Initializers};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let builder = ConfigBuilder::new(Initializers::production(&DatabaseSettings::default()));
//!     let outcome = builder.build_from_path("config.yaml").await?;
//!     let search = outcome.document.service("search")?;
//!     if let Some(url) = search.endpoint_url("query") {
//!         println!("{url}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ClientConfig, ComponentConfig, ConfigDocument, ContentHash, CrawlConfig, DatabaseConfig,
    EntryKind, EntryRef, ResourceState, ServiceConfig, Setting,
};
pub use domain::ports::{CrawlerInitializer, DatabaseInitializer, HttpClientFactory};
pub use domain::{ConfigError, ConfigResult, InitError, ResourceError};
pub use services::{BuildOutcome, ConfigBuilder, Initializers};
