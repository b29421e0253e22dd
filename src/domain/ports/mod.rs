//! Port trait definitions (Hexagonal Architecture)
//!
//! Initializer contracts the resource fan-out calls for each entry kind:
//! - `DatabaseInitializer`: builds a connection pool, may fail
//! - `HttpClientFactory`: builds an HTTP client, never fails
//! - `CrawlerInitializer`: builds a crawl collector, may fail
//!
//! Infrastructure supplies the production implementations; tests inject
//! their own.

pub mod initializers;

pub use initializers::{CrawlerInitializer, DatabaseInitializer, HttpClientFactory};
