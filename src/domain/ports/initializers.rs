use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::ResourceError;
use crate::domain::models::{ClientConfig, CrawlConfig, DatabaseConfig};
use crate::infrastructure::crawler::Collector;
use crate::infrastructure::http::HttpClient;

/// Builds a live pool from a database entry's identity and connection fields
#[async_trait]
pub trait DatabaseInitializer: Send + Sync {
    /// Any bounded wait on connecting belongs to the implementation
    async fn initialize(
        &self,
        config: &DatabaseConfig,
        app_name: &str,
    ) -> Result<PgPool, ResourceError>;
}

/// Builds an HTTP client from merged client settings.
///
/// There is no failure path: malformed numeric settings degrade to zero.
pub trait HttpClientFactory: Send + Sync {
    fn build(&self, client: &ClientConfig) -> HttpClient;
}

/// Builds a crawl collector from a crawler entry
pub trait CrawlerInitializer: Send + Sync {
    fn initialize(
        &self,
        config: &CrawlConfig,
        client: &ClientConfig,
        app_name: &str,
    ) -> Result<Collector, ResourceError>;
}
