//! Common test utilities for integration tests
//!
//! Provides builders wired to offline initializers and document fixtures.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use appconf::domain::errors::ResourceError;
use appconf::domain::models::{ClientConfig, CrawlConfig, DatabaseConfig};
use appconf::domain::ports::{CrawlerInitializer, DatabaseInitializer};
use appconf::infrastructure::crawler::{Collector, CollectorInitializer, CrawlLimits};
use appconf::infrastructure::database::PostgresInitializer;
use appconf::infrastructure::http::ReqwestClientFactory;
use appconf::services::{ConfigBuilder, Initializers};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tempfile::NamedTempFile;

/// Builder with production initializers, except databases connect lazily
pub fn lazy_builder() -> ConfigBuilder {
    ConfigBuilder::new(Initializers {
        database: Arc::new(PostgresInitializer::lazy()),
        http: Arc::new(ReqwestClientFactory),
        crawler: Arc::new(CollectorInitializer),
    })
}

/// Builder whose fake initializers fail entries named `bad*`
pub fn fake_builder() -> ConfigBuilder {
    ConfigBuilder::new(Initializers {
        database: Arc::new(FakeDatabases),
        http: Arc::new(ReqwestClientFactory),
        crawler: Arc::new(FakeCrawlers),
    })
}

/// Write a document to a temporary file
pub fn write_document(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write document");
    file.flush().expect("Failed to flush document");
    file
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub struct FakeDatabases;

#[async_trait]
impl DatabaseInitializer for FakeDatabases {
    async fn initialize(
        &self,
        config: &DatabaseConfig,
        _app_name: &str,
    ) -> Result<PgPool, ResourceError> {
        if config.name.starts_with("bad") {
            return Err(ResourceError::MissingFields {
                component: "DatabaseConfig",
                fields: vec!["Server"],
            });
        }
        Ok(PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new()))
    }
}

pub struct FakeCrawlers;

impl CrawlerInitializer for FakeCrawlers {
    fn initialize(
        &self,
        config: &CrawlConfig,
        _client: &ClientConfig,
        app_name: &str,
    ) -> Result<Collector, ResourceError> {
        if config.name.starts_with("bad") {
            return Err(ResourceError::Crawl(format!("refused {}", config.name)));
        }
        Ok(Collector::new(
            reqwest::Client::new(),
            format!("{app_name}-test"),
            CrawlLimits::default(),
        ))
    }
}

/// A document exercising every collection
pub const FULL_DOCUMENT: &str = r"
AppName: billing
Env: test
Port: 8080
ComponentConfigs:
  Client:
    Timeout: 15
    MaxConnsPerHost: 50
Databases:
  - Name: orders
    Scheme: postgres
    Server: db.internal:5432
    Username: svc
    Password: hunter2
    Database: orders
    MaxConnections: 10
  - Name: reports
    Scheme: postgres
    Username: svc
    Database: reports
Services:
  - Name: search
    URL: https://search.example.com/
    ComponentConfigs:
      Client:
        Timeout: 30
    Endpoints:
      - Name: query
        Path: /v1/query
  - Name: ledger
    URL: https://ledger.example.com
Crawlers:
  - Name: news
    TimeoutSeconds: 10
    MaxDepth: 3
";
