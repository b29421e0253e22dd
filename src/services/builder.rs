use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::ConfigDocument;
use crate::domain::ports::{CrawlerInitializer, DatabaseInitializer, HttpClientFactory};
use crate::infrastructure::config::{parse_document, DatabaseSettings, DocumentReader, RawDocument};
use crate::infrastructure::crawler::CollectorInitializer;
use crate::infrastructure::http::ReqwestClientFactory;

use super::error_aggregator::ErrorAggregator;
use super::fan_out::ResourceFanOut;
use super::merge::MergeEngine;

/// The three initializers a build fans out to
#[derive(Clone)]
pub struct Initializers {
    pub database: Arc<dyn DatabaseInitializer>,
    pub http: Arc<dyn HttpClientFactory>,
    pub crawler: Arc<dyn CrawlerInitializer>,
}

impl Initializers {
    /// Postgres pools, reqwest clients and reqwest-backed collectors
    pub fn production(database: &DatabaseSettings) -> Self {
        Self {
            database: Arc::new(database.initializer()),
            http: Arc::new(ReqwestClientFactory),
            crawler: Arc::new(CollectorInitializer),
        }
    }
}

/// Result of a build that got past reading and decoding
#[derive(Debug)]
pub struct BuildOutcome {
    pub document: ConfigDocument,
    /// Merge and initialization failures, in the order they were recorded
    pub errors: Vec<ConfigError>,
}

impl BuildOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The document when nothing failed, otherwise every recorded error
    pub fn into_result(self) -> Result<ConfigDocument, Vec<ConfigError>> {
        if self.errors.is_empty() {
            Ok(self.document)
        } else {
            Err(self.errors)
        }
    }
}

/// Runs read, decode, merge and fan-out in order.
///
/// A read or decode failure aborts the build. Everything after that is
/// collected so a partially initialized document is still returned.
#[derive(Clone)]
pub struct ConfigBuilder {
    initializers: Initializers,
}

impl ConfigBuilder {
    pub fn new(initializers: Initializers) -> Self {
        Self { initializers }
    }

    pub async fn build_from_path(&self, path: impl AsRef<Path>) -> ConfigResult<BuildOutcome> {
        let raw = DocumentReader::read_path(path)?;
        self.build(raw).await
    }

    pub async fn build_from_reader(
        &self,
        source_name: &str,
        reader: impl Read,
    ) -> ConfigResult<BuildOutcome> {
        let raw = DocumentReader::read_from(source_name, reader)?;
        self.build(raw).await
    }

    pub async fn build_from_bytes(&self, bytes: &[u8]) -> ConfigResult<BuildOutcome> {
        self.build_from_reader("<memory>", bytes).await
    }

    #[instrument(skip_all, fields(hash = %raw.hash))]
    async fn build(&self, raw: RawDocument) -> ConfigResult<BuildOutcome> {
        let mut document = parse_document(&raw)?;
        let mut errors = ErrorAggregator::new();

        MergeEngine::apply(&mut document, &mut errors);

        ResourceFanOut::new(
            self.initializers.database.as_ref(),
            self.initializers.http.as_ref(),
            self.initializers.crawler.as_ref(),
        )
        .run(&mut document, &mut errors)
        .await;

        info!(
            app = %document.app_name,
            entries = document.entry_count(),
            errors = errors.len(),
            "config built"
        );
        Ok(BuildOutcome {
            document,
            errors: errors.into_vec(),
        })
    }
}
