//! Resource fan-out.
//!
//! Hands every entry to the initializer for its kind and stores the outcome
//! on the entry. One entry failing never stops the others; each failure is
//! recorded on the entry and in the aggregator.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{ConfigError, InitError, ResourceError};
use crate::domain::models::{ConfigDocument, EntryKind, ResourceState};
use crate::domain::ports::{CrawlerInitializer, DatabaseInitializer, HttpClientFactory};

use super::error_aggregator::ErrorAggregator;

/// Dispatches entries to the injected initializers
pub struct ResourceFanOut<'a> {
    database: &'a dyn DatabaseInitializer,
    http: &'a dyn HttpClientFactory,
    crawler: &'a dyn CrawlerInitializer,
}

impl<'a> ResourceFanOut<'a> {
    pub fn new(
        database: &'a dyn DatabaseInitializer,
        http: &'a dyn HttpClientFactory,
        crawler: &'a dyn CrawlerInitializer,
    ) -> Self {
        Self {
            database,
            http,
            crawler,
        }
    }

    /// Initialize every entry of an already merged document.
    ///
    /// Errors land in the aggregator ordered by kind (databases, services,
    /// crawlers) and then by entry name.
    #[instrument(skip_all, fields(app = %document.app_name))]
    pub async fn run(&self, document: &mut ConfigDocument, errors: &mut ErrorAggregator) {
        self.init_databases(document, errors).await;
        self.init_services(document);
        self.init_crawlers(document, errors);

        info!(
            databases = document.databases.len(),
            services = document.services.len(),
            crawlers = document.crawlers.len(),
            errors = errors.len(),
            "resource initialization finished"
        );
    }

    async fn init_databases(&self, document: &mut ConfigDocument, errors: &mut ErrorAggregator) {
        let mut names: Vec<String> = document.databases.keys().cloned().collect();
        names.sort();

        let app_name = document.app_name.as_str();
        let databases = &document.databases;
        let pending: Vec<_> = names
            .iter()
            .filter_map(|name| databases.get(name).map(|config| (name, config)))
            .map(|(name, config)| async move {
                (name.clone(), self.database.initialize(config, app_name).await)
            })
            .collect();
        let results = join_all(pending).await;

        for (name, result) in results {
            let Some(entry) = document.databases.get_mut(&name) else {
                continue;
            };
            entry.pool = settle(EntryKind::Database, &name, result, errors);
        }
    }

    fn init_services(&self, document: &mut ConfigDocument) {
        for entry in document.services.values_mut() {
            let client = self.http.build(&entry.merged.client);
            debug!(service = %entry.name, "http client built");
            entry.client = ResourceState::Ready(client);
        }
    }

    fn init_crawlers(&self, document: &mut ConfigDocument, errors: &mut ErrorAggregator) {
        let mut names: Vec<String> = document.crawlers.keys().cloned().collect();
        names.sort();

        for name in names {
            let Some(entry) = document.crawlers.get_mut(&name) else {
                continue;
            };
            let result = self
                .crawler
                .initialize(entry, &entry.merged.client, &document.app_name);
            entry.collector = settle(EntryKind::Crawler, &name, result, errors);
        }
    }
}

fn settle<H>(
    kind: EntryKind,
    name: &str,
    result: Result<H, ResourceError>,
    errors: &mut ErrorAggregator,
) -> ResourceState<H> {
    match result {
        Ok(handle) => {
            debug!(%kind, name, "resource ready");
            ResourceState::Ready(handle)
        }
        Err(source) => {
            warn!(%kind, name, error = %source, "resource failed to initialize");
            let err = Arc::new(InitError::new(kind, name, source));
            errors.push(ConfigError::Init(Arc::clone(&err)));
            ResourceState::Failed(err)
        }
    }
}
