use serde::Deserialize;
use std::fmt;

use super::component::ComponentConfig;
use super::crawler::{CrawlConfig, CrawlConfigMap};
use super::database::{DatabaseConfig, DatabaseConfigMap};
use super::named;
use super::resource::EntryKind;
use super::service::{ServiceConfig, ServiceConfigMap};
use super::setting::Setting;
use crate::domain::errors::ConfigError;

/// Fingerprint of the raw document bytes (lowercase hex SHA-256).
///
/// Attached for change detection by callers; never consulted internally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub(crate) const fn new(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of a decoded configuration document
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigDocument {
    #[serde(default)]
    pub app_name: String,

    #[serde(default)]
    pub env: String,

    #[serde(default)]
    pub port: Setting<u16>,

    /// Application-wide component defaults
    #[serde(default)]
    pub component_configs: ComponentConfig,

    #[serde(default, alias = "DatabaseConfigs", deserialize_with = "named::deserialize")]
    pub databases: DatabaseConfigMap,

    #[serde(default, alias = "ServiceConfigs", deserialize_with = "named::deserialize")]
    pub services: ServiceConfigMap,

    #[serde(default, alias = "CrawlerConfigs", deserialize_with = "named::deserialize")]
    pub crawlers: CrawlConfigMap,

    #[serde(skip)]
    pub hash: ContentHash,
}

/// A borrowed entry of any kind, as returned by [`ConfigDocument::lookup`]
#[derive(Debug, Clone, Copy)]
pub enum EntryRef<'a> {
    Database(&'a DatabaseConfig),
    Service(&'a ServiceConfig),
    Crawler(&'a CrawlConfig),
}

impl EntryRef<'_> {
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Database(_) => EntryKind::Database,
            Self::Service(_) => EntryKind::Service,
            Self::Crawler(_) => EntryKind::Crawler,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Database(entry) => &entry.name,
            Self::Service(entry) => &entry.name,
            Self::Crawler(entry) => &entry.name,
        }
    }
}

impl ConfigDocument {
    pub fn database(&self, name: &str) -> Result<&DatabaseConfig, ConfigError> {
        self.databases
            .get(name)
            .ok_or_else(|| ConfigError::not_found(EntryKind::Database, name))
    }

    pub fn service(&self, name: &str) -> Result<&ServiceConfig, ConfigError> {
        self.services
            .get(name)
            .ok_or_else(|| ConfigError::not_found(EntryKind::Service, name))
    }

    pub fn crawler(&self, name: &str) -> Result<&CrawlConfig, ConfigError> {
        self.crawlers
            .get(name)
            .ok_or_else(|| ConfigError::not_found(EntryKind::Crawler, name))
    }

    /// Look up an entry by collection and name
    pub fn lookup(&self, kind: EntryKind, name: &str) -> Result<EntryRef<'_>, ConfigError> {
        match kind {
            EntryKind::Database => self.database(name).map(EntryRef::Database),
            EntryKind::Service => self.service(name).map(EntryRef::Service),
            EntryKind::Crawler => self.crawler(name).map(EntryRef::Crawler),
        }
    }

    /// Every entry, ordered by kind then name
    pub fn entries(&self) -> Vec<EntryRef<'_>> {
        let mut entries: Vec<EntryRef<'_>> = self
            .databases
            .values()
            .map(EntryRef::Database)
            .chain(self.services.values().map(EntryRef::Service))
            .chain(self.crawlers.values().map(EntryRef::Crawler))
            .collect();
        entries.sort_by(|a, b| a.kind().cmp(&b.kind()).then_with(|| a.name().cmp(b.name())));
        entries
    }

    pub fn entry_count(&self) -> usize {
        self.databases.len() + self.services.len() + self.crawlers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ConfigDocument {
        let mut doc = ConfigDocument::default();
        doc.databases.insert("main".into(), DatabaseConfig::named("main"));
        doc.services.insert("billing".into(), ServiceConfig::named("billing"));
        doc.crawlers.insert("news".into(), CrawlConfig::named("news"));
        doc
    }

    #[test]
    fn test_lookup_hits_each_collection() {
        let doc = document();
        assert_eq!(doc.database("main").unwrap().name, "main");
        assert_eq!(doc.service("billing").unwrap().name, "billing");
        assert_eq!(doc.crawler("news").unwrap().name, "news");

        let entry = doc.lookup(EntryKind::Service, "billing").unwrap();
        assert_eq!(entry.kind(), EntryKind::Service);
        assert_eq!(entry.name(), "billing");
    }

    #[test]
    fn test_lookup_miss_names_collection_and_key() {
        let doc = document();
        let err = doc.crawler("sports").unwrap_err();
        match &err {
            ConfigError::NotFound { kind, name } => {
                assert_eq!(*kind, EntryKind::Crawler);
                assert_eq!(name, "sports");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(err.to_string(), "crawler config not found: sports");
    }

    #[test]
    fn test_lookup_does_not_cross_collections() {
        let doc = document();
        assert!(doc.lookup(EntryKind::Database, "billing").is_err());
    }

    #[test]
    fn test_entries_sorted_by_kind_then_name() {
        let mut doc = document();
        doc.databases.insert("audit".into(), DatabaseConfig::named("audit"));
        let names: Vec<_> = doc.entries().iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["audit", "main", "billing", "news"]);
        assert_eq!(doc.entry_count(), 4);
    }
}
