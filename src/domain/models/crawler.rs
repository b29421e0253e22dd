use serde::Deserialize;
use std::collections::HashMap;

use super::component::ComponentConfig;
use super::named::Named;
use super::resource::ResourceState;
use super::setting::Setting;
use crate::infrastructure::crawler::Collector;

/// A named web-crawl collector entry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CrawlConfig {
    /// Lookup key within the crawlers collection
    pub name: String,

    #[serde(default, rename = "AppsJSONPath", alias = "AppsJsonPath")]
    pub apps_json_path: String,

    /// Dial timeout in seconds; required to build a collector
    #[serde(default)]
    pub timeout_seconds: Setting<u64>,

    /// Page loading timeout in seconds
    #[serde(default)]
    pub loading_timeout_seconds: Setting<u64>,

    #[serde(default, rename = "JSON", alias = "Json")]
    pub json: Setting<bool>,

    /// Maximum link depth (0 uses the collector default)
    #[serde(default)]
    pub max_depth: Setting<u32>,

    /// Maximum distinct URLs visited (0 means unlimited)
    #[serde(default)]
    pub max_visited_links: Setting<usize>,

    /// Fixed delay added before every request
    #[serde(default)]
    pub ms_delay_between_requests: Setting<u64>,

    #[serde(default)]
    pub user_agent: String,

    /// Entry-level component overrides
    #[serde(default, alias = "ComponentConfigOverrides")]
    pub component_configs: Option<ComponentConfig>,

    #[serde(skip)]
    pub(crate) merged: ComponentConfig,

    #[serde(skip)]
    pub(crate) collector: ResourceState<Collector>,
}

impl CrawlConfig {
    /// Create an entry with only its name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Effective component settings after the override merge
    pub const fn merged_components(&self) -> &ComponentConfig {
        &self.merged
    }

    /// The live collector or the recorded initialization error
    pub const fn collector(&self) -> &ResourceState<Collector> {
        &self.collector
    }
}

impl Named for CrawlConfig {
    const KIND: &'static str = "crawler";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Crawlers keyed by their declared name
pub type CrawlConfigMap = HashMap<String, CrawlConfig>;
