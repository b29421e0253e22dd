use serde::Deserialize;
use std::collections::HashMap;

use super::component::ComponentConfig;
use super::named::{self, Named};
use super::resource::ResourceState;
use crate::infrastructure::http::HttpClient;

/// A named downstream HTTP service
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceConfig {
    /// Lookup key within the services collection
    pub name: String,

    /// Base URL of the service
    #[serde(default, rename = "URL", alias = "Url")]
    pub url: String,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_environment_variable: String,

    /// Environment variable holding the public key
    #[serde(default)]
    pub public_key_environment_variable: String,

    /// Entry-level component overrides
    #[serde(default, alias = "ComponentConfigOverrides")]
    pub component_configs: Option<ComponentConfig>,

    /// Endpoints keyed by their declared name
    #[serde(default, deserialize_with = "named::deserialize")]
    pub endpoints: EndpointMap,

    #[serde(skip)]
    pub(crate) merged: ComponentConfig,

    #[serde(skip)]
    pub(crate) client: ResourceState<HttpClient>,
}

impl ServiceConfig {
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

    /// The HTTP client built from the merged settings
    pub const fn client(&self) -> &ResourceState<HttpClient> {
        &self.client
    }

    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    /// Base URL joined with the named endpoint's path
    pub fn endpoint_url(&self, name: &str) -> Option<String> {
        self.endpoint(name).map(|endpoint| {
            format!(
                "{}/{}",
                self.url.trim_end_matches('/'),
                endpoint.path.trim_start_matches('/')
            )
        })
    }

    /// API key read from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        read_env(&self.api_key_environment_variable)
    }

    /// Public key read from the configured environment variable
    pub fn public_key(&self) -> Option<String> {
        read_env(&self.public_key_environment_variable)
    }
}

fn read_env(var: &str) -> Option<String> {
    if var.is_empty() {
        return None;
    }
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

impl Named for ServiceConfig {
    const KIND: &'static str = "service";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named path under a service's base URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Endpoint {
    pub name: String,
    #[serde(default)]
    pub path: String,
}

impl Named for Endpoint {
    const KIND: &'static str = "endpoint";

    fn name(&self) -> &str {
        &self.name
    }
}

pub type EndpointMap = HashMap<String, Endpoint>;

/// Services keyed by their declared name
pub type ServiceConfigMap = HashMap<String, ServiceConfig>;
