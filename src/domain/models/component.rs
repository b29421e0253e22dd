use serde::Deserialize;

use super::setting::Setting;

/// Tunable settings bundle shared by downstream clients.
///
/// The same shape plays three roles: the application-wide defaults, an
/// entry's partial overrides, and the merged result computed per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentConfig {
    /// HTTP transport settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP client transport settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientConfig {
    /// Overall request timeout in seconds
    #[serde(default)]
    pub timeout: Setting<u64>,

    /// Idle connection timeout in seconds
    #[serde(default)]
    pub idle_conn_timeout: Setting<u64>,

    /// Idle connections kept per host
    #[serde(default, alias = "MaxIdleConsPerHost")]
    pub max_idle_conns_per_host: Setting<usize>,

    /// Concurrent in-flight requests allowed per client
    #[serde(default, alias = "MaxConsPerHost")]
    pub max_conns_per_host: Setting<usize>,

    /// Disable transparent response decompression
    #[serde(default)]
    pub disable_compression: Setting<bool>,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub insecure_skip_verify: Setting<bool>,
}
