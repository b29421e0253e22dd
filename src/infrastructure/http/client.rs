use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::domain::models::ClientConfig;
use crate::domain::ports::HttpClientFactory;

/// Request timeout used when the merged settings leave it at zero
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Client settings after zero-value and fallback resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedClientSettings {
    pub timeout: Duration,
    /// `None` keeps idle connections indefinitely
    pub idle_conn_timeout: Option<Duration>,
    /// `None` leaves reqwest's default
    pub max_idle_conns_per_host: Option<usize>,
    /// `None` means unbounded; capped at `Semaphore::MAX_PERMITS`
    pub max_conns_per_host: Option<usize>,
    pub disable_compression: bool,
    pub insecure_skip_verify: bool,
}

impl ResolvedClientSettings {
    /// Resolve merged settings. Unset or malformed numbers become zero, and
    /// zero maps to the documented fallback of each field.
    pub fn from_config(cc: &ClientConfig) -> Self {
        let timeout = match cc.timeout.resolve("Timeout") {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs,
        };
        let idle = cc.idle_conn_timeout.resolve("IdleConnTimeout");
        let max_idle = cc.max_idle_conns_per_host.resolve("MaxIdleConnsPerHost");
        let max_conns = cc.max_conns_per_host.resolve("MaxConnsPerHost");

        Self {
            timeout: Duration::from_secs(timeout),
            idle_conn_timeout: (idle > 0).then(|| Duration::from_secs(idle)),
            max_idle_conns_per_host: (max_idle > 0).then_some(max_idle),
            max_conns_per_host: (max_conns > 0).then(|| max_conns.min(Semaphore::MAX_PERMITS)),
            disable_compression: cc.disable_compression.resolve("DisableCompression"),
            insecure_skip_verify: cc.insecure_skip_verify.resolve("InsecureSkipVerify"),
        }
    }
}

/// HTTP client handle attached to a service entry
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    settings: ResolvedClientSettings,
    in_flight: Option<Arc<Semaphore>>,
}

impl HttpClient {
    /// Build a client from merged settings.
    ///
    /// Falls back to a default client if the transport cannot be
    /// constructed, so a service entry always ends up with a handle.
    pub fn from_config(cc: &ClientConfig) -> Self {
        let settings = ResolvedClientSettings::from_config(cc);

        let mut builder = ReqwestClient::builder()
            .timeout(settings.timeout)
            .pool_idle_timeout(settings.idle_conn_timeout)
            .danger_accept_invalid_certs(settings.insecure_skip_verify);
        if let Some(max_idle) = settings.max_idle_conns_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }
        if settings.disable_compression {
            builder = builder.no_gzip();
        }

        let inner = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to build configured HTTP client, using defaults");
            ReqwestClient::default()
        });

        debug!(
            timeout_secs = settings.timeout.as_secs(),
            max_conns_per_host = ?settings.max_conns_per_host,
            "HTTP client built"
        );

        Self {
            inner,
            settings,
            in_flight: settings
                .max_conns_per_host
                .map(|limit| Arc::new(Semaphore::new(limit))),
        }
    }

    /// The underlying reqwest client
    pub const fn inner(&self) -> &ReqwestClient {
        &self.inner
    }

    pub const fn settings(&self) -> &ResolvedClientSettings {
        &self.settings
    }

    /// Wait for an in-flight request slot.
    ///
    /// Returns `None` when the client is unbounded. Hold the permit for the
    /// duration of the request.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        match &self.in_flight {
            Some(semaphore) => Arc::clone(semaphore).acquire_owned().await.ok(),
            None => None,
        }
    }

    /// Slots currently free, if bounded
    pub fn available_slots(&self) -> Option<usize> {
        self.in_flight.as_ref().map(|s| s.available_permits())
    }
}

/// Production HTTP client constructor
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestClientFactory;

impl HttpClientFactory for ReqwestClientFactory {
    fn build(&self, client: &ClientConfig) -> HttpClient {
        HttpClient::from_config(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Setting;

    #[test]
    fn test_unset_settings_use_fallbacks() {
        let settings = ResolvedClientSettings::from_config(&ClientConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.idle_conn_timeout, None);
        assert_eq!(settings.max_idle_conns_per_host, None);
        assert_eq!(settings.max_conns_per_host, None);
        assert!(!settings.disable_compression);
        assert!(!settings.insecure_skip_verify);
    }

    #[test]
    fn test_explicit_settings_resolve() {
        let cc = ClientConfig {
            timeout: Setting::Value(30),
            idle_conn_timeout: Setting::Value(90),
            max_idle_conns_per_host: Setting::Value(4),
            max_conns_per_host: Setting::Value(50),
            disable_compression: Setting::Value(true),
            insecure_skip_verify: Setting::Value(false),
        };
        let settings = ResolvedClientSettings::from_config(&cc);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.idle_conn_timeout, Some(Duration::from_secs(90)));
        assert_eq!(settings.max_idle_conns_per_host, Some(4));
        assert_eq!(settings.max_conns_per_host, Some(50));
        assert!(settings.disable_compression);
    }

    #[test]
    fn test_malformed_timeout_degrades_to_default() {
        let cc = ClientConfig {
            timeout: Setting::Malformed("soon".to_string()),
            max_conns_per_host: Setting::Malformed("many".to_string()),
            ..ClientConfig::default()
        };
        let settings = ResolvedClientSettings::from_config(&cc);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.max_conns_per_host, None);
    }

    #[tokio::test]
    async fn test_in_flight_slots_are_bounded() {
        let cc = ClientConfig {
            max_conns_per_host: Setting::Value(2),
            ..ClientConfig::default()
        };
        let client = ReqwestClientFactory.build(&cc);
        assert_eq!(client.available_slots(), Some(2));

        let first = client.acquire().await;
        assert!(first.is_some());
        assert_eq!(client.available_slots(), Some(1));
        drop(first);
        assert_eq!(client.available_slots(), Some(2));
    }

    #[tokio::test]
    async fn test_huge_conn_limit_is_capped() {
        let cc = ClientConfig {
            max_conns_per_host: Setting::Value(usize::MAX),
            ..ClientConfig::default()
        };
        let client = ReqwestClientFactory.build(&cc);
        assert_eq!(
            client.settings().max_conns_per_host,
            Some(Semaphore::MAX_PERMITS)
        );
        assert_eq!(client.available_slots(), Some(Semaphore::MAX_PERMITS));
        assert!(client.acquire().await.is_some());
    }

    #[tokio::test]
    async fn test_unbounded_client_has_no_permits() {
        let client = ReqwestClientFactory.build(&ClientConfig::default());
        assert!(client.acquire().await.is_none());
        assert_eq!(client.available_slots(), None);
    }
}
