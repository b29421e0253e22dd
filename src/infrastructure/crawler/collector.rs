use rand::Rng;
use reqwest::Client as ReqwestClient;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument};

use crate::domain::errors::ResourceError;
use crate::domain::models::{ClientConfig, CrawlConfig, Setting};
use crate::domain::ports::CrawlerInitializer;

const DEFAULT_MAX_DEPTH: u32 = 2;
const DEFAULT_PARALLELISM: usize = 6;
const DEFAULT_RANDOM_DELAY: Duration = Duration::from_secs(1);
const TCP_KEEPALIVE: Duration = Duration::from_secs(180);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const POOL_MAX_IDLE: usize = 100;

/// Errors from a single visit
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("already visited: {0}")]
    AlreadyVisited(String),

    #[error("depth {depth} exceeds max depth {max}")]
    DepthExceeded { depth: u32, max: u32 },

    #[error("visit limit of {0} links reached")]
    VisitLimitReached(usize),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Politeness and scope limits of a collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    pub max_depth: u32,
    pub parallelism: usize,
    /// Upper bound of the random jitter added before each request
    pub random_delay: Duration,
    /// Fixed delay added before each request
    pub fixed_delay: Duration,
    /// `None` means unlimited
    pub max_visited_links: Option<usize>,
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallelism: DEFAULT_PARALLELISM,
            random_delay: DEFAULT_RANDOM_DELAY,
            fixed_delay: Duration::ZERO,
            max_visited_links: None,
        }
    }
}

impl CrawlLimits {
    /// Limits declared on a crawler entry; zero values keep the defaults
    pub fn from_config(cfg: &CrawlConfig) -> Self {
        let max_depth = match cfg.max_depth.resolve("MaxDepth") {
            0 => DEFAULT_MAX_DEPTH,
            depth => depth,
        };
        let max_visited = cfg.max_visited_links.resolve("MaxVisitedLinks");
        Self {
            max_depth,
            fixed_delay: Duration::from_millis(
                cfg.ms_delay_between_requests.resolve("MsDelayBetweenRequests"),
            ),
            max_visited_links: (max_visited > 0).then_some(max_visited),
            ..Self::default()
        }
    }
}

/// Fetched page
#[derive(Debug, Clone)]
pub struct CrawlResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Crawl collector handle attached to a crawler entry.
///
/// Clones share the visited set and the parallelism budget.
#[derive(Debug, Clone)]
pub struct Collector {
    client: ReqwestClient,
    user_agent: String,
    limits: CrawlLimits,
    loading_timeout: Option<Duration>,
    permits: Arc<Semaphore>,
    visited: Arc<Mutex<HashSet<String>>>,
}

impl Collector {
    pub fn new(client: ReqwestClient, user_agent: impl Into<String>, limits: CrawlLimits) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
            permits: Arc::new(Semaphore::new(limits.parallelism.max(1))),
            limits,
            loading_timeout: None,
            visited: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Bound the time spent waiting for a page to load
    #[must_use]
    pub const fn with_loading_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.loading_timeout = timeout;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub const fn limits(&self) -> &CrawlLimits {
        &self.limits
    }

    pub fn visited_count(&self) -> usize {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Fetch `url` found at link depth `depth`.
    ///
    /// Each URL is fetched at most once per collector.
    #[instrument(skip(self), fields(user_agent = %self.user_agent))]
    pub async fn visit(&self, url: &str, depth: u32) -> Result<CrawlResponse, CrawlError> {
        if depth > self.limits.max_depth {
            return Err(CrawlError::DepthExceeded {
                depth,
                max: self.limits.max_depth,
            });
        }
        self.mark_visited(url)?;

        let _permit = self.permits.acquire().await.ok();
        let delay = self.limits.fixed_delay + self.jitter();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        info!(url, "visiting");
        let mut request = self.client.get(url);
        if let Some(timeout) = self.loading_timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(url, error = %err, "crawl request failed");
                return Err(err.into());
            }
        };
        let status = response.status().as_u16();
        info!(url, status, "response received");

        let body = response.text().await.map_err(|err| {
            error!(url, status, error = %err, "failed to read response body");
            CrawlError::from(err)
        })?;

        Ok(CrawlResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    fn mark_visited(&self, url: &str) -> Result<(), CrawlError> {
        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        if visited.contains(url) {
            return Err(CrawlError::AlreadyVisited(url.to_string()));
        }
        if let Some(limit) = self.limits.max_visited_links {
            if visited.len() >= limit {
                return Err(CrawlError::VisitLimitReached(limit));
            }
        }
        visited.insert(url.to_string());
        Ok(())
    }

    fn jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.limits.random_delay.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}

/// Production crawler initializer
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectorInitializer;

impl CrawlerInitializer for CollectorInitializer {
    fn initialize(
        &self,
        config: &CrawlConfig,
        client: &ClientConfig,
        app_name: &str,
    ) -> Result<Collector, ResourceError> {
        let timeout = match &config.timeout_seconds {
            Setting::Value(secs) => Duration::from_secs(*secs),
            Setting::Unset => {
                return Err(ResourceError::MissingFields {
                    component: "CrawlConfig",
                    fields: vec!["TimeoutSeconds"],
                })
            }
            Setting::Malformed(raw) => {
                return Err(ResourceError::InvalidSetting {
                    field: "TimeoutSeconds",
                    value: raw.clone(),
                })
            }
        };

        let user_agent = if config.user_agent.is_empty() {
            format!("{app_name}-crawler")
        } else {
            config.user_agent.clone()
        };

        let max_idle = match client.max_idle_conns_per_host.resolve("MaxIdleConnsPerHost") {
            0 => POOL_MAX_IDLE,
            n => n,
        };

        let mut builder = ReqwestClient::builder()
            .connect_timeout(timeout)
            .tcp_keepalive(TCP_KEEPALIVE)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(max_idle)
            .danger_accept_invalid_certs(true)
            .user_agent(user_agent.clone());
        if client.disable_compression.resolve("DisableCompression") {
            builder = builder.no_gzip();
        }
        let http = builder.build()?;

        let loading_timeout = match config.loading_timeout_seconds.resolve("LoadingTimeoutSeconds") {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Collector::new(http, user_agent, CrawlLimits::from_config(config))
            .with_loading_timeout(loading_timeout))
    }
}
