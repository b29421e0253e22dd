use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::errors::ResourceError;
use crate::domain::models::DatabaseConfig;
use crate::domain::ports::DatabaseInitializer;
use crate::infrastructure::logging::SecretScrubber;

const DEFAULT_PG_PORT: u16 = 5432;
/// Pool size sqlx uses when `max_connections` is never set
const DEFAULT_POOL_SIZE: u32 = 10;

/// How a pool is brought up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMode {
    /// Connect and ping before handing out the pool
    #[default]
    Eager,
    /// Build the pool without touching the network
    Lazy,
}

/// Credentials and target after auth mapping and validation
#[derive(Debug)]
pub struct ConnectionTarget {
    pub options: PgConnectOptions,
    /// Loggable description with secrets removed
    pub redacted: String,
}

/// Database connection pool initializer for Postgres entries
///
/// Builds a `PgPool` per database entry:
/// - Password from the environment when `AuthRequired` and none is inline
/// - `postgres` scheme: structured server/username/database fields
/// - any other scheme: `RawConnectionString` with placeholders substituted
/// - `application_name` set to the document's app name
#[derive(Debug, Clone)]
pub struct PostgresInitializer {
    mode: ConnectMode,
    connect_timeout: Duration,
    scrubber: SecretScrubber,
}

impl PostgresInitializer {
    pub fn new(mode: ConnectMode, connect_timeout: Duration) -> Self {
        Self {
            mode,
            connect_timeout,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Lazy initializer, used where no server is reachable
    pub fn lazy() -> Self {
        Self::new(ConnectMode::Lazy, Duration::from_secs(30))
    }

    pub const fn mode(&self) -> ConnectMode {
        self.mode
    }

    /// Map authentication, validate required fields and build options
    pub fn connection_target(
        &self,
        cfg: &DatabaseConfig,
        app_name: &str,
    ) -> Result<ConnectionTarget, ResourceError> {
        let password = resolve_password(cfg);
        validate(cfg, &password)?;

        let (options, redacted) = if cfg.uses_postgres_scheme() {
            let (host, port) = split_server(&cfg.server, cfg.port.value().copied())?;
            let options = PgConnectOptions::new()
                .host(host)
                .port(port)
                .username(&cfg.username)
                .password(&password)
                .database(&cfg.database);
            let redacted = format!(
                "postgres://{}:[REDACTED]@{host}:{port}/{}",
                cfg.username, cfg.database
            );
            (options, redacted)
        } else {
            let raw = cfg
                .raw_connection_string
                .replace("{password}", &password)
                .replace("{database}", &cfg.database);
            let redacted = self.scrubber.scrub_message(&raw);
            let options = PgConnectOptions::from_str(&raw).map_err(|err| {
                error!(conn = %redacted, error = %err, "invalid raw connection string");
                ResourceError::from(err)
            })?;
            (options, redacted)
        };

        let options = if app_name.is_empty() {
            options
        } else {
            options.application_name(app_name)
        };

        Ok(ConnectionTarget { options, redacted })
    }

    fn pool_options(&self, cfg: &DatabaseConfig) -> PgPoolOptions {
        let max = match cfg.max_connections.resolve("MaxConnections") {
            0 => DEFAULT_POOL_SIZE,
            max => max,
        };
        let idle = cfg.max_idle_connections.resolve("MaxIdleConnections").min(max);
        PgPoolOptions::new()
            .acquire_timeout(self.connect_timeout)
            .max_connections(max)
            .min_connections(idle)
    }
}

impl Default for PostgresInitializer {
    fn default() -> Self {
        Self::new(ConnectMode::Eager, Duration::from_secs(30))
    }
}

#[async_trait]
impl DatabaseInitializer for PostgresInitializer {
    async fn initialize(
        &self,
        config: &DatabaseConfig,
        app_name: &str,
    ) -> Result<PgPool, ResourceError> {
        let target = self.connection_target(config, app_name)?;
        let pool_options = self.pool_options(config);

        let pool = match self.mode {
            ConnectMode::Lazy => pool_options.connect_lazy_with(target.options),
            ConnectMode::Eager => {
                let secs = self.connect_timeout.as_secs();
                let pool = tokio::time::timeout(
                    self.connect_timeout,
                    pool_options.connect_with(target.options),
                )
                .await
                .map_err(|_| ResourceError::ConnectTimeout(secs))?
                .map_err(|err| {
                    error!(conn = %target.redacted, error = %err, "failed to establish connection pool");
                    ResourceError::from(err)
                })?;

                tokio::time::timeout(self.connect_timeout, sqlx::query("SELECT 1").execute(&pool))
                    .await
                    .map_err(|_| ResourceError::ConnectTimeout(secs))?
                    .map_err(|err| {
                        error!(conn = %target.redacted, error = %err, "unable to ping database");
                        ResourceError::from(err)
                    })?;
                pool
            }
        };

        info!(
            database = %config.database,
            conn = %target.redacted,
            mode = ?self.mode,
            "database pool ready"
        );
        Ok(pool)
    }
}

fn resolve_password(cfg: &DatabaseConfig) -> String {
    if cfg.password.is_empty() && cfg.auth_required && !cfg.auth_environment_variable.is_empty() {
        debug!(var = %cfg.auth_environment_variable, "reading database password from environment");
        return std::env::var(&cfg.auth_environment_variable).unwrap_or_default();
    }
    cfg.password.clone()
}

/// Collect every missing required field rather than stopping at the first
fn validate(cfg: &DatabaseConfig, password: &str) -> Result<(), ResourceError> {
    let mut missing = Vec::new();

    if cfg.uses_postgres_scheme() {
        if cfg.server.is_empty() {
            missing.push("Server");
        }
        if cfg.username.is_empty() {
            missing.push("Username");
        }
        if cfg.database.is_empty() {
            missing.push("Database");
        }
    } else if cfg.raw_connection_string.is_empty() {
        missing.push("RawConnectionString");
    }

    if cfg.auth_required && password.is_empty() {
        if cfg.auth_environment_variable.is_empty() {
            missing.push("AuthEnvironmentVariable");
        } else {
            missing.push("Password");
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ResourceError::MissingFields {
            component: "DatabaseConfig",
            fields: missing,
        })
    }
}

/// Split `host[:port]`; a port in the server string wins over the entry's.
///
/// IPv6 hosts are written `[addr]` or `[addr]:port`; a bare address with
/// several colons is taken as host only.
fn split_server(server: &str, port: Option<u16>) -> Result<(&str, u16), ResourceError> {
    let invalid = || ResourceError::InvalidSetting {
        field: "Server",
        value: server.to_string(),
    };
    let fallback = port.unwrap_or(DEFAULT_PG_PORT);

    if let Some(rest) = server.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        return match tail {
            "" => Ok((host, fallback)),
            _ => {
                let port_str = tail.strip_prefix(':').ok_or_else(invalid)?;
                Ok((host, port_str.parse().map_err(|_| invalid())?))
            }
        };
    }

    match server.split_once(':') {
        Some((host, port_str)) if !port_str.contains(':') => {
            Ok((host, port_str.parse().map_err(|_| invalid())?))
        }
        _ => Ok((server, fallback)),
    }
}
