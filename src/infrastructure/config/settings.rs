use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::database::{ConnectMode, PostgresInitializer};
use crate::infrastructure::logging::LogConfig;

/// Settings of the build tool itself, distinct from the document it builds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// How database entries are brought up
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// Database initializer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseSettings {
    /// eager or lazy
    #[serde(default)]
    pub connect_mode: ConnectMode,

    /// Upper bound on connecting and pinging each database
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

const fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            connect_mode: ConnectMode::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseSettings {
    pub fn initializer(&self) -> PostgresInitializer {
        PostgresInitializer::new(
            self.connect_mode,
            Duration::from_secs(self.connect_timeout_secs),
        )
    }
}
