use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;

use super::component::ComponentConfig;
use super::named::Named;
use super::resource::ResourceState;
use super::setting::Setting;

/// Scheme selecting the structured Postgres connection path
pub const POSTGRES_SCHEME: &str = "postgres";

/// A named database entry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseConfig {
    /// Lookup key within the databases collection
    pub name: String,

    /// Database name on the server
    #[serde(default)]
    pub database: String,

    /// Informational host label
    #[serde(default)]
    pub host: String,

    /// Informational port
    #[serde(default)]
    pub port: Setting<u16>,

    /// `host[:port]` the pool connects to
    #[serde(default)]
    pub server: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Whether a password must be supplied through the environment
    #[serde(default)]
    pub auth_required: bool,

    /// Environment variable holding the password
    #[serde(default)]
    pub auth_environment_variable: String,

    /// Connection string used for non-`postgres` schemes.
    ///
    /// `{password}` and `{database}` placeholders are substituted.
    #[serde(default)]
    pub raw_connection_string: String,

    #[serde(default)]
    pub scheme: String,

    /// Pool size upper bound (0 leaves the driver default)
    #[serde(default)]
    pub max_connections: Setting<u32>,

    /// Connections kept open while idle
    #[serde(default)]
    pub max_idle_connections: Setting<u32>,

    /// Entry-level component overrides
    #[serde(default, alias = "ComponentConfigOverrides")]
    pub component_configs: Option<ComponentConfig>,

    #[serde(skip)]
    pub(crate) merged: ComponentConfig,

    #[serde(skip)]
    pub(crate) pool: ResourceState<PgPool>,
}

impl DatabaseConfig {
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

    /// The live pool or the recorded initialization error
    pub const fn pool(&self) -> &ResourceState<PgPool> {
        &self.pool
    }

    /// Whether the structured `postgres` connection path applies
    pub fn uses_postgres_scheme(&self) -> bool {
        self.scheme.eq_ignore_ascii_case(POSTGRES_SCHEME)
    }
}

impl Named for DatabaseConfig {
    const KIND: &'static str = "database";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Databases keyed by their declared name
pub type DatabaseConfigMap = HashMap<String, DatabaseConfig>;
