//! Error kinds of the configuration build pipeline.

use std::sync::Arc;
use thiserror::Error;

use super::models::resource::EntryKind;

/// Errors surfaced while building or querying a configuration document.
///
/// `Read` and `Decode` abort a build. `Merge` and `Init` are collected by the
/// aggregator alongside a partially populated document. `NotFound` comes
/// from the lookup facade.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config source {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode config document: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("failed to merge component configs: {0}")]
    Merge(String),

    #[error(transparent)]
    Init(Arc<InitError>),

    #[error("{kind} config not found: {name}")]
    NotFound { kind: EntryKind, name: String },
}

impl ConfigError {
    pub fn not_found(kind: EntryKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether the error prevents a document from existing at all
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Decode(_))
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A single entry's initialization failure, tagged with kind and name
#[derive(Debug, Error)]
#[error("{kind} '{name}' failed to initialize: {source}")]
pub struct InitError {
    pub kind: EntryKind,
    pub name: String,
    #[source]
    pub source: ResourceError,
}

impl InitError {
    pub fn new(kind: EntryKind, name: impl Into<String>, source: ResourceError) -> Self {
        Self {
            kind,
            name: name.into(),
            source,
        }
    }
}

/// Failures reported by the resource initializers
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("component: {component} - missing required field(s): {}", fields.join(", "))]
    MissingFields {
        component: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("invalid value '{value}' for {field}")]
    InvalidSetting { field: &'static str, value: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("timed out after {0}s connecting to database")]
    ConnectTimeout(u64),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("crawl error: {0}")]
    Crawl(String),
}
