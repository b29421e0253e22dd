use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::InitError;

/// The three consumer collections of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Database,
    Service,
    Crawler,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Service => "service",
            Self::Crawler => "crawler",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle slot of a consumer entry.
///
/// Starts `Pending`; after fan-out it holds exactly one of a live handle or
/// the recorded error.
pub enum ResourceState<H> {
    Pending,
    Ready(H),
    Failed(Arc<InitError>),
}

impl<H> ResourceState<H> {
    pub const fn handle(&self) -> Option<&H> {
        match self {
            Self::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&InitError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Short status label for display
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

impl<H> Default for ResourceState<H> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<H: fmt::Debug> fmt::Debug for ResourceState<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Ready(handle) => f.debug_tuple("Ready").field(handle).finish(),
            Self::Failed(err) => f.debug_tuple("Failed").field(&err.to_string()).finish(),
        }
    }
}
