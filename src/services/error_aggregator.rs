use std::fmt;
use tracing::error;

use crate::domain::errors::ConfigError;

/// Collects every non-fatal pipeline error instead of failing fast.
///
/// Each error is logged as it is recorded; the whole batch is handed back
/// to the caller, which decides whether any of it is fatal.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    errors: Vec<ConfigError>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ConfigError) {
        error!(error = %err, "config error");
        self.errors.push(err);
    }

    pub fn extend(&mut self, errs: impl IntoIterator<Item = ConfigError>) {
        for err in errs {
            self.push(err);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.errors
    }
}

impl fmt::Display for ErrorAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}
