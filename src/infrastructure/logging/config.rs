//! Logging section of the tool settings.
//!
//! Console logs always go to stderr so command output on stdout stays
//! machine readable. A file sink is opt-in and always written as JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `logging:` block of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Lowest level emitted unless `RUST_LOG` says otherwise
    #[serde(default = "default_level")]
    pub level: String,

    /// Console rendering
    #[serde(default)]
    pub format: LogFormat,

    /// Write to stderr at all
    #[serde(default = "default_console")]
    pub console: bool,

    /// Optional JSON log file
    #[serde(default)]
    pub file: Option<LogFile>,
}

/// Console rendering of log events
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// File sink; the file is named `appconf.log` inside `dir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    pub dir: PathBuf,

    /// A single run is short, so one file is kept unless asked otherwise
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Daily,
    Hourly,
    #[default]
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            console: default_console(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Quiet console plus a JSON file in `dir`
    pub fn file_only(level: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        Self {
            level: level.into(),
            console: false,
            file: Some(LogFile {
                dir: dir.as_ref().to_path_buf(),
                rotation: RotationPolicy::Never,
            }),
            ..Self::default()
        }
    }
}

// Build progress is debug/info; only problems reach the console by default.
fn default_level() -> String {
    "warn".to_string()
}

const fn default_console() -> bool {
    true
}
